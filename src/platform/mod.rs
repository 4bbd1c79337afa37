//! Platform module - Board-specific configuration and support.
//!
//! Board differences are data: each flavor contributes a `BoardConfig`
//! constant plus the layout derived from it, and the generic bring-up
//! path below consumes whichever flavor the build selected.

pub mod board;
pub mod vega520;
pub mod vega530;

use alloc::boxed::Box;
use memory_addr::pa;

use crate::console;
use crate::drivers::uart::VegaUart;
use crate::mm::phys_to_virt;

// Select the current board based on compile-time features
#[cfg(feature = "vega530")]
pub use vega530::{CONFIG as BOARD_CONFIG, LAYOUT as MEMORY_LAYOUT};

// Default to the Vega 520 if no other flavor is selected
#[cfg(not(feature = "vega530"))]
pub use vega520::{CONFIG as BOARD_CONFIG, LAYOUT as MEMORY_LAYOUT};

/// Bring up the boot console described by the current board's config and
/// register it with the console subsystem.
pub fn init_console() {
    let cfg = &BOARD_CONFIG.console;
    let base = phys_to_virt(pa!(cfg.base));
    let mut uart = unsafe { VegaUart::new(base.as_usize()) };
    uart.init(cfg.clock_hz, cfg.baud_rate);
    console::register_console(Box::new(uart));
}

/// Log the derived memory layout, one line per region.
pub fn print_banner() {
    let board = &BOARD_CONFIG;
    let layout = &MEMORY_LAYOUT;

    info!("{} ({} cores)", board.name, board.num_cores);
    info!(
        "dram:         {:#010x} size {:#010x}",
        board.dram_base, board.dram_size
    );
    info!(
        "nsec:         {:#010x} size {:#010x}",
        layout.nsec.base.as_usize(),
        layout.nsec.size
    );
    info!(
        "secure code:  {:#010x} size {:#010x}",
        layout.secure_code.base.as_usize(),
        layout.secure_code.size
    );
    info!(
        "trusted apps: {:#010x} size {:#010x}",
        layout.trusted_app.base.as_usize(),
        layout.trusted_app.size
    );
    info!(
        "shared:       {:#010x} size {:#010x}",
        layout.shared.base.as_usize(),
        layout.shared.size
    );
    info!(
        "factory:      {:#010x} size {:#010x}",
        layout.factory.base.as_usize(),
        layout.factory.size
    );
    info!("tee load address: {:#010x}", layout.tee_load_addr().as_usize());
}
