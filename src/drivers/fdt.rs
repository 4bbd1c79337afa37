//! Device-tree handling and console discovery.
//!
//! Boards that ship a hardware description can instantiate the console
//! driver from it instead of the static board config. The only
//! recoverable error in the crate lives here: a register window whose
//! size does not match the peripheral's fixed window means the
//! description is not actually describing a Vega UART, and the image
//! simply continues without that console instance.

use alloc::boxed::Box;
use anyhow::{Context, ensure};
use flat_device_tree::Fdt;
use lazyinit::LazyInit;
use memory_addr::pa;

use crate::HalResult;
use crate::drivers::uart::vega::{COMPATIBLE, UART_REG_SIZE, VegaUart};
use crate::mm::phys_to_virt;
use crate::sync::Mutex;

static FDT_DATA: LazyInit<Mutex<Fdt<'static>>> = LazyInit::new();

/// Parse and stash the device tree handed over by the boot stage.
pub fn fdt_init(fdt: usize) -> HalResult<()> {
    let fdt = unsafe { Fdt::from_ptr(fdt as *const u8) }
        .map_err(|e| anyhow::anyhow!("invalid device tree blob: {e}"))?;
    FDT_DATA.init_once(Mutex::new(fdt));
    Ok(())
}

pub fn get_fdt() -> &'static Mutex<Fdt<'static>> {
    FDT_DATA.get().expect("FDT not initialized")
}

/// A discovered register window must exactly match the fixed size for
/// this peripheral type; anything else is a misdescribed device.
fn check_reg_window(size: usize) -> HalResult<()> {
    ensure!(
        size == UART_REG_SIZE,
        "unexpected uart register window size {size:#x} (need {UART_REG_SIZE:#x})"
    );
    Ok(())
}

/// Instantiate a console driver from the device tree.
///
/// Allocates a fresh descriptor and initializes it with a zero baud
/// rate, inheriting whatever clock configuration firmware already set up
/// for the channel.
pub fn probe_console_uart() -> HalResult<Box<VegaUart>> {
    let fdt = get_fdt().lock();
    let node = fdt
        .find_compatible(COMPATIBLE)
        .context("no compatible uart node in the device tree")?;
    let reg = node
        .reg()
        .next()
        .context("uart node carries no reg entry")?;
    check_reg_window(reg.size.unwrap_or(0))?;

    let base = phys_to_virt(pa!(reg.starting_address as usize));
    let mut uart = Box::new(unsafe { VegaUart::new(base.as_usize()) });
    uart.init(0, 0);
    Ok(uart)
}

/// Release a descriptor from [`probe_console_uart`]. Hardware state is
/// left as-is; the next owner re-runs init.
pub fn release_console_uart(uart: Box<VegaUart>) {
    drop(uart);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reg_window_must_match_exactly() {
        assert!(check_reg_window(UART_REG_SIZE).is_ok());

        let err = check_reg_window(0x1000).unwrap_err();
        let msg = format!("{err}");
        assert!(msg.contains("0x1000"));
        assert!(msg.contains("0x100"));
    }
}
