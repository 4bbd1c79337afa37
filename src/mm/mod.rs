//! Memory management module.
//!
//! This module derives the secure/non-secure DRAM partition layout from
//! board constants and hands the result to the consuming kernel's
//! memory-protection setup. It never maps anything itself.

pub mod addr;
pub mod layout;

pub use addr::{phys_to_virt, virt_to_phys};
pub use layout::{LayoutError, MemAttr, MemoryLayout, Region};

use memory_addr::pa;

use crate::platform::board::BoardConfig;

/// The kernel's "register a physical memory range" call, seen from this
/// side of the seam. Implemented by memory-protection setup; a mock
/// implementation serves the tests.
pub trait MemoryRegistrar {
    fn register(&mut self, region: Region, attr: MemAttr);
}

/// Walk every derived region past the registrar, then the console UART
/// register window. Invoked once, before multi-core bring-up.
pub fn register_board_memory<R: MemoryRegistrar>(
    registrar: &mut R,
    board: &BoardConfig,
    layout: &MemoryLayout,
) {
    for (region, attr) in layout.regions() {
        registrar.register(region, attr);
    }
    registrar.register(
        Region::new(pa!(board.console.base), crate::drivers::uart::vega::UART_REG_SIZE),
        MemAttr::SECURE | MemAttr::DEVICE,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::vega520;

    struct RecordingRegistrar(Vec<(Region, MemAttr)>);

    impl MemoryRegistrar for RecordingRegistrar {
        fn register(&mut self, region: Region, attr: MemAttr) {
            self.0.push((region, attr));
        }
    }

    #[test]
    fn registers_five_regions_and_the_uart_window() {
        let board = &vega520::CONFIG;
        let layout = MemoryLayout::plan(board).unwrap();
        let mut registrar = RecordingRegistrar(Vec::new());

        register_board_memory(&mut registrar, board, &layout);

        assert_eq!(registrar.0.len(), 6);

        let (uart, uart_attr) = registrar.0.last().copied().unwrap();
        assert_eq!(uart.base.as_usize(), board.console.base);
        assert_eq!(uart.size, crate::drivers::uart::vega::UART_REG_SIZE);
        assert_eq!(uart_attr, MemAttr::SECURE | MemAttr::DEVICE);

        // Every DRAM region is registered exactly once, devices aside.
        let dram_total: usize = registrar.0[..5].iter().map(|(r, _)| r.size).sum();
        assert_eq!(dram_total, board.dram_size - layout.unused_dram_size());
    }
}
