//! Vega 530 board configuration.

use crate::platform::board::{BoardConfig, UartConfig};

pub const BOARD_NAME: &str = "Vega 530";

/// Vega 530 board constants. Unlike the 520, the trusted carve-out sits
/// at an address fixed by the boot ROM rather than at an offset from the
/// DRAM base.
pub const DRAM_BASE: usize = 0x9100_0000;
pub const DRAM_SIZE: usize = 0x1F00_0000; // 496MB
pub const RESERVED_BASE: usize = 0xA800_0000;
pub const RESERVED_SIZE: usize = 0x03F0_0000; // 63MB
pub const FACTORY_SIZE: usize = 0x0400_0000; // 64MB at the top of DRAM
pub const SECURE_CODE_SIZE: usize = 0x0010_0000; // 1MB
pub const SHARED_SIZE: usize = 0x0020_0000; // 2MB

/// Debug console on the fourth S-series UART channel (no dma, no modem).
pub const UART_PADDR: usize = 0xC00A_3000;
pub const UART_CLOCK_HZ: u32 = 50_000_000;
pub const CONSOLE_BAUD_RATE: u32 = 115_200;

pub const CONFIG: BoardConfig = BoardConfig {
    name: BOARD_NAME,
    num_cores: 4,
    dram_base: DRAM_BASE,
    dram_size: DRAM_SIZE,
    reserved_base: RESERVED_BASE,
    reserved_size: RESERVED_SIZE,
    factory_size: FACTORY_SIZE,
    secure_code_size: SECURE_CODE_SIZE,
    shared_size: SHARED_SIZE,
    sram: None,
    console: UartConfig {
        base: UART_PADDR,
        clock_hz: UART_CLOCK_HZ,
        baud_rate: CONSOLE_BAUD_RATE,
    },
};
