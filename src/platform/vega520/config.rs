//! Vega 520 board configuration.

use crate::platform::board::{BoardConfig, UartConfig};

pub const BOARD_NAME: &str = "Vega 520";

/// Vega 520 board constants. 512MB of DRAM; the low 368MB stay with the
/// normal world and the trusted carve-out starts right above them.
pub const DRAM_BASE: usize = 0x4000_0000;
pub const DRAM_SIZE: usize = 0x2000_0000; // 512MB
pub const NSEC_DRAM_SIZE: usize = 0x1700_0000; // 368MB
pub const RESERVED_SIZE: usize = 0x0150_0000; // 21MB
pub const FACTORY_SIZE: usize = 0x0400_0000; // 64MB at the top of DRAM
pub const SECURE_CODE_SIZE: usize = 0x0010_0000; // 1MB
pub const SHARED_SIZE: usize = 0x0040_0000; // 4MB

/// Debug console on the third S-series UART channel.
pub const UART_PADDR: usize = 0x1382_0000;
pub const UART_CLOCK_HZ: u32 = 50_000_000;
pub const CONSOLE_BAUD_RATE: u32 = 115_200;

pub const CONFIG: BoardConfig = BoardConfig {
    name: BOARD_NAME,
    num_cores: 2,
    dram_base: DRAM_BASE,
    dram_size: DRAM_SIZE,
    reserved_base: DRAM_BASE + NSEC_DRAM_SIZE,
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
