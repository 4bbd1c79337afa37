//! Board description types.
//!
//! A board is a value, not a module of control flow: each flavor fills in
//! a [`BoardConfig`] constant and everything downstream (layout planning,
//! console bring-up, memory registration) is generic over it.

/// Console UART description: where the peripheral lives and how to clock it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UartConfig {
    /// Physical base of the register window.
    pub base: usize,
    /// Input clock in Hz.
    pub clock_hz: u32,
    /// Desired rate; zero keeps whatever rate firmware configured.
    pub baud_rate: u32,
}

/// On-chip scratch RAM extent. No Vega board has one; the field exists so
/// the planner can reject configurations that claim otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SramRegion {
    pub base: usize,
    pub size: usize,
}

/// Board-specific configuration, fully determined at build time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardConfig {
    /// Board name.
    pub name: &'static str,
    /// Number of cores brought up by the trusted kernel.
    pub num_cores: usize,
    /// Physical extent of all DRAM on the board.
    pub dram_base: usize,
    pub dram_size: usize,
    /// Absolute start of the trusted carve-out. Flavors that think in
    /// "non-secure offset" terms compute this as DRAM base plus offset in
    /// their own config.
    pub reserved_base: usize,
    pub reserved_size: usize,
    /// Untrusted tail of DRAM holding factory and boot data.
    pub factory_size: usize,
    /// Fixed extent of the trusted kernel's own code and data.
    pub secure_code_size: usize,
    /// Fixed extent of the world-shared buffer.
    pub shared_size: usize,
    pub sram: Option<SramRegion>,
    /// The one UART wired up as the boot console.
    pub console: UartConfig,
}
