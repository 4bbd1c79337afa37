//! UART drivers.

pub mod vega;

pub use vega::VegaUart;

/// Character-level serial capability.
///
/// The console subsystem drives any registered implementation through
/// this trait. Blocking operations busy-wait with no timeout and no
/// yield, which is acceptable only for a single-owner boot console;
/// callers needing mutual exclusion wrap the channel in a lock.
pub trait SerialChannel: Send {
    /// Block until FIFO space is available, then queue `ch`.
    fn put_char(&mut self, ch: u8);

    /// Block until a byte arrives, then return it.
    fn get_char(&mut self) -> u8;

    /// Non-blocking receive check.
    fn has_rx_data(&self) -> bool;

    /// Block until the transmit path has fully drained.
    fn flush(&mut self);
}
