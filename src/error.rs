//! Unified error handling for the adaptation layer.
//!
//! This crate uses anyhow in a no_std environment. The only recoverable
//! runtime failure lives on the device-discovery path; everything else is
//! either infallible by construction or rejected at build time by the
//! memory layout planner (see [`crate::mm::layout::LayoutError`]).
//!
//! Creating errors:
//! ```ignore
//! anyhow::bail!("console probe failed: {}", reason);
//! ```
//!
//! Ensuring conditions:
//! ```ignore
//! anyhow::ensure!(size == expected, "bad register window: {size:#x}");
//! ```

/// Result type alias using anyhow::Error.
pub type HalResult<T> = anyhow::Result<T>;
