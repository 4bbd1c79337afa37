//! Synchronization primitives.

mod spin;

pub use spin::{Mutex, RawSpinLock};
