//! Board-family configuration constants.
//!
//! Values here hold for every Vega flavor; per-board numbers live in
//! `platform/<board>/config.rs`.

/// Smallest reserved (trusted) DRAM carve-out any Vega board may ship.
pub const MIN_RESERVED_SIZE: usize = 4 * 1024 * 1024; // 4MB

/// Smallest shared (world-visible) region the trusted side will accept.
pub const MIN_SHARED_SIZE: usize = 2 * 1024 * 1024; // 2MB

/// Offset of the kernel direct map; physical DRAM and device windows are
/// reachable at `paddr + PHYS_VIRT_OFFSET` once the consuming kernel has
/// its translation tables up.
pub const PHYS_VIRT_OFFSET: usize = 0xffff_0000_0000_0000;
