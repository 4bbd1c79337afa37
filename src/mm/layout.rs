//! Secure/non-secure DRAM partition planner.
//!
//! The trusted carve-out of every Vega board splits into three contiguous
//! regions: secure code first at the reserved base, trusted-application
//! storage in the middle, the world-shared buffer last. Secure-code and
//! shared sizes are fixed platform constants; trusted-application storage
//! absorbs whatever is left.
//!
//! Planning runs once, at build time, over `BoardConfig` constants. An
//! invalid configuration is a compile error inside [`MemoryLayout::build`]
//! and can never reach a bootable image; the `Result`-returning
//! [`MemoryLayout::plan`] exists so tests and tooling can observe the
//! failure with concrete numbers.

use core::fmt;

use bitflags::bitflags;
use memory_addr::{PhysAddr, pa};

use crate::config::{MIN_RESERVED_SIZE, MIN_SHARED_SIZE};
use crate::platform::board::BoardConfig;

/// One derived physical region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub base: PhysAddr,
    pub size: usize,
}

impl Region {
    pub const fn new(base: PhysAddr, size: usize) -> Self {
        Self { base, size }
    }

    /// First address past the region.
    pub const fn end(&self) -> PhysAddr {
        PhysAddr::from_usize(self.base.as_usize() + self.size)
    }
}

bitflags! {
    /// Attribute a region is registered with.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct MemAttr: u32 {
        const SECURE = 1 << 0;
        const NONSECURE = 1 << 1;
        const DEVICE = 1 << 2;
        /// Visible to both worlds.
        const SHARED = Self::SECURE.bits() | Self::NONSECURE.bits();
    }
}

/// A rejected board configuration, carrying the numbers that broke it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutError {
    ReservedTooSmall {
        size: usize,
        min: usize,
    },
    SharedTooSmall {
        size: usize,
        min: usize,
    },
    NoRoomForTrustedApps {
        reserved: usize,
        secure_code: usize,
        shared: usize,
    },
    ReservedOutsideDram {
        reserved_base: usize,
        reserved_size: usize,
        factory_size: usize,
        dram_base: usize,
        dram_size: usize,
    },
    UnexpectedSram {
        base: usize,
        size: usize,
    },
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::ReservedTooSmall { size, min } => {
                write!(
                    f,
                    "reserved region too small: {size:#x} bytes, family minimum is {min:#x}"
                )
            }
            Self::SharedTooSmall { size, min } => {
                write!(
                    f,
                    "shared region too small: {size:#x} bytes, family minimum is {min:#x}"
                )
            }
            Self::NoRoomForTrustedApps {
                reserved,
                secure_code,
                shared,
            } => {
                write!(
                    f,
                    "no room for trusted applications: reserved {reserved:#x} covers no more \
                     than secure code {secure_code:#x} plus shared {shared:#x}"
                )
            }
            Self::ReservedOutsideDram {
                reserved_base,
                reserved_size,
                factory_size,
                dram_base,
                dram_size,
            } => {
                write!(
                    f,
                    "reserved region {reserved_base:#x}+{reserved_size:#x} with factory tail \
                     {factory_size:#x} does not fit in dram {dram_base:#x}+{dram_size:#x}"
                )
            }
            Self::UnexpectedSram { base, size } => {
                write!(
                    f,
                    "scratch ram configured at {base:#x}+{size:#x}, but this board family has none"
                )
            }
        }
    }
}

impl core::error::Error for LayoutError {}

/// The derived partition layout. Immutable for the lifetime of the
/// system; memory-protection setup reads it exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoryLayout {
    /// Normal-world DRAM below the trusted carve-out.
    pub nsec: Region,
    /// Trusted kernel code and data, always first in the carve-out.
    pub secure_code: Region,
    /// Trusted-application storage, sized with whatever the fixed regions
    /// leave over.
    pub trusted_app: Region,
    /// World-shared buffer, last in the carve-out.
    pub shared: Region,
    /// Untrusted factory/boot data at the top of DRAM.
    pub factory: Region,
}

impl MemoryLayout {
    /// Derive the partition layout, or report which invariant the
    /// configuration violates.
    pub const fn plan(cfg: &BoardConfig) -> Result<Self, LayoutError> {
        if let Some(sram) = cfg.sram {
            return Err(LayoutError::UnexpectedSram {
                base: sram.base,
                size: sram.size,
            });
        }
        if cfg.reserved_size < MIN_RESERVED_SIZE {
            return Err(LayoutError::ReservedTooSmall {
                size: cfg.reserved_size,
                min: MIN_RESERVED_SIZE,
            });
        }
        if cfg.shared_size < MIN_SHARED_SIZE {
            return Err(LayoutError::SharedTooSmall {
                size: cfg.shared_size,
                min: MIN_SHARED_SIZE,
            });
        }
        if cfg.reserved_size <= cfg.secure_code_size + cfg.shared_size {
            return Err(LayoutError::NoRoomForTrustedApps {
                reserved: cfg.reserved_size,
                secure_code: cfg.secure_code_size,
                shared: cfg.shared_size,
            });
        }
        // The carve-out and the factory tail must both fit inside DRAM,
        // whether the flavor fixes the reserved base directly or derives
        // it from an offset.
        if cfg.reserved_base < cfg.dram_base
            || cfg.reserved_base - cfg.dram_base > cfg.dram_size
            || cfg.dram_size - (cfg.reserved_base - cfg.dram_base)
                < cfg.reserved_size + cfg.factory_size
        {
            return Err(LayoutError::ReservedOutsideDram {
                reserved_base: cfg.reserved_base,
                reserved_size: cfg.reserved_size,
                factory_size: cfg.factory_size,
                dram_base: cfg.dram_base,
                dram_size: cfg.dram_size,
            });
        }

        let secure_code = Region::new(pa!(cfg.reserved_base), cfg.secure_code_size);
        let trusted_app = Region::new(
            secure_code.end(),
            cfg.reserved_size - cfg.secure_code_size - cfg.shared_size,
        );
        let shared = Region::new(trusted_app.end(), cfg.shared_size);
        let nsec = Region::new(pa!(cfg.dram_base), cfg.reserved_base - cfg.dram_base);
        let factory = Region::new(
            pa!(cfg.dram_base + cfg.dram_size - cfg.factory_size),
            cfg.factory_size,
        );

        Ok(Self {
            nsec,
            secure_code,
            trusted_app,
            shared,
            factory,
        })
    }

    /// [`plan`](Self::plan) for board constants: any violation becomes a
    /// compile-time panic naming the broken invariant, so a bad config
    /// can never produce a bootable image.
    pub const fn build(cfg: &BoardConfig) -> Self {
        match Self::plan(cfg) {
            Ok(layout) => layout,
            Err(LayoutError::ReservedTooSmall { .. }) => {
                panic!("board config: reserved DRAM region is smaller than the family minimum")
            }
            Err(LayoutError::SharedTooSmall { .. }) => {
                panic!("board config: shared region is smaller than the family minimum")
            }
            Err(LayoutError::NoRoomForTrustedApps { .. }) => {
                panic!(
                    "board config: secure-code and shared regions leave no room for trusted applications"
                )
            }
            Err(LayoutError::ReservedOutsideDram { .. }) => {
                panic!("board config: reserved region plus factory tail does not fit inside DRAM")
            }
            Err(LayoutError::UnexpectedSram { .. }) => {
                panic!("board config: Vega boards have no on-chip scratch RAM, none may be configured")
            }
        }
    }

    /// The five regions memory-protection setup registers, in address
    /// order, each with its attribute.
    pub const fn regions(&self) -> [(Region, MemAttr); 5] {
        [
            (self.nsec, MemAttr::NONSECURE),
            (self.secure_code, MemAttr::SECURE),
            (self.trusted_app, MemAttr::SECURE),
            (self.shared, MemAttr::SHARED),
            (self.factory, MemAttr::NONSECURE),
        ]
    }

    /// Load address of the trusted kernel image.
    pub const fn tee_load_addr(&self) -> PhysAddr {
        self.secure_code.base
    }

    /// DRAM claimed by nobody: the gap between the end of the shared
    /// region and the factory tail.
    pub const fn unused_dram_size(&self) -> usize {
        self.factory.base.as_usize() - self.shared.end().as_usize()
    }
}
