//! VegaTZ - Hardware adaptation layer for the Vega board family.
//!
//! This crate sits between a trusted-execution kernel and the Vega boards.
//! It derives the secure/non-secure DRAM partition layout from board
//! constants at build time and drives the Vega S-series UART for polled
//! console I/O. Everything else (SMC dispatch, interrupt delivery, paging)
//! belongs to the consuming kernel.

#![cfg_attr(not(test), no_std)]

#[macro_use]
pub mod console;

pub mod config;
pub mod drivers;
pub mod error;
pub mod mm;
pub mod platform;
pub mod sync;

#[macro_use]
extern crate log;

extern crate alloc;

pub use error::HalResult;
