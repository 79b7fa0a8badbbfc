//! ATmega328P-specific HAL for the Duino pin layer
//!
//! This crate provides the chip-side implementations of the `duino-hal`
//! traits:
//!
//! - [`mmio::Mmio`] - volatile access to the memory-mapped I/O registers
//! - [`delay::CycleDelay`] - calibrated busy-wait delay
//!
//! # Usage
//!
//! ```ignore
//! // Safety: nothing else in the program touches these registers.
//! let regs = unsafe { Mmio::steal() };
//! let delay = CycleDelay::new(F_CPU_HZ);
//! let board = Board::new(regs, delay, HardwareConfig::default());
//! ```

#![no_std]

pub mod delay;
pub mod mmio;

pub use delay::CycleDelay;
pub use mmio::Mmio;

/// CPU clock of Uno-class boards
pub const F_CPU_HZ: u32 = 16_000_000;
