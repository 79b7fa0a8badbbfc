//! Duino Hardware Abstraction Layer
//!
//! This crate defines the hardware seams the pin layer is written against,
//! so the same pin logic runs on a real ATmega328P and on a host-side
//! simulation.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  duino-core (pins, PWM, ADC, builtins)  │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  duino-hal (this crate - traits)        │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │ duino-hal-    │       │ duino-core    │
//! │  atmega328p   │       │   ::sim       │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`reg::RegisterFile`] - 8-bit I/O register access
//! - [`DelayNs`] - Blocking delays (re-exported from `embedded-hal`)

#![no_std]
#![deny(unsafe_code)]

pub mod bits;
pub mod reg;

// Re-export key traits at crate root for convenience
pub use embedded_hal::delay::DelayNs;
pub use reg::{Reg, RegisterFile};
