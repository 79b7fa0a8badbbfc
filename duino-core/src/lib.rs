//! Board-agnostic pin layer for the scripting runtime
//!
//! This crate turns abstract pin numbers handed over by interpreted
//! programs into register operations:
//!
//! - Register locator (pin -> port triplet + bit)
//! - PWM binding table for the six PWM-capable pins
//! - Per-pin power levels and the "on" mask
//! - Output driver switching between PWM and plain digital levels
//! - Role binding (power, direction and input pins)
//! - Digital and analog (ADC) reads
//! - Busy-wait sleep
//! - Builtin dispatch for the interpreter
//!
//! Everything is owned by a single [`Board`] context and runs on one thread;
//! there is no locking and no interrupt-driven access.

#![no_std]
#![deny(unsafe_code)]

#[macro_use]
mod log;

pub mod board;
pub mod builtins;
pub mod config;
pub mod error;
pub mod output;
pub mod pin;
pub mod pwm;
pub mod read;
pub mod sim;
pub mod state;
pub mod timing;
pub mod value;

pub use board::{Board, DriveTarget};
pub use builtins::Builtin;
pub use config::HardwareConfig;
pub use error::{Abort, AbortLatch, ErrorReporter, PinError, Role};
pub use pin::{Pin, PortGroup, NUM_PIN};
pub use read::Reading;
pub use value::Value;
