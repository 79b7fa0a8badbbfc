//! Pin state store
//!
//! Commanded power per pin plus the set of pins that are switched on. A pin
//! outputs its power level only while it is in the on-mask; otherwise its
//! effective level is 0.

use crate::pin::{Pin, NUM_PIN};

/// Set of pins, one bit per pin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinMask(u32);

impl PinMask {
    /// The empty set
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Check membership
    pub const fn contains(&self, pin: Pin) -> bool {
        self.0 & (1 << pin.id()) != 0
    }

    /// Add a pin
    pub fn insert(&mut self, pin: Pin) {
        self.0 |= 1 << pin.id();
    }

    /// Remove a pin, leaving all others in place
    pub fn remove(&mut self, pin: Pin) {
        self.0 &= !(1 << pin.id());
    }

    /// Check whether no pin is set
    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Number of pins in the set
    pub const fn len(&self) -> u32 {
        self.0.count_ones()
    }

    /// Raw bit representation
    pub const fn bits(&self) -> u32 {
        self.0
    }

    /// Pins in the set, ascending
    pub fn iter(&self) -> impl Iterator<Item = Pin> + '_ {
        Pin::all().filter(move |p| self.contains(*p))
    }
}

/// Per-pin power levels and the on-mask
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinStateStore {
    power: [u8; NUM_PIN as usize],
    on: PinMask,
}

impl PinStateStore {
    /// Create a store with every power slot set to `idle` and nothing on
    pub const fn new(idle: u8) -> Self {
        Self {
            power: [idle; NUM_PIN as usize],
            on: PinMask::empty(),
        }
    }

    /// Commanded power of a pin
    pub const fn power(&self, pin: Pin) -> u8 {
        self.power[pin.id() as usize]
    }

    /// Set the commanded power of a pin
    pub fn set_power(&mut self, pin: Pin, level: u8) {
        self.power[pin.id() as usize] = level;
    }

    /// Check whether a pin is switched on
    pub const fn is_on(&self, pin: Pin) -> bool {
        self.on.contains(pin)
    }

    /// Switch a pin on
    pub fn set_on(&mut self, pin: Pin) {
        self.on.insert(pin);
    }

    /// Switch a pin off
    pub fn set_off(&mut self, pin: Pin) {
        self.on.remove(pin);
    }

    /// Pins currently switched on
    pub const fn on_mask(&self) -> PinMask {
        self.on
    }

    /// Level the pin should be driven at right now
    pub const fn effective_level(&self, pin: Pin) -> u8 {
        if self.is_on(pin) {
            self.power(pin)
        } else {
            0
        }
    }
}

impl Default for PinStateStore {
    fn default() -> Self {
        Self::new(0xFF)
    }
}
