//! Logical pins and the register locator
//!
//! Pins are numbered like the Uno headers:
//!
//! | Pins     | Port | Bit          | Notes                    |
//! |----------|------|--------------|--------------------------|
//! | `0..=7`  | D    | `pin`        | 3, 5, 6 have PWM         |
//! | `8..=13` | B    | `pin - 8`    | 9, 10, 11 have PWM       |
//! | `14..=20`| C    | `pin - 14`   | ADC channels `0..=6`     |
//!
//! A [`Pin`] can only be built from an in-range identifier, so lookups
//! never have to defend against bad pin numbers.

use duino_hal::Reg;

use crate::error::PinError;

/// Number of logical pins
pub const NUM_PIN: u8 = 21;

/// First pin of port B
pub const PORT_B_BASE: u8 = 8;

/// First pin of port C, also analog channel 0
pub const PORT_C_BASE: u8 = 14;

/// A validated pin identifier in `0..NUM_PIN`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Pin(u8);

impl Pin {
    /// Create a pin, if `id` is in range
    pub const fn new(id: u8) -> Option<Self> {
        if id < NUM_PIN {
            Some(Self(id))
        } else {
            None
        }
    }

    /// Create a pin from an interpreter offset
    pub fn from_offset(offset: i32) -> Result<Self, PinError> {
        u8::try_from(offset)
            .ok()
            .and_then(Self::new)
            .ok_or(PinError::OutOfRange(offset))
    }

    /// Pin identifier
    pub const fn id(self) -> u8 {
        self.0
    }

    /// All pins in ascending order
    pub fn all() -> impl Iterator<Item = Pin> {
        (0..NUM_PIN).map(Pin)
    }

    /// Port group this pin belongs to
    pub const fn group(self) -> PortGroup {
        if self.0 < PORT_B_BASE {
            PortGroup::D
        } else if self.0 < PORT_C_BASE {
            PortGroup::B
        } else {
            PortGroup::C
        }
    }

    /// Bit position within the port group
    pub const fn bit(self) -> u8 {
        self.0 - self.group().base()
    }

    /// Single-bit mask within the port group
    pub const fn mask(self) -> u8 {
        1 << self.bit()
    }

    /// Port registers driving this pin
    pub const fn registers(self) -> PortRegisters {
        self.group().registers()
    }

    /// ADC channel, for pins on port C
    pub const fn analog_channel(self) -> Option<u8> {
        match self.group() {
            PortGroup::C => Some(self.bit()),
            _ => None,
        }
    }
}

impl core::fmt::Display for Pin {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One of the three I/O ports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PortGroup {
    /// Pins 0..=7
    D,
    /// Pins 8..=13
    B,
    /// Pins 14..=20
    C,
}

impl PortGroup {
    /// First pin of the group
    pub const fn base(self) -> u8 {
        match self {
            PortGroup::D => 0,
            PortGroup::B => PORT_B_BASE,
            PortGroup::C => PORT_C_BASE,
        }
    }

    /// The group's register triplet
    pub const fn registers(self) -> PortRegisters {
        match self {
            PortGroup::D => PortRegisters {
                direction: Reg::Ddrd,
                input: Reg::Pind,
                output: Reg::Portd,
            },
            PortGroup::B => PortRegisters {
                direction: Reg::Ddrb,
                input: Reg::Pinb,
                output: Reg::Portb,
            },
            PortGroup::C => PortRegisters {
                direction: Reg::Ddrc,
                input: Reg::Pinc,
                output: Reg::Portc,
            },
        }
    }
}

/// Direction, input-level and output-level registers of a port
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PortRegisters {
    /// DDRx: 1 = output
    pub direction: Reg,
    /// PINx: sampled input levels
    pub input: Reg,
    /// PORTx: output level, or pull-up enable for inputs
    pub output: Reg,
}

/// Register triplet for a pin
pub const fn group_registers(pin: Pin) -> PortRegisters {
    pin.registers()
}

/// Bit mask of a pin within its group
pub const fn bit_mask(pin: Pin) -> u8 {
    pin.mask()
}
