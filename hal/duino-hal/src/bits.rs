//! Register bit positions
//!
//! Bit numbers as given in the ATmega328P datasheet. Use with `1 << BIT`.

// ADCSRA
pub const ADPS0: u8 = 0;
pub const ADPS1: u8 = 1;
pub const ADPS2: u8 = 2;
pub const ADSC: u8 = 6;
pub const ADEN: u8 = 7;

// ADMUX
pub const MUX_MASK: u8 = 0x07;
pub const REFS0: u8 = 6;

// TCCR0A / TCCR0B
pub const WGM00: u8 = 0;
pub const WGM01: u8 = 1;
pub const COM0B1: u8 = 5;
pub const COM0A1: u8 = 7;
pub const CS00: u8 = 0;
pub const CS01: u8 = 1;
pub const CS02: u8 = 2;

// TCCR1A / TCCR1B
pub const WGM10: u8 = 0;
pub const WGM11: u8 = 1;
pub const COM1B1: u8 = 5;
pub const COM1A1: u8 = 7;
pub const CS10: u8 = 0;
pub const CS11: u8 = 1;
pub const CS12: u8 = 2;
pub const WGM12: u8 = 3;

// TCCR2A / TCCR2B
pub const WGM20: u8 = 0;
pub const COM2B1: u8 = 5;
pub const COM2A1: u8 = 7;
pub const CS20: u8 = 0;
pub const CS21: u8 = 1;
pub const CS22: u8 = 2;

/// Mask with a single bit set
pub const fn bv(bit: u8) -> u8 {
    1 << bit
}
