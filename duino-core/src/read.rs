//! Digital and analog sampling
//!
//! Every read samples the hardware again; nothing is cached. Analog reads
//! busy-wait on the conversion-complete flag with no timeout.

use duino_hal::bits::{bv, ADSC, MUX_MASK};
use duino_hal::{Reg, RegisterFile};

use crate::config::AnalogReference;
use crate::pin::Pin;

/// Full-scale reading of the 10-bit ADC
pub const ADC_FULL_SCALE: u16 = 1023;

/// Result of sampling the input pin
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Reading {
    /// Normalized ADC reading in [0, 1]
    Analog(f32),
    /// Digital input level
    Digital(bool),
}

/// Sample the digital input bit of a pin
pub fn read_digital<R: RegisterFile>(regs: &mut R, pin: Pin) -> bool {
    regs.bits_set(pin.registers().input, pin.mask())
}

/// Run one conversion on an ADC channel, returning the raw 10-bit result
pub fn sample_analog<R: RegisterFile>(regs: &mut R, channel: u8, reference: AnalogReference) -> u16 {
    regs.write(Reg::Admux, reference.admux_bits() | (channel & MUX_MASK));
    regs.set_bits(Reg::Adcsra, bv(ADSC));
    while regs.bits_set(Reg::Adcsra, bv(ADSC)) {}

    // ADCL first: reading it latches ADCH until ADCH is read
    let low = regs.read(Reg::Adcl);
    let high = regs.read(Reg::Adch);
    let raw = (u16::from(high) << 8 | u16::from(low)) & ADC_FULL_SCALE;
    trace!("adc channel {} raw {}", channel, raw);
    raw
}

/// Sample a pin: ADC for analog-capable pins, input bit otherwise
pub fn read_pin<R: RegisterFile>(regs: &mut R, pin: Pin, reference: AnalogReference) -> Reading {
    match pin.analog_channel() {
        Some(channel) => {
            let raw = sample_analog(regs, channel, reference);
            Reading::Analog(f32::from(raw) / f32::from(ADC_FULL_SCALE))
        }
        None => Reading::Digital(read_digital(regs, pin)),
    }
}
