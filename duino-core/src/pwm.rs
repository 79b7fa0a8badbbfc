//! PWM binding table
//!
//! Six pins can produce PWM, two per timer:
//!
//! | Pin | Timer | Compare | Enable bit |
//! |-----|-------|---------|------------|
//! | 3   | 2     | OCR2B   | COM2B1     |
//! | 5   | 0     | OCR0B   | COM0B1     |
//! | 6   | 0     | OCR0A   | COM0A1     |
//! | 9   | 1     | OCR1AL  | COM1A1     |
//! | 10  | 1     | OCR1BL  | COM1B1     |
//! | 11  | 2     | OCR2A   | COM2A1     |
//!
//! Setting the enable bit connects the compare unit to the pin
//! (non-inverting PWM); clearing it hands the pin back to PORTx.

use duino_hal::bits::{bv, COM0A1, COM0B1, COM1A1, COM1B1, COM2A1, COM2B1};
use duino_hal::Reg;

use crate::pin::Pin;

/// Pins with a PWM binding
pub const PWM_PINS: [u8; 6] = [3, 5, 6, 9, 10, 11];

/// Registers connecting one pin to its timer channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PwmBinding {
    /// Compare register holding the duty cycle
    pub duty: Reg,
    /// Timer control register holding the enable bit
    pub control: Reg,
    /// Enable bit mask within `control`
    pub enable: u8,
}

impl PwmBinding {
    const fn new(duty: Reg, control: Reg, enable_bit: u8) -> Self {
        Self {
            duty,
            control,
            enable: bv(enable_bit),
        }
    }
}

/// PWM binding for a pin, if it has one
pub const fn pwm_binding(pin: Pin) -> Option<PwmBinding> {
    match pin.id() {
        3 => Some(PwmBinding::new(Reg::Ocr2b, Reg::Tccr2a, COM2B1)),
        5 => Some(PwmBinding::new(Reg::Ocr0b, Reg::Tccr0a, COM0B1)),
        6 => Some(PwmBinding::new(Reg::Ocr0a, Reg::Tccr0a, COM0A1)),
        9 => Some(PwmBinding::new(Reg::Ocr1al, Reg::Tccr1a, COM1A1)),
        10 => Some(PwmBinding::new(Reg::Ocr1bl, Reg::Tccr1a, COM1B1)),
        11 => Some(PwmBinding::new(Reg::Ocr2a, Reg::Tccr2a, COM2A1)),
        _ => None,
    }
}

/// Check whether a pin can produce PWM
pub const fn has_pwm(pin: Pin) -> bool {
    pwm_binding(pin).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pin::NUM_PIN;
    use proptest::prelude::*;

    #[test]
    fn test_pwm_pins() {
        let pins: heapless::Vec<u8, 21> = Pin::all().filter(|p| has_pwm(*p)).map(Pin::id).collect();
        assert_eq!(pins.as_slice(), &PWM_PINS);
    }

    #[test]
    fn test_bindings() {
        let b = pwm_binding(Pin::new(3).unwrap()).unwrap();
        assert_eq!(b.duty, Reg::Ocr2b);
        assert_eq!(b.control, Reg::Tccr2a);
        assert_eq!(b.enable, 0x20);

        let b = pwm_binding(Pin::new(9).unwrap()).unwrap();
        assert_eq!(b.duty, Reg::Ocr1al);
        assert_eq!(b.control, Reg::Tccr1a);
        assert_eq!(b.enable, 0x80);

        assert_eq!(pwm_binding(Pin::new(4).unwrap()), None);
    }

    #[test]
    fn test_channels_sharing_a_timer_use_distinct_bits() {
        let a = pwm_binding(Pin::new(5).unwrap()).unwrap();
        let b = pwm_binding(Pin::new(6).unwrap()).unwrap();
        assert_eq!(a.control, b.control);
        assert_ne!(a.enable, b.enable);
        assert_ne!(a.duty, b.duty);
    }

    proptest! {
        #[test]
        fn prop_has_pwm_matches_table(id in 0u8..NUM_PIN) {
            let pin = Pin::new(id).unwrap();
            prop_assert_eq!(has_pwm(pin), PWM_PINS.contains(&id));
        }
    }
}
