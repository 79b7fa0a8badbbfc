//! Hardware configuration
//!
//! Startup settings for the ADC and the three PWM timers, plus the policy
//! for scaling power fractions. Nothing here is persisted; a board applies
//! its configuration once, in [`initialize_hardware`].

use duino_hal::bits::{bv, ADEN, ADPS0, CS00, CS10, CS20, REFS0, WGM00, WGM01, WGM10, WGM20};
use duino_hal::{Reg, RegisterFile};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// ADC clock prescaler (system clock divided by N)
///
/// The ADC wants 50..200 kHz for full resolution; at 16 MHz that is `Div128`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum AdcPrescaler {
    Div2,
    Div4,
    Div8,
    Div16,
    Div32,
    Div64,
    #[default]
    Div128,
}

impl AdcPrescaler {
    /// ADPS2:0 field value
    pub const fn bits(self) -> u8 {
        match self {
            AdcPrescaler::Div2 => 0b001,
            AdcPrescaler::Div4 => 0b010,
            AdcPrescaler::Div8 => 0b011,
            AdcPrescaler::Div16 => 0b100,
            AdcPrescaler::Div32 => 0b101,
            AdcPrescaler::Div64 => 0b110,
            AdcPrescaler::Div128 => 0b111,
        }
    }
}

/// Clock select for timers 0 and 1
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TimerClock {
    Stopped,
    Div1,
    Div8,
    #[default]
    Div64,
    Div256,
    Div1024,
}

impl TimerClock {
    /// CSn2:0 field value
    pub const fn bits(self) -> u8 {
        match self {
            TimerClock::Stopped => 0b000,
            TimerClock::Div1 => 0b001,
            TimerClock::Div8 => 0b010,
            TimerClock::Div64 => 0b011,
            TimerClock::Div256 => 0b100,
            TimerClock::Div1024 => 0b101,
        }
    }
}

/// Clock select for timer 2, which has its own prescaler table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Timer2Clock {
    Stopped,
    Div1,
    Div8,
    Div32,
    #[default]
    Div64,
    Div128,
    Div256,
    Div1024,
}

impl Timer2Clock {
    /// CS22:0 field value
    pub const fn bits(self) -> u8 {
        match self {
            Timer2Clock::Stopped => 0b000,
            Timer2Clock::Div1 => 0b001,
            Timer2Clock::Div8 => 0b010,
            Timer2Clock::Div32 => 0b011,
            Timer2Clock::Div64 => 0b100,
            Timer2Clock::Div128 => 0b101,
            Timer2Clock::Div256 => 0b110,
            Timer2Clock::Div1024 => 0b111,
        }
    }
}

/// ADC voltage reference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum AnalogReference {
    /// External AREF pin
    External,
    /// Supply voltage with external capacitor on AREF
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "avcc"))]
    AVcc,
    /// Internal 1.1V bandgap
    #[cfg_attr(feature = "serde", serde(rename = "internal_1v1"))]
    Internal1V1,
}

impl AnalogReference {
    /// REFS1:0 bits, already shifted into ADMUX position
    pub const fn admux_bits(self) -> u8 {
        let refs = match self {
            AnalogReference::External => 0b00,
            AnalogReference::AVcc => 0b01,
            AnalogReference::Internal1V1 => 0b11,
        };
        refs << REFS0
    }
}

/// How `set_power` maps a fraction onto 0..=255
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PowerScaling {
    /// Fractions are clamped to [0, 1]; NaN is 0
    #[default]
    Clamp,
    /// Out-of-range fractions wrap modulo 256
    Wrap,
}

impl PowerScaling {
    /// Scale a fraction to a power level
    pub fn level(self, fraction: f32) -> u8 {
        let scaled = fraction * 255.0 + 0.5;
        match self {
            // Float-to-int `as` saturates and maps NaN to 0
            PowerScaling::Clamp => scaled as u8,
            PowerScaling::Wrap => scaled as i32 as u8,
        }
    }
}

/// Board hardware configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct HardwareConfig {
    /// ADC clock prescaler
    pub adc_prescaler: AdcPrescaler,
    /// Timer 0 clock (pins 5, 6)
    pub timer0: TimerClock,
    /// Timer 1 clock (pins 9, 10)
    pub timer1: TimerClock,
    /// Timer 2 clock (pins 3, 11)
    pub timer2: Timer2Clock,
    /// ADC voltage reference
    pub analog_reference: AnalogReference,
    /// Fraction-to-level policy for `set_power`
    pub power_scaling: PowerScaling,
    /// Initial power of every pin
    pub idle_power: u8,
}

impl Default for HardwareConfig {
    fn default() -> Self {
        Self {
            adc_prescaler: AdcPrescaler::default(),
            timer0: TimerClock::default(),
            timer1: TimerClock::default(),
            timer2: Timer2Clock::default(),
            analog_reference: AnalogReference::default(),
            power_scaling: PowerScaling::default(),
            idle_power: 0xFF,
        }
    }
}

/// Configure the ADC and timers
///
/// Must run once before any pin operation. Timer 0 runs fast PWM, timers 1
/// and 2 run 8-bit phase-correct PWM; every compare output starts
/// disconnected.
pub fn initialize_hardware<R: RegisterFile>(regs: &mut R, config: &HardwareConfig) {
    regs.write(Reg::Adcsra, bv(ADEN) | (config.adc_prescaler.bits() << ADPS0));

    regs.write(Reg::Tccr0a, bv(WGM01) | bv(WGM00));
    regs.write(Reg::Tccr0b, config.timer0.bits() << CS00);

    regs.write(Reg::Tccr1b, config.timer1.bits() << CS10);
    regs.write(Reg::Tccr1a, bv(WGM10));
    regs.write(Reg::Ocr1ah, 0);
    regs.write(Reg::Ocr1bh, 0);

    regs.write(Reg::Tccr2b, config.timer2.bits() << CS20);
    regs.write(Reg::Tccr2a, bv(WGM20));

    debug!(
        "hardware initialized: adc {} t0 {} t1 {} t2 {}",
        config.adc_prescaler,
        config.timer0,
        config.timer1,
        config.timer2
    );
}
