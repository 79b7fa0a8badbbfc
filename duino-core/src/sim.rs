//! Simulated hardware for host-side testing
//!
//! [`SimRegisters`] stores every register and emulates the bits of hardware
//! behaviour the pin layer relies on:
//!
//! - PINx reads return externally applied input levels
//! - Writing ADSC runs a conversion immediately and clears ADSC
//! - ADCL/ADCH hold the reading of the channel selected in ADMUX
//!
//! Every access is recorded in a bounded history so tests can assert on
//! register ordering. [`CountingDelay`] stands in for the busy-wait delay.

use duino_hal::bits::{bv, ADSC, MUX_MASK};
use duino_hal::{DelayNs, Reg, RegisterFile};
use heapless::Deque;

use crate::pin::{Pin, PortGroup};

/// Number of accesses kept in the history
pub const HISTORY_LEN: usize = 64;

/// Number of ADC multiplexer inputs
pub const ADC_CHANNELS: usize = 8;

/// Kind of register access
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Access {
    Read,
    Write,
}

/// One recorded register access
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RegAccess {
    pub reg: Reg,
    pub value: u8,
    pub kind: Access,
}

impl RegAccess {
    /// Check whether this access was a write
    pub fn is_write(&self) -> bool {
        self.kind == Access::Write
    }
}

/// Simulated register file
pub struct SimRegisters {
    regs: [u8; Reg::COUNT],
    /// External levels seen on PIND, PINB, PINC
    inputs: [u8; 3],
    analog: [u16; ADC_CHANNELS],
    conversions: u32,
    history: Deque<RegAccess, HISTORY_LEN>,
}

impl Default for SimRegisters {
    fn default() -> Self {
        Self::new()
    }
}

impl SimRegisters {
    /// Create a register file with every register cleared
    pub fn new() -> Self {
        Self {
            regs: [0; Reg::COUNT],
            inputs: [0; 3],
            analog: [0; ADC_CHANNELS],
            conversions: 0,
            history: Deque::new(),
        }
    }

    /// Stored value of a register, without recording an access
    pub fn get(&self, reg: Reg) -> u8 {
        match input_group(reg) {
            Some(group) => self.inputs[group],
            None => self.regs[reg.index()],
        }
    }

    /// Overwrite a register, without recording an access
    pub fn set(&mut self, reg: Reg, value: u8) {
        self.regs[reg.index()] = value;
    }

    /// Apply an external level to a pin
    pub fn set_input(&mut self, pin: Pin, high: bool) {
        let group = group_index(pin.group());
        if high {
            self.inputs[group] |= pin.mask();
        } else {
            self.inputs[group] &= !pin.mask();
        }
    }

    /// Set the raw 10-bit reading of an ADC channel
    pub fn set_analog(&mut self, channel: u8, raw: u16) {
        if let Some(slot) = self.analog.get_mut(channel as usize) {
            *slot = raw;
        }
    }

    /// Number of conversions run so far
    pub fn conversions(&self) -> u32 {
        self.conversions
    }

    /// Recorded accesses, oldest first
    pub fn history(&self) -> &Deque<RegAccess, HISTORY_LEN> {
        &self.history
    }

    /// Forget all recorded accesses
    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    fn record(&mut self, reg: Reg, value: u8, kind: Access) {
        if self.history.is_full() {
            self.history.pop_front();
        }
        // Cannot fail: a slot was just freed
        let _ = self.history.push_back(RegAccess { reg, value, kind });
    }

    fn convert(&mut self) {
        let channel = (self.regs[Reg::Admux.index()] & MUX_MASK) as usize;
        let raw = self.analog[channel];
        self.regs[Reg::Adcl.index()] = raw as u8;
        self.regs[Reg::Adch.index()] = (raw >> 8) as u8;
        self.regs[Reg::Adcsra.index()] &= !bv(ADSC);
        self.conversions += 1;
    }
}

impl RegisterFile for SimRegisters {
    fn read(&mut self, reg: Reg) -> u8 {
        let value = self.get(reg);
        self.record(reg, value, Access::Read);
        value
    }

    fn write(&mut self, reg: Reg, value: u8) {
        self.record(reg, value, Access::Write);
        if input_group(reg).is_some() {
            return;
        }
        self.regs[reg.index()] = value;
        if reg == Reg::Adcsra && value & bv(ADSC) != 0 {
            self.convert();
        }
    }
}

fn group_index(group: PortGroup) -> usize {
    match group {
        PortGroup::D => 0,
        PortGroup::B => 1,
        PortGroup::C => 2,
    }
}

fn input_group(reg: Reg) -> Option<usize> {
    match reg {
        Reg::Pind => Some(0),
        Reg::Pinb => Some(1),
        Reg::Pinc => Some(2),
        _ => None,
    }
}

/// Delay that records instead of waiting
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CountingDelay {
    /// Total nanoseconds requested
    pub elapsed_ns: u64,
    /// Number of delay calls
    pub calls: u32,
}

impl CountingDelay {
    /// Create a delay with nothing recorded
    pub const fn new() -> Self {
        Self {
            elapsed_ns: 0,
            calls: 0,
        }
    }

    /// Total time requested, in milliseconds
    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ns / 1_000_000
    }
}

impl DelayNs for CountingDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.elapsed_ns += ns as u64;
        self.calls += 1;
    }

    fn delay_us(&mut self, us: u32) {
        self.elapsed_ns += us as u64 * 1_000;
        self.calls += 1;
    }

    fn delay_ms(&mut self, ms: u32) {
        self.elapsed_ns += ms as u64 * 1_000_000;
        self.calls += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adsc_runs_conversion() {
        let mut regs = SimRegisters::new();
        regs.set_analog(2, 0x2A5);
        regs.write(Reg::Admux, 0x42);
        regs.write(Reg::Adcsra, 0x80 | bv(ADSC));

        assert_eq!(regs.get(Reg::Adcsra), 0x80);
        assert_eq!(regs.get(Reg::Adcl), 0xA5);
        assert_eq!(regs.get(Reg::Adch), 0x02);
        assert_eq!(regs.conversions(), 1);
    }

    #[test]
    fn test_inputs_read_through_pin_registers() {
        let mut regs = SimRegisters::new();
        regs.set_input(Pin::new(10).unwrap(), true);

        assert_eq!(regs.read(Reg::Pinb), 0x04);
        assert_eq!(regs.read(Reg::Pind), 0);

        // Writes to PINx do not change what is sampled
        regs.write(Reg::Pinb, 0xFF);
        assert_eq!(regs.read(Reg::Pinb), 0x04);
    }

    #[test]
    fn test_history_is_bounded() {
        let mut regs = SimRegisters::new();
        for i in 0..(HISTORY_LEN as u8 + 10) {
            regs.write(Reg::Ocr0a, i);
        }
        assert_eq!(regs.history().len(), HISTORY_LEN);
        assert_eq!(regs.history().back().map(|a| a.value), Some(HISTORY_LEN as u8 + 9));
        assert_eq!(regs.history().front().map(|a| a.value), Some(10));
    }

    #[test]
    fn test_counting_delay() {
        let mut delay = CountingDelay::new();
        delay.delay_ms(10);
        delay.delay_ms(10);
        delay.delay_us(500);

        assert_eq!(delay.calls, 3);
        assert_eq!(delay.elapsed_ns, 20_500_000);
        assert_eq!(delay.elapsed_ms(), 20);
    }
}
