//! I/O register abstractions
//!
//! The pin layer only ever touches a fixed set of 8-bit registers: the three
//! port triplets, the three timers' control and compare registers, and the
//! ADC. [`Reg`] names them; [`RegisterFile`] is implemented by whatever
//! actually stores them.

/// An 8-bit I/O register used by the pin layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Reg {
    // Port B (pins 8..13)
    Pinb,
    Ddrb,
    Portb,
    // Port C (pins 14..20, analog channels 0..6)
    Pinc,
    Ddrc,
    Portc,
    // Port D (pins 0..7)
    Pind,
    Ddrd,
    Portd,
    // Timer/Counter 0
    Tccr0a,
    Tccr0b,
    Ocr0a,
    Ocr0b,
    // Timer/Counter 1 (16-bit, used in 8-bit mode)
    Tccr1a,
    Tccr1b,
    Ocr1al,
    Ocr1ah,
    Ocr1bl,
    Ocr1bh,
    // Timer/Counter 2
    Tccr2a,
    Tccr2b,
    Ocr2a,
    Ocr2b,
    // ADC
    Adcl,
    Adch,
    Adcsra,
    Admux,
}

impl Reg {
    /// Number of distinct registers
    pub const COUNT: usize = 27;

    /// Every register, in declaration order
    pub const ALL: [Reg; Self::COUNT] = [
        Reg::Pinb,
        Reg::Ddrb,
        Reg::Portb,
        Reg::Pinc,
        Reg::Ddrc,
        Reg::Portc,
        Reg::Pind,
        Reg::Ddrd,
        Reg::Portd,
        Reg::Tccr0a,
        Reg::Tccr0b,
        Reg::Ocr0a,
        Reg::Ocr0b,
        Reg::Tccr1a,
        Reg::Tccr1b,
        Reg::Ocr1al,
        Reg::Ocr1ah,
        Reg::Ocr1bl,
        Reg::Ocr1bh,
        Reg::Tccr2a,
        Reg::Tccr2b,
        Reg::Ocr2a,
        Reg::Ocr2b,
        Reg::Adcl,
        Reg::Adch,
        Reg::Adcsra,
        Reg::Admux,
    ];

    /// Dense index of this register, suitable for array storage
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Byte-wide register storage
///
/// Implementations perform the actual hardware access (volatile MMIO on the
/// chip) or emulate it (host simulation). Reads of status registers may have
/// side effects on real hardware, so callers must not assume `read` is pure.
pub trait RegisterFile {
    /// Read the current value of a register
    fn read(&mut self, reg: Reg) -> u8;

    /// Write a value to a register
    fn write(&mut self, reg: Reg, value: u8);

    /// Read-modify-write a register
    fn modify<F: FnOnce(u8) -> u8>(&mut self, reg: Reg, f: F) {
        let value = self.read(reg);
        self.write(reg, f(value));
    }

    /// Set every bit in `mask`
    fn set_bits(&mut self, reg: Reg, mask: u8) {
        self.modify(reg, |v| v | mask);
    }

    /// Clear every bit in `mask`
    fn clear_bits(&mut self, reg: Reg, mask: u8) {
        self.modify(reg, |v| v & !mask);
    }

    /// Check whether any bit in `mask` is set
    fn bits_set(&mut self, reg: Reg, mask: u8) -> bool {
        self.read(reg) & mask != 0
    }
}

impl<T: RegisterFile + ?Sized> RegisterFile for &mut T {
    fn read(&mut self, reg: Reg) -> u8 {
        (**self).read(reg)
    }

    fn write(&mut self, reg: Reg, value: u8) {
        (**self).write(reg, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Plain array-backed register file
    struct ArrayRegs([u8; Reg::COUNT]);

    impl RegisterFile for ArrayRegs {
        fn read(&mut self, reg: Reg) -> u8 {
            self.0[reg.index()]
        }

        fn write(&mut self, reg: Reg, value: u8) {
            self.0[reg.index()] = value;
        }
    }

    #[test]
    fn test_index_matches_table() {
        for (i, reg) in Reg::ALL.iter().enumerate() {
            assert_eq!(reg.index(), i);
        }
    }

    #[test]
    fn test_set_and_clear_bits() {
        let mut regs = ArrayRegs([0; Reg::COUNT]);

        regs.set_bits(Reg::Ddrb, 0b0000_0101);
        assert_eq!(regs.read(Reg::Ddrb), 0b0000_0101);

        regs.set_bits(Reg::Ddrb, 0b0000_0010);
        assert_eq!(regs.read(Reg::Ddrb), 0b0000_0111);

        regs.clear_bits(Reg::Ddrb, 0b0000_0100);
        assert_eq!(regs.read(Reg::Ddrb), 0b0000_0011);

        // Neighbouring registers are untouched
        assert_eq!(regs.read(Reg::Portb), 0);
    }

    #[test]
    fn test_bits_set() {
        let mut regs = ArrayRegs([0; Reg::COUNT]);
        regs.write(Reg::Adcsra, 0x40);

        assert!(regs.bits_set(Reg::Adcsra, 0x40));
        assert!(!regs.bits_set(Reg::Adcsra, 0x80));
    }

    #[test]
    fn test_mut_ref_forwards() {
        fn poke<R: RegisterFile>(mut regs: R) {
            regs.set_bits(Reg::Portd, 0x08);
        }

        let mut regs = ArrayRegs([0; Reg::COUNT]);
        poke(&mut regs);
        assert_eq!(regs.read(Reg::Portd), 0x08);
    }
}
