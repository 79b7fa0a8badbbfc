//! Memory-mapped register access
//!
//! Addresses are data-space addresses (I/O address + 0x20 for the low
//! registers), which is what `ld`/`st` use.

use duino_hal::{Reg, RegisterFile};

/// Data-space address of a register
pub const fn address(reg: Reg) -> usize {
    match reg {
        Reg::Pinb => 0x23,
        Reg::Ddrb => 0x24,
        Reg::Portb => 0x25,
        Reg::Pinc => 0x26,
        Reg::Ddrc => 0x27,
        Reg::Portc => 0x28,
        Reg::Pind => 0x29,
        Reg::Ddrd => 0x2A,
        Reg::Portd => 0x2B,
        Reg::Tccr0a => 0x44,
        Reg::Tccr0b => 0x45,
        Reg::Ocr0a => 0x47,
        Reg::Ocr0b => 0x48,
        Reg::Adcl => 0x78,
        Reg::Adch => 0x79,
        Reg::Adcsra => 0x7A,
        Reg::Admux => 0x7C,
        Reg::Tccr1a => 0x80,
        Reg::Tccr1b => 0x81,
        Reg::Ocr1al => 0x88,
        Reg::Ocr1ah => 0x89,
        Reg::Ocr1bl => 0x8A,
        Reg::Ocr1bh => 0x8B,
        Reg::Tccr2a => 0xB0,
        Reg::Tccr2b => 0xB1,
        Reg::Ocr2a => 0xB3,
        Reg::Ocr2b => 0xB4,
    }
}

/// Register file backed by the chip's I/O space
///
/// Zero-sized; every access goes straight to hardware.
pub struct Mmio {
    _private: (),
}

impl Mmio {
    /// Take the register file
    ///
    /// # Safety
    ///
    /// Only valid on an ATmega328P, and only one `Mmio` may be live: the pin
    /// layer assumes it is the sole writer of these registers and no
    /// interrupt handler touches them.
    pub unsafe fn steal() -> Self {
        Self { _private: () }
    }
}

impl RegisterFile for Mmio {
    fn read(&mut self, reg: Reg) -> u8 {
        // SAFETY: `address` yields a valid, aligned I/O register address and
        // `steal` guarantees exclusive access.
        unsafe { core::ptr::read_volatile(address(reg) as *const u8) }
    }

    fn write(&mut self, reg: Reg, value: u8) {
        // SAFETY: as for `read`.
        unsafe { core::ptr::write_volatile(address(reg) as *mut u8, value) }
    }
}
