//! Busy-wait delay
//!
//! No timer is spent on delays: timers 0..2 all drive PWM outputs. The
//! delay spins a counted loop instead, calibrated for the CPU clock.

use embedded_hal::delay::DelayNs;

/// CPU cycles consumed by one iteration of the spin loop
const CYCLES_PER_SPIN: u64 = 4;

/// Calibrated spin-loop delay
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CycleDelay {
    cpu_hz: u32,
}

impl CycleDelay {
    /// Create a delay for the given CPU clock
    pub const fn new(cpu_hz: u32) -> Self {
        Self { cpu_hz }
    }

    /// Number of spin iterations covering `ns` nanoseconds
    ///
    /// Rounded up so the delay never undershoots.
    pub fn spins_for(&self, ns: u32) -> u64 {
        let cycles = (ns as u64 * self.cpu_hz as u64).div_ceil(1_000_000_000);
        cycles.div_ceil(CYCLES_PER_SPIN)
    }
}

impl DelayNs for CycleDelay {
    fn delay_ns(&mut self, ns: u32) {
        let mut spins = self.spins_for(ns);
        while spins > 0 {
            spins = core::hint::black_box(spins) - 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::F_CPU_HZ;

    #[test]
    fn test_spins_for_16mhz() {
        let delay = CycleDelay::new(F_CPU_HZ);

        // 1us = 16 cycles = 4 spins
        assert_eq!(delay.spins_for(1_000), 4);
        // 10ms = 160_000 cycles
        assert_eq!(delay.spins_for(10_000_000), 40_000);
        assert_eq!(delay.spins_for(0), 0);
    }

    #[test]
    fn test_spins_round_up() {
        let delay = CycleDelay::new(F_CPU_HZ);

        // 1ns is a fraction of a cycle, still waits one spin
        assert_eq!(delay.spins_for(1), 1);
    }

    #[test]
    fn test_delay_terminates() {
        let mut delay = CycleDelay::new(1_000_000);
        delay.delay_us(10);
        delay.delay_ms(1);
    }
}
