//! Blocking sleep
//!
//! Sleeps are counted in 10 ms ticks. The countdown starts at the truncated
//! tick count and runs down to zero inclusive, so every non-negative
//! duration waits one tick more than it asks for: `sleep(0.0)` still waits
//! 10 ms, `sleep(0.25)` waits 260 ms.

use duino_hal::DelayNs;

/// Length of one sleep tick
pub const TICK_MS: u32 = 10;

/// Ticks per second
pub const TICKS_PER_SECOND: f32 = 100.0;

/// Number of ticks a sleep of `seconds` waits
///
/// Durations of -0.01 s or less wait nothing; NaN counts as zero.
pub fn ticks_for(seconds: f32) -> u32 {
    let count = (seconds * TICKS_PER_SECOND) as i32;
    if count < 0 {
        0
    } else {
        count as u32 + 1
    }
}

/// Busy-wait for `seconds`, returning the number of ticks waited
pub fn sleep<D: DelayNs>(delay: &mut D, seconds: f32) -> u32 {
    let ticks = ticks_for(seconds);
    for _ in 0..ticks {
        delay.delay_ms(TICK_MS);
    }
    ticks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::CountingDelay;

    #[test]
    fn test_zero_waits_one_tick() {
        assert_eq!(ticks_for(0.0), 1);

        let mut delay = CountingDelay::new();
        assert_eq!(sleep(&mut delay, 0.0), 1);
        assert_eq!(delay.elapsed_ms(), 10);
    }

    #[test]
    fn test_tick_counts() {
        assert_eq!(ticks_for(0.25), 26);
        assert_eq!(ticks_for(1.0), 101);
        // 1.9 ticks truncates to 1, plus the inclusive zero
        assert_eq!(ticks_for(0.019), 2);
    }

    #[test]
    fn test_negative_and_nan() {
        assert_eq!(ticks_for(-1.0), 0);
        // -0.005 truncates to 0 ticks counted, so one wait
        assert_eq!(ticks_for(-0.005), 1);
        assert_eq!(ticks_for(f32::NAN), 1);
    }

    #[test]
    fn test_sleep_never_returns_early() {
        for seconds in [0.0f32, 0.01, 0.1, 0.333, 2.0] {
            let mut delay = CountingDelay::new();
            sleep(&mut delay, seconds);
            assert!(delay.elapsed_ns as f64 >= seconds as f64 * 1e9);
        }
    }
}
