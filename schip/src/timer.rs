//! Delay and sound timers.
use std::time::Duration;

use crate::constants::*;

/// The two 60 Hz countdown registers.
///
/// They are driven by elapsed wall time, independent of the instruction
/// clock, so a program runs its timers at the same speed regardless of
/// the configured cycle rate.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Timers {
    /// (DT) Delay timer that counts down to 0.
    pub(crate) delay: u8,
    /// (ST) Sound timer that counts down to 0. When it has a non-zero value, a beep is played.
    pub(crate) sound: u8,
    /// Time in nanoseconds not yet converted into ticks.
    accumulator: u64,
}

impl Timers {
    pub fn new() -> Self {
        Default::default()
    }

    #[inline(always)]
    pub fn delay(&self) -> u8 {
        self.delay
    }

    #[inline(always)]
    pub fn sound(&self) -> u8 {
        self.sound
    }

    /// Count down both timers by the number of whole ticks that fit in
    /// the accumulated time. Returns the number of ticks.
    pub fn advance(&mut self, elapsed: Duration) -> u64 {
        let elapsed = u64::try_from(elapsed.as_nanos()).unwrap_or(u64::MAX);
        self.accumulator = self.accumulator.saturating_add(elapsed);

        let ticks = self.accumulator / TIMER_PERIOD;
        self.accumulator %= TIMER_PERIOD;

        let step = ticks.min(u8::MAX as u64) as u8;
        self.delay = self.delay.saturating_sub(step);
        self.sound = self.sound.saturating_sub(step);

        ticks
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn ticks(n: u64) -> Duration {
        Duration::from_nanos(TIMER_PERIOD * n)
    }

    #[test]
    fn test_countdown_to_zero() {
        let mut timers = Timers::new();
        timers.delay = 10;
        timers.sound = 3;

        assert_eq!(timers.advance(ticks(3)), 3);
        assert_eq!(timers.delay(), 7);
        assert_eq!(timers.sound(), 0);

        timers.advance(ticks(7));
        assert_eq!(timers.delay(), 0);

        timers.advance(ticks(1000));
        assert_eq!(timers.delay(), 0);
        assert_eq!(timers.sound(), 0);
    }

    #[test]
    fn test_partial_ticks_accumulate() {
        let mut timers = Timers::new();
        timers.delay = 2;

        let half = Duration::from_nanos(TIMER_PERIOD / 2 + 1);
        assert_eq!(timers.advance(half), 0);
        assert_eq!(timers.delay(), 2);
        assert_eq!(timers.advance(half), 1);
        assert_eq!(timers.delay(), 1);
    }
}
