//! CPU Clock.
use std::time::Duration;

use crate::constants::*;

/// CPU clock frequency, in hertz (per second)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Hz(pub u64);

impl Hz {
    /// Clamp the frequency to the range supported by the clock.
    pub fn clamped(self) -> Self {
        Hz(self.0.clamp(1, MAX_CYCLE_RATE))
    }

    /// Length of a single period, in nanoseconds.
    pub fn period_nanos(self) -> u64 {
        NANOS_IN_SECOND / self.clamped().0
    }
}

impl Default for Hz {
    fn default() -> Self {
        Hz(DEFAULT_CYCLE_RATE)
    }
}

impl From<Hz> for Duration {
    fn from(freq: Hz) -> Self {
        Duration::from_nanos(freq.period_nanos())
    }
}

/// Converts elapsed wall time into whole clock cycles.
///
/// It is designed to work with the cooperative frame loop of the host.
/// Each update the elapsed time is added to an accumulator, and cycles are
/// drawn from it one period at a time until less than a period remains.
///
/// If the VM was paused for debugging, and a large amount of time has
/// elapsed until it is resumed, the backlog is capped so it continues at
/// its usual speed instead of trying to catch up.
#[derive(Debug, Clone)]
pub struct Clock {
    /// Unconsumed time, in nanoseconds.
    accumulator: u64,
    /// Time in nanoseconds a single clock cycle takes.
    period: u64,
    /// Upper bound of the accumulator.
    max_accumulator: u64,
}

impl Clock {
    pub fn new(rate: Hz) -> Self {
        let mut clock = Self {
            accumulator: 0,
            period: 0,
            max_accumulator: 0,
        };
        clock.set_rate(rate);
        clock
    }

    /// Change the cycle rate.
    ///
    /// Time that is already accumulated is kept as is, and will be consumed
    /// at the new rate.
    pub fn set_rate(&mut self, rate: Hz) {
        self.period = rate.period_nanos();
        self.max_accumulator = self.period * MAX_CYCLES_PER_UPDATE;
    }

    pub fn rate(&self) -> Hz {
        Hz(NANOS_IN_SECOND / self.period)
    }

    #[inline]
    pub fn period(&self) -> Duration {
        Duration::from_nanos(self.period)
    }

    /// Unconsumed time carried over to the next update.
    #[inline]
    pub fn pending(&self) -> Duration {
        Duration::from_nanos(self.accumulator)
    }

    /// Add elapsed wall time to the accumulator.
    pub fn advance(&mut self, elapsed: Duration) {
        let elapsed = u64::try_from(elapsed.as_nanos()).unwrap_or(u64::MAX);
        self.accumulator = self
            .accumulator
            .saturating_add(elapsed)
            .min(self.max_accumulator);
    }

    /// Consume one cycle worth of time, if available.
    #[inline]
    pub fn take_cycle(&mut self) -> bool {
        if self.accumulator >= self.period {
            self.accumulator -= self.period;
            true
        } else {
            false
        }
    }

    /// Set the accumulator back to zero.
    pub fn reset(&mut self) {
        self.accumulator = 0;
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_clock_hz() {
        let interval: Duration = Hz(60).into();
        assert_eq!(interval.as_millis(), 16);
        assert_eq!(Hz(0).clamped(), Hz(1));
        assert_eq!(Hz(5_000_000).clamped(), Hz(MAX_CYCLE_RATE));
    }

    fn drain(clock: &mut Clock) -> u64 {
        let mut count = 0;
        while clock.take_cycle() {
            count += 1;
        }
        count
    }

    #[test]
    fn test_whole_cycles() {
        let mut clock = Clock::new(Hz(1000));
        clock.advance(Duration::from_micros(3500));
        assert_eq!(drain(&mut clock), 3);
        assert_eq!(clock.pending(), Duration::from_micros(500));

        clock.advance(Duration::from_micros(500));
        assert_eq!(drain(&mut clock), 1);
        assert_eq!(clock.pending(), Duration::ZERO);
    }

    #[test]
    fn test_catch_up_is_capped() {
        let mut clock = Clock::new(Hz(1000));
        clock.advance(Duration::from_secs(3600));
        assert_eq!(drain(&mut clock), MAX_CYCLES_PER_UPDATE);
    }

    #[test]
    fn test_rate_change_keeps_pending() {
        let mut clock = Clock::new(Hz(1000));
        clock.advance(Duration::from_micros(1500));
        assert_eq!(drain(&mut clock), 1);

        clock.set_rate(Hz(2000));
        assert_eq!(clock.pending(), Duration::from_micros(500));
        assert_eq!(drain(&mut clock), 1);
        assert_eq!(clock.rate(), Hz(2000));
    }
}
