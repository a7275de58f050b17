use queue_lab_abstract::ClockMode;
use std::time::{Duration, Instant};

/// Time source for the scheduler. Times are milliseconds since the start of the run.
pub trait Clock {
    fn now(&self) -> u64;

    /// Move the clock forward to `time`. Never moves backwards.
    fn advance_to(&mut self, time: u64);
}

/// Jumps straight to each event time.
#[derive(Debug, Default)]
pub struct VirtualClock {
    now: u64,
}

impl Clock for VirtualClock {
    fn now(&self) -> u64 {
        self.now
    }

    fn advance_to(&mut self, time: u64) {
        self.now = self.now.max(time);
    }
}

/// Blocks until real elapsed time catches up with each event time.
/// The reported time is the event time, not the (slightly later) wake-up time.
#[derive(Debug)]
pub struct WallClock {
    start: Instant,
    now: u64,
}

impl Default for WallClock {
    fn default() -> Self {
        Self::new()
    }
}

impl WallClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
            now: 0,
        }
    }
}

impl Clock for WallClock {
    fn now(&self) -> u64 {
        self.now
    }

    fn advance_to(&mut self, time: u64) {
        if time <= self.now {
            return;
        }
        let deadline = self.start + Duration::from_millis(time);
        let wait = deadline.saturating_duration_since(Instant::now());
        if !wait.is_zero() {
            std::thread::sleep(wait);
        }
        self.now = time;
    }
}

pub fn clock_for(mode: ClockMode) -> Box<dyn Clock> {
    match mode {
        ClockMode::Virtual => Box::new(VirtualClock::default()),
        ClockMode::WallClock => Box::new(WallClock::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn virtual_clock_never_goes_back() {
        let mut clock = VirtualClock::default();
        clock.advance_to(40);
        clock.advance_to(10);
        assert_eq!(clock.now(), 40);
    }

    #[test]
    fn wall_clock_waits_for_real_time() {
        let started = Instant::now();
        let mut clock = WallClock::new();
        clock.advance_to(30);
        assert_eq!(clock.now(), 30);
        assert!(started.elapsed() >= Duration::from_millis(30));
    }
}
