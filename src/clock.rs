// clock.rs

use crossbeam::channel::{self, Receiver, Sender};
use log::info;
use std::time::{Duration, Instant};

/// Nominal period of the firmware scheduler tick.
pub const TICK_INTERVAL: Duration = Duration::from_millis(1);

/// A source of scheduler ticks for the event loop.
pub trait ClockSource {
    /// Channel yielding one message per tick.
    fn ticks(&self) -> Receiver<Instant>;
}

/// Wall-clock ticker.
///
/// Backed by `crossbeam`'s ticker, which keeps at most one tick pending: a
/// loop that falls behind gets one late tick, not a burst of catch-up ticks.
#[derive(Debug, Clone, Copy)]
pub struct TimerClock {
    interval: Duration,
}

impl TimerClock {
    pub fn new(interval: Duration) -> Self {
        TimerClock { interval }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }
}

impl Default for TimerClock {
    fn default() -> Self {
        Self::new(TICK_INTERVAL)
    }
}

impl ClockSource for TimerClock {
    fn ticks(&self) -> Receiver<Instant> {
        info!("Starting scheduler tick every {:?}", self.interval);
        channel::tick(self.interval)
    }
}

/// Clock that only ticks when told to.
pub struct ManualClock {
    tx: Sender<Instant>,
    rx: Receiver<Instant>,
}

impl ManualClock {
    pub fn new() -> Self {
        let (tx, rx) = channel::unbounded();
        ManualClock { tx, rx }
    }

    /// Queues `count` ticks.
    pub fn fire(&self, count: usize) {
        for _ in 0..count {
            // The clock holds a receiver itself, so this cannot fail.
            let _ = self.tx.send(Instant::now());
        }
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl ClockSource for ManualClock {
    fn ticks(&self) -> Receiver<Instant> {
        self.rx.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timer_clock_ticks() {
        let clock = TimerClock::new(Duration::from_millis(2));
        let ticks = clock.ticks();
        let first = ticks.recv_timeout(Duration::from_secs(1)).unwrap();
        let second = ticks.recv_timeout(Duration::from_secs(1)).unwrap();
        assert!(second > first);
    }

    #[test]
    fn test_manual_clock_queues_ticks() {
        let clock = ManualClock::new();
        let ticks = clock.ticks();
        clock.fire(3);
        assert_eq!(ticks.try_iter().count(), 3);
    }
}
