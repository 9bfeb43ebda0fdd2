//! Cooperative periodic tick
//!
//! The screens poll GPS availability and the map center once per second from
//! the UI thread. [`Ticker`] decides when a tick is due; it never sleeps.

use std::time::Duration;

/// Fires at most once per interval
///
/// If the caller polls late (a frame took long, the window was hidden) only
/// one tick fires and the schedule restarts from that moment, so missed ticks
/// are not replayed in a burst.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ticker {
    interval: Duration,
    next_due: Option<Duration>,
}

impl Ticker {
    /// The first poll always fires
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            next_due: None,
        }
    }

    /// Returns true when a tick is due at `now`
    pub fn poll(&mut self, now: Duration) -> bool {
        match self.next_due {
            Some(due) if now < due => false,
            _ => {
                self.next_due = Some(now + self.interval);
                true
            }
        }
    }

    /// Time until the next tick, zero if one is already due
    pub fn until_next(&self, now: Duration) -> Duration {
        self.next_due
            .map(|due| due.saturating_sub(now))
            .unwrap_or(Duration::ZERO)
    }
}

impl Default for Ticker {
    fn default() -> Self {
        Self::new(Duration::from_secs(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(ms: u64) -> Duration {
        Duration::from_millis(ms)
    }

    #[test]
    fn test_first_poll_fires() {
        let mut ticker = Ticker::default();
        assert!(ticker.poll(ms(0)));
        assert!(!ticker.poll(ms(10)));
    }

    #[test]
    fn test_fires_once_per_interval() {
        let mut ticker = Ticker::default();
        let fired = (0..=3000)
            .step_by(16)
            .filter(|t| ticker.poll(ms(*t)))
            .count();
        // 0 ms, then the first frames at or after ~1 s and ~2 s
        assert_eq!(fired, 3);
    }

    #[test]
    fn test_no_burst_after_long_gap() {
        let mut ticker = Ticker::default();
        assert!(ticker.poll(ms(0)));
        assert!(ticker.poll(ms(10_000)));
        assert!(!ticker.poll(ms(10_500)));
        assert!(ticker.poll(ms(11_000)));
    }

    #[test]
    fn test_until_next() {
        let mut ticker = Ticker::default();
        assert_eq!(ticker.until_next(ms(0)), Duration::ZERO);
        ticker.poll(ms(0));
        assert_eq!(ticker.until_next(ms(400)), ms(600));
        assert_eq!(ticker.until_next(ms(1500)), Duration::ZERO);
    }
}
