//! One-second countdown timer owned by the app loop.

use std::time::{Duration, Instant};

/// Periodic timer that is either armed (counting toward the next tick) or
/// released. Only one exists per app, so at most one timer can fire.
#[derive(Debug, Clone)]
pub struct Countdown {
    interval: Duration,
    armed: Option<Instant>,
}

impl Countdown {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            armed: None,
        }
    }

    pub fn is_armed(&self) -> bool {
        self.armed.is_some()
    }

    /// Arm when `active` turns true, release when it turns false. Arming after
    /// a release starts a full interval; time spent released is dropped.
    pub fn sync(&mut self, active: bool, now: Instant) {
        match (active, self.armed) {
            (true, None) => self.armed = Some(now),
            (false, Some(_)) => self.armed = None,
            _ => {}
        }
    }

    /// Release unconditionally (game re-init, leaving the board).
    pub fn release(&mut self) {
        self.armed = None;
    }

    /// True once per elapsed interval. Re-arms from `now`, so a late poll
    /// still yields a single tick.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.armed {
            Some(since) if now.saturating_duration_since(since) >= self.interval => {
                self.armed = Some(now);
                true
            }
            _ => false,
        }
    }

    /// Time until the next tick, if armed.
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.armed
            .map(|since| self.interval.saturating_sub(now.saturating_duration_since(since)))
    }
}

impl Default for Countdown {
    fn default() -> Self {
        Self::new(Duration::from_secs(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEC: Duration = Duration::from_secs(1);

    #[test]
    fn released_timer_never_fires() {
        let mut c = Countdown::default();
        let t0 = Instant::now();
        assert!(!c.is_armed());
        assert!(!c.poll(t0 + SEC * 5));
        assert_eq!(c.remaining(t0), None);
    }

    #[test]
    fn fires_once_per_interval() {
        let mut c = Countdown::default();
        let t0 = Instant::now();
        c.sync(true, t0);
        assert!(!c.poll(t0 + Duration::from_millis(999)));
        assert!(c.poll(t0 + SEC));
        assert!(!c.poll(t0 + SEC + Duration::from_millis(500)));
        assert!(c.poll(t0 + SEC * 2));
    }

    #[test]
    fn late_poll_does_not_catch_up() {
        let mut c = Countdown::default();
        let t0 = Instant::now();
        c.sync(true, t0);
        assert!(c.poll(t0 + SEC * 4));
        assert!(!c.poll(t0 + SEC * 4));
    }

    #[test]
    fn resync_while_armed_keeps_phase() {
        let mut c = Countdown::default();
        let t0 = Instant::now();
        c.sync(true, t0);
        c.sync(true, t0 + Duration::from_millis(900));
        assert!(c.poll(t0 + SEC));
    }

    #[test]
    fn release_drops_pending_time() {
        let mut c = Countdown::default();
        let t0 = Instant::now();
        c.sync(true, t0);
        c.sync(false, t0 + Duration::from_millis(800));
        assert!(!c.is_armed());
        c.sync(true, t0 + SEC * 3);
        assert!(!c.poll(t0 + SEC * 3 + Duration::from_millis(500)));
        assert_eq!(
            c.remaining(t0 + SEC * 3 + Duration::from_millis(500)),
            Some(Duration::from_millis(500))
        );
        assert!(c.poll(t0 + SEC * 4));
    }
}
