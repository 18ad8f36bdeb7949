//! Cart badge bounce timer.

use std::time::{Duration, Instant};

/// How long the badge bounces after an add.
pub const BOUNCE_DURATION: Duration = Duration::from_millis(400);

/// Tracks whether the cart count badge should be bouncing.
///
/// Every add pulses the badge; the bounce runs for [`BOUNCE_DURATION`] from
/// the most recent pulse, so rapid adds keep the badge bouncing without
/// cutting the animation short. Callers pass the clock in, which keeps the
/// timer deterministic under test.
#[derive(Debug, Clone, Copy, Default)]
pub struct BadgePulse {
    bounce_until: Option<Instant>,
}

impl BadgePulse {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts (or restarts) the bounce window from `now`.
    pub fn pulse(&mut self, now: Instant) {
        self.bounce_until = Some(now + BOUNCE_DURATION);
    }

    /// Whether the badge is still inside a bounce window at `now`.
    pub fn is_bouncing(&self, now: Instant) -> bool {
        self.bounce_until.is_some_and(|until| now < until)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_bouncing_before_any_pulse() {
        let badge = BadgePulse::new();
        assert!(!badge.is_bouncing(Instant::now()));
    }

    #[test]
    fn bounces_for_the_full_window() {
        let t0 = Instant::now();
        let mut badge = BadgePulse::new();
        badge.pulse(t0);

        assert!(badge.is_bouncing(t0));
        assert!(badge.is_bouncing(t0 + Duration::from_millis(399)));
    }

    #[test]
    fn stops_bouncing_once_the_window_ends() {
        let t0 = Instant::now();
        let mut badge = BadgePulse::new();
        badge.pulse(t0);

        assert!(!badge.is_bouncing(t0 + Duration::from_millis(400)));
        assert!(!badge.is_bouncing(t0 + Duration::from_secs(2)));
    }

    #[test]
    fn a_second_pulse_restarts_the_window() {
        let t0 = Instant::now();
        let mut badge = BadgePulse::new();
        badge.pulse(t0);
        badge.pulse(t0 + Duration::from_millis(300));

        assert!(badge.is_bouncing(t0 + Duration::from_millis(650)));
        assert!(!badge.is_bouncing(t0 + Duration::from_millis(700)));
    }
}
