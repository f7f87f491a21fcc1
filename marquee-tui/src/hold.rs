use std::time::{Duration, Instant};

/// How long a seat selection is held before it expires.
pub const HOLD_DURATION: Duration = Duration::from_secs(900);

/// Countdown guarding an in-progress seat selection.
///
/// State machine: Idle -> Running -> {Expired, Cancelled}. Expired is
/// terminal; there is no auto-restart. At most one timer runs at a time:
/// `start` cancels any prior Running instance before arming the new one,
/// and navigating away from the seat-selection view calls `cancel`
/// explicitly so no countdown outlives its screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoldState {
    Idle,
    Running { deadline: Instant },
    Expired,
    Cancelled,
}

#[derive(Debug, Clone)]
pub struct HoldTimer {
    state: HoldState,
    duration: Duration,
}

impl HoldTimer {
    pub fn new() -> Self {
        Self {
            state: HoldState::Idle,
            duration: HOLD_DURATION,
        }
    }

    #[cfg(test)]
    pub fn with_duration(duration: Duration) -> Self {
        Self {
            state: HoldState::Idle,
            duration,
        }
    }

    /// Arm the countdown. Any prior Running instance is cancelled first so
    /// two countdowns never tick concurrently.
    pub fn start(&mut self, now: Instant) {
        if self.is_running() {
            self.cancel();
        }
        self.state = HoldState::Running {
            deadline: now + self.duration,
        };
    }

    /// Running -> Cancelled. No-op in any other state.
    pub fn cancel(&mut self) {
        if self.is_running() {
            self.state = HoldState::Cancelled;
        }
    }

    /// Advance the countdown. Returns true exactly once, on the
    /// Running -> Expired transition; the caller clears the selection and
    /// navigates back to the default view.
    pub fn tick(&mut self, now: Instant) -> bool {
        if let HoldState::Running { deadline } = self.state {
            if now >= deadline {
                self.state = HoldState::Expired;
                return true;
            }
        }
        false
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, HoldState::Running { .. })
    }

    pub fn state(&self) -> HoldState {
        self.state
    }

    /// Whole seconds left, or None when not running.
    pub fn remaining_secs(&self, now: Instant) -> Option<u64> {
        match self.state {
            HoldState::Running { deadline } => {
                Some(deadline.saturating_duration_since(now).as_secs())
            }
            _ => None,
        }
    }

    /// Countdown formatted as MM:SS for the reservation summary.
    pub fn display(&self, now: Instant) -> Option<String> {
        self.remaining_secs(now)
            .map(|secs| format!("{:02}:{:02}", secs / 60, secs % 60))
    }
}

impl Default for HoldTimer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_idle() {
        let timer = HoldTimer::new();
        assert_eq!(timer.state(), HoldState::Idle);
        assert!(!timer.is_running());
        assert_eq!(timer.remaining_secs(Instant::now()), None);
    }

    #[test]
    fn runs_for_the_full_hold_duration() {
        let now = Instant::now();
        let mut timer = HoldTimer::new();
        timer.start(now);

        assert!(timer.is_running());
        assert_eq!(timer.remaining_secs(now), Some(900));
        assert_eq!(timer.display(now).as_deref(), Some("15:00"));

        let later = now + Duration::from_secs(899);
        assert!(!timer.tick(later));
        assert_eq!(timer.remaining_secs(later), Some(1));
        assert_eq!(timer.display(later).as_deref(), Some("00:01"));
    }

    #[test]
    fn expires_exactly_once_at_zero() {
        let now = Instant::now();
        let mut timer = HoldTimer::with_duration(Duration::from_secs(10));
        timer.start(now);

        let deadline = now + Duration::from_secs(10);
        assert!(timer.tick(deadline), "first tick at deadline must expire");
        assert_eq!(timer.state(), HoldState::Expired);

        // Terminal: no further transitions, no further decrements visible.
        assert!(!timer.tick(deadline + Duration::from_secs(5)));
        assert_eq!(timer.state(), HoldState::Expired);
        assert_eq!(timer.remaining_secs(deadline + Duration::from_secs(5)), None);
    }

    #[test]
    fn restart_replaces_the_running_countdown() {
        let now = Instant::now();
        let mut timer = HoldTimer::with_duration(Duration::from_secs(100));
        timer.start(now);

        // Start again halfway through: only the second countdown remains.
        let halfway = now + Duration::from_secs(50);
        timer.start(halfway);
        assert!(timer.is_running());
        assert_eq!(timer.remaining_secs(halfway), Some(100));

        // The first timer's deadline passing must not expire the second.
        let first_deadline = now + Duration::from_secs(100);
        assert!(!timer.tick(first_deadline));
        assert!(timer.is_running());
    }

    #[test]
    fn cancel_stops_a_running_timer() {
        let now = Instant::now();
        let mut timer = HoldTimer::new();
        timer.start(now);
        timer.cancel();

        assert_eq!(timer.state(), HoldState::Cancelled);
        assert!(!timer.tick(now + HOLD_DURATION));
        assert_eq!(timer.state(), HoldState::Cancelled);
    }

    #[test]
    fn cancel_is_a_noop_when_not_running() {
        let mut timer = HoldTimer::new();
        timer.cancel();
        assert_eq!(timer.state(), HoldState::Idle);

        let now = Instant::now();
        timer.start(now);
        timer.tick(now + HOLD_DURATION);
        timer.cancel();
        assert_eq!(timer.state(), HoldState::Expired);
    }
}
