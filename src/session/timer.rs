use std::time::{Duration, Instant};

/// Shortest period accepted, so a zero period cannot stall [`RepeatingTimer::fire`].
const MIN_PERIOD: Duration = Duration::from_millis(1);

/// A repeating timer driven by the event loop.
///
/// The timer never fires on its own: the loop asks for [`deadline`] and
/// calls [`fire`] once that instant has passed. Because the pending fire is
/// only a stored deadline, [`stop`] cancels it synchronously and a fire
/// scheduled before the stop can never land afterwards.
///
/// Fires stay on the grid laid down by [`start`], so a loop that wakes a
/// little late does not push every later fire back.
///
/// [`deadline`]: RepeatingTimer::deadline
/// [`fire`]: RepeatingTimer::fire
/// [`start`]: RepeatingTimer::start
/// [`stop`]: RepeatingTimer::stop
#[derive(Debug, Clone)]
pub struct RepeatingTimer {
    period: Duration,
    next_fire: Option<Instant>,
}

impl RepeatingTimer {
    pub fn new(period: Duration) -> Self {
        Self {
            period: period.max(MIN_PERIOD),
            next_fire: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.next_fire.is_some()
    }

    /// When the next fire is due, if the timer is running.
    pub fn deadline(&self) -> Option<Instant> {
        self.next_fire
    }

    /// Schedule the first fire one period after `now`.
    ///
    /// Starting a running timer replaces its pending fire.
    pub fn start(&mut self, now: Instant) {
        self.next_fire = Some(now + self.period);
    }

    /// Cancel the pending fire. Returns whether the timer was running.
    pub fn stop(&mut self) -> bool {
        self.next_fire.take().is_some()
    }

    /// Count the periods that have elapsed by `now` and schedule the next one.
    ///
    /// Returns 0 before the deadline. A call several periods late reports
    /// all of them at once, and the next deadline is the first grid point
    /// after `now`.
    pub fn fire(&mut self, now: Instant) -> u32 {
        let Some(due) = self.next_fire else {
            return 0;
        };
        if now < due {
            return 0;
        }

        let behind = now.duration_since(due).as_nanos() / self.period.as_nanos();
        let fired = u32::try_from(behind).unwrap_or(u32::MAX - 1) + 1;
        self.next_fire = due.checked_add(self.period * fired);
        fired
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECOND: Duration = Duration::from_secs(1);

    #[test]
    fn test_new_timer_is_idle() {
        let mut timer = RepeatingTimer::new(SECOND);
        assert!(!timer.is_active());
        assert_eq!(timer.deadline(), None);
        assert_eq!(timer.fire(Instant::now() + SECOND * 10), 0);
    }

    #[test]
    fn test_fires_only_after_period() {
        let start = Instant::now();
        let mut timer = RepeatingTimer::new(SECOND);
        timer.start(start);

        assert_eq!(timer.fire(start + Duration::from_millis(999)), 0);
        assert_eq!(timer.fire(start + SECOND), 1);
        assert_eq!(timer.deadline(), Some(start + SECOND * 2));
    }

    #[test]
    fn test_late_fire_keeps_original_grid() {
        let start = Instant::now();
        let mut timer = RepeatingTimer::new(SECOND);
        timer.start(start);

        assert_eq!(timer.fire(start + Duration::from_millis(1_300)), 1);
        assert_eq!(timer.deadline(), Some(start + SECOND * 2));
        assert_eq!(timer.fire(start + Duration::from_millis(1_999)), 0);
        assert_eq!(timer.fire(start + SECOND * 2), 1);
    }

    #[test]
    fn test_slightly_late_wakes_do_not_drift() {
        let start = Instant::now();
        let mut timer = RepeatingTimer::new(SECOND);
        timer.start(start);

        let mut now = start;
        let mut fired = 0;
        for _ in 0..600 {
            now = timer.deadline().unwrap() + Duration::from_millis(5);
            fired += timer.fire(now);
        }

        assert_eq!(fired, 600);
        assert_eq!(now.duration_since(start).as_secs(), 600);
        assert_eq!(timer.deadline(), Some(start + SECOND * 601));
    }

    #[test]
    fn test_late_poll_reports_every_missed_period() {
        let start = Instant::now();
        let mut timer = RepeatingTimer::new(SECOND);
        timer.start(start);

        let much_later = start + Duration::from_millis(5_500);
        assert_eq!(timer.fire(much_later), 5);
        assert_eq!(timer.fire(much_later), 0);
        assert_eq!(timer.deadline(), Some(start + SECOND * 6));
    }

    #[test]
    fn test_zero_period_is_clamped() {
        let start = Instant::now();
        let mut timer = RepeatingTimer::new(Duration::ZERO);
        timer.start(start);

        assert_eq!(timer.fire(start + Duration::from_millis(3)), 3);
        assert!(timer.deadline().unwrap() > start + Duration::from_millis(3));
    }

    #[test]
    fn test_stop_cancels_pending_fire() {
        let start = Instant::now();
        let mut timer = RepeatingTimer::new(SECOND);
        timer.start(start);

        assert!(timer.stop());
        assert!(!timer.is_active());
        assert_eq!(timer.fire(start + SECOND * 3), 0);
        assert!(!timer.stop());
    }

    #[test]
    fn test_restart_replaces_pending_fire() {
        let start = Instant::now();
        let mut timer = RepeatingTimer::new(SECOND);
        timer.start(start);

        let restart = start + Duration::from_millis(900);
        timer.start(restart);

        assert_eq!(timer.fire(start + SECOND), 0);
        assert_eq!(timer.fire(restart + SECOND), 1);
    }
}
