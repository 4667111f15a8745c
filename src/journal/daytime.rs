use chrono::{NaiveDate, Timelike};
use std::time::{Duration, Instant};
use tracing::info;

use crate::models::JournalMode;

/// How often the wall clock is re-checked
pub const POLL_INTERVAL: Duration = Duration::from_secs(5 * 60);

/// Source of local wall-clock time
pub trait Clock {
    /// Current local hour, 0-23
    fn local_hour(&self) -> u32;
    fn today(&self) -> NaiveDate;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn local_hour(&self) -> u32 {
        chrono::Local::now().hour()
    }

    fn today(&self) -> NaiveDate {
        chrono::Local::now().date_naive()
    }
}

/// Hours during which night journaling is shown: `[start, end)`, wrapping
/// past midnight when start > end. `start == end` is never night.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NightWindow {
    start_hour: u32,
    end_hour: u32,
}

impl Default for NightWindow {
    fn default() -> Self {
        Self {
            start_hour: 18,
            end_hour: 6,
        }
    }
}

impl NightWindow {
    pub fn new(start_hour: u32, end_hour: u32) -> Option<Self> {
        (start_hour < 24 && end_hour < 24).then_some(Self {
            start_hour,
            end_hour,
        })
    }

    pub fn is_night(&self, hour: u32) -> bool {
        if self.start_hour <= self.end_hour {
            hour >= self.start_hour && hour < self.end_hour
        } else {
            hour >= self.start_hour || hour < self.end_hour
        }
    }

    pub fn mode_at(&self, hour: u32) -> JournalMode {
        if self.is_night(hour) {
            JournalMode::Night
        } else {
            JournalMode::Morning
        }
    }
}

/// Tracks the active journal mode, re-evaluating the clock every
/// [`POLL_INTERVAL`]
#[derive(Debug)]
pub struct DaytimeSelector {
    window: NightWindow,
    interval: Duration,
    mode: JournalMode,
    last_check: Instant,
}

impl DaytimeSelector {
    /// Evaluate the clock immediately
    pub fn new(window: NightWindow, clock: &dyn Clock, now: Instant) -> Self {
        Self {
            window,
            interval: POLL_INTERVAL,
            mode: window.mode_at(clock.local_hour()),
            last_check: now,
        }
    }

    pub fn mode(&self) -> JournalMode {
        self.mode
    }

    pub fn is_night(&self) -> bool {
        self.mode == JournalMode::Night
    }

    /// Re-check the clock if the interval has elapsed. Returns the new mode
    /// when it changed.
    pub fn poll(&mut self, clock: &dyn Clock, now: Instant) -> Option<JournalMode> {
        if now.saturating_duration_since(self.last_check) < self.interval {
            return None;
        }
        self.last_check = now;

        let mode = self.window.mode_at(clock.local_hour());
        if mode == self.mode {
            return None;
        }
        info!(from = %self.mode, to = %mode, "Journal mode changed");
        self.mode = mode;
        Some(mode)
    }
}

#[cfg(test)]
pub(crate) mod test_clock {
    use super::Clock;
    use chrono::NaiveDate;
    use std::cell::Cell;

    /// Clock whose hour and date can be moved by tests
    pub struct FixedClock {
        pub hour: Cell<u32>,
        pub date: Cell<NaiveDate>,
    }

    impl FixedClock {
        pub fn at(hour: u32) -> Self {
            Self {
                hour: Cell::new(hour),
                date: Cell::new(NaiveDate::from_ymd_opt(2026, 10, 14).unwrap()),
            }
        }
    }

    impl Clock for FixedClock {
        fn local_hour(&self) -> u32 {
            self.hour.get()
        }

        fn today(&self) -> NaiveDate {
            self.date.get()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_clock::FixedClock;
    use super::*;

    #[test]
    fn default_window_is_six_pm_to_six_am() {
        let window = NightWindow::default();
        let night: Vec<u32> = (0..24).filter(|&h| window.is_night(h)).collect();
        assert_eq!(night, vec![0, 1, 2, 3, 4, 5, 18, 19, 20, 21, 22, 23]);
    }

    #[test]
    fn non_wrapping_window() {
        let window = NightWindow::new(1, 4).unwrap();
        assert!(!window.is_night(0));
        assert!(window.is_night(1));
        assert!(window.is_night(3));
        assert!(!window.is_night(4));
    }

    #[test]
    fn equal_bounds_are_never_night() {
        let window = NightWindow::new(7, 7).unwrap();
        assert!((0..24).all(|h| !window.is_night(h)));
    }

    #[test]
    fn rejects_hours_past_23() {
        assert!(NightWindow::new(24, 6).is_none());
        assert!(NightWindow::new(18, 30).is_none());
    }

    #[test]
    fn evaluates_on_start() {
        let start = Instant::now();
        let selector = DaytimeSelector::new(NightWindow::default(), &FixedClock::at(20), start);
        assert!(selector.is_night());
        let selector = DaytimeSelector::new(NightWindow::default(), &FixedClock::at(9), start);
        assert_eq!(selector.mode(), JournalMode::Morning);
    }

    #[test]
    fn only_rechecks_after_interval() {
        let clock = FixedClock::at(17);
        let start = Instant::now();
        let mut selector = DaytimeSelector::new(NightWindow::default(), &clock, start);
        assert_eq!(selector.mode(), JournalMode::Morning);

        clock.hour.set(18);
        assert_eq!(selector.poll(&clock, start + Duration::from_secs(60)), None);
        assert_eq!(selector.mode(), JournalMode::Morning);

        assert_eq!(
            selector.poll(&clock, start + POLL_INTERVAL),
            Some(JournalMode::Night)
        );
        assert!(selector.is_night());

        // No change reported while the hour stays in the window
        assert_eq!(selector.poll(&clock, start + POLL_INTERVAL * 2), None);
    }
}
