use std::time::{Duration, Instant};

/// How long a flash stays on screen
pub const FLASH_DURATION: Duration = Duration::from_secs(3);

/// A flag that clears itself a fixed time after being raised
#[derive(Debug, Clone, Default)]
pub struct Flash {
    raised_at: Option<Instant>,
}

impl Flash {
    /// Raise the flag, restarting the timer if already up
    pub fn raise(&mut self, now: Instant) {
        self.raised_at = Some(now);
    }

    pub fn dismiss(&mut self) {
        self.raised_at = None;
    }

    /// Clear the flag once its time is up. Returns true if it was cleared.
    pub fn expire(&mut self, now: Instant) -> bool {
        match self.raised_at {
            Some(at) if now.saturating_duration_since(at) >= FLASH_DURATION => {
                self.raised_at = None;
                true
            }
            _ => false,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.raised_at.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hides_after_three_seconds() {
        let start = Instant::now();
        let mut flash = Flash::default();
        flash.raise(start);

        assert!(!flash.expire(start + Duration::from_millis(2999)));
        assert!(flash.is_visible());

        assert!(flash.expire(start + FLASH_DURATION));
        assert!(!flash.is_visible());
    }

    #[test]
    fn does_not_reappear_without_raise() {
        let start = Instant::now();
        let mut flash = Flash::default();
        flash.raise(start);
        flash.expire(start + FLASH_DURATION);

        assert!(!flash.expire(start + FLASH_DURATION * 10));
        assert!(!flash.is_visible());
    }

    #[test]
    fn raising_again_restarts_timer() {
        let start = Instant::now();
        let mut flash = Flash::default();
        flash.raise(start);
        flash.raise(start + Duration::from_secs(2));

        assert!(!flash.expire(start + Duration::from_secs(4)));
        assert!(flash.expire(start + Duration::from_secs(5)));
    }

    #[test]
    fn dismiss_clears_immediately() {
        let mut flash = Flash::default();
        flash.raise(Instant::now());
        flash.dismiss();
        assert!(!flash.is_visible());
    }
}
