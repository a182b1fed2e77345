use std::time::{Duration, Instant};

/// Trailing debounce for window resize notifications.
///
/// At most one deadline is pending; every new event pushes it back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizeDebouncer {
    delay: Duration,
    deadline: Option<Instant>,
}

impl ResizeDebouncer {
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
        }
    }

    #[must_use]
    pub fn delay(&self) -> Duration {
        self.delay
    }

    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Cancels any pending deadline and schedules a new one from `now`.
    pub fn schedule(&mut self, now: Instant) {
        self.deadline = Some(now + self.delay);
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    /// Returns `true` exactly once per burst, when the deadline has passed.
    pub fn take_due(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use super::ResizeDebouncer;

    #[test]
    fn burst_fires_once_after_last_event() {
        let start = Instant::now();
        let mut debouncer = ResizeDebouncer::new(Duration::from_millis(200));
        for step in 0..5 {
            debouncer.schedule(start + Duration::from_millis(step * 50));
        }
        assert!(!debouncer.take_due(start + Duration::from_millis(399)));
        assert!(debouncer.take_due(start + Duration::from_millis(400)));
        assert!(!debouncer.take_due(start + Duration::from_millis(1_000)));
    }
}
