//! Scheduled resolution of a two-card selection.
//!
//! Resolution is a deferred continuation, not a thread: the session asks the
//! timer whether anything is due each tick. At most one resolution is held;
//! scheduling again or cancelling drops the older one, so a stale
//! continuation can never run. Tokens name each schedule in the logs.

/// Identifies one scheduled resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerToken(u64);

/// Outcome decided at selection time, committed when the delay elapses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Match,
    Mismatch,
}

/// A resolution waiting for its deadline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendingResolution {
    pub token: TimerToken,
    pub due_at: f64,
    pub first: usize,
    pub second: usize,
    pub outcome: Resolution,
}

#[derive(Debug, Default)]
pub struct ResolutionTimer {
    next_token: u64,
    pending: Option<PendingResolution>,
}

impl ResolutionTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule a resolution, replacing any pending one.
    pub fn schedule(
        &mut self,
        due_at: f64,
        first: usize,
        second: usize,
        outcome: Resolution,
    ) -> TimerToken {
        if let Some(previous) = self.pending {
            tracing::debug!(token = previous.token.0, "replacing pending resolution");
        }
        let token = TimerToken(self.next_token);
        self.next_token += 1;
        self.pending = Some(PendingResolution {
            token,
            due_at,
            first,
            second,
            outcome,
        });
        token
    }

    /// Drop the pending resolution without running it.
    pub fn cancel(&mut self) -> Option<PendingResolution> {
        self.pending.take()
    }

    pub fn deadline(&self) -> Option<f64> {
        self.pending.map(|pending| pending.due_at)
    }

    /// Take the pending resolution if its deadline has passed.
    pub fn poll(&mut self, now: f64) -> Option<PendingResolution> {
        match self.pending {
            Some(pending) if now >= pending.due_at => self.pending.take(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_poll_waits_for_deadline() {
        let mut timer = ResolutionTimer::new();
        timer.schedule(1.5, 0, 1, Resolution::Mismatch);
        assert!(timer.poll(1.0).is_none());
        assert_eq!(timer.deadline(), Some(1.5));

        let fired = timer.poll(1.5).expect("due at deadline");
        assert_eq!((fired.first, fired.second), (0, 1));
        assert_eq!(fired.outcome, Resolution::Mismatch);
        assert!(timer.deadline().is_none());
        assert!(timer.poll(10.0).is_none());
    }

    #[test]
    fn test_reschedule_replaces_previous() {
        let mut timer = ResolutionTimer::new();
        let old = timer.schedule(1.0, 0, 1, Resolution::Mismatch);
        let new = timer.schedule(2.0, 2, 3, Resolution::Match);
        assert_ne!(old, new);

        // The replaced deadline never fires
        assert!(timer.poll(1.5).is_none());
        let fired = timer.poll(2.0).expect("current schedule fires");
        assert_eq!(fired.token, new);
        assert_eq!(fired.first, 2);
        assert_eq!(timer.deadline(), None);
    }

    #[test]
    fn test_cancel_clears() {
        let mut timer = ResolutionTimer::new();
        let token = timer.schedule(0.5, 4, 5, Resolution::Match);
        assert_eq!(timer.deadline(), Some(0.5));
        let cancelled = timer.cancel().expect("was pending");
        assert_eq!(cancelled.token, token);
        assert!(timer.poll(100.0).is_none());
    }
}
