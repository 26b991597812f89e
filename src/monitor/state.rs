//! Poll loop state.
//!
//! # States
//! - Idle: between polls (sleeping)
//! - Polling: fetch, compare and notify in progress
//! - Stopped: terminal, entered on shutdown
//!
//! # State Transitions
//! ```text
//! Idle → Polling: cycle starts
//! Polling → Idle: cycle finishes (any outcome)
//! Idle | Polling → Stopped: shutdown signal
//! ```
//!
//! # Design Decisions
//! - State is owned by the caller and handed back from `Poller::run`
//! - `last_status` only changes on a successful fetch; never persisted

/// Phase of the poll loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PollPhase {
    #[default]
    Idle,
    Polling,
    Stopped,
}

/// Mutable state of one monitoring session.
#[derive(Debug, Clone, Default)]
pub struct MonitorState {
    /// Rendered status of the last change that was recorded.
    pub last_status: Option<String>,
    phase: PollPhase,
    cycles: u64,
    notifications_sent: u64,
    consecutive_failures: u32,
}

impl MonitorState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> PollPhase {
        self.phase
    }

    /// Number of cycles started.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    pub fn notifications_sent(&self) -> u64 {
        self.notifications_sent
    }

    /// Failed fetches since the last successful one.
    pub fn consecutive_failures(&self) -> u32 {
        self.consecutive_failures
    }

    /// Whether `rendered` differs from the last recorded status.
    pub fn is_change(&self, rendered: &str) -> bool {
        self.last_status.as_deref() != Some(rendered)
    }

    pub(crate) fn begin_poll(&mut self) {
        if self.phase == PollPhase::Stopped {
            return;
        }
        self.phase = PollPhase::Polling;
        self.cycles += 1;
        tracing::trace!(cycle = self.cycles, "Idle -> Polling");
    }

    pub(crate) fn finish_poll(&mut self) {
        if self.phase == PollPhase::Polling {
            self.phase = PollPhase::Idle;
            tracing::trace!(cycle = self.cycles, "Polling -> Idle");
        }
    }

    pub(crate) fn stop(&mut self) {
        tracing::trace!(from = ?self.phase, "-> Stopped");
        self.phase = PollPhase::Stopped;
    }

    pub(crate) fn record_fetch_failure(&mut self) {
        self.consecutive_failures = self.consecutive_failures.saturating_add(1);
    }

    pub(crate) fn record_fetch_success(&mut self) {
        self.consecutive_failures = 0;
    }

    pub(crate) fn record_status(&mut self, rendered: String) {
        self.last_status = Some(rendered);
    }

    pub(crate) fn record_notification(&mut self) {
        self.notifications_sent += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_cycle() {
        let mut state = MonitorState::new();
        assert_eq!(state.phase(), PollPhase::Idle);

        state.begin_poll();
        assert_eq!(state.phase(), PollPhase::Polling);
        assert_eq!(state.cycles(), 1);

        state.finish_poll();
        assert_eq!(state.phase(), PollPhase::Idle);
    }

    #[test]
    fn test_stopped_is_terminal() {
        let mut state = MonitorState::new();
        state.begin_poll();
        state.stop();

        state.finish_poll();
        state.begin_poll();
        assert_eq!(state.phase(), PollPhase::Stopped);
        assert_eq!(state.cycles(), 1);
    }

    #[test]
    fn test_change_detection() {
        let mut state = MonitorState::new();
        assert!(state.is_change("scheduled"));

        state.record_status("scheduled".into());
        assert!(!state.is_change("scheduled"));
        assert!(state.is_change("active"));
    }

    #[test]
    fn test_failure_counter_resets() {
        let mut state = MonitorState::new();
        state.record_fetch_failure();
        state.record_fetch_failure();
        assert_eq!(state.consecutive_failures(), 2);

        state.record_fetch_success();
        assert_eq!(state.consecutive_failures(), 0);
    }
}
