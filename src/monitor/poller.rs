//! Flight status poll loop.

use std::time::Duration;

use tokio::sync::broadcast;
use tokio::time::sleep;

use crate::config::MonitorConfig;
use crate::monitor::sample::{FlightIdent, Route};
use crate::monitor::state::MonitorState;
use crate::notify::{Notifier, StatusUpdate};
use crate::observability::metrics;
use crate::provider::StatusProvider;

/// Result of a single poll cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// Fetched status matches the last recorded one.
    Unchanged,
    /// Status changed and the notifier accepted it.
    Notified,
    /// Status changed but the notifier failed.
    NotifyFailed,
    /// The fetch itself failed; state untouched.
    FetchFailed,
}

impl CycleOutcome {
    fn label(self) -> &'static str {
        match self {
            CycleOutcome::Unchanged => "unchanged",
            CycleOutcome::Notified => "notified",
            CycleOutcome::NotifyFailed => "notify_failed",
            CycleOutcome::FetchFailed => "fetch_failed",
        }
    }
}

/// Polls a provider and notifies on every change of rendered status.
pub struct Poller<P, N> {
    provider: P,
    notifier: N,
    flight: FlightIdent,
    route: Route,
    interval: Duration,
    retry_delay: Duration,
    redeliver_failed: bool,
}

impl<P, N> Poller<P, N>
where
    P: StatusProvider,
    N: Notifier,
{
    /// Create a poller for one flight.
    pub fn new(provider: P, notifier: N, flight: FlightIdent, config: &MonitorConfig) -> Self {
        Self {
            provider,
            notifier,
            flight,
            route: Route::default(),
            interval: Duration::from_secs(config.interval_secs),
            retry_delay: Duration::from_secs(config.retry_delay_secs),
            redeliver_failed: config.redeliver_failed,
        }
    }

    /// Attach origin/destination labels to outgoing updates.
    pub fn with_route(mut self, route: Route) -> Self {
        self.route = route;
        self
    }

    pub fn flight(&self) -> &FlightIdent {
        &self.flight
    }

    /// Delay to wait after a cycle with the given outcome.
    pub fn delay_after(&self, outcome: CycleOutcome) -> Duration {
        match outcome {
            CycleOutcome::Unchanged | CycleOutcome::Notified => self.interval,
            CycleOutcome::NotifyFailed if !self.redeliver_failed => self.interval,
            CycleOutcome::NotifyFailed | CycleOutcome::FetchFailed => self.retry_delay,
        }
    }

    /// Run one fetch-compare-notify step.
    pub async fn poll_once(&self, state: &mut MonitorState) -> CycleOutcome {
        state.begin_poll();
        let outcome = self.cycle(state).await;
        state.finish_poll();

        metrics::record_poll(outcome.label());
        outcome
    }

    async fn cycle(&self, state: &mut MonitorState) -> CycleOutcome {
        let sample = match self.provider.fetch_status().await {
            Ok(sample) => sample,
            Err(e) => {
                state.record_fetch_failure();
                tracing::error!(
                    flight = %self.flight,
                    error = %e,
                    consecutive_failures = state.consecutive_failures(),
                    retry_in_secs = self.retry_delay.as_secs(),
                    "Error fetching flight status"
                );
                return CycleOutcome::FetchFailed;
            }
        };
        state.record_fetch_success();

        let rendered = sample.render(&self.flight);
        tracing::info!(flight = %self.flight, "{}", rendered);

        if !state.is_change(&rendered) {
            tracing::debug!(flight = %self.flight, "Status unchanged");
            return CycleOutcome::Unchanged;
        }

        metrics::record_status_change();
        let update = StatusUpdate {
            flight: self.flight.clone(),
            route: self.route.clone(),
            sample,
            rendered,
        };

        match self.notifier.notify(&update).await {
            Ok(()) => {
                metrics::record_notification(true);
                state.record_notification();
                state.record_status(update.rendered);
                CycleOutcome::Notified
            }
            Err(e) => {
                metrics::record_notification(false);
                tracing::error!(
                    flight = %self.flight,
                    error = %e,
                    redeliver = self.redeliver_failed,
                    "Failed to send status notification"
                );
                if !self.redeliver_failed {
                    state.record_status(update.rendered);
                }
                CycleOutcome::NotifyFailed
            }
        }
    }

    /// Run the poll loop until the shutdown signal fires.
    ///
    /// The state is handed back so callers can inspect or resume it.
    pub async fn run(
        &self,
        mut state: MonitorState,
        mut shutdown: broadcast::Receiver<()>,
    ) -> MonitorState {
        tracing::info!(
            flight = %self.flight,
            interval_secs = self.interval.as_secs(),
            retry_delay_secs = self.retry_delay.as_secs(),
            "Monitoring flight"
        );

        loop {
            let outcome = tokio::select! {
                outcome = self.poll_once(&mut state) => Some(outcome),
                _ = shutdown.recv() => None,
            };
            let Some(outcome) = outcome else {
                break;
            };

            let delay = self.delay_after(outcome);
            tokio::select! {
                _ = sleep(delay) => {}
                _ = shutdown.recv() => break,
            }
        }

        state.stop();
        tracing::info!(
            flight = %self.flight,
            cycles = state.cycles(),
            notifications = state.notifications_sent(),
            "Flight tracking stopped"
        );
        state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::monitor::{PollPhase, StatusSample};
    use crate::notify::NotifyError;
    use crate::provider::{FetchError, FetchResult};
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};

    /// Replays a fixed script; fires `done` and hangs once it runs out.
    struct ScriptedProvider {
        script: Mutex<VecDeque<FetchResult<StatusSample>>>,
        fetched_at: Arc<Mutex<Vec<tokio::time::Instant>>>,
        done: broadcast::Sender<()>,
    }

    #[async_trait]
    impl StatusProvider for ScriptedProvider {
        async fn fetch_status(&self) -> FetchResult<StatusSample> {
            self.fetched_at.lock().unwrap().push(tokio::time::Instant::now());
            let next = self.script.lock().unwrap().pop_front();
            match next {
                Some(result) => result,
                None => {
                    let _ = self.done.send(());
                    std::future::pending().await
                }
            }
        }
    }

    /// Records every update; fails the first `failures` deliveries.
    #[derive(Clone, Default)]
    struct RecordingNotifier {
        sent: Arc<Mutex<Vec<String>>>,
        failures: Arc<Mutex<u32>>,
    }

    #[async_trait]
    impl Notifier for RecordingNotifier {
        async fn notify(&self, update: &StatusUpdate) -> Result<(), NotifyError> {
            let mut failures = self.failures.lock().unwrap();
            if *failures > 0 {
                *failures -= 1;
                return Err(NotifyError::Transport("relay refused".into()));
            }
            self.sent
                .lock()
                .unwrap()
                .push(update.sample.status().unwrap_or("no data").to_string());
            Ok(())
        }
    }

    fn status(s: &str) -> FetchResult<StatusSample> {
        Ok(StatusSample::reported(Some(s.into()), None, None))
    }

    fn network_error() -> FetchResult<StatusSample> {
        Err(FetchError::Connection("connection refused".into()))
    }

    fn monitor_config() -> MonitorConfig {
        MonitorConfig {
            interval_secs: 300,
            retry_delay_secs: 60,
            redeliver_failed: false,
        }
    }

    struct Harness {
        poller: Poller<ScriptedProvider, RecordingNotifier>,
        notifier: RecordingNotifier,
        fetched_at: Arc<Mutex<Vec<tokio::time::Instant>>>,
        shutdown: broadcast::Sender<()>,
    }

    fn harness(script: Vec<FetchResult<StatusSample>>, config: MonitorConfig) -> Harness {
        let (shutdown, _) = broadcast::channel(1);
        let fetched_at = Arc::new(Mutex::new(Vec::new()));
        let notifier = RecordingNotifier::default();
        let provider = ScriptedProvider {
            script: Mutex::new(script.into()),
            fetched_at: fetched_at.clone(),
            done: shutdown.clone(),
        };
        Harness {
            poller: Poller::new(provider, notifier.clone(), FlightIdent::new("AA", "100"), &config),
            notifier,
            fetched_at,
            shutdown,
        }
    }

    fn sent(notifier: &RecordingNotifier) -> Vec<String> {
        notifier.sent.lock().unwrap().clone()
    }

    #[tokio::test]
    async fn test_scheduled_then_active() {
        let h = harness(
            vec![status("scheduled"), status("scheduled"), status("active")],
            monitor_config(),
        );
        let mut state = MonitorState::new();

        assert_eq!(h.poller.poll_once(&mut state).await, CycleOutcome::Notified);
        assert_eq!(
            state.last_status.as_deref(),
            Some("Flight AA100 status: scheduled\nDeparture: unknown\nArrival: unknown")
        );

        assert_eq!(h.poller.poll_once(&mut state).await, CycleOutcome::Unchanged);
        assert_eq!(h.poller.poll_once(&mut state).await, CycleOutcome::Notified);

        assert_eq!(sent(&h.notifier), vec!["scheduled", "active"]);
        assert_eq!(state.notifications_sent(), 2);
        assert_eq!(state.cycles(), 3);
        assert_eq!(state.phase(), PollPhase::Idle);
    }

    #[tokio::test]
    async fn test_one_notification_per_run_of_equal_statuses() {
        let script = ["A", "A", "B", "B", "B", "C"].into_iter().map(status).collect();
        let h = harness(script, monitor_config());
        let mut state = MonitorState::new();

        for _ in 0..6 {
            h.poller.poll_once(&mut state).await;
        }

        assert_eq!(sent(&h.notifier), vec!["A", "B", "C"]);
    }

    #[tokio::test]
    async fn test_returning_status_notifies_again() {
        let script = ["A", "B", "A"].into_iter().map(status).collect();
        let h = harness(script, monitor_config());
        let mut state = MonitorState::new();

        for _ in 0..3 {
            h.poller.poll_once(&mut state).await;
        }

        assert_eq!(sent(&h.notifier), vec!["A", "B", "A"]);
    }

    #[tokio::test]
    async fn test_fetch_failure_leaves_state_untouched() {
        let h = harness(vec![status("scheduled"), network_error()], monitor_config());
        let mut state = MonitorState::new();

        h.poller.poll_once(&mut state).await;
        let before = state.last_status.clone();

        let outcome = h.poller.poll_once(&mut state).await;
        assert_eq!(outcome, CycleOutcome::FetchFailed);
        assert_eq!(state.last_status, before);
        assert_eq!(state.consecutive_failures(), 1);
        assert_eq!(sent(&h.notifier).len(), 1);
        assert_eq!(h.poller.delay_after(outcome), Duration::from_secs(60));
    }

    #[tokio::test]
    async fn test_no_data_is_a_status() {
        let h = harness(
            vec![Ok(StatusSample::NoData), Ok(StatusSample::NoData), status("active")],
            monitor_config(),
        );
        let mut state = MonitorState::new();

        for _ in 0..3 {
            h.poller.poll_once(&mut state).await;
        }

        assert_eq!(sent(&h.notifier), vec!["no data", "active"]);
    }

    #[tokio::test]
    async fn test_notify_failure_advances_status_by_default() {
        let h = harness(vec![status("scheduled"), status("scheduled")], monitor_config());
        *h.notifier.failures.lock().unwrap() = 1;
        let mut state = MonitorState::new();

        let outcome = h.poller.poll_once(&mut state).await;
        assert_eq!(outcome, CycleOutcome::NotifyFailed);
        assert!(state.last_status.is_some());
        assert_eq!(h.poller.delay_after(outcome), Duration::from_secs(300));

        assert_eq!(h.poller.poll_once(&mut state).await, CycleOutcome::Unchanged);
        assert!(sent(&h.notifier).is_empty());
    }

    #[tokio::test]
    async fn test_notify_failure_redelivers_when_configured() {
        let config = MonitorConfig {
            redeliver_failed: true,
            ..monitor_config()
        };
        let h = harness(vec![status("scheduled"), status("scheduled")], config);
        *h.notifier.failures.lock().unwrap() = 1;
        let mut state = MonitorState::new();

        let outcome = h.poller.poll_once(&mut state).await;
        assert_eq!(outcome, CycleOutcome::NotifyFailed);
        assert_eq!(state.last_status, None);
        assert_eq!(h.poller.delay_after(outcome), Duration::from_secs(60));

        assert_eq!(h.poller.poll_once(&mut state).await, CycleOutcome::Notified);
        assert_eq!(sent(&h.notifier), vec!["scheduled"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_spaces_cycles_and_stops_on_shutdown() {
        let h = harness(
            vec![status("scheduled"), network_error(), status("scheduled"), status("active")],
            monitor_config(),
        );

        let state = h.poller.run(MonitorState::new(), h.shutdown.subscribe()).await;

        assert_eq!(state.phase(), PollPhase::Stopped);
        assert_eq!(sent(&h.notifier), vec!["scheduled", "active"]);
        assert_eq!(state.notifications_sent(), 2);

        let fetched_at = h.fetched_at.lock().unwrap().clone();
        let gaps: Vec<u64> = fetched_at
            .windows(2)
            .map(|w| (w[1] - w[0]).as_secs())
            .collect();
        // ok, failed (retry delay), ok, ok, then the script runs dry.
        assert_eq!(gaps, vec![300, 60, 300, 300]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_during_sleep() {
        let h = harness(vec![status("scheduled")], monitor_config());
        let shutdown = h.shutdown.clone();
        let rx = h.shutdown.subscribe();

        let stopper = tokio::spawn(async move {
            sleep(Duration::from_secs(10)).await;
            let _ = shutdown.send(());
        });

        let state = h.poller.run(MonitorState::new(), rx).await;
        stopper.await.unwrap();

        assert_eq!(state.phase(), PollPhase::Stopped);
        assert_eq!(state.cycles(), 1);
        assert_eq!(h.fetched_at.lock().unwrap().len(), 1);
    }
}
