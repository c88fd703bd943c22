//! Dashboard loader
//!
//! Fetches the four dashboard sources concurrently, waits for all of them to settle and
//! applies whatever succeeded as a single batch. A failed source never fails the load.

use super::state::SliceBatch;
use super::store::DashboardStore;
use crate::api::FitnessApi;
use crate::api::error::ApiError;
use crate::error_classifier::ErrorClassifier;
use crate::events::{Event, EventSender, Source};
use crate::logging::LogLevel;
use std::sync::Arc;
use tokio::task::JoinError;

/// What happened during one load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadReport {
    pub generation: u64,
    pub succeeded: Vec<Source>,
    pub failed: Vec<(Source, String)>,
    /// Set when the orchestration faulted and nothing was applied.
    pub fault: Option<String>,
    /// False when a newer load had already been applied.
    pub applied: bool,
}

impl LoadReport {
    fn new(generation: u64) -> Self {
        Self {
            generation,
            succeeded: Vec::new(),
            failed: Vec::new(),
            fault: None,
            applied: false,
        }
    }

    /// Every source failed. The view is still `Ready`, just empty.
    pub fn all_failed(&self) -> bool {
        self.fault.is_none() && self.succeeded.is_empty() && !self.failed.is_empty()
    }

    /// Every source answered.
    pub fn is_complete(&self) -> bool {
        self.fault.is_none() && self.failed.is_empty()
    }
}

/// The per-load fetching half of the loader. Cloned into the task that gathers a batch.
#[derive(Clone)]
struct Fetcher {
    api: Arc<dyn FitnessApi>,
    events: Option<EventSender>,
    classifier: ErrorClassifier,
}

impl Fetcher {
    /// Runs the four requests on their own tasks and settles each into an optional slice.
    async fn gather(self, generation: u64) -> (SliceBatch, LoadReport) {
        let stats_task = tokio::spawn({
            let api = Arc::clone(&self.api);
            async move { api.dashboard_stats(None).await }
        });
        let streak_task = tokio::spawn({
            let api = Arc::clone(&self.api);
            async move { api.streak().await }
        });
        let goals_task = tokio::spawn({
            let api = Arc::clone(&self.api);
            async move { api.goals().await }
        });
        let progress_task = tokio::spawn({
            let api = Arc::clone(&self.api);
            async move { api.goal_progress().await }
        });

        // Wait for every task; none is abandoned because another already failed.
        let (stats, streak, goals, progress) =
            tokio::join!(stats_task, streak_task, goals_task, progress_task);

        let mut report = LoadReport::new(generation);
        let batch = SliceBatch {
            stats: self.settle(Source::Stats, stats, &mut report),
            streak: self.settle(Source::Streak, streak, &mut report),
            goals: self.settle(Source::Goals, goals, &mut report),
            goal_progress: self.settle(Source::GoalProgress, progress, &mut report),
        };

        if report.all_failed() {
            log::warn!(
                "Dashboard load #{}: all sources failed, showing placeholders",
                generation
            );
            self.emit(Event::error(
                Source::Loader,
                "No dashboard data available",
                LogLevel::Warn,
            ));
        }
        (batch, report)
    }

    /// A request that failed, or whose task died, leaves its slice unset.
    fn settle<T>(
        &self,
        source: Source,
        joined: Result<Result<T, ApiError>, JoinError>,
        report: &mut LoadReport,
    ) -> Option<T> {
        match joined {
            Ok(Ok(value)) => {
                report.succeeded.push(source);
                self.emit(Event::success(source, "Loaded"));
                Some(value)
            }
            Ok(Err(error)) => {
                let level = self.classifier.classify_fetch_error(&error);
                self.record_failure(source, error.to_pretty(), level, report);
                None
            }
            Err(error) => {
                let message = if error.is_panic() {
                    "request task panicked".to_string()
                } else {
                    "request task was cancelled".to_string()
                };
                self.record_failure(source, message, LogLevel::Error, report);
                None
            }
        }
    }

    fn record_failure(
        &self,
        source: Source,
        message: String,
        level: LogLevel,
        report: &mut LoadReport,
    ) {
        log::log!(
            log::Level::from(level),
            "Dashboard source {} failed: {}",
            source,
            message
        );
        self.emit(Event::error(source, message.clone(), level));
        report.failed.push((source, message));
    }

    fn emit(&self, event: Event) {
        if let Some(events) = &self.events {
            events.send_event(event);
        }
    }
}

pub struct DashboardLoader {
    fetcher: Fetcher,
    store: Arc<DashboardStore>,
}

impl DashboardLoader {
    pub fn new(api: Arc<dyn FitnessApi>, store: Arc<DashboardStore>) -> Self {
        Self {
            fetcher: Fetcher {
                api,
                events: None,
                classifier: ErrorClassifier::new(),
            },
            store,
        }
    }

    /// Also report per-source outcomes on an event channel.
    pub fn with_events(mut self, events: EventSender) -> Self {
        self.fetcher.events = Some(events);
        self
    }

    pub fn store(&self) -> &Arc<DashboardStore> {
        &self.store
    }

    pub fn api(&self) -> &Arc<dyn FitnessApi> {
        &self.fetcher.api
    }

    /// Fetches all four sources and applies the results.
    ///
    /// Never fails because of a source: failed sources keep their previous slice and are
    /// logged. The status ends `Ready` unless gathering the batch itself faulted.
    pub async fn load(&self) -> LoadReport {
        let generation = self.store.begin_load();
        log::debug!("Dashboard load #{} started", generation);
        self.fetcher
            .emit(Event::refresh(format!("Refreshing dashboard (#{})", generation)));

        let fetcher = self.fetcher.clone();
        let (batch, mut report) = match tokio::spawn(fetcher.gather(generation)).await {
            Ok(gathered) => gathered,
            Err(error) => return self.fault(generation, error),
        };

        report.applied = self.store.apply(generation, batch);
        if report.applied {
            log::debug!(
                "Dashboard load #{} applied ({} ok, {} failed)",
                generation,
                report.succeeded.len(),
                report.failed.len()
            );
        } else {
            log::debug!(
                "Dashboard load #{} discarded, a newer load already applied",
                generation
            );
        }
        report
    }

    /// Manual refresh. Runs a full load; an in-flight load is not cancelled.
    pub async fn refresh(&self) -> LoadReport {
        self.load().await
    }

    fn fault(&self, generation: u64, error: JoinError) -> LoadReport {
        let message = if error.is_panic() {
            "dashboard load panicked".to_string()
        } else {
            "dashboard load was cancelled".to_string()
        };
        log::error!("Dashboard load #{} aborted: {}", generation, message);
        self.fetcher
            .emit(Event::error(Source::Loader, message.clone(), LogLevel::Error));

        let mut report = LoadReport::new(generation);
        report.applied = self.store.fail(generation, message.clone());
        report.fault = Some(message);
        report
    }
}
