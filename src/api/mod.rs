use crate::api::error::ApiError;
use crate::environment::Environment;
use crate::models::{DashboardStats, Goal, GoalProgress, RecentActivity, Streak};
use chrono::NaiveDate;

pub(crate) mod client;
pub use client::ApiClient;
pub mod error;

#[cfg(test)]
use mockall::automock;

/// Read access to the resources the dashboard is assembled from.
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait FitnessApi: Send + Sync {
    fn environment(&self) -> &Environment;

    /// Aggregate numbers for a day; `None` means today on the server's clock.
    async fn dashboard_stats(
        &self,
        target_date: Option<NaiveDate>,
    ) -> Result<DashboardStats, ApiError>;

    /// Consecutive active-day count.
    async fn streak(&self) -> Result<Streak, ApiError>;

    /// Current goal configuration. The server answers `null` when no goal is set.
    async fn goals(&self) -> Result<Option<Goal>, ApiError>;

    /// Progress against the current goal. Fails with 404 when no goal is set.
    async fn goal_progress(&self) -> Result<GoalProgress, ApiError>;

    /// Most recent workouts, meals and weigh-ins, newest first.
    async fn recent_activity(&self, limit: u32) -> Result<RecentActivity, ApiError>;
}
