//! Barely Surviving API Client
//!
//! A JSON-over-HTTP client for the fitness tracker API: dashboard reads plus
//! record keeping for workouts, meals, weight entries and goals.

use crate::api::FitnessApi;
use crate::api::error::ApiError;
use crate::consts::cli_consts::http::{CONNECT_TIMEOUT, REQUEST_TIMEOUT};
use crate::environment::Environment;
use crate::models::{
    DailySummary, DashboardStats, Goal, GoalProgress, GoalUpdate, ListFilter, Meal, MealUpdate,
    NewGoal, NewMeal, NewWeight, NewWorkout, RecentActivity, Streak, WeightEntry, WeightTrend,
    Workout, WorkoutUpdate,
};
use chrono::NaiveDate;
use reqwest::{Client, ClientBuilder, Method, Response, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;

// User-Agent string with client version
const USER_AGENT: &str = concat!("barely-surviving/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    environment: Environment,
}

impl ApiClient {
    pub fn new(environment: Environment) -> Result<Self, ApiError> {
        Url::parse(&environment.api_url())
            .map_err(|e| ApiError::InvalidUrl(format!("{} ({})", environment.api_url(), e)))?;

        let client = ClientBuilder::new()
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(REQUEST_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            environment,
        })
    }

    fn build_url(&self, endpoint: &str) -> String {
        format!(
            "{}/{}",
            self.environment.api_url().trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        )
    }

    fn decode_response<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, ApiError> {
        serde_json::from_slice(bytes).map_err(ApiError::Decode)
    }

    async fn handle_response_status(response: Response) -> Result<Response, ApiError> {
        if !response.status().is_success() {
            return Err(ApiError::from_response(response).await);
        }
        Ok(response)
    }

    async fn get_request<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let url = self.build_url(endpoint);
        let response = self.client.get(&url).query(query).send().await?;

        let response = Self::handle_response_status(response).await?;
        let response_bytes = response.bytes().await?;
        Self::decode_response(&response_bytes)
    }

    async fn send_request<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        method: Method,
        endpoint: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let url = self.build_url(endpoint);
        let body = serde_json::to_vec(body)?;
        let response = self
            .client
            .request(method, &url)
            .header("Content-Type", "application/json")
            .body(body)
            .send()
            .await?;

        let response = Self::handle_response_status(response).await?;
        let response_bytes = response.bytes().await?;
        Self::decode_response(&response_bytes)
    }

    async fn delete_request(&self, endpoint: &str) -> Result<(), ApiError> {
        let url = self.build_url(endpoint);
        let response = self.client.delete(&url).send().await?;

        Self::handle_response_status(response).await?;
        Ok(())
    }

    fn record_path(collection: &str, id: &str) -> String {
        format!("{}/{}", collection, urlencoding::encode(id))
    }

    /// Query pairs for a list request. `kind_param` names the type filter, if the
    /// endpoint has one.
    fn filter_query(filter: &ListFilter, kind_param: Option<&'static str>) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(start) = filter.start_date {
            query.push(("start_date", start.to_string()));
        }
        if let Some(end) = filter.end_date {
            query.push(("end_date", end.to_string()));
        }
        if let (Some(param), Some(kind)) = (kind_param, &filter.kind) {
            query.push((param, kind.clone()));
        }
        if let Some(limit) = filter.limit {
            query.push(("limit", limit.to_string()));
        }
        query
    }

    // ---------------------------------------------------------------------
    // Workouts
    // ---------------------------------------------------------------------

    pub async fn create_workout(&self, workout: &NewWorkout) -> Result<Workout, ApiError> {
        self.send_request(Method::POST, "workouts", workout).await
    }

    pub async fn list_workouts(&self, filter: &ListFilter) -> Result<Vec<Workout>, ApiError> {
        let query = Self::filter_query(filter, Some("workout_type"));
        self.get_request("workouts", &query).await
    }

    pub async fn get_workout(&self, id: &str) -> Result<Workout, ApiError> {
        self.get_request(&Self::record_path("workouts", id), &[])
            .await
    }

    pub async fn update_workout(
        &self,
        id: &str,
        update: &WorkoutUpdate,
    ) -> Result<Workout, ApiError> {
        self.send_request(Method::PUT, &Self::record_path("workouts", id), update)
            .await
    }

    pub async fn delete_workout(&self, id: &str) -> Result<(), ApiError> {
        self.delete_request(&Self::record_path("workouts", id))
            .await
    }

    // ---------------------------------------------------------------------
    // Meals
    // ---------------------------------------------------------------------

    pub async fn create_meal(&self, meal: &NewMeal) -> Result<Meal, ApiError> {
        self.send_request(Method::POST, "meals", meal).await
    }

    pub async fn list_meals(&self, filter: &ListFilter) -> Result<Vec<Meal>, ApiError> {
        let query = Self::filter_query(filter, Some("meal_type"));
        self.get_request("meals", &query).await
    }

    pub async fn get_meal(&self, id: &str) -> Result<Meal, ApiError> {
        self.get_request(&Self::record_path("meals", id), &[]).await
    }

    pub async fn update_meal(&self, id: &str, update: &MealUpdate) -> Result<Meal, ApiError> {
        self.send_request(Method::PUT, &Self::record_path("meals", id), update)
            .await
    }

    pub async fn delete_meal(&self, id: &str) -> Result<(), ApiError> {
        self.delete_request(&Self::record_path("meals", id)).await
    }

    pub async fn daily_summary(
        &self,
        target_date: Option<NaiveDate>,
    ) -> Result<DailySummary, ApiError> {
        let query: Vec<(&str, String)> = target_date
            .map(|date| vec![("target_date", date.to_string())])
            .unwrap_or_default();
        self.get_request("meals/daily-summary", &query).await
    }

    // ---------------------------------------------------------------------
    // Weight
    // ---------------------------------------------------------------------

    pub async fn create_weight(&self, entry: &NewWeight) -> Result<WeightEntry, ApiError> {
        self.send_request(Method::POST, "weight", entry).await
    }

    pub async fn list_weights(&self, filter: &ListFilter) -> Result<Vec<WeightEntry>, ApiError> {
        let query = Self::filter_query(filter, None);
        self.get_request("weight", &query).await
    }

    pub async fn get_weight(&self, id: &str) -> Result<WeightEntry, ApiError> {
        self.get_request(&Self::record_path("weight", id), &[]).await
    }

    pub async fn delete_weight(&self, id: &str) -> Result<(), ApiError> {
        self.delete_request(&Self::record_path("weight", id)).await
    }

    pub async fn weight_trend(&self, days: u32) -> Result<WeightTrend, ApiError> {
        self.get_request("weight/trend", &[("days", days.to_string())])
            .await
    }

    // ---------------------------------------------------------------------
    // Goals
    // ---------------------------------------------------------------------

    /// Creates the goal, or replaces the existing one (the API keeps a single goal).
    pub async fn save_goal(&self, goal: &NewGoal) -> Result<Goal, ApiError> {
        self.send_request(Method::POST, "goals", goal).await
    }

    /// Changes only the given fields of an existing goal.
    pub async fn update_goal(&self, id: &str, update: &GoalUpdate) -> Result<Goal, ApiError> {
        self.send_request(Method::PUT, &Self::record_path("goals", id), update)
            .await
    }

    pub async fn delete_goal(&self, id: &str) -> Result<(), ApiError> {
        self.delete_request(&Self::record_path("goals", id)).await
    }
}

#[async_trait::async_trait]
impl FitnessApi for ApiClient {
    fn environment(&self) -> &Environment {
        &self.environment
    }

    async fn dashboard_stats(
        &self,
        target_date: Option<NaiveDate>,
    ) -> Result<DashboardStats, ApiError> {
        let query: Vec<(&str, String)> = target_date
            .map(|date| vec![("target_date", date.to_string())])
            .unwrap_or_default();
        self.get_request("dashboard/stats", &query).await
    }

    async fn streak(&self) -> Result<Streak, ApiError> {
        self.get_request("dashboard/streak", &[]).await
    }

    async fn goals(&self) -> Result<Option<Goal>, ApiError> {
        self.get_request("goals", &[]).await
    }

    async fn goal_progress(&self) -> Result<GoalProgress, ApiError> {
        self.get_request("goals/progress", &[]).await
    }

    async fn recent_activity(&self, limit: u32) -> Result<RecentActivity, ApiError> {
        self.get_request("dashboard/recent-activity", &[("limit", limit.to_string())])
            .await
    }
}

#[cfg(test)]
/// These are ignored by default since they require a live API server to run.
mod live_api_tests {
    use crate::api::FitnessApi;
    use crate::environment::Environment;

    #[tokio::test]
    #[ignore] // This test requires a live API instance.
    /// Should return today's stats from a local server.
    async fn test_dashboard_stats() {
        let client = super::ApiClient::new(Environment::Local).unwrap();
        match client.dashboard_stats(None).await {
            Ok(stats) => println!("Stats: {:?}", stats),
            Err(e) => panic!("Failed to get stats: {}", e),
        }
    }

    #[tokio::test]
    #[ignore] // This test requires a live API instance.
    /// Should return the streak from a local server.
    async fn test_streak() {
        let client = super::ApiClient::new(Environment::Local).unwrap();
        match client.streak().await {
            Ok(streak) => println!("Streak: {} days", streak.days()),
            Err(e) => panic!("Failed to get streak: {}", e),
        }
    }
}
