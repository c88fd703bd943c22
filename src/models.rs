//! Payloads exchanged with the fitness API.
//!
//! Response types tolerate missing fields so a partially filled payload still decodes;
//! unknown fields are ignored.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Aggregate numbers for a single day, from `GET /dashboard/stats`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardStats {
    pub date: Option<NaiveDate>,
    pub calories_consumed: i64,
    pub protein_consumed: i64,
    pub workout_count: u32,
    pub calories_burned: i64,
    pub current_weight: Option<f64>,
    pub meal_count: u32,
}

/// Consecutive active days, from `GET /dashboard/streak`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Streak {
    pub streak: Option<u32>,
    pub last_activity_date: Option<NaiveDate>,
}

impl Streak {
    /// The streak length, zero when the server left it out.
    pub fn days(&self) -> u32 {
        self.streak.unwrap_or(0)
    }
}

/// The user's goal configuration, from `GET /goals`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Goal {
    #[serde(alias = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub start_weight: f64,
    pub target_weight: f64,
    pub target_date: Option<NaiveDate>,
    pub daily_calorie_goal: Option<u32>,
    pub weekly_workouts: Option<u8>,
    pub active_days_per_week: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// Progress derived from the goal and the latest weight, from `GET /goals/progress`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GoalProgress {
    pub goal: Option<Goal>,
    pub current_weight: f64,
    pub start_weight: f64,
    pub target_weight: f64,
    pub total_to_lose: f64,
    pub lost_so_far: f64,
    pub remaining: f64,
    pub percent_complete: f64,
}

impl GoalProgress {
    /// Percentage clamped to the range a gauge can show.
    pub fn gauge_percent(&self) -> u16 {
        if self.percent_complete.is_nan() {
            return 0;
        }
        self.percent_complete.clamp(0.0, 100.0).round() as u16
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActivityItem {
    #[serde(rename = "type")]
    pub kind: String,
    pub id: String,
    pub title: String,
    pub details: String,
    pub date: String,
    pub icon: String,
}

/// Combined feed of workouts, meals and weigh-ins.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecentActivity {
    pub activities: Vec<ActivityItem>,
    pub count: u32,
}

// =============================================================================
// RECORDS
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display, strum::EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum WorkoutType {
    Cardio,
    Strength,
    Flexibility,
    Sports,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display, strum::EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workout {
    #[serde(alias = "_id", default)]
    pub id: Option<String>,
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
    pub duration: u32,
    #[serde(default)]
    pub calories_burned: u32,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
}

impl Display for Workout {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} [{}] {} min, {} cal burned",
            self.name, self.kind, self.duration, self.calories_burned
        )?;
        if let Some(date) = &self.date {
            write!(f, " ({})", date)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewWorkout {
    #[serde(rename = "type")]
    pub kind: WorkoutType,
    pub name: String,
    pub duration: u32,
    pub calories_burned: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meal {
    #[serde(alias = "_id", default)]
    pub id: Option<String>,
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
    pub calories: u32,
    #[serde(default)]
    pub protein: u32,
    #[serde(default)]
    pub carbs: Option<u32>,
    #[serde(default)]
    pub fat: Option<u32>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
}

impl Display for Meal {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} [{}] {} cal, {}g protein",
            self.description, self.kind, self.calories, self.protein
        )?;
        if let Some(date) = &self.date {
            write!(f, " ({})", date)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewMeal {
    #[serde(rename = "type")]
    pub kind: MealType,
    pub description: String,
    pub calories: u32,
    pub protein: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub carbs: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fat: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DailySummary {
    pub date: Option<NaiveDate>,
    pub total_calories: i64,
    pub total_protein: i64,
    pub total_carbs: i64,
    pub total_fat: i64,
    pub meal_count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightEntry {
    #[serde(alias = "_id", default)]
    pub id: Option<String>,
    pub weight: f64,
    #[serde(default)]
    pub date: Option<NaiveDate>,
}

impl Display for WeightEntry {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.date {
            Some(date) => write!(f, "{:.1} lbs on {}", self.weight, date),
            None => write!(f, "{:.1} lbs", self.weight),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewWeight {
    pub weight: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrendPoint {
    pub date: Option<NaiveDate>,
    pub weight: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeightTrend {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub data_points: u32,
    pub start_weight: Option<f64>,
    pub current_weight: Option<f64>,
    pub change: Option<f64>,
    pub trend: Vec<TrendPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewGoal {
    pub start_weight: f64,
    pub target_weight: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub daily_calorie_goal: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weekly_workouts: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active_days_per_week: Option<u8>,
}

/// Partial workout update; only the set fields are sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WorkoutUpdate {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<WorkoutType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calories_burned: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl WorkoutUpdate {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Partial meal update; only the set fields are sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MealUpdate {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<MealType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calories: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protein: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub carbs: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fat: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl MealUpdate {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Partial goal update; only the set fields are sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GoalUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_weight: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_weight: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub daily_calorie_goal: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weekly_workouts: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active_days_per_week: Option<u8>,
}

impl GoalUpdate {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Filters shared by the list endpoints.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListFilter {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub kind: Option<String>,
    pub limit: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    // Partial stats payloads fill the rest with defaults.
    fn test_stats_decode_with_missing_fields() {
        let stats: DashboardStats =
            serde_json::from_str(r#"{"calories_consumed": 1200, "workout_count": 1}"#).unwrap();
        assert_eq!(stats.calories_consumed, 1200);
        assert_eq!(stats.workout_count, 1);
        assert_eq!(stats.current_weight, None);
        assert_eq!(stats.meal_count, 0);
    }

    #[test]
    fn test_stats_decode_full_payload() {
        let body = r#"{
            "date": "2026-02-09",
            "calories_consumed": 1850,
            "protein_consumed": 120,
            "workout_count": 2,
            "calories_burned": 540,
            "current_weight": 182.4,
            "meal_count": 3
        }"#;
        let stats: DashboardStats = serde_json::from_str(body).unwrap();
        assert_eq!(stats.date, NaiveDate::from_ymd_opt(2026, 2, 9));
        assert_eq!(stats.current_weight, Some(182.4));
    }

    #[test]
    fn test_streak_defaults_to_zero() {
        let streak: Streak = serde_json::from_str(r#"{"last_activity_date": null}"#).unwrap();
        assert_eq!(streak.days(), 0);

        let streak: Streak = serde_json::from_str(r#"{"streak": 5}"#).unwrap();
        assert_eq!(streak.days(), 5);
    }

    #[test]
    // The API serializes document ids as `_id`.
    fn test_goal_accepts_mongo_id() {
        let goal: Goal = serde_json::from_str(
            r#"{"_id": "65c6", "start_weight": 200.0, "target_weight": 170.0, "weekly_workouts": 4}"#,
        )
        .unwrap();
        assert_eq!(goal.id.as_deref(), Some("65c6"));
        assert_eq!(goal.weekly_workouts, Some(4));
        assert_eq!(goal.target_date, None);
    }

    #[test]
    fn test_null_goal_decodes_to_none() {
        let goal: Option<Goal> = serde_json::from_str("null").unwrap();
        assert!(goal.is_none());
    }

    #[test]
    fn test_gauge_percent_clamps() {
        let mut progress = GoalProgress {
            percent_complete: 40.4,
            ..Default::default()
        };
        assert_eq!(progress.gauge_percent(), 40);
        progress.percent_complete = -12.0;
        assert_eq!(progress.gauge_percent(), 0);
        progress.percent_complete = 130.0;
        assert_eq!(progress.gauge_percent(), 100);
    }

    #[test]
    fn test_new_workout_serializes_type_field() {
        let workout = NewWorkout {
            kind: WorkoutType::Cardio,
            name: "Morning Run".to_string(),
            duration: 30,
            calories_burned: 245,
            notes: None,
        };
        let json = serde_json::to_value(&workout).unwrap();
        assert_eq!(json["type"], "cardio");
        assert!(json.get("notes").is_none());
    }

    #[test]
    fn test_meal_type_parses_case_insensitively() {
        assert_eq!("Lunch".parse::<MealType>().unwrap(), MealType::Lunch);
        assert!("brunch".parse::<MealType>().is_err());
    }

    #[test]
    fn test_activity_item_type_rename() {
        let feed: RecentActivity = serde_json::from_str(
            r#"{"activities": [{"type": "meal", "id": "1", "title": "Salad", "details": "450 cal", "date": "2026-02-09T12:30:00", "icon": "x"}], "count": 1}"#,
        )
        .unwrap();
        assert_eq!(feed.activities[0].kind, "meal");
        assert_eq!(feed.count, 1);
    }

    #[test]
    // Edits send only what changed.
    fn test_updates_serialize_only_set_fields() {
        let update = WorkoutUpdate {
            kind: Some(WorkoutType::Strength),
            duration: Some(45),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&update).unwrap(),
            serde_json::json!({"type": "strength", "duration": 45})
        );
        assert!(!update.is_empty());
        assert!(MealUpdate::default().is_empty());
        assert_eq!(serde_json::to_string(&GoalUpdate::default()).unwrap(), "{}");
    }
}
