//! Record-keeping commands: workouts, meals, weight entries, goals and the activity feed.
//!
//! Every failure is printed with the CLI message helpers and returned, so the process
//! exits non-zero.

use crate::api::error::ApiError;
use crate::api::{ApiClient, FitnessApi};
use crate::consts::cli_consts::{
    DEFAULT_TREND_DAYS, MAX_LIST_LIMIT, MAX_RECENT_ACTIVITY_LIMIT, MAX_TREND_DAYS,
};
use crate::models::{
    GoalUpdate, ListFilter, MealType, MealUpdate, NewGoal, NewMeal, NewWeight, NewWorkout,
    WorkoutType, WorkoutUpdate,
};
use crate::{print_cmd_error, print_cmd_info, print_cmd_success};
use chrono::NaiveDate;
use clap::{Args, Subcommand};
use std::error::Error;
use std::fmt::Display;

/// Date-range and size filters shared by the list subcommands.
#[derive(Args, Debug, Clone, Default)]
pub struct ListArgs {
    /// Only records on or after this date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub start_date: Option<NaiveDate>,

    /// Only records on or before this date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub end_date: Option<NaiveDate>,

    /// Maximum number of records
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=MAX_LIST_LIMIT as i64))]
    pub limit: Option<u32>,
}

/// Fields a workout edit may change; at least one is required.
#[derive(Args, Debug, Clone, Default)]
pub struct WorkoutEditArgs {
    #[arg(long = "type", value_name = "TYPE")]
    pub kind: Option<WorkoutType>,

    #[arg(long)]
    pub name: Option<String>,

    /// Duration in minutes
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub duration: Option<u32>,

    /// Estimated calories burned
    #[arg(long)]
    pub calories: Option<u32>,

    #[arg(long)]
    pub notes: Option<String>,
}

impl From<WorkoutEditArgs> for WorkoutUpdate {
    fn from(args: WorkoutEditArgs) -> Self {
        Self {
            kind: args.kind,
            name: args.name,
            duration: args.duration,
            calories_burned: args.calories,
            notes: args.notes,
        }
    }
}

/// Fields a meal edit may change; at least one is required.
#[derive(Args, Debug, Clone, Default)]
pub struct MealEditArgs {
    #[arg(long = "type", value_name = "TYPE")]
    pub kind: Option<MealType>,

    #[arg(long)]
    pub description: Option<String>,

    #[arg(long)]
    pub calories: Option<u32>,

    /// Protein in grams
    #[arg(long)]
    pub protein: Option<u32>,

    /// Carbohydrates in grams
    #[arg(long)]
    pub carbs: Option<u32>,

    /// Fat in grams
    #[arg(long)]
    pub fat: Option<u32>,

    #[arg(long)]
    pub notes: Option<String>,
}

impl From<MealEditArgs> for MealUpdate {
    fn from(args: MealEditArgs) -> Self {
        Self {
            kind: args.kind,
            description: args.description,
            calories: args.calories,
            protein: args.protein,
            carbs: args.carbs,
            fat: args.fat,
            notes: args.notes,
        }
    }
}

/// Goal fields to change; at least one is required.
#[derive(Args, Debug, Clone, Default)]
pub struct GoalEditArgs {
    #[arg(long, value_parser = parse_weight)]
    pub start_weight: Option<f64>,

    #[arg(long, value_parser = parse_weight)]
    pub target_weight: Option<f64>,

    /// Day to reach the target (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub target_date: Option<NaiveDate>,

    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub daily_calories: Option<u32>,

    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=7))]
    pub weekly_workouts: Option<u8>,

    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=7))]
    pub active_days: Option<u8>,
}

impl From<GoalEditArgs> for GoalUpdate {
    fn from(args: GoalEditArgs) -> Self {
        Self {
            start_weight: args.start_weight,
            target_weight: args.target_weight,
            target_date: args.target_date,
            daily_calorie_goal: args.daily_calories,
            weekly_workouts: args.weekly_workouts,
            active_days_per_week: args.active_days,
        }
    }
}

impl ListArgs {
    fn filter(&self, kind: Option<String>) -> ListFilter {
        ListFilter {
            start_date: self.start_date,
            end_date: self.end_date,
            kind,
            limit: self.limit,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum WorkoutCommand {
    /// Log a workout
    Add {
        /// cardio, strength, flexibility, sports or other
        #[arg(long = "type", value_name = "TYPE")]
        kind: WorkoutType,

        #[arg(long)]
        name: String,

        /// Duration in minutes
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        duration: u32,

        /// Estimated calories burned
        #[arg(long, default_value_t = 0)]
        calories: u32,

        #[arg(long)]
        notes: Option<String>,
    },
    /// List workouts, newest first
    List {
        #[command(flatten)]
        filter: ListArgs,

        /// Only workouts of this type
        #[arg(long = "type", value_name = "TYPE")]
        kind: Option<WorkoutType>,
    },
    /// Show a single workout
    Show { id: String },
    /// Change some fields of a workout
    Edit {
        id: String,

        #[command(flatten)]
        fields: WorkoutEditArgs,
    },
    /// Delete a workout
    Delete { id: String },
}

#[derive(Subcommand, Debug)]
pub enum MealCommand {
    /// Log a meal
    Add {
        /// breakfast, lunch, dinner or snack
        #[arg(long = "type", value_name = "TYPE")]
        kind: MealType,

        #[arg(long)]
        description: String,

        #[arg(long)]
        calories: u32,

        /// Protein in grams
        #[arg(long, default_value_t = 0)]
        protein: u32,

        /// Carbohydrates in grams
        #[arg(long)]
        carbs: Option<u32>,

        /// Fat in grams
        #[arg(long)]
        fat: Option<u32>,

        #[arg(long)]
        notes: Option<String>,
    },
    /// List meals, newest first
    List {
        #[command(flatten)]
        filter: ListArgs,

        /// Only meals of this type
        #[arg(long = "type", value_name = "TYPE")]
        kind: Option<MealType>,
    },
    /// Show a single meal
    Show { id: String },
    /// Change some fields of a meal
    Edit {
        id: String,

        #[command(flatten)]
        fields: MealEditArgs,
    },
    /// Delete a meal
    Delete { id: String },
    /// Nutrition totals for a day
    Summary {
        /// Day to summarize (YYYY-MM-DD), today if omitted
        #[arg(long, value_name = "DATE")]
        date: Option<NaiveDate>,
    },
}

#[derive(Subcommand, Debug)]
pub enum WeightCommand {
    /// Record a weigh-in
    Add {
        /// Weight in pounds
        #[arg(value_parser = parse_weight)]
        weight: f64,

        /// Day of the measurement (YYYY-MM-DD), today if omitted
        #[arg(long, value_name = "DATE")]
        date: Option<NaiveDate>,
    },
    /// List weigh-ins, newest first
    List {
        #[command(flatten)]
        filter: ListArgs,
    },
    /// Show a single weigh-in
    Show { id: String },
    /// Delete a weigh-in
    Delete { id: String },
    /// Weight change over the last days
    Trend {
        #[arg(long, default_value_t = DEFAULT_TREND_DAYS,
              value_parser = clap::value_parser!(u32).range(1..=MAX_TREND_DAYS as i64))]
        days: u32,
    },
}

#[derive(Subcommand, Debug)]
pub enum GoalCommand {
    /// Create the goal, replacing any existing one
    Set {
        #[arg(long, value_parser = parse_weight)]
        start_weight: f64,

        #[arg(long, value_parser = parse_weight)]
        target_weight: f64,

        /// Day to reach the target (YYYY-MM-DD)
        #[arg(long, value_name = "DATE")]
        target_date: Option<NaiveDate>,

        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        daily_calories: Option<u32>,

        #[arg(long, value_parser = clap::value_parser!(u8).range(0..=7))]
        weekly_workouts: Option<u8>,

        #[arg(long, value_parser = clap::value_parser!(u8).range(0..=7))]
        active_days: Option<u8>,
    },
    /// Show the current goal
    Show,
    /// Show progress towards the current goal
    Progress,
    /// Change some fields of a goal; the current one if no id is given
    Update {
        #[arg(long)]
        id: Option<String>,

        #[command(flatten)]
        fields: GoalEditArgs,
    },
    /// Delete a goal; the current one if no id is given
    Delete { id: Option<String> },
}

fn parse_weight(value: &str) -> Result<f64, String> {
    let weight: f64 = value
        .parse()
        .map_err(|_| format!("`{}` is not a number", value))?;
    if weight.is_finite() && weight > 0.0 {
        Ok(weight)
    } else {
        Err("weight must be greater than zero".to_string())
    }
}

/// Prints the failure and hands it back for the exit status.
fn report(title: &str, error: ApiError) -> Box<dyn Error> {
    log::debug!("{}: {:?}", title, error);
    print_cmd_error!(title, error.to_pretty().as_str());
    error.into()
}

/// Refuses an edit that would change nothing.
fn require_changes(noun: &str, empty: bool) -> Result<(), Box<dyn Error>> {
    if empty {
        print_cmd_error!("Nothing to change.", format!("Pass at least one {} field", noun).as_str());
        return Err(format!("no {} fields given", noun).into());
    }
    Ok(())
}

/// The id of the current goal, or `None` when there is no goal.
async fn current_goal_id(client: &ApiClient) -> Result<Option<String>, Box<dyn Error>> {
    let current = client
        .goals()
        .await
        .map_err(|e| report("Failed to load goal.", e))?;
    Ok(current.and_then(|goal| goal.id))
}

fn print_list<T: Display>(noun: &str, items: &[T]) {
    if items.is_empty() {
        print_cmd_info!("No records found.", "No {} match the filters", noun);
        return;
    }
    for item in items {
        println!("{}", item);
    }
    print_cmd_info!("Done.", "{} {}", items.len(), noun);
}

pub async fn run_workouts(client: &ApiClient, command: WorkoutCommand) -> Result<(), Box<dyn Error>> {
    match command {
        WorkoutCommand::Add {
            kind,
            name,
            duration,
            calories,
            notes,
        } => {
            let workout = NewWorkout {
                kind,
                name,
                duration,
                calories_burned: calories,
                notes,
            };
            let created = client
                .create_workout(&workout)
                .await
                .map_err(|e| report("Failed to log workout.", e))?;
            print_cmd_success!("Workout logged.", "{}", created);
        }
        WorkoutCommand::List { filter, kind } => {
            let workouts = client
                .list_workouts(&filter.filter(kind.map(|k| k.to_string())))
                .await
                .map_err(|e| report("Failed to list workouts.", e))?;
            print_list("workouts", &workouts);
        }
        WorkoutCommand::Show { id } => {
            let workout = client
                .get_workout(&id)
                .await
                .map_err(|e| report("Failed to load workout.", e))?;
            println!("{}", workout);
            if let Some(notes) = workout.notes.filter(|n| !n.is_empty()) {
                println!("  {}", notes);
            }
        }
        WorkoutCommand::Edit { id, fields } => {
            let update = WorkoutUpdate::from(fields);
            require_changes("workout", update.is_empty())?;
            let updated = client
                .update_workout(&id, &update)
                .await
                .map_err(|e| report("Failed to update workout.", e))?;
            print_cmd_success!("Workout updated.", "{}", updated);
        }
        WorkoutCommand::Delete { id } => {
            client
                .delete_workout(&id)
                .await
                .map_err(|e| report("Failed to delete workout.", e))?;
            print_cmd_success!("Workout deleted.", "{}", id);
        }
    }
    Ok(())
}

pub async fn run_meals(client: &ApiClient, command: MealCommand) -> Result<(), Box<dyn Error>> {
    match command {
        MealCommand::Add {
            kind,
            description,
            calories,
            protein,
            carbs,
            fat,
            notes,
        } => {
            let meal = NewMeal {
                kind,
                description,
                calories,
                protein,
                carbs,
                fat,
                notes,
            };
            let created = client
                .create_meal(&meal)
                .await
                .map_err(|e| report("Failed to log meal.", e))?;
            print_cmd_success!("Meal logged.", "{}", created);
        }
        MealCommand::List { filter, kind } => {
            let meals = client
                .list_meals(&filter.filter(kind.map(|k| k.to_string())))
                .await
                .map_err(|e| report("Failed to list meals.", e))?;
            print_list("meals", &meals);
        }
        MealCommand::Show { id } => {
            let meal = client
                .get_meal(&id)
                .await
                .map_err(|e| report("Failed to load meal.", e))?;
            println!("{}", meal);
            if let (Some(carbs), Some(fat)) = (meal.carbs, meal.fat) {
                println!("  {}g carbs, {}g fat", carbs, fat);
            }
        }
        MealCommand::Edit { id, fields } => {
            let update = MealUpdate::from(fields);
            require_changes("meal", update.is_empty())?;
            let updated = client
                .update_meal(&id, &update)
                .await
                .map_err(|e| report("Failed to update meal.", e))?;
            print_cmd_success!("Meal updated.", "{}", updated);
        }
        MealCommand::Delete { id } => {
            client
                .delete_meal(&id)
                .await
                .map_err(|e| report("Failed to delete meal.", e))?;
            print_cmd_success!("Meal deleted.", "{}", id);
        }
        MealCommand::Summary { date } => {
            let summary = client
                .daily_summary(date)
                .await
                .map_err(|e| report("Failed to load daily summary.", e))?;
            let day = summary
                .date
                .map(|d| d.to_string())
                .unwrap_or_else(|| "today".to_string());
            print_cmd_info!(
                "Daily summary.",
                "{}: {} cal, {}g protein, {}g carbs, {}g fat over {} meals",
                day,
                summary.total_calories,
                summary.total_protein,
                summary.total_carbs,
                summary.total_fat,
                summary.meal_count
            );
        }
    }
    Ok(())
}

pub async fn run_weight(client: &ApiClient, command: WeightCommand) -> Result<(), Box<dyn Error>> {
    match command {
        WeightCommand::Add { weight, date } => {
            let created = client
                .create_weight(&NewWeight { weight, date })
                .await
                .map_err(|e| report("Failed to record weight.", e))?;
            print_cmd_success!("Weight recorded.", "{}", created);
        }
        WeightCommand::List { filter } => {
            let entries = client
                .list_weights(&filter.filter(None))
                .await
                .map_err(|e| report("Failed to list weigh-ins.", e))?;
            print_list("weigh-ins", &entries);
        }
        WeightCommand::Show { id } => {
            let entry = client
                .get_weight(&id)
                .await
                .map_err(|e| report("Failed to load weigh-in.", e))?;
            println!("{}", entry);
        }
        WeightCommand::Delete { id } => {
            client
                .delete_weight(&id)
                .await
                .map_err(|e| report("Failed to delete weigh-in.", e))?;
            print_cmd_success!("Weigh-in deleted.", "{}", id);
        }
        WeightCommand::Trend { days } => {
            let trend = client
                .weight_trend(days)
                .await
                .map_err(|e| report("Failed to load weight trend.", e))?;
            for point in &trend.trend {
                match point.date {
                    Some(date) => println!("{}  {:.1}", date, point.weight),
                    None => println!("{:.1}", point.weight),
                }
            }
            match trend.change {
                Some(change) => print_cmd_info!(
                    "Weight trend.",
                    "{:+.1} lbs over {} weigh-ins in the last {} days",
                    change,
                    trend.data_points,
                    days
                ),
                None => print_cmd_info!("Weight trend.", "Not enough weigh-ins in the last {} days", days),
            }
        }
    }
    Ok(())
}

pub async fn run_goals(client: &ApiClient, command: GoalCommand) -> Result<(), Box<dyn Error>> {
    match command {
        GoalCommand::Set {
            start_weight,
            target_weight,
            target_date,
            daily_calories,
            weekly_workouts,
            active_days,
        } => {
            let goal = NewGoal {
                start_weight,
                target_weight,
                target_date,
                daily_calorie_goal: daily_calories,
                weekly_workouts,
                active_days_per_week: active_days,
            };
            let saved = client
                .save_goal(&goal)
                .await
                .map_err(|e| report("Failed to save goal.", e))?;
            print_cmd_success!(
                "Goal saved.",
                "{:.1} -> {:.1} lbs",
                saved.start_weight,
                saved.target_weight
            );
        }
        GoalCommand::Show => {
            match client
                .goals()
                .await
                .map_err(|e| report("Failed to load goal.", e))?
            {
                Some(goal) => {
                    println!(
                        "Target: {:.1} lbs (from {:.1})",
                        goal.target_weight, goal.start_weight
                    );
                    if let Some(date) = goal.target_date {
                        println!("By: {}", date);
                    }
                    if let Some(calories) = goal.daily_calorie_goal {
                        println!("Daily calories: {}", calories);
                    }
                    if let Some(workouts) = goal.weekly_workouts {
                        println!("Workouts per week: {}", workouts);
                    }
                    if let Some(days) = goal.active_days_per_week {
                        println!("Active days per week: {}", days);
                    }
                }
                None => print_cmd_info!("No goal set.", "Create one with `goals set`"),
            }
        }
        GoalCommand::Progress => {
            let progress = client
                .goal_progress()
                .await
                .map_err(|e| report("Failed to load goal progress.", e))?;
            print_cmd_info!(
                "Goal progress.",
                "{:.0}% complete: lost {:.1} of {:.1} lbs, {:.1} to go (now {:.1})",
                progress.percent_complete,
                progress.lost_so_far,
                progress.total_to_lose,
                progress.remaining,
                progress.current_weight
            );
        }
        GoalCommand::Update { id, fields } => {
            let update = GoalUpdate::from(fields);
            require_changes("goal", update.is_empty())?;
            let id = match id {
                Some(id) => id,
                None => match current_goal_id(client).await? {
                    Some(id) => id,
                    None => {
                        print_cmd_error!("No goal set.", "Create one with `goals set`");
                        return Err("no goal to update".into());
                    }
                },
            };
            let updated = client
                .update_goal(&id, &update)
                .await
                .map_err(|e| report("Failed to update goal.", e))?;
            print_cmd_success!(
                "Goal updated.",
                "{:.1} -> {:.1} lbs",
                updated.start_weight,
                updated.target_weight
            );
        }
        GoalCommand::Delete { id } => {
            let id = match id {
                Some(id) => id,
                None => match current_goal_id(client).await? {
                    Some(id) => id,
                    None => {
                        print_cmd_info!("No goal set.", "Nothing to delete");
                        return Ok(());
                    }
                },
            };
            client
                .delete_goal(&id)
                .await
                .map_err(|e| report("Failed to delete goal.", e))?;
            print_cmd_success!("Goal deleted.", "{}", id);
        }
    }
    Ok(())
}

/// Prints the combined activity feed.
pub async fn run_activity(client: &ApiClient, limit: u32) -> Result<(), Box<dyn Error>> {
    let limit = limit.clamp(1, MAX_RECENT_ACTIVITY_LIMIT);
    let feed = client
        .recent_activity(limit)
        .await
        .map_err(|e| report("Failed to load recent activity.", e))?;
    if feed.activities.is_empty() {
        print_cmd_info!("No activity yet.", "Log a workout, meal or weigh-in first");
        return Ok(());
    }
    for item in &feed.activities {
        println!("{:<20} {:<8} {}  {}", item.date, item.kind, item.title, item.details);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_weight() {
        assert_eq!(parse_weight("182.4"), Ok(182.4));
        assert!(parse_weight("0").is_err());
        assert!(parse_weight("-5").is_err());
        assert!(parse_weight("heavy").is_err());
        assert!(parse_weight("NaN").is_err());
    }

    #[test]
    fn test_list_args_build_filter() {
        let args = ListArgs {
            start_date: NaiveDate::from_ymd_opt(2026, 2, 1),
            end_date: None,
            limit: Some(20),
        };
        let filter = args.filter(Some(WorkoutType::Strength.to_string()));
        assert_eq!(filter.kind.as_deref(), Some("strength"));
        assert_eq!(filter.limit, Some(20));
        assert_eq!(filter.start_date, NaiveDate::from_ymd_opt(2026, 2, 1));
    }

    #[test]
    fn test_edit_args_map_to_partial_updates() {
        let update = WorkoutUpdate::from(WorkoutEditArgs {
            calories: Some(300),
            ..Default::default()
        });
        assert_eq!(update.calories_burned, Some(300));
        assert!(update.kind.is_none());

        let update = GoalUpdate::from(GoalEditArgs {
            daily_calories: Some(1900),
            active_days: Some(5),
            ..Default::default()
        });
        assert_eq!(update.daily_calorie_goal, Some(1900));
        assert_eq!(update.active_days_per_week, Some(5));
        assert!(MealUpdate::from(MealEditArgs::default()).is_empty());
    }

    #[test]
    fn test_empty_edit_is_refused() {
        assert!(require_changes("meal", true).is_err());
        assert!(require_changes("meal", false).is_ok());
    }
}
