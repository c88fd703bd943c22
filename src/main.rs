mod api;
mod cli_messages;
mod config;
mod consts;
mod dashboard;
mod environment;
mod error_classifier;
mod events;
mod logging;
mod models;
mod records;
mod session;
mod ui;

use crate::api::ApiClient;
use crate::config::{Config, get_config_dir, get_config_path, resolve_environment};
use crate::consts::cli_consts::{
    API_URL_ENV_VAR, LOG_FILE_NAME, MAX_RECENT_ACTIVITY_LIMIT, RECENT_ACTIVITY_LIMIT,
};
use crate::environment::Environment;
use crate::records::{GoalCommand, MealCommand, WeightCommand, WorkoutCommand};
use crate::session::headless_mode::watch_interval;
use crate::session::{run_headless_mode, run_tui_mode, setup_session};
use clap::{Parser, Subcommand};
use std::error::Error;
use std::path::Path;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
/// Command-line arguments
struct Args {
    /// Base URL of the API, e.g. http://localhost:8000/api/v1.
    /// Overrides the BARELY_API_URL environment variable and the settings file.
    #[arg(long, global = true, value_name = "URL")]
    api_url: Option<String>,

    /// Command to execute
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show today's stats, streak and goal progress
    Dashboard {
        /// Print a text summary instead of starting the terminal UI
        #[arg(long)]
        headless: bool,

        /// Keep refreshing every SECS seconds (implies --headless).
        /// Without a value, uses the settings file interval.
        #[arg(long, value_name = "SECS", num_args = 0..=1, default_missing_value = "0")]
        watch: Option<u64>,

        /// Paint a dark background behind the terminal UI
        #[arg(long)]
        with_background: bool,
    },
    /// Show the most recent workouts, meals and weigh-ins
    Activity {
        #[arg(long, default_value_t = RECENT_ACTIVITY_LIMIT,
              value_parser = clap::value_parser!(u32).range(1..=MAX_RECENT_ACTIVITY_LIMIT as i64))]
        limit: u32,
    },
    /// Log and browse workouts
    Workouts {
        #[command(subcommand)]
        command: WorkoutCommand,
    },
    /// Log and browse meals
    Meals {
        #[command(subcommand)]
        command: MealCommand,
    },
    /// Record and browse weigh-ins
    Weight {
        #[command(subcommand)]
        command: WeightCommand,
    },
    /// Manage the weight goal
    Goals {
        #[command(subcommand)]
        command: GoalCommand,
    },
    /// Manage the settings file
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Save the API base URL to the settings file
    SetApiUrl {
        #[arg(value_name = "URL")]
        url: String,
    },
    /// Show the settings file and the API URL in effect
    Show,
    /// Delete the settings file
    Clear,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    // The terminal UI owns the screen, so its logs go to a file.
    let tui = matches!(
        args.command,
        Command::Dashboard {
            headless: false,
            watch: None,
            ..
        }
    );
    if tui {
        logging::init_file_logger(&get_config_dir()?.join(LOG_FILE_NAME))?;
    } else {
        logging::init_stderr_logger();
    }

    let config_path = get_config_path()?;
    let config = match Config::load_or_default(&config_path) {
        Ok(config) => config,
        Err(e) => {
            crate::print_cmd_warn!(
                "Ignoring unreadable settings file.",
                "{}: {}",
                config_path.display(),
                e
            );
            Config::default()
        }
    };

    let command = match args.command {
        Command::Config { command } => {
            return run_config(command, &config_path, config, args.api_url.as_deref());
        }
        command => command,
    };

    let env_var = std::env::var(API_URL_ENV_VAR).ok();
    let environment = resolve_environment(args.api_url.as_deref(), env_var.as_deref(), &config)?;
    log::debug!("Using {:?}", environment);

    match command {
        Command::Dashboard {
            headless,
            watch,
            with_background,
        } => {
            let session = setup_session(environment)?;
            if headless || watch.is_some() {
                run_headless_mode(session, watch_interval(watch, &config)).await
            } else {
                run_tui_mode(session, with_background).await
            }
        }
        Command::Activity { limit } => {
            records::run_activity(&ApiClient::new(environment)?, limit).await
        }
        Command::Workouts { command } => {
            records::run_workouts(&ApiClient::new(environment)?, command).await
        }
        Command::Meals { command } => {
            records::run_meals(&ApiClient::new(environment)?, command).await
        }
        Command::Weight { command } => {
            records::run_weight(&ApiClient::new(environment)?, command).await
        }
        Command::Goals { command } => {
            records::run_goals(&ApiClient::new(environment)?, command).await
        }
        Command::Config { .. } => Ok(()),
    }
}

fn run_config(
    command: ConfigCommand,
    config_path: &Path,
    mut config: Config,
    api_url_flag: Option<&str>,
) -> Result<(), Box<dyn Error>> {
    match command {
        ConfigCommand::SetApiUrl { url } => {
            let environment = url.parse::<Environment>().map_err(|e| {
                crate::print_cmd_error!("Invalid API URL.", e.as_str());
                e
            })?;
            config.api_url = Some(environment.api_url());
            config
                .save(config_path)
                .map_err(|e| format!("Failed to save config: {}", e))?;
            crate::print_cmd_success!(
                "API URL saved.",
                "{} ({})",
                environment.api_url(),
                config_path.display()
            );
        }
        ConfigCommand::Show => {
            let env_var = std::env::var(API_URL_ENV_VAR).ok();
            let environment = resolve_environment(api_url_flag, env_var.as_deref(), &config)?;
            crate::print_cmd_info!("Settings file.", "{}", config_path.display());
            crate::print_cmd_info!(
                "Saved API URL.",
                "{}",
                config.api_url.as_deref().unwrap_or("(none)")
            );
            if let Some(secs) = config.refresh_interval_secs {
                crate::print_cmd_info!("Watch interval.", "{}s", secs);
            }
            crate::print_cmd_info!(
                "API URL in effect.",
                "{} [{}]",
                environment.api_url(),
                environment
            );
        }
        ConfigCommand::Clear => {
            Config::clear(config_path).map_err(|e| format!("Failed to clear config: {}", e))?;
            crate::print_cmd_success!("Settings cleared.", "{}", config_path.display());
        }
    }
    Ok(())
}
