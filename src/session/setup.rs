//! Session setup and initialization

use crate::api::{ApiClient, FitnessApi};
use crate::consts::cli_consts::EVENT_QUEUE_SIZE;
use crate::dashboard::{DashboardLoader, DashboardStore};
use crate::environment::Environment;
use crate::events::{Event, EventSender};
use std::error::Error;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Session data for both TUI and headless modes
pub struct SessionData {
    /// Loads the dashboard into the shared store
    pub loader: Arc<DashboardLoader>,
    /// Sender half of the loader event channel, for work started outside the loader
    pub event_sender: EventSender,
    /// Event receiver for loader events
    pub event_receiver: mpsc::Receiver<Event>,
    /// The API the session reads from
    pub environment: Environment,
}

/// Sets up a dashboard session
///
/// This function handles all the common setup required for both TUI and headless modes:
/// 1. Creates the API client for the environment
/// 2. Creates the shared dashboard store
/// 3. Wires the loader to the event channel
///
/// # Arguments
/// * `environment` - API environment to read from
///
/// # Returns
/// * `Ok(SessionData)` - Successfully set up session
/// * `Err` - The API client could not be built
pub fn setup_session(environment: Environment) -> Result<SessionData, Box<dyn Error>> {
    let api: Arc<dyn FitnessApi> = Arc::new(ApiClient::new(environment.clone())?);
    Ok(session_with_api(api))
}

/// Builds a session around an existing API implementation.
pub fn session_with_api(api: Arc<dyn FitnessApi>) -> SessionData {
    let environment = api.environment().clone();
    let store = Arc::new(DashboardStore::new());
    let (sender, event_receiver) = mpsc::channel(EVENT_QUEUE_SIZE);
    let event_sender = EventSender::new(sender);
    let loader = DashboardLoader::new(api, store).with_events(event_sender.clone());

    log::debug!("Dashboard session ready for {:?}", environment);

    SessionData {
        loader: Arc::new(loader),
        event_sender,
        event_receiver,
        environment,
    }
}
