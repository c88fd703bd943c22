pub mod cli_consts {
    //! Client Configuration Constants
    //!
    //! Defaults shared by the API client, the dashboard loader and the terminal UI,
    //! organized by functional area.

    // =============================================================================
    // API CONFIGURATION
    // =============================================================================

    /// Base URL of a locally running API server.
    pub const DEFAULT_API_URL: &str = "http://localhost:8000/api/v1";

    /// Environment variable overriding the API base URL.
    pub const API_URL_ENV_VAR: &str = "BARELY_API_URL";

    /// HTTP timeouts for every API request
    pub mod http {
        use std::time::Duration;

        /// Time allowed to establish a connection
        pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

        /// Time allowed for a full request/response exchange
        pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
    }

    // =============================================================================
    // QUEUE CONFIGURATION
    // =============================================================================

    /// The maximum number of events to keep in the activity logs.
    pub const MAX_ACTIVITY_LOGS: usize = 100;

    /// Capacity of the loader event channel. Events beyond this are dropped, never awaited.
    pub const EVENT_QUEUE_SIZE: usize = 100;

    // =============================================================================
    // DASHBOARD CONFIGURATION
    // =============================================================================

    /// Number of entries requested from the recent activity feed.
    pub const RECENT_ACTIVITY_LIMIT: u32 = 5;

    /// Server-side cap on the recent activity feed.
    pub const MAX_RECENT_ACTIVITY_LIMIT: u32 = 50;

    /// Server-side cap on list endpoints.
    pub const MAX_LIST_LIMIT: u32 = 500;

    /// Render loop poll interval (milliseconds)
    pub const UI_TICK_MS: u64 = 100;

    /// Shortest accepted interval for headless watch mode (seconds)
    pub const MIN_WATCH_INTERVAL_SECS: u64 = 5;

    /// Watch interval when neither the flag nor the settings file gives one (seconds)
    pub const DEFAULT_WATCH_INTERVAL_SECS: u64 = 60;

    /// Default window of the weight trend (days)
    pub const DEFAULT_TREND_DAYS: u32 = 7;

    /// Longest weight trend window the server accepts (days)
    pub const MAX_TREND_DAYS: u32 = 365;

    // =============================================================================
    // FILES
    // =============================================================================

    /// Directory under the user's home holding client settings and logs.
    pub const CONFIG_DIR_NAME: &str = ".barely-surviving";

    /// Settings file name inside the config directory.
    pub const CONFIG_FILE_NAME: &str = "config.json";

    /// Log file used while the terminal UI owns the screen.
    pub const LOG_FILE_NAME: &str = "dashboard.log";
}
