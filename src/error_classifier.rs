use crate::api::error::ApiError;
use crate::logging::LogLevel;

/// Decides how loudly a failed dashboard request is reported.
#[derive(Debug, Clone)]
pub struct ErrorClassifier;

impl ErrorClassifier {
    pub fn new() -> Self {
        Self
    }

    pub fn classify_fetch_error(&self, error: &ApiError) -> LogLevel {
        // Critical: malformed responses or a misconfigured client
        if matches!(error, ApiError::Decode(_) | ApiError::InvalidUrl(_)) {
            return LogLevel::Error;
        }

        match error.status() {
            // Expected: nothing recorded yet (e.g. progress without a goal)
            Some(404) => LogLevel::Debug,

            // Non-critical: Temporary server issues
            Some(429) => LogLevel::Debug,
            Some(500..=599) => LogLevel::Warn,

            Some(401) | Some(403) => LogLevel::Error,

            // Network issues - usually temporary
            _ => LogLevel::Warn,
        }
    }
}

impl Default for ErrorClassifier {
    fn default() -> Self {
        Self::new()
    }
}
