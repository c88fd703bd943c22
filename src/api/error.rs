//! Error handling for the API module

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Failed to decode a JSON payload from the server
    #[error("Decoding error: {0}")]
    Decode(#[from] serde_json::Error),

    /// Reqwest error, typically related to network issues or request failures.
    #[error("Reqwest error: {0}")]
    Reqwest(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("HTTP error with status {status}: {message}")]
    Http { status: u16, message: String },

    /// The configured base URL cannot be used to build requests.
    #[error("Invalid API URL: {0}")]
    InvalidUrl(String),
}

impl ApiError {
    pub async fn from_response(response: reqwest::Response) -> ApiError {
        let status = response.status().as_u16();
        let message = response
            .text()
            .await
            .unwrap_or_else(|_| "Failed to read response text".to_string());

        ApiError::Http {
            status,
            message: Self::extract_detail(&message),
        }
    }

    /// The API reports errors as `{"detail": "..."}`; fall back to the raw body.
    fn extract_detail(body: &str) -> String {
        serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|value| {
                value
                    .get("detail")
                    .and_then(|detail| detail.as_str())
                    .map(str::to_string)
            })
            .unwrap_or_else(|| body.to_string())
    }

    /// Returns the HTTP status if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            ApiError::Reqwest(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Short, user-facing description of the failure.
    pub fn to_pretty(&self) -> String {
        match self {
            ApiError::Http { status: 404, message } => format!("Not found: {}", message),
            ApiError::Http { status: 422, message } => format!("Rejected by server: {}", message),
            ApiError::Http { status, message } if (500..=599).contains(status) => {
                format!("Server error ({}): {}", status, message)
            }
            ApiError::Http { status, message } => format!("HTTP {}: {}", status, message),
            ApiError::Reqwest(e) if e.is_timeout() => "Request timed out".to_string(),
            ApiError::Reqwest(e) if e.is_connect() => {
                "Could not connect to the API server".to_string()
            }
            ApiError::Reqwest(e) => format!("Network error: {}", e),
            ApiError::Decode(e) => format!("Unexpected response format: {}", e),
            ApiError::InvalidUrl(url) => format!("Invalid API URL: {}", url),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_detail_from_json_body() {
        assert_eq!(
            ApiError::extract_detail(r#"{"detail":"No goals set"}"#),
            "No goals set"
        );
        assert_eq!(ApiError::extract_detail("Bad Gateway"), "Bad Gateway");
        assert_eq!(ApiError::extract_detail(r#"{"error":"x"}"#), r#"{"error":"x"}"#);
    }

    #[test]
    fn test_pretty_messages() {
        let not_found = ApiError::Http {
            status: 404,
            message: "Workout not found".to_string(),
        };
        assert_eq!(not_found.to_pretty(), "Not found: Workout not found");
        assert_eq!(not_found.status(), Some(404));

        let server = ApiError::Http {
            status: 503,
            message: "down".to_string(),
        };
        assert_eq!(server.to_pretty(), "Server error (503): down");

        let decode = ApiError::Decode(serde_json::from_str::<u32>("\"x\"").unwrap_err());
        assert!(decode.to_pretty().starts_with("Unexpected response format"));
        assert_eq!(decode.status(), None);
    }
}
