use crate::consts::cli_consts::DEFAULT_API_URL;
use std::fmt::{Debug, Display, Formatter};
use std::str::FromStr;

/// The API deployment the client talks to.
#[derive(Clone, Default, PartialEq, Eq)]
pub enum Environment {
    /// API server running on this machine.
    #[default]
    Local,
    /// Any other deployment, identified by its base URL.
    Custom(String),
}

impl Environment {
    /// Returns the API base URL associated with the environment, without a trailing slash.
    pub fn api_url(&self) -> String {
        match self {
            Environment::Local => DEFAULT_API_URL.to_string(),
            Environment::Custom(url) => url.trim_end_matches('/').to_string(),
        }
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("local") {
            return Ok(Environment::Local);
        }
        if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            let url = trimmed.trim_end_matches('/');
            if url == DEFAULT_API_URL {
                return Ok(Environment::Local);
            }
            return Ok(Environment::Custom(url.to_string()));
        }
        Err(format!(
            "Invalid API environment '{}': expected 'local' or an http(s) URL",
            s
        ))
    }
}

impl Display for Environment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Local => write!(f, "Local"),
            Environment::Custom(_) => write!(f, "Custom"),
        }
    }
}

impl Debug for Environment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Environment::{}, URL: {}", self, self.api_url())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_environment() {
        assert_eq!("local".parse::<Environment>(), Ok(Environment::Local));
        assert_eq!("LOCAL".parse::<Environment>(), Ok(Environment::Local));
        assert_eq!(
            "https://fit.example.com/api/v1/".parse::<Environment>(),
            Ok(Environment::Custom("https://fit.example.com/api/v1".to_string()))
        );
        assert!("staging".parse::<Environment>().is_err());
        assert!("".parse::<Environment>().is_err());
    }

    #[test]
    // The default URL spelled out is the local environment.
    fn test_default_url_is_local() {
        let env: Environment = "http://localhost:8000/api/v1/".parse().unwrap();
        assert_eq!(env, Environment::Local);
        assert_eq!(Environment::default().api_url(), DEFAULT_API_URL);
    }

    #[test]
    fn test_debug_includes_url() {
        let env = Environment::Custom("http://10.0.0.2:8000/api/v1".to_string());
        assert_eq!(
            format!("{:?}", env),
            "Environment::Custom, URL: http://10.0.0.2:8000/api/v1"
        );
    }
}
