//! Robot provider configuration.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument};

/// Environment variable overriding the robot endpoint.
pub const ENDPOINT_ENV: &str = "STRICTLY_ROBOT_ENDPOINT";

/// Configuration for the remote robot.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct RobotConfig {
    /// URL the board is posted to.
    #[serde(default = "default_endpoint")]
    endpoint: String,

    /// Pause before each robot request, leaving room for animations.
    #[serde(default = "default_request_delay_ms")]
    request_delay_ms: u64,

    /// Request timeout; `None` waits as long as the transport allows.
    #[serde(default)]
    timeout_ms: Option<u64>,
}

#[instrument]
fn default_endpoint() -> String {
    "http://tictactoerobot.appspot.com/robot".to_string()
}

#[instrument]
fn default_request_delay_ms() -> u64 {
    500
}

impl Default for RobotConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            request_delay_ms: default_request_delay_ms(),
            timeout_ms: None,
        }
    }
}

impl RobotConfig {
    /// Creates a configuration for the given endpoint with default timings.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            ..Self::default()
        }
    }

    /// Loads configuration from TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(endpoint = %config.endpoint, "Config loaded successfully");
        Ok(config)
    }

    /// Applies the endpoint override from the environment, if set.
    #[instrument(skip(self))]
    pub fn apply_env(self) -> Self {
        match std::env::var(ENDPOINT_ENV) {
            Ok(endpoint) if !endpoint.trim().is_empty() => {
                debug!(%endpoint, "Endpoint overridden from environment");
                self.with_endpoint(endpoint.trim())
            }
            _ => self,
        }
    }

    /// Replaces the endpoint.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Replaces the request delay.
    pub fn with_request_delay_ms(mut self, delay_ms: u64) -> Self {
        self.request_delay_ms = delay_ms;
        self
    }

    /// Request delay as a duration.
    pub fn request_delay(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.request_delay_ms)
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
