//! Remote robot reached over HTTP.

use super::{MoveProvider, ProviderError};
use crate::config::RobotConfig;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use strictly_tictactoe::{Coordinate, MoveRequest};
use tracing::{debug, info, instrument, warn};

/// JSON body posted to the robot endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RobotMoveBody {
    /// Row-major board string.
    pub board: String,
    /// Symbol the robot plays.
    pub robot_symbol: String,
    /// Symbol the user plays.
    pub user_symbol: String,
}

impl From<&MoveRequest> for RobotMoveBody {
    fn from(request: &MoveRequest) -> Self {
        Self {
            board: request.board.clone(),
            robot_symbol: request.moving.to_string(),
            user_symbol: request.waiting.to_string(),
        }
    }
}

/// Move provider that POSTs the board to a remote robot and decodes `{x, y}`.
#[derive(Debug, Clone)]
pub struct HttpMoveProvider {
    name: String,
    endpoint: String,
    client: reqwest::Client,
}

impl HttpMoveProvider {
    /// Creates a provider for the given endpoint without a request timeout.
    pub fn new(endpoint: impl Into<String>) -> Self {
        let endpoint = endpoint.into();
        Self {
            name: format!("robot@{endpoint}"),
            endpoint,
            client: reqwest::Client::new(),
        }
    }

    /// Creates a provider from configuration.
    #[instrument(skip(config), fields(endpoint = %config.endpoint()))]
    pub fn from_config(config: &RobotConfig) -> Result<Self, ProviderError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout_ms) = config.timeout_ms() {
            builder = builder.timeout(Duration::from_millis(*timeout_ms));
        }
        let client = builder.build()?;
        info!("HTTP move provider configured");
        Ok(Self {
            name: format!("robot@{}", config.endpoint()),
            endpoint: config.endpoint().clone(),
            client,
        })
    }

    /// Returns the endpoint URL.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait::async_trait]
impl MoveProvider for HttpMoveProvider {
    #[instrument(skip(self, request), fields(endpoint = %self.endpoint, board = %request.board))]
    async fn request_move(&self, request: &MoveRequest) -> Result<Coordinate, ProviderError> {
        let body = RobotMoveBody::from(request);
        debug!(?body, "Posting board to robot");

        let response = self
            .client
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .inspect_err(|e| warn!(error = %e, "Robot request failed"))?;

        let text = response.text().await?;
        let cell: Coordinate = serde_json::from_str(&text).map_err(|e| {
            warn!(error = %e, body = %text, "Robot response did not decode");
            ProviderError::Decode(e.to_string())
        })?;

        info!(x = cell.x, y = cell.y, "Robot chose cell");
        Ok(cell)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
