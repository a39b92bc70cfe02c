use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use std::collections::HashMap;
#[cfg(not(target_arch = "wasm32"))]
use std::time::Duration;

use crate::errors::CoreError;
use crate::models::state::GameSnapshot;
use super::traits::{BackendAck, BackendClient, ServiceStatus};

const DEFAULT_BASE_URL: &str = "http://localhost:8080/api";

/// HTTP client for the Gridline backend.
///
/// Endpoints:
/// - `GET  /health` — process liveness
/// - `GET  /db/test` — database connectivity
/// - `GET  /debug/config` — configuration dump
/// - `POST /game/save` — mirror a named game snapshot
/// - `PUT  /user/cookies` — mirror the cookie balance
pub struct HttpBackend {
    base_url: String,
    client: Client,
}

impl HttpBackend {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder.timeout(Duration::from_secs(10));
        Self {
            base_url: base_url.into(),
            client: builder.build().unwrap_or_else(|_| Client::new()),
        }
    }

    fn parse_error(&self, endpoint: &str, err: reqwest::Error) -> CoreError {
        CoreError::Backend {
            endpoint: endpoint.to_string(),
            message: format!("failed to parse response: {err}"),
        }
    }
}

impl Default for HttpBackend {
    fn default() -> Self {
        Self::new()
    }
}

// ── Request payloads ────────────────────────────────────────────────

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SaveGameRequest<'a> {
    save_name: &'a str,
    game_data: &'a GameSnapshot,
}

#[derive(Serialize)]
struct UpdateCookiesRequest {
    cookies: f64,
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl BackendClient for HttpBackend {
    fn name(&self) -> &str {
        "HttpBackend"
    }

    async fn health(&self) -> Result<ServiceStatus, CoreError> {
        let url = format!("{}/health", self.base_url);
        self.client
            .get(&url)
            .send()
            .await?
            .json()
            .await
            .map_err(|e| self.parse_error("/health", e))
    }

    async fn database_status(&self) -> Result<ServiceStatus, CoreError> {
        let url = format!("{}/db/test", self.base_url);
        self.client
            .get(&url)
            .send()
            .await?
            .json()
            .await
            .map_err(|e| self.parse_error("/db/test", e))
    }

    async fn config(&self) -> Result<HashMap<String, String>, CoreError> {
        let url = format!("{}/debug/config", self.base_url);
        self.client
            .get(&url)
            .send()
            .await?
            .json()
            .await
            .map_err(|e| self.parse_error("/debug/config", e))
    }

    async fn save_game(
        &self,
        save_name: &str,
        snapshot: &GameSnapshot,
    ) -> Result<BackendAck, CoreError> {
        let url = format!("{}/game/save", self.base_url);
        let body = SaveGameRequest {
            save_name,
            game_data: snapshot,
        };
        self.client
            .post(&url)
            .json(&body)
            .send()
            .await?
            .json()
            .await
            .map_err(|e| self.parse_error("/game/save", e))
    }

    async fn update_cookies(&self, cookies: f64) -> Result<BackendAck, CoreError> {
        let url = format!("{}/user/cookies", self.base_url);
        self.client
            .put(&url)
            .json(&UpdateCookiesRequest { cookies })
            .send()
            .await?
            .json()
            .await
            .map_err(|e| self.parse_error("/user/cookies", e))
    }
}
