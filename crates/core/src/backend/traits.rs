use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::errors::CoreError;
use crate::models::state::GameSnapshot;

/// Status payload returned by the backend's health and database probes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceStatus {
    pub status: String,
    pub message: String,
}

/// Acknowledgement for write endpoints (save-game, cookie sync).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackendAck {
    pub success: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

/// Trait abstraction for the upstream game backend.
///
/// The backend is a non-authoritative mirror of local state: every method
/// may fail without consequence for gameplay, and the facade treats
/// failures as log-and-continue. Implementations: [`super::http::HttpBackend`]
/// for a real server, [`super::stub::StubBackend`] while there is none.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait BackendClient: Send + Sync {
    /// Human-readable name of this client (for logs/errors).
    fn name(&self) -> &str;

    /// Is the backend process up?
    async fn health(&self) -> Result<ServiceStatus, CoreError>;

    /// Is the backend's database reachable?
    async fn database_status(&self) -> Result<ServiceStatus, CoreError>;

    /// Debug configuration dump.
    async fn config(&self) -> Result<HashMap<String, String>, CoreError>;

    /// Mirror a full game snapshot under a save name.
    async fn save_game(
        &self,
        save_name: &str,
        snapshot: &GameSnapshot,
    ) -> Result<BackendAck, CoreError>;

    /// Mirror the current cookie balance.
    async fn update_cookies(&self, cookies: f64) -> Result<BackendAck, CoreError>;
}
