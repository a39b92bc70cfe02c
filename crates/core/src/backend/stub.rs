use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;

use crate::errors::CoreError;
use crate::models::state::GameSnapshot;
use super::traits::{BackendAck, BackendClient, ServiceStatus};

/// Stand-in backend used until a real server is wired up.
///
/// Every call succeeds with a canned payload and nothing leaves the
/// process. This is the default client, so gameplay works fully offline.
#[derive(Debug, Clone, Default)]
pub struct StubBackend;

impl StubBackend {
    pub fn new() -> Self {
        Self
    }

    fn ack(message: &str) -> BackendAck {
        BackendAck {
            success: true,
            message: Some(message.to_string()),
            timestamp: Some(Utc::now().to_rfc3339()),
        }
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl BackendClient for StubBackend {
    fn name(&self) -> &str {
        "StubBackend"
    }

    async fn health(&self) -> Result<ServiceStatus, CoreError> {
        Ok(ServiceStatus {
            status: "success".to_string(),
            message: "stub backend is always up".to_string(),
        })
    }

    async fn database_status(&self) -> Result<ServiceStatus, CoreError> {
        Ok(ServiceStatus {
            status: "success".to_string(),
            message: "stub backend has no database".to_string(),
        })
    }

    async fn config(&self) -> Result<HashMap<String, String>, CoreError> {
        let mut config = HashMap::new();
        config.insert("mode".to_string(), "stub".to_string());
        config.insert("status".to_string(), "active".to_string());
        Ok(config)
    }

    async fn save_game(
        &self,
        _save_name: &str,
        _snapshot: &GameSnapshot,
    ) -> Result<BackendAck, CoreError> {
        Ok(Self::ack("game saved locally"))
    }

    async fn update_cookies(&self, cookies: f64) -> Result<BackendAck, CoreError> {
        let mut ack = Self::ack("cookie balance mirrored");
        ack.message = Some(format!("cookie balance mirrored: {cookies}"));
        Ok(ack)
    }
}
