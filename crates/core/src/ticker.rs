//! The recurring price-fluctuation schedule.
//!
//! A fire-and-forget tokio task that ticks the market on a fixed period.
//! The schedule is explicitly cancellable: [`PriceTicker::stop`] (or
//! dropping the ticker) aborts the task. Tearing the core down without
//! stopping it would leak a live, continuously-mutating timer.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::warn;

use crate::Gridline;

/// Default fluctuation period: one tick every 10 seconds.
pub const DEFAULT_TICK_PERIOD: Duration = Duration::from_secs(10);

/// Handle to the running price schedule.
pub struct PriceTicker {
    handle: JoinHandle<()>,
}

impl PriceTicker {
    /// Spawn the schedule. The first tick fires immediately, then every
    /// `period`. The core is reached through the embedder's mutex; each
    /// tick holds the lock only for the synchronous mutation.
    pub fn start(core: Arc<Mutex<Gridline>>, period: Duration) -> Self {
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                let Ok(mut game) = core.lock() else {
                    warn!("game state mutex poisoned; stopping price ticker");
                    break;
                };
                if let Err(err) = game.tick_prices() {
                    warn!(%err, "price tick failed; will retry next period");
                }
            }
        });
        Self { handle }
    }

    /// Spawn with the default 10 s period.
    pub fn start_default(core: Arc<Mutex<Gridline>>) -> Self {
        Self::start(core, DEFAULT_TICK_PERIOD)
    }

    /// Cancel the schedule. Idempotent.
    pub fn stop(&self) {
        self.handle.abort();
    }

    /// Whether the schedule has fully stopped.
    pub fn is_stopped(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for PriceTicker {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

impl std::fmt::Debug for PriceTicker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PriceTicker")
            .field("stopped", &self.is_stopped())
            .finish()
    }
}
