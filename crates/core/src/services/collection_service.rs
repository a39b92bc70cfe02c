use chrono::{DateTime, Utc};

use crate::errors::CoreError;
use crate::models::state::GameState;

use super::currency_service::CurrencyService;

/// What happened on a collection attempt. An unelapsed cooldown is a
/// normal outcome, not an error.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CollectOutcome {
    /// The reward was credited and the cooldown restarted.
    Granted { reward: f64 },
    /// Too early — wait `remaining_secs` (rounded up to whole seconds).
    OnCooldown { remaining_secs: u64 },
}

/// Cooldown-gated cookie collection.
///
/// Every operation takes `now` as a parameter; the facade supplies the
/// wall clock.
pub struct CollectionService;

impl CollectionService {
    pub fn new() -> Self {
        Self
    }

    /// Attempt to collect from a source. A never-collected source is
    /// always ready.
    pub fn collect(
        &self,
        currency: &CurrencyService,
        state: &mut GameState,
        source_name: &str,
        now: DateTime<Utc>,
    ) -> Result<CollectOutcome, CoreError> {
        let idx = state
            .sources
            .iter()
            .position(|s| s.name == source_name)
            .ok_or_else(|| CoreError::UnknownSource(source_name.to_string()))?;

        let now_ms = now.timestamp_millis();
        let source = &state.sources[idx];
        if let Some(remaining_ms) = remaining_ms(source.last_collected, source.cooldown_ms, now_ms)
        {
            return Ok(CollectOutcome::OnCooldown {
                remaining_secs: (remaining_ms as u64).div_ceil(1000),
            });
        }

        let reward = source.reward;
        currency.add(state, reward)?;
        state.sources[idx].last_collected = Some(now_ms);

        Ok(CollectOutcome::Granted { reward })
    }

    /// Cooldown progress as a percentage in [0, 100]; 100 when the source
    /// has never been collected.
    pub fn progress(
        &self,
        state: &GameState,
        source_name: &str,
        now: DateTime<Utc>,
    ) -> Result<f64, CoreError> {
        let source = state
            .source(source_name)
            .ok_or_else(|| CoreError::UnknownSource(source_name.to_string()))?;
        let Some(last) = source.last_collected else {
            return Ok(100.0);
        };
        let elapsed = (now.timestamp_millis() - last).max(0) as f64;
        let progress = elapsed / source.cooldown_ms as f64 * 100.0;
        Ok(progress.clamp(0.0, 100.0))
    }

    /// Human-readable wait: `"Ready!"`, `"Xm Ys"`, or `"Ys"`.
    pub fn remaining_label(
        &self,
        state: &GameState,
        source_name: &str,
        now: DateTime<Utc>,
    ) -> Result<String, CoreError> {
        let source = state
            .source(source_name)
            .ok_or_else(|| CoreError::UnknownSource(source_name.to_string()))?;
        let Some(remaining_ms) =
            remaining_ms(source.last_collected, source.cooldown_ms, now.timestamp_millis())
        else {
            return Ok("Ready!".to_string());
        };

        let seconds = (remaining_ms as u64).div_ceil(1000) as i64;
        let minutes = seconds / 60;
        let rest = seconds % 60;
        if minutes > 0 {
            Ok(format!("{minutes}m {rest}s"))
        } else {
            Ok(format!("{rest}s"))
        }
    }
}

impl Default for CollectionService {
    fn default() -> Self {
        Self::new()
    }
}

/// Milliseconds left on the cooldown, or `None` when the source is ready.
fn remaining_ms(last_collected: Option<i64>, cooldown_ms: u64, now_ms: i64) -> Option<i64> {
    let last = last_collected?;
    let elapsed = now_ms - last;
    let cooldown = cooldown_ms as i64;
    if elapsed >= cooldown {
        None
    } else {
        Some(cooldown - elapsed)
    }
}
