//! Persisted-record codecs.
//!
//! One record per key in the string store. Loading is forgiving: a
//! missing key falls back to the documented default, and a malformed
//! value logs a warning and falls back too — bad data never aborts the
//! core. Saving reports failures to the caller, who degrades gracefully.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::errors::CoreError;
use crate::models::city::CityPoint;
use crate::models::indicators::{IndicatorKind, Indicators};
use crate::models::portfolio::Portfolio;
use crate::models::source::CollectionSource;
use crate::models::state::{GameState, DEFAULT_BALANCE};

use super::store::KeyValueStore;

/// Record key: the cookie balance, as a decimal string.
pub const COOKIES_KEY: &str = "cookies";
/// Record key: asset id → { quantity, averagePrice }.
pub const PORTFOLIO_KEY: &str = "playerPortfolio";
/// Record key: indicator name → integer [0, 100].
pub const INDICATORS_KEY: &str = "indicators";
/// Record key: array of city points (with mutable level/status).
pub const CITY_POINTS_KEY: &str = "cityPoints";
/// Record key: array of collection sources with lastCollected stamps.
pub const SOURCES_KEY: &str = "cookieSources";

/// Restore the full game state from the store, seeding defaults for
/// whatever is missing or unreadable. The asset catalog is always
/// re-seeded — prices and history are ephemeral.
///
/// A store without a balance record gets the default written back, so a
/// fresh game is persisted from its very first load.
pub fn load_state(store: &mut dyn KeyValueStore, now_ms: i64) -> GameState {
    let mut state = GameState::seeded(now_ms);

    match load_balance(&*store) {
        Some(balance) => state.balance = balance,
        None => {
            if let Err(err) = save_balance(store, DEFAULT_BALANCE) {
                warn!(%err, "could not persist the default cookie balance");
            }
        }
    }
    state.portfolio = load_portfolio(&*store);
    state.indicators = load_indicators(&*store);
    state.city_points = load_city_points(&*store);
    state.sources = load_sources(&*store);

    state
}

/// `None` means the key was absent (caller writes the default back);
/// malformed values return the default directly.
fn load_balance(store: &dyn KeyValueStore) -> Option<f64> {
    match store.get(COOKIES_KEY) {
        Ok(Some(raw)) => match raw.trim().parse::<f64>() {
            Ok(value) if value.is_finite() && value >= 0.0 => Some(value),
            _ => {
                warn!(%raw, "malformed cookie balance in store; using default");
                Some(DEFAULT_BALANCE)
            }
        },
        Ok(None) => None,
        Err(err) => {
            warn!(%err, "store unreadable while loading cookies; using default");
            Some(DEFAULT_BALANCE)
        }
    }
}

fn load_portfolio(store: &dyn KeyValueStore) -> Portfolio {
    let Some(raw) = read_key(store, PORTFOLIO_KEY) else {
        return Portfolio::new();
    };
    match serde_json::from_str::<Portfolio>(&raw) {
        Ok(mut portfolio) => {
            // Enforce the entry-present-iff-quantity-positive invariant on
            // whatever was stored.
            portfolio.holdings.retain(|id, holding| {
                if holding.quantity == 0 {
                    debug!(asset = %id, "dropping zero-quantity holding from stored portfolio");
                    false
                } else {
                    true
                }
            });
            portfolio
        }
        Err(err) => {
            warn!(%err, "malformed portfolio record; starting empty");
            Portfolio::new()
        }
    }
}

fn load_indicators(store: &dyn KeyValueStore) -> Indicators {
    let mut indicators = Indicators::default();
    let Some(raw) = read_key(store, INDICATORS_KEY) else {
        return indicators;
    };
    match serde_json::from_str::<BTreeMap<String, i32>>(&raw) {
        Ok(saved) => {
            for (key, value) in saved {
                match IndicatorKind::from_key(&key) {
                    Some(kind) => indicators.set(kind, value),
                    None => debug!(%key, "ignoring unknown indicator in stored record"),
                }
            }
            indicators
        }
        Err(err) => {
            warn!(%err, "malformed indicators record; using seed values");
            indicators
        }
    }
}

fn load_city_points(store: &dyn KeyValueStore) -> Vec<CityPoint> {
    let Some(raw) = read_key(store, CITY_POINTS_KEY) else {
        return CityPoint::seed_points();
    };
    match serde_json::from_str::<Vec<CityPoint>>(&raw) {
        Ok(mut points) if !points.is_empty() => {
            for point in &mut points {
                // Levels start at 1; zero can only come from hand-edited data.
                if point.level == 0 {
                    point.level = 1;
                    point.refresh_status();
                }
            }
            points
        }
        Ok(_) => {
            warn!("empty city-point record; using seed map");
            CityPoint::seed_points()
        }
        Err(err) => {
            warn!(%err, "malformed city-point record; using seed map");
            CityPoint::seed_points()
        }
    }
}

fn load_sources(store: &dyn KeyValueStore) -> Vec<CollectionSource> {
    let Some(raw) = read_key(store, SOURCES_KEY) else {
        return CollectionSource::seed_sources();
    };
    match serde_json::from_str::<Vec<CollectionSource>>(&raw) {
        Ok(sources) if !sources.is_empty() => sources,
        Ok(_) => CollectionSource::seed_sources(),
        Err(err) => {
            warn!(%err, "malformed cookie-source record; using seed sources");
            CollectionSource::seed_sources()
        }
    }
}

fn read_key(store: &dyn KeyValueStore, key: &str) -> Option<String> {
    match store.get(key) {
        Ok(value) => value,
        Err(err) => {
            warn!(key, %err, "store unreadable; using defaults");
            None
        }
    }
}

// ── Save paths ──────────────────────────────────────────────────────

pub fn save_balance(store: &mut dyn KeyValueStore, balance: f64) -> Result<(), CoreError> {
    store.set(COOKIES_KEY, &balance.to_string())
}

pub fn save_portfolio(store: &mut dyn KeyValueStore, portfolio: &Portfolio) -> Result<(), CoreError> {
    let raw = serde_json::to_string(portfolio).map_err(|e| CoreError::Serialization(e.to_string()))?;
    store.set(PORTFOLIO_KEY, &raw)
}

pub fn save_indicators(store: &mut dyn KeyValueStore, indicators: &Indicators) -> Result<(), CoreError> {
    let raw = serde_json::to_string(indicators).map_err(|e| CoreError::Serialization(e.to_string()))?;
    store.set(INDICATORS_KEY, &raw)
}

pub fn save_city_points(store: &mut dyn KeyValueStore, points: &[CityPoint]) -> Result<(), CoreError> {
    let raw = serde_json::to_string(points).map_err(|e| CoreError::Serialization(e.to_string()))?;
    store.set(CITY_POINTS_KEY, &raw)
}

pub fn save_sources(store: &mut dyn KeyValueStore, sources: &[CollectionSource]) -> Result<(), CoreError> {
    let raw = serde_json::to_string(sources).map_err(|e| CoreError::Serialization(e.to_string()))?;
    store.set(SOURCES_KEY, &raw)
}
