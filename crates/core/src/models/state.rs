use serde::{Deserialize, Serialize};

use super::asset::Asset;
use super::city::CityPoint;
use super::indicators::Indicators;
use super::portfolio::Portfolio;
use super::source::CollectionSource;

/// Default cookie balance for a fresh game.
pub const DEFAULT_BALANCE: f64 = 1000.0;

/// The main data container. Everything mutable in the game lives here and
/// is owned by the `Gridline` facade — no ambient globals.
///
/// Currency, portfolio, indicators, city points, and sources are restored
/// from the persisted store at startup and written back after every
/// mutating operation. The asset catalog (and its price history) is
/// re-seeded each session.
#[derive(Debug, Clone)]
pub struct GameState {
    /// The cookie balance, never negative
    pub balance: f64,

    /// The tradable catalog, mutated on every price tick
    pub assets: Vec<Asset>,

    /// The player's holdings
    pub portfolio: Portfolio,

    /// Per-category city metrics
    pub indicators: Indicators,

    /// The city map
    pub city_points: Vec<CityPoint>,

    /// Cookie income sources with their cooldown stamps
    pub sources: Vec<CollectionSource>,
}

impl GameState {
    /// A fresh game with all seed data. `now_ms` stamps the initial
    /// price-history point of every asset.
    pub fn seeded(now_ms: i64) -> Self {
        Self {
            balance: DEFAULT_BALANCE,
            assets: Asset::seed_catalog(now_ms),
            portfolio: Portfolio::new(),
            indicators: Indicators::default(),
            city_points: CityPoint::seed_points(),
            sources: CollectionSource::seed_sources(),
        }
    }

    pub fn asset(&self, asset_id: &str) -> Option<&Asset> {
        self.assets.iter().find(|a| a.id == asset_id)
    }

    pub fn point(&self, point_id: u32) -> Option<&CityPoint> {
        self.city_points.iter().find(|p| p.id == point_id)
    }

    pub fn source(&self, name: &str) -> Option<&CollectionSource> {
        self.sources.iter().find(|s| s.name == name)
    }

    /// Serializable view of the full game, sent to the backend save-game
    /// endpoint.
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            cookies: self.balance,
            indicators: self.indicators.clone(),
            city_points: self.city_points.clone(),
            portfolio: self.portfolio.clone(),
            sources: self.sources.clone(),
        }
    }
}

/// Point-in-time view of the whole game for the backend mirror.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSnapshot {
    pub cookies: f64,
    pub indicators: Indicators,
    pub city_points: Vec<CityPoint>,
    pub portfolio: Portfolio,
    pub sources: Vec<CollectionSource>,
}
