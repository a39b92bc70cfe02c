use serde::{Deserialize, Serialize};

/// Maximum number of price points kept per asset (FIFO eviction).
pub const HISTORY_CAP: usize = 50;

/// Hard floor for asset prices — no asset ever trades below 1 cookie.
pub const PRICE_FLOOR: f64 = 1.0;

/// The market sector a tradable asset belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetCategory {
    /// Raw inputs (flour, milk, timber, ore, ...)
    Resource,
    /// Production and energy ventures
    Industry,
    /// Public and commercial services
    Service,
    /// City events and attractions
    Event,
}

impl std::fmt::Display for AssetCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AssetCategory::Resource => write!(f, "resource"),
            AssetCategory::Industry => write!(f, "industry"),
            AssetCategory::Service => write!(f, "service"),
            AssetCategory::Event => write!(f, "event"),
        }
    }
}

/// A single point in an asset's price history.
/// `timestamp` is epoch milliseconds, matching the persisted wire format.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    #[serde(rename = "date")]
    pub timestamp: i64,
    pub price: f64,
}

/// A tradable virtual security with a fluctuating price.
///
/// Created once at catalog initialization and never deleted. `price`,
/// `change`, and `history` mutate on every market tick; the history is
/// ephemeral (not persisted) — charting restarts each session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    /// Stable catalog id (e.g., "flour", "wind_power")
    pub id: String,

    /// Display name (e.g., "Enchanted Flour")
    pub name: String,

    /// Market sector
    #[serde(rename = "type")]
    pub category: AssetCategory,

    /// One-line flavor text
    pub description: String,

    /// Current market price, 2-decimal, always >= `PRICE_FLOOR`
    pub price: f64,

    /// Price delta of the last tick (`new - old`)
    pub change: f64,

    /// Capped price history, oldest first
    pub history: Vec<PricePoint>,

    /// Display glyph shown next to the name
    pub glyph: String,
}

impl Asset {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        category: AssetCategory,
        description: impl Into<String>,
        price: f64,
        glyph: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category,
            description: description.into(),
            price,
            change: 0.0,
            history: Vec::new(),
            glyph: glyph.into(),
        }
    }

    /// Append a price point, evicting the oldest beyond `HISTORY_CAP`.
    pub fn record_price(&mut self, timestamp: i64, price: f64) {
        self.history.push(PricePoint { timestamp, price });
        if self.history.len() > HISTORY_CAP {
            self.history.remove(0);
        }
    }

    /// The full tradable catalog, seeded once at startup.
    /// Each asset starts its history with the seed price at `now_ms`.
    pub fn seed_catalog(now_ms: i64) -> Vec<Asset> {
        let mut assets = vec![
            Asset::new("flour", "Enchanted Flour", AssetCategory::Resource, "The base of every cookie.", 10.0, "🌾"),
            Asset::new("milk", "Magic Milk", AssetCategory::Resource, "A vital and rare ingredient.", 25.0, "🥛"),
            Asset::new("sugar", "Crystal Sugar", AssetCategory::Resource, "Essential sweetness.", 15.0, "💎"),
            Asset::new("confectionery", "Royal Confectionery", AssetCategory::Industry, "An empire of sweets.", 50.0, "🍰"),
            Asset::new("research", "Research Center", AssetCategory::Service, "Innovation for Gridline.", 75.0, "🔬"),
            Asset::new("events", "City Events", AssetCategory::Event, "Joy and profitability.", 40.0, "🎉"),
            Asset::new("timber", "Mystic Timber", AssetCategory::Resource, "Essential construction resource.", 20.0, "🌳"),
            Asset::new("iron", "Rare Iron Ore", AssetCategory::Resource, "The base for tools and machines.", 35.0, "⛏️"),
            Asset::new("wind_power", "Wind Towers", AssetCategory::Industry, "Clean energy generation for the city.", 60.0, "⚡"),
            Asset::new("public_health", "Community Clinics", AssetCategory::Service, "Health and well-being for every citizen.", 45.0, "🏥"),
            Asset::new("tourism", "Tourist Attractions", AssetCategory::Event, "Raises the city's happiness and income.", 70.0, "🎡"),
            Asset::new("university", "Gridline University", AssetCategory::Service, "Training new talent and advanced research.", 85.0, "🎓"),
        ];
        for asset in &mut assets {
            let seed_price = asset.price;
            asset.record_price(now_ms, seed_price);
        }
        assets
    }
}
