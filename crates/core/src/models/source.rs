use serde::{Deserialize, Serialize};

/// A recurring cookie income source, gated by a cooldown.
///
/// Wire names (`cookies`, `cooldown`, `lastCollected`) match the original
/// save format; `cooldown` is milliseconds, `lastCollected` epoch ms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionSource {
    pub name: String,

    pub description: String,

    /// Cookies granted per collection
    #[serde(rename = "cookies")]
    pub reward: f64,

    /// Minimum time between collections, in milliseconds
    #[serde(rename = "cooldown")]
    pub cooldown_ms: u64,

    /// When this source was last collected; `None` means never
    #[serde(rename = "lastCollected", skip_serializing_if = "Option::is_none", default)]
    pub last_collected: Option<i64>,
}

impl CollectionSource {
    fn new(name: &str, description: &str, reward: f64, cooldown_ms: u64) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            reward,
            cooldown_ms,
            last_collected: None,
        }
    }

    /// The four city income sources, seeded on first run.
    pub fn seed_sources() -> Vec<CollectionSource> {
        vec![
            CollectionSource::new(
                "💼 Urban Taxes",
                "Tax collection from the residents",
                50.0,
                30_000,
            ),
            CollectionSource::new(
                "🏭 Industrial Output",
                "Sales of the city's products",
                75.0,
                45_000,
            ),
            CollectionSource::new(
                "🎯 City Events",
                "Festivals and special events",
                100.0,
                60_000,
            ),
            CollectionSource::new(
                "💡 Tech Innovation",
                "Patents and scientific discoveries",
                150.0,
                90_000,
            ),
        ]
    }
}
