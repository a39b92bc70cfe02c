use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One held position, keyed by asset id in [`Portfolio`].
///
/// `average_price` is the quantity-weighted average purchase price. It is
/// recomputed on buys only — sells reduce quantity but leave the cost
/// basis untouched.
///
/// Wire names (`averagePrice`) match the original save format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Holding {
    /// Units held, always > 0 while the entry exists
    pub quantity: u32,

    /// Weighted-average cost basis per unit, 2-decimal
    pub average_price: f64,
}

/// The player's holdings: asset id → position.
///
/// Invariant: an entry is present iff its quantity is greater than zero.
/// Entries are created on first purchase and removed when fully sold.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Portfolio {
    pub holdings: BTreeMap<String, Holding>,
}

impl Portfolio {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, asset_id: &str) -> Option<&Holding> {
        self.holdings.get(asset_id)
    }

    /// Units held of one asset (0 when there is no entry).
    pub fn quantity_of(&self, asset_id: &str) -> u32 {
        self.holdings.get(asset_id).map_or(0, |h| h.quantity)
    }

    pub fn is_empty(&self) -> bool {
        self.holdings.is_empty()
    }

    pub fn len(&self) -> usize {
        self.holdings.len()
    }
}
