use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Lower and upper bound for every city indicator.
pub const INDICATOR_MIN: i32 = 0;
pub const INDICATOR_MAX: i32 = 100;

/// A city performance category measured on a 0–100 scale.
///
/// Every city-point category except `government` has an indicator of its
/// own; government upgrades spread their delta across all of them instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndicatorKind {
    Health,
    Security,
    Transport,
    Energy,
    Environment,
    Education,
    Commerce,
    Industry,
    Culture,
    Sports,
}

impl IndicatorKind {
    /// All indicator kinds, in display order.
    pub const ALL: [IndicatorKind; 10] = [
        IndicatorKind::Health,
        IndicatorKind::Security,
        IndicatorKind::Transport,
        IndicatorKind::Energy,
        IndicatorKind::Environment,
        IndicatorKind::Education,
        IndicatorKind::Commerce,
        IndicatorKind::Industry,
        IndicatorKind::Culture,
        IndicatorKind::Sports,
    ];
}

impl IndicatorKind {
    /// Parse a persisted map key. Returns `None` for keys this version
    /// does not know about.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "health" => Some(IndicatorKind::Health),
            "security" => Some(IndicatorKind::Security),
            "transport" => Some(IndicatorKind::Transport),
            "energy" => Some(IndicatorKind::Energy),
            "environment" => Some(IndicatorKind::Environment),
            "education" => Some(IndicatorKind::Education),
            "commerce" => Some(IndicatorKind::Commerce),
            "industry" => Some(IndicatorKind::Industry),
            "culture" => Some(IndicatorKind::Culture),
            "sports" => Some(IndicatorKind::Sports),
            _ => None,
        }
    }
}

impl std::fmt::Display for IndicatorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            IndicatorKind::Health => "health",
            IndicatorKind::Security => "security",
            IndicatorKind::Transport => "transport",
            IndicatorKind::Energy => "energy",
            IndicatorKind::Environment => "environment",
            IndicatorKind::Education => "education",
            IndicatorKind::Commerce => "commerce",
            IndicatorKind::Industry => "industry",
            IndicatorKind::Culture => "culture",
            IndicatorKind::Sports => "sports",
        };
        write!(f, "{name}")
    }
}

/// The city's per-category performance metrics, each clamped to [0, 100].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Indicators {
    values: BTreeMap<IndicatorKind, i32>,
}

impl Indicators {
    pub fn get(&self, kind: IndicatorKind) -> i32 {
        self.values.get(&kind).copied().unwrap_or(INDICATOR_MIN)
    }

    /// Apply a delta to one indicator, clamping the result to [0, 100].
    pub fn apply(&mut self, kind: IndicatorKind, delta: i32) {
        let value = self.get(kind) + delta;
        self.values
            .insert(kind, value.clamp(INDICATOR_MIN, INDICATOR_MAX));
    }

    /// Apply the same delta to every indicator (government effect).
    pub fn apply_all(&mut self, delta: i32) {
        for kind in IndicatorKind::ALL {
            self.apply(kind, delta);
        }
    }

    /// Overwrite one indicator with a clamped value. Used when restoring
    /// persisted state, which may predate the clamping rules.
    pub fn set(&mut self, kind: IndicatorKind, value: i32) {
        self.values
            .insert(kind, value.clamp(INDICATOR_MIN, INDICATOR_MAX));
    }

    pub fn iter(&self) -> impl Iterator<Item = (IndicatorKind, i32)> + '_ {
        self.values.iter().map(|(k, v)| (*k, *v))
    }
}

impl Default for Indicators {
    fn default() -> Self {
        let mut values = BTreeMap::new();
        values.insert(IndicatorKind::Health, 75);
        values.insert(IndicatorKind::Security, 70);
        values.insert(IndicatorKind::Transport, 45);
        values.insert(IndicatorKind::Energy, 65);
        values.insert(IndicatorKind::Environment, 60);
        values.insert(IndicatorKind::Education, 55);
        values.insert(IndicatorKind::Commerce, 50);
        values.insert(IndicatorKind::Industry, 58);
        values.insert(IndicatorKind::Culture, 42);
        values.insert(IndicatorKind::Sports, 48);
        Self { values }
    }
}
