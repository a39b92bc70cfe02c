use serde::{Deserialize, Serialize};

use super::indicators::IndicatorKind;

/// The civic sector a city point belongs to.
///
/// Every category except `Government` maps onto an indicator of the same
/// name; government points improve the whole city at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointCategory {
    Health,
    Security,
    Transport,
    Energy,
    Environment,
    Government,
    Education,
    Commerce,
    Industry,
    Culture,
    Sports,
}

impl std::fmt::Display for PointCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PointCategory::Health => "health",
            PointCategory::Security => "security",
            PointCategory::Transport => "transport",
            PointCategory::Energy => "energy",
            PointCategory::Environment => "environment",
            PointCategory::Government => "government",
            PointCategory::Education => "education",
            PointCategory::Commerce => "commerce",
            PointCategory::Industry => "industry",
            PointCategory::Culture => "culture",
            PointCategory::Sports => "sports",
        };
        write!(f, "{name}")
    }
}

/// Secondary indicator effect attached to a category.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SplashKind {
    /// Fixed delta regardless of the upgrade's magnitude
    Offset(i32),
    /// Fraction of the upgrade's magnitude (rounded to nearest integer)
    Fraction(f64),
}

/// A splash effect: which indicator it touches and by how much.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Splash {
    pub indicator: IndicatorKind,
    pub kind: SplashKind,
}

/// How a category's upgrades move the city indicators.
///
/// Computed once at data-definition time — effect magnitudes are plain
/// numbers on [`Upgrade`], never parsed out of display text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CategoryEffect {
    /// The delta lands on every indicator (government).
    Uniform,
    /// The delta lands on the primary indicator, plus an optional splash.
    Focused {
        primary: IndicatorKind,
        splash: Option<Splash>,
    },
}

impl PointCategory {
    /// The indicator effect table for point upgrades.
    pub fn effect(&self) -> CategoryEffect {
        use IndicatorKind as I;
        match self {
            PointCategory::Government => CategoryEffect::Uniform,
            PointCategory::Health => CategoryEffect::Focused {
                primary: I::Health,
                splash: None,
            },
            PointCategory::Security => CategoryEffect::Focused {
                primary: I::Security,
                splash: None,
            },
            PointCategory::Transport => CategoryEffect::Focused {
                primary: I::Transport,
                splash: None,
            },
            PointCategory::Energy => CategoryEffect::Focused {
                primary: I::Energy,
                splash: None,
            },
            PointCategory::Environment => CategoryEffect::Focused {
                primary: I::Environment,
                splash: None,
            },
            // A better-educated city is a healthier one.
            PointCategory::Education => CategoryEffect::Focused {
                primary: I::Education,
                splash: Some(Splash {
                    indicator: I::Health,
                    kind: SplashKind::Offset(5),
                }),
            },
            PointCategory::Commerce => CategoryEffect::Focused {
                primary: I::Commerce,
                splash: Some(Splash {
                    indicator: I::Security,
                    kind: SplashKind::Offset(5),
                }),
            },
            // Industrial growth costs the environment a share of the gain.
            PointCategory::Industry => CategoryEffect::Focused {
                primary: I::Industry,
                splash: Some(Splash {
                    indicator: I::Environment,
                    kind: SplashKind::Fraction(-0.3),
                }),
            },
            PointCategory::Culture => CategoryEffect::Focused {
                primary: I::Culture,
                splash: Some(Splash {
                    indicator: I::Security,
                    kind: SplashKind::Offset(5),
                }),
            },
            PointCategory::Sports => CategoryEffect::Focused {
                primary: I::Sports,
                splash: Some(Splash {
                    indicator: I::Environment,
                    kind: SplashKind::Offset(3),
                }),
            },
        }
    }
}

/// One purchasable improvement on a city point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Upgrade {
    pub name: String,

    /// Cookie cost, always > 0
    pub cost: f64,

    /// Indicator effect magnitude, routed through the category table
    pub delta: i32,

    /// Minimum point level required before this upgrade unlocks
    pub required_level: u32,

    pub description: String,
}

impl Upgrade {
    pub fn new(
        name: impl Into<String>,
        cost: f64,
        delta: i32,
        required_level: u32,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            cost,
            delta,
            required_level,
            description: description.into(),
        }
    }
}

/// An infrastructure node on the city map.
///
/// `level` starts at 1 or higher and only ever grows; `status` is display
/// text regenerated from the category template whenever the level changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CityPoint {
    pub id: u32,
    pub name: String,
    #[serde(rename = "type")]
    pub category: PointCategory,
    pub level: u32,
    pub status: String,
    pub description: String,
    pub glyph: String,
    pub upgrades: Vec<Upgrade>,
}

impl CityPoint {
    fn new(
        id: u32,
        name: &str,
        category: PointCategory,
        level: u32,
        description: &str,
        glyph: &str,
        upgrades: Vec<Upgrade>,
    ) -> Self {
        let mut point = Self {
            id,
            name: name.to_string(),
            category,
            level,
            status: String::new(),
            description: description.to_string(),
            glyph: glyph.to_string(),
            upgrades,
        };
        point.refresh_status();
        point
    }

    /// Regenerate the status line from the per-category template.
    /// Embedded figures scale with the current level.
    pub fn refresh_status(&mut self) {
        self.status = status_for(self.category, self.level);
    }

    /// The city map, seeded once at initialization.
    pub fn seed_points() -> Vec<CityPoint> {
        use PointCategory as C;
        vec![
            CityPoint::new(
                1,
                "Municipal Hospital",
                C::Health,
                2,
                "The city's main medical center. Emergency care, specialist consultations, and surgery.",
                "🏥",
                vec![
                    Upgrade::new("New Equipment", 300.0, 15, 1, "Modern medical equipment for diagnosis and treatment."),
                    Upgrade::new("Building Expansion", 500.0, 25, 2, "A larger structure to treat more patients at once."),
                ],
            ),
            CityPoint::new(
                2,
                "Digital City Hall",
                C::Government,
                3,
                "The city's administrative and technology hub. Manages every public service.",
                "🏛️",
                vec![
                    Upgrade::new("Digital Platform", 400.0, 10, 1, "An integrated platform for managing all services."),
                    Upgrade::new("Data Center", 650.0, 15, 2, "Processing infrastructure for urban data."),
                ],
            ),
            CityPoint::new(
                3,
                "Central Police Station",
                C::Security,
                2,
                "Public-safety command center. Coordinates patrols and answers emergencies.",
                "🚓",
                vec![
                    Upgrade::new("Security Cameras", 250.0, 12, 1, "A network of smart surveillance cameras."),
                    Upgrade::new("New Vehicles", 400.0, 20, 2, "A modern, well-equipped patrol fleet."),
                ],
            ),
            CityPoint::new(
                4,
                "Smart Bus Station",
                C::Transport,
                1,
                "Public transport hub fitted with smart-city technology.",
                "🚌",
                vec![
                    Upgrade::new("Electric Buses", 180.0, 15, 1, "A silent, all-electric bus fleet."),
                    Upgrade::new("Adaptive Signals", 320.0, 22, 2, "Traffic lights that adapt to the flow."),
                ],
            ),
            CityPoint::new(
                5,
                "Technical School",
                C::Education,
                2,
                "Vocational training center for students of all ages.",
                "🏫",
                vec![
                    Upgrade::new("Modern Laboratories", 280.0, 10, 1, "Up-to-date equipment for hands-on teaching."),
                    Upgrade::new("Business Partnerships", 450.0, 18, 2, "Internship and employability programs."),
                ],
            ),
            CityPoint::new(
                6,
                "Shopping Center",
                C::Commerce,
                2,
                "Retail complex with shops, food, and entertainment.",
                "🏬",
                vec![
                    Upgrade::new("Retail Expansion", 320.0, 15, 1, "New shops and services."),
                    Upgrade::new("Smart Parking", 480.0, 22, 2, "Automated spot assignment and payment."),
                ],
            ),
            CityPoint::new(
                7,
                "Solar Power Station",
                C::Energy,
                1,
                "The city's main source of clean energy.",
                "⚡",
                vec![
                    Upgrade::new("Solar Panels", 200.0, 10, 1, "High-efficiency panels on every roof."),
                    Upgrade::new("Advanced Batteries", 350.0, 18, 2, "Grid-scale energy storage."),
                ],
            ),
            CityPoint::new(
                8,
                "Recycling Center",
                C::Environment,
                1,
                "Modern facility for processing urban waste.",
                "♻️",
                vec![
                    Upgrade::new("Automated Sorting", 240.0, 14, 1, "Machines that sort waste streams efficiently."),
                    Upgrade::new("Composting Plant", 420.0, 23, 2, "Turns organic waste into fertilizer."),
                ],
            ),
            CityPoint::new(
                9,
                "Industrial Park",
                C::Industry,
                2,
                "Technology and manufacturing companies clustered together.",
                "🏭",
                vec![
                    Upgrade::new("Logistics Infrastructure", 380.0, 12, 1, "Better cargo transport in and out."),
                    Upgrade::new("Tax Incentives", 550.0, 20, 2, "Programs supporting industrial growth."),
                ],
            ),
            CityPoint::new(
                10,
                "Water Treatment Plant",
                C::Environment,
                1,
                "Advanced water and sewage treatment.",
                "💧",
                vec![
                    Upgrade::new("Advanced Filters", 290.0, 16, 1, "Latest-generation purification."),
                    Upgrade::new("Water Reuse", 460.0, 24, 2, "Treated water fed back into the loop."),
                ],
            ),
            CityPoint::new(
                11,
                "Ecological Park",
                C::Environment,
                2,
                "The city's green lung, with trails and gardens.",
                "🌳",
                vec![
                    Upgrade::new("Green Expansion", 220.0, 13, 1, "More native species across a larger area."),
                    Upgrade::new("Smart Irrigation", 380.0, 20, 2, "Irrigation that conserves the vegetation."),
                ],
            ),
            CityPoint::new(
                12,
                "Cultural Center",
                C::Culture,
                1,
                "A home for the arts, exhibitions, and cultural events.",
                "🎭",
                vec![
                    Upgrade::new("Modern Auditorium", 310.0, 15, 1, "A stage for performances and talks."),
                    Upgrade::new("Digital Archive", 490.0, 22, 2, "The collection digitized and expanded."),
                ],
            ),
            CityPoint::new(
                13,
                "Municipal Stadium",
                C::Sports,
                1,
                "Arena for competitions and community events.",
                "⚽",
                vec![
                    Upgrade::new("Synthetic Turf", 270.0, 12, 1, "A latest-generation playing surface."),
                    Upgrade::new("LED Floodlights", 430.0, 20, 2, "Efficient lighting for evening events."),
                ],
            ),
        ]
    }
}

/// Per-category status template. Figures scale with the point's level.
pub fn status_for(category: PointCategory, level: u32) -> String {
    let l = i64::from(level);
    match category {
        PointCategory::Health => format!(
            "Visits: {}/day | Capacity: {}% | Alerts: {}",
            70 + 8 * l,
            (82 + 3 * l).min(99),
            (3 - l).max(0),
        ),
        PointCategory::Government => format!(
            "Projects: {} | Investment: {:.1}M | Approval: {}%",
            6 + 2 * l,
            2.0 + 0.4 * l as f64,
            (62 + 3 * l).min(99),
        ),
        PointCategory::Security => format!(
            "Incidents: {}/day | Coverage: {}% | Patrols: {}",
            (16 - 2 * l).max(1),
            (62 + 4 * l).min(99),
            6 + 2 * l,
        ),
        PointCategory::Transport => format!(
            "Flow: {}/day | Congestion: {}% | Punctuality: {}%",
            400 + 60 * l,
            (55 - 5 * l).max(10),
            (76 + 4 * l).min(99),
        ),
        PointCategory::Education => format!(
            "Students: {} | Qualification: {}% | Employability: {}%",
            280 + 40 * l,
            (68 + 4 * l).min(99),
            (60 + 4 * l).min(99),
        ),
        PointCategory::Commerce => format!(
            "Shops: {} | Visitors: {}/day | Satisfaction: {}%",
            38 + 7 * l,
            1000 + 150 * l,
            (66 + 4 * l).min(99),
        ),
        PointCategory::Energy => format!(
            "Output: {}MW | Autonomy: {}% | Efficiency: {}%",
            75 + 10 * l,
            (58 + 6 * l).min(99),
            (72 + 4 * l).min(99),
        ),
        PointCategory::Environment => format!(
            "Air Quality: {}% | Recycling: {}% | Occupancy: {}%",
            (55 + 5 * l).min(99),
            (52 + 6 * l).min(99),
            30 + 5 * l,
        ),
        PointCategory::Industry => format!(
            "Companies: {} | Jobs: {} | Output: {}%",
            14 + 3 * l,
            700 + 80 * l,
            (88 + 2 * l).min(99),
        ),
        PointCategory::Culture => format!(
            "Events: {}/month | Visitors: {} | Rating: {:.1}★",
            18 + 5 * l,
            1400 + 250 * l,
            (3.8 + 0.2 * l as f64).min(5.0),
        ),
        PointCategory::Sports => format!(
            "Capacity: {} | Events: {}/month | Upkeep: {}%",
            4000 + 600 * l,
            5 + 2 * l,
            (78 + 4 * l).min(99),
        ),
    }
}

/// A city-wide investment in one civic area (not tied to a single point).
///
/// Applies a smaller indicator bump than point upgrades and levels up
/// every point in the matching category. Static definitions, never
/// persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AreaInvestment {
    pub category: PointCategory,
    pub cost: f64,
    pub delta: i32,
    pub description: String,
    pub glyph: String,
}

impl AreaInvestment {
    fn new(category: PointCategory, cost: f64, delta: i32, description: &str, glyph: &str) -> Self {
        Self {
            category,
            cost,
            delta,
            description: description.to_string(),
            glyph: glyph.to_string(),
        }
    }

    /// The five area investments offered on the city dashboard.
    pub fn seed_list() -> Vec<AreaInvestment> {
        use PointCategory as C;
        vec![
            AreaInvestment::new(C::Energy, 200.0, 10, "Advanced solar panels and wind turbines to boost clean energy output.", "⚡"),
            AreaInvestment::new(C::Transport, 150.0, 15, "Electric buses and smart traffic systems for better urban mobility.", "🚌"),
            AreaInvestment::new(C::Security, 180.0, 12, "Smart surveillance cameras and more officers on the streets.", "🚓"),
            AreaInvestment::new(C::Health, 220.0, 8, "Hospital modernization with new equipment and specialists.", "🏥"),
            AreaInvestment::new(C::Environment, 170.0, 13, "Expanded green areas and a more efficient recycling system.", "🌳"),
        ]
    }
}
