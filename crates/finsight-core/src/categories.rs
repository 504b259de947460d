//! Canonical spending categories
//!
//! Maps the raw bank category labels from the ledger onto seven
//! human-readable spending classes. The mapping is total: any label the
//! table does not know lands in `Miscellaneous` so the pipeline never
//! breaks on unexpected data.
//!
//! This module also owns the canonical display ordering and the per-category
//! color key, so every consumer (aggregation, summaries, chart rendering)
//! agrees on the same sequence.

use serde::{Deserialize, Serialize};

/// One of the fixed FinSight spending classes
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpendingCategory {
    FoodGroceries,
    Shopping,
    TransportTravel,
    Entertainment,
    HealthWellness,
    HomeFamily,
    Miscellaneous,
}

/// The fixed raw-label lookup table, for display and chart legends
///
/// `from_raw` is the authority; this table mirrors it for consumers that
/// want to enumerate the known labels.
pub const RAW_LABELS: [(&str, SpendingCategory); 14] = [
    ("food_dining", SpendingCategory::FoodGroceries),
    ("grocery_pos", SpendingCategory::FoodGroceries),
    ("grocery_net", SpendingCategory::FoodGroceries),
    ("shopping_pos", SpendingCategory::Shopping),
    ("shopping_net", SpendingCategory::Shopping),
    ("gas_transport", SpendingCategory::TransportTravel),
    ("travel", SpendingCategory::TransportTravel),
    ("entertainment", SpendingCategory::Entertainment),
    ("health_fitness", SpendingCategory::HealthWellness),
    ("personal_care", SpendingCategory::HealthWellness),
    ("home", SpendingCategory::HomeFamily),
    ("kids_pets", SpendingCategory::HomeFamily),
    ("misc_pos", SpendingCategory::Miscellaneous),
    ("misc_net", SpendingCategory::Miscellaneous),
];

impl SpendingCategory {
    /// All categories in canonical display order
    pub const ALL: [SpendingCategory; 7] = [
        Self::FoodGroceries,
        Self::Shopping,
        Self::TransportTravel,
        Self::Entertainment,
        Self::HealthWellness,
        Self::HomeFamily,
        Self::Miscellaneous,
    ];

    /// Map a raw ledger category label to its canonical category
    ///
    /// Total and pure: unknown labels resolve to `Miscellaneous`.
    pub fn from_raw(raw: &str) -> Self {
        match raw {
            "food_dining" | "grocery_pos" | "grocery_net" => Self::FoodGroceries,
            "shopping_pos" | "shopping_net" => Self::Shopping,
            "gas_transport" | "travel" => Self::TransportTravel,
            "entertainment" => Self::Entertainment,
            "health_fitness" | "personal_care" => Self::HealthWellness,
            "home" | "kids_pets" => Self::HomeFamily,
            "misc_pos" | "misc_net" => Self::Miscellaneous,
            _ => Self::Miscellaneous,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FoodGroceries => "Food & Groceries",
            Self::Shopping => "Shopping",
            Self::TransportTravel => "Transport & Travel",
            Self::Entertainment => "Entertainment",
            Self::HealthWellness => "Health & Wellness",
            Self::HomeFamily => "Home & Family",
            Self::Miscellaneous => "Miscellaneous",
        }
    }

    /// Hex color for chart rendering, consistent across all charts
    pub fn color(&self) -> &'static str {
        match self {
            Self::FoodGroceries => "#2ecc71",
            Self::Shopping => "#3498db",
            Self::TransportTravel => "#e67e22",
            Self::Entertainment => "#9b59b6",
            Self::HealthWellness => "#e74c3c",
            Self::HomeFamily => "#1abc9c",
            Self::Miscellaneous => "#95a5a6",
        }
    }

    /// Position in the canonical display order
    pub fn display_rank(&self) -> usize {
        Self::ALL.iter().position(|c| c == self).unwrap_or(Self::ALL.len())
    }
}

impl std::fmt::Display for SpendingCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
