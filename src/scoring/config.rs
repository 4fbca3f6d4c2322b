use serde::{Deserialize, Serialize};

pub const DEFAULT_POSITION_POINTS: [i32; 5] = [6, 4, 3, 2, 1];
pub const DEFAULT_NATIONALITY_MARKER: &str = "(DK)";
pub const DEFAULT_NATIONALITY_BONUS: i32 = 1;

/// Riders counted as favourites in participant statistics.
pub const DEFAULT_FAVORITES: [&str; 8] = [
    "Tadej Pogacar",
    "Remco Evenepoel",
    "Jasper Disaster",
    "Ben O'Connor",
    "Mathieu Van der Poel",
    "Marc Hirschi",
    "Jonas Vingegaard",
    "Primoz Roglic",
];

/// Scoring configuration.
///
/// Every field is optional; missing fields fall back to the house rules.
/// The star-rating adjustment is fixed and not configurable.
///
/// Example YAML:
/// ```yaml
/// scoring:
///   position_points: [6, 4, 3, 2, 1]
///   nationality_marker: "(DK)"
///   nationality_bonus: 1
///   favorites: ["Tadej Pogacar", "Jonas Vingegaard"]
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ScoringConfig {
    /// Base points by finishing position, winner first
    #[serde(default)]
    pub position_points: Option<Vec<i32>>,

    /// Substring in a rider's name that earns the nationality bonus
    #[serde(default)]
    pub nationality_marker: Option<String>,

    #[serde(default)]
    pub nationality_bonus: Option<i32>,

    #[serde(default)]
    pub favorites: Option<Vec<String>>,
}

impl ScoringConfig {
    pub fn position_points(&self) -> &[i32] {
        self.position_points
            .as_deref()
            .unwrap_or(&DEFAULT_POSITION_POINTS)
    }

    pub fn nationality_marker(&self) -> &str {
        self.nationality_marker
            .as_deref()
            .unwrap_or(DEFAULT_NATIONALITY_MARKER)
    }

    pub fn nationality_bonus(&self) -> i32 {
        self.nationality_bonus.unwrap_or(DEFAULT_NATIONALITY_BONUS)
    }

    pub fn is_favorite(&self, rider: &str) -> bool {
        match &self.favorites {
            Some(list) => list.iter().any(|f| f == rider),
            None => DEFAULT_FAVORITES.contains(&rider),
        }
    }
}
