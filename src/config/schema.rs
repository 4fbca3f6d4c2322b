use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::scoring::ScoringConfig;
use crate::season::{Participant, DEFAULT_PICK_CUTOFF};

pub const DEFAULT_ROSTER: [&str; 7] = [
    "Anders",
    "Dennis",
    "Emil",
    "Christian",
    "Tobias",
    "Mathias",
    "Isak",
];

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Participants in their fixed season order
    pub roster: Vec<Participant>,

    /// Season file location (defaults to ~/.config/peloton-picks/season.json)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub season_file: Option<PathBuf>,

    /// How long before the start picks close, e.g. "90m"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pick_cutoff: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scoring: Option<ScoringConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            roster: DEFAULT_ROSTER.iter().map(|s| s.to_string()).collect(),
            season_file: None,
            pick_cutoff: Some(DEFAULT_PICK_CUTOFF.to_string()),
            scoring: None,
        }
    }
}

impl Config {
    pub fn pick_cutoff_str(&self) -> &str {
        self.pick_cutoff.as_deref().unwrap_or(DEFAULT_PICK_CUTOFF)
    }
}
