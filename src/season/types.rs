use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Participants are identified by name.
pub type Participant = String;

/// How often each participant has been placed first in a pick order this season.
pub type StartCounts = BTreeMap<Participant, u32>;

/// Star value snapshotted for a manual pick of a rider nobody has rated.
pub const DEFAULT_PICK_STARS: u8 = 3;

pub const MAX_STARS: u8 = 5;

/// Build a start-count table with every roster member at zero.
pub fn zeroed_start_counts(roster: &[Participant]) -> StartCounts {
    roster.iter().map(|p| (p.clone(), 0)).collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingEntry {
    pub rider: String,
    pub stars: u8,
}

/// Subjective 0-5 star assessment per rider.
///
/// Entry order is kept: auto-fill breaks star ties by it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RatingTable {
    entries: Vec<RatingEntry>,
}

impl RatingTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from raw entries. A rider rated twice keeps the last value,
    /// at the position of its first occurrence.
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = RatingEntry>,
    {
        let mut table = Self::new();
        for entry in entries {
            table.set(entry.rider, entry.stars);
        }
        table
    }

    /// Riders that appear more than once in `entries`, in first-seen order.
    pub fn duplicate_riders(entries: &[RatingEntry]) -> Vec<String> {
        let mut seen = std::collections::HashSet::new();
        let mut dupes: Vec<String> = Vec::new();
        for entry in entries {
            if !seen.insert(entry.rider.as_str()) && !dupes.contains(&entry.rider) {
                dupes.push(entry.rider.clone());
            }
        }
        dupes
    }

    /// Rate a rider, replacing any existing rating. Stars above 5 are clamped.
    pub fn set(&mut self, rider: impl Into<String>, stars: u8) {
        let rider = rider.into();
        let stars = stars.min(MAX_STARS);
        match self.entries.iter_mut().find(|e| e.rider == rider) {
            Some(entry) => entry.stars = stars,
            None => self.entries.push(RatingEntry { rider, stars }),
        }
    }

    pub fn get(&self, rider: &str) -> Option<u8> {
        self.entries
            .iter()
            .find(|e| e.rider == rider)
            .map(|e| e.stars)
    }

    pub fn entries(&self) -> &[RatingEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pick {
    pub rider: String,
    /// Rating at the moment the pick was made; later rating edits don't touch it.
    pub stars_at_pick_time: u8,
    #[serde(default)]
    pub auto: bool,
}

/// Pick lifecycle of a race.
///
/// `Open` accepts manual picks and one auto-fill pass. Auto-fill moves the race
/// to `Closed`, after which further auto-fill calls leave it untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PickWindow {
    #[default]
    Open,
    Closed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickRejection {
    NotOnRoster,
    WindowClosed,
}

impl fmt::Display for PickRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PickRejection::NotOnRoster => write!(f, "participant is not on the roster"),
            PickRejection::WindowClosed => write!(f, "auto-picks already ran for this race"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Race {
    pub name: String,
    /// Start time as entered, e.g. "2025-03-22T10:00". Kept verbatim; see `season::deadline`.
    pub date: String,
    /// Finishing order, index 0 is the winner.
    #[serde(default)]
    pub results: Vec<String>,
    #[serde(default)]
    pub picks: BTreeMap<Participant, Pick>,
    #[serde(default)]
    pub window: PickWindow,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pick_order: Option<Vec<Participant>>,
}

impl Race {
    pub fn new(name: impl Into<String>, date: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            date: date.into(),
            results: Vec::new(),
            picks: BTreeMap::new(),
            window: PickWindow::Open,
            pick_order: None,
        }
    }

    pub fn has_results(&self) -> bool {
        !self.results.is_empty()
    }

    pub fn is_closed(&self) -> bool {
        self.window == PickWindow::Closed
    }

    pub fn is_picked(&self, rider: &str) -> bool {
        self.picks.values().any(|p| p.rider == rider)
    }

    /// First participant without a pick, following the race's pick order
    /// (roster order when no order has been allocated yet).
    pub fn next_picker<'a>(&'a self, roster: &'a [Participant]) -> Option<&'a str> {
        let order = self.pick_order.as_deref().unwrap_or(roster);
        order
            .iter()
            .find(|p| !self.picks.contains_key(p.as_str()))
            .map(String::as_str)
    }

    /// Record a manual pick, replacing any earlier pick by the same participant.
    ///
    /// Stars are snapshotted from the current rating, falling back to the
    /// replaced pick's stars and then to `DEFAULT_PICK_STARS`.
    pub fn record_pick(
        &mut self,
        roster: &[Participant],
        participant: &str,
        rider: &str,
        ratings: &RatingTable,
    ) -> Result<(), PickRejection> {
        if !roster.iter().any(|p| p == participant) {
            return Err(PickRejection::NotOnRoster);
        }
        if self.is_closed() {
            return Err(PickRejection::WindowClosed);
        }

        let stars = ratings
            .get(rider)
            .or_else(|| self.picks.get(participant).map(|p| p.stars_at_pick_time))
            .unwrap_or(DEFAULT_PICK_STARS);

        self.picks.insert(
            participant.to_string(),
            Pick {
                rider: rider.to_string(),
                stars_at_pick_time: stars,
                auto: false,
            },
        );
        Ok(())
    }

    /// Store a finisher list verbatim.
    pub fn record_results<I, S>(&mut self, finishers: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.results = finishers.into_iter().map(Into::into).collect();
    }
}
