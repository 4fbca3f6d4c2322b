use serde::{Deserialize, Serialize};

use super::types::{
    zeroed_start_counts, Participant, Race, RatingTable, StartCounts, MAX_STARS,
};

pub const SEASON_VERSION: u32 = 1;

/// Everything the surrounding application keeps between runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Season {
    pub version: u32,
    #[serde(default)]
    pub races: Vec<Race>,
    #[serde(default)]
    pub ratings: RatingTable,
    #[serde(default)]
    pub start_counts: StartCounts,
}

impl Default for Season {
    fn default() -> Self {
        Self::new()
    }
}

impl Season {
    pub fn new() -> Self {
        Self {
            version: SEASON_VERSION,
            races: Vec::new(),
            ratings: RatingTable::new(),
            start_counts: StartCounts::new(),
        }
    }

    /// Bring a loaded season in line with the current roster.
    ///
    /// Collapses duplicate ratings, caps star values at 5, drops picks by
    /// participants who left the roster, drops pick orders that are no longer a
    /// permutation of the roster and gives every roster member a start count.
    /// Returns one warning per fix.
    pub fn normalize(&mut self, roster: &[Participant]) -> Vec<String> {
        let mut warnings = Vec::new();

        let entries = self.ratings.entries();
        let dupes = RatingTable::duplicate_riders(entries);
        if !dupes.is_empty() {
            warnings.push(format!(
                "Duplicate ratings for {}; keeping the last value",
                dupes.join(", ")
            ));
        }
        for entry in entries.iter().filter(|e| e.stars > MAX_STARS) {
            warnings.push(format!(
                "{} is rated {} stars; capping at {}",
                entry.rider, entry.stars, MAX_STARS
            ));
        }
        // Rebuilding through `set` dedupes and clamps
        self.ratings = RatingTable::from_entries(entries.to_vec());

        for race in &mut self.races {
            let strays: Vec<Participant> = race
                .picks
                .keys()
                .filter(|p| !roster.contains(*p))
                .cloned()
                .collect();
            for participant in strays {
                warnings.push(format!(
                    "{}: dropping pick by {} (not on the roster)",
                    race.name, participant
                ));
                race.picks.remove(&participant);
            }

            if let Some(order) = &race.pick_order {
                if !is_roster_permutation(order, roster) {
                    warnings.push(format!(
                        "{}: pick order no longer matches the roster, clearing it",
                        race.name
                    ));
                    race.pick_order = None;
                }
            }
        }

        for participant in roster {
            self.start_counts.entry(participant.clone()).or_insert(0);
        }

        warnings
    }

    /// Put every roster member back at zero starts.
    pub fn reset_start_counts(&mut self, roster: &[Participant]) {
        self.start_counts = zeroed_start_counts(roster);
    }

    /// Look up a race by its 1-based position in the season.
    pub fn race_mut(&mut self, number: usize) -> Option<&mut Race> {
        number
            .checked_sub(1)
            .and_then(move |idx| self.races.get_mut(idx))
    }
}

fn is_roster_permutation(order: &[Participant], roster: &[Participant]) -> bool {
    let mut a: Vec<&Participant> = order.iter().collect();
    let mut b: Vec<&Participant> = roster.iter().collect();
    a.sort();
    b.sort();
    a == b
}
