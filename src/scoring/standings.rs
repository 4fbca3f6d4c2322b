use std::cmp::Ordering;
use std::collections::{BTreeMap, HashSet};

use super::config::ScoringConfig;
use super::points::calculate_points;
use crate::season::{Participant, Race, RatingTable};

#[derive(Debug, Clone, PartialEq)]
pub struct StandingRow {
    pub participant: Participant,
    pub total_points: i32,
    pub races_scored: u32,
    pub average: f64,
}

impl StandingRow {
    /// Average with one decimal, "0.0" when nothing was scored.
    pub fn formatted_average(&self) -> String {
        format!("{:.1}", self.average)
    }
}

/// Totals over the season that sit alongside the standings table.
#[derive(Debug, Clone, PartialEq)]
pub struct SeasonStats {
    pub scored_races: usize,
    pub active_participants: usize,
    /// Best points from a single pick, 0 when nothing was scored
    pub max_pick_points: i32,
    pub best_average: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ParticipantStats {
    /// Distinct riders picked that are on the favourites list
    pub favorites: usize,
    /// Distinct riders picked that are currently rated 5 stars
    pub wonderkids: usize,
}

fn scored_races(races: &[Race]) -> impl Iterator<Item = &Race> {
    races.iter().filter(|race| race.has_results())
}

/// Season ranking for every roster member.
///
/// Only races with results count. Rows are ordered by total points, then
/// average, then name.
pub fn standings(
    roster: &[Participant],
    races: &[Race],
    ratings: &RatingTable,
    config: &ScoringConfig,
) -> Vec<StandingRow> {
    let mut totals: BTreeMap<&str, (i32, u32)> =
        roster.iter().map(|p| (p.as_str(), (0, 0))).collect();

    for race in scored_races(races) {
        for (participant, pick) in &race.picks {
            if let Some((total, count)) = totals.get_mut(participant.as_str()) {
                *total += calculate_points(&pick.rider, race, ratings, config);
                *count += 1;
            }
        }
    }

    let mut rows: Vec<StandingRow> = roster
        .iter()
        .map(|p| {
            let (total_points, races_scored) = totals[p.as_str()];
            let average = if races_scored > 0 {
                f64::from(total_points) / f64::from(races_scored)
            } else {
                0.0
            };
            StandingRow {
                participant: p.clone(),
                total_points,
                races_scored,
                average,
            }
        })
        .collect();

    rows.sort_by(|a, b| {
        b.total_points
            .cmp(&a.total_points)
            .then_with(|| b.average.partial_cmp(&a.average).unwrap_or(Ordering::Equal))
            .then_with(|| a.participant.cmp(&b.participant))
    });
    rows
}

pub fn season_stats(
    rows: &[StandingRow],
    races: &[Race],
    ratings: &RatingTable,
    config: &ScoringConfig,
) -> SeasonStats {
    let max_pick_points = scored_races(races)
        .flat_map(|race| {
            race.picks
                .values()
                .map(move |pick| calculate_points(&pick.rider, race, ratings, config))
        })
        .fold(0, i32::max);

    let active: Vec<&StandingRow> = rows.iter().filter(|r| r.races_scored > 0).collect();
    let best_average = active.iter().map(|r| r.average).fold(0.0, f64::max);

    SeasonStats {
        scored_races: scored_races(races).count(),
        active_participants: active.len(),
        max_pick_points,
        best_average,
    }
}

/// Favourite and 5-star rider counts for one participant over all races.
pub fn participant_stats(
    participant: &str,
    races: &[Race],
    ratings: &RatingTable,
    config: &ScoringConfig,
) -> ParticipantStats {
    let picked: HashSet<&str> = races
        .iter()
        .filter_map(|race| race.picks.get(participant))
        .map(|pick| pick.rider.as_str())
        .collect();

    ParticipantStats {
        favorites: picked.iter().filter(|r| config.is_favorite(r)).count(),
        wonderkids: picked
            .iter()
            .filter(|r| ratings.get(r) == Some(5))
            .count(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::points::points;

    fn roster() -> Vec<Participant> {
        vec!["A".to_string(), "B".to_string(), "C".to_string()]
    }

    fn race(results: &[&str], picks: &[(&str, &str)], ratings: &RatingTable) -> Race {
        let mut race = Race::new("Race", "2025-05-01T10:00");
        race.record_results(results.iter().copied());
        for (participant, rider) in picks {
            race.record_pick(&roster(), participant, rider, ratings).unwrap();
        }
        race
    }

    fn scenario_ratings() -> RatingTable {
        let mut ratings = RatingTable::new();
        ratings.set("X", 5);
        ratings.set("Y", 3);
        ratings
    }

    #[test]
    fn test_single_race_scenario() {
        let ratings = scenario_ratings();
        let races = vec![race(&["X", "Y"], &[("A", "X"), ("B", "Y")], &ratings)];

        let rows = standings(&roster(), &races, &ratings, &ScoringConfig::default());
        let summary: Vec<(&str, i32, u32, String)> = rows
            .iter()
            .map(|r| {
                (
                    r.participant.as_str(),
                    r.total_points,
                    r.races_scored,
                    r.formatted_average(),
                )
            })
            .collect();
        assert_eq!(
            summary,
            vec![
                ("A", 5, 1, "5.0".to_string()),
                ("B", 4, 1, "4.0".to_string()),
                ("C", 0, 0, "0.0".to_string()),
            ]
        );
    }

    #[test]
    fn test_races_without_results_ignored() {
        let ratings = scenario_ratings();
        let races = vec![race(&[], &[("A", "X"), ("B", "Y")], &ratings)];
        let rows = standings(&roster(), &races, &ratings, &ScoringConfig::default());
        assert!(rows.iter().all(|r| r.total_points == 0 && r.races_scored == 0));

        let stats = season_stats(&rows, &races, &ratings, &ScoringConfig::default());
        assert_eq!(stats.scored_races, 0);
        assert_eq!(stats.active_participants, 0);
        assert_eq!(stats.max_pick_points, 0);
        assert_eq!(stats.best_average, 0.0);
    }

    #[test]
    fn test_zero_point_pick_still_counts_race() {
        let ratings = scenario_ratings();
        let races = vec![race(&["X"], &[("C", "Nobody")], &ratings)];
        let rows = standings(&roster(), &races, &ratings, &ScoringConfig::default());
        let c = rows.iter().find(|r| r.participant == "C").unwrap();
        assert_eq!(c.races_scored, 1);
        assert_eq!(c.total_points, 0);
    }

    #[test]
    fn test_totals_match_sum_of_points() {
        let mut ratings = scenario_ratings();
        ratings.set("Z (DK)", 1);
        let races = vec![
            race(&["X", "Y", "Z (DK)"], &[("A", "X"), ("B", "Z (DK)"), ("C", "Y")], &ratings),
            race(&["Y", "Q"], &[("A", "Q"), ("B", "X")], &ratings),
            race(&[], &[("A", "Y")], &ratings),
        ];

        let rows = standings(&roster(), &races, &ratings, &ScoringConfig::default());
        let table_sum: i32 = rows.iter().map(|r| r.total_points).sum();
        let ratings = &ratings;
        let pick_sum: i32 = races
            .iter()
            .filter(|r| r.has_results())
            .flat_map(|r| r.picks.values().map(move |p| points(&p.rider, r, ratings)))
            .sum();
        assert_eq!(table_sum, pick_sum);
    }

    #[test]
    fn test_tie_break_by_average_then_name() {
        let mut ratings = RatingTable::new();
        ratings.set("R1", 3);
        ratings.set("R2", 3);
        let races = vec![
            race(&["R1", "R2"], &[("A", "R2"), ("B", "R1"), ("C", "R1")], &ratings),
            race(&["R1", "R2", "R3"], &[("A", "NoShow")], &ratings),
            race(&["R2", "R1"], &[("A", "R1")], &ratings),
        ];
        let rows = standings(&roster(), &races, &ratings, &ScoringConfig::default());
        let order: Vec<&str> = rows.iter().map(|r| r.participant.as_str()).collect();
        // A has 4 + 0 + 4 = 8 over three races; B and C tie on 6 in one race
        assert_eq!(order, vec!["A", "B", "C"]);

        let races = vec![
            race(&["R1"], &[("C", "R1"), ("A", "R2")], &ratings),
            race(&["R2", "R1"], &[("A", "R1"), ("B", "R2")], &ratings),
            race(&["R2"], &[("B", "R1")], &ratings),
        ];
        // A: 0 + 4 = 4 in two races, B: 6 + 0 = 6 in two, C: 6 in one
        let rows = standings(&roster(), &races, &ratings, &ScoringConfig::default());
        let order: Vec<&str> = rows.iter().map(|r| r.participant.as_str()).collect();
        assert_eq!(order, vec!["C", "B", "A"]);
    }

    #[test]
    fn test_season_stats() {
        let ratings = scenario_ratings();
        let races = vec![
            race(&["X", "Y"], &[("A", "X"), ("B", "Y")], &ratings),
            race(&["Y", "X"], &[("A", "Y")], &ratings),
            race(&[], &[("C", "X")], &ratings),
        ];
        let config = ScoringConfig::default();
        let rows = standings(&roster(), &races, &ratings, &config);
        let stats = season_stats(&rows, &races, &ratings, &config);

        assert_eq!(stats.scored_races, 2);
        assert_eq!(stats.active_participants, 2);
        assert_eq!(stats.max_pick_points, 6);
        // A: (5 + 6) / 2 = 5.5, B: 4
        assert_eq!(stats.best_average, 5.5);
    }

    #[test]
    fn test_participant_stats() {
        let mut ratings = RatingTable::new();
        ratings.set("Tadej Pogacar", 5);
        ratings.set("Young Gun", 5);
        ratings.set("Jonas Vingegaard", 4);
        let races = vec![
            race(&[], &[("A", "Tadej Pogacar")], &ratings),
            race(&[], &[("A", "Tadej Pogacar")], &ratings),
            race(&[], &[("A", "Young Gun")], &ratings),
            race(&[], &[("A", "Jonas Vingegaard"), ("B", "Young Gun")], &ratings),
        ];
        let stats = participant_stats("A", &races, &ratings, &ScoringConfig::default());
        assert_eq!(stats.favorites, 2);
        assert_eq!(stats.wonderkids, 2);

        let stats = participant_stats("C", &races, &ratings, &ScoringConfig::default());
        assert_eq!(stats, ParticipantStats::default());
    }
}
