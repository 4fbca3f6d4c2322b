use super::config::ScoringConfig;
use crate::season::{Race, RatingTable};

/// How a pick's points came about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PointsBreakdown {
    /// 0-based finishing position, `None` when the rider isn't in the results
    pub position: Option<usize>,
    /// Position points, already reduced for 5-star riders
    pub base: i32,
    /// Current rating, `None` for unrated riders
    pub rating: Option<u8>,
    /// Rating bonus plus nationality bonus
    pub bonus: i32,
    pub nationality: bool,
    pub total: i32,
}

/// Bonus for picking a rider the rating table doesn't rate highly.
/// 5-star riders instead lose one base point.
fn rating_adjustment(rating: Option<u8>) -> (i32, i32) {
    match rating {
        Some(5) => (-1, 0),
        Some(2) => (0, 1),
        Some(1) => (0, 2),
        Some(0) | None => (0, 3),
        Some(_) => (0, 0),
    }
}

/// Work out a rider's points in a race, with the parts that make them up.
///
/// Riders missing from the results score 0 whatever their rating. The total
/// is not clamped.
pub fn explain_points(
    rider: &str,
    race: &Race,
    ratings: &RatingTable,
    config: &ScoringConfig,
) -> PointsBreakdown {
    let rating = ratings.get(rider);

    let Some(position) = race.results.iter().position(|r| r == rider) else {
        return PointsBreakdown {
            position: None,
            base: 0,
            rating,
            bonus: 0,
            nationality: false,
            total: 0,
        };
    };

    let mut base = config.position_points().get(position).copied().unwrap_or(0);
    let (penalty, mut bonus) = rating_adjustment(rating);
    base += penalty;

    let nationality = rider.contains(config.nationality_marker());
    if nationality {
        bonus += config.nationality_bonus();
    }

    PointsBreakdown {
        position: Some(position),
        base,
        rating,
        bonus,
        nationality,
        total: base + bonus,
    }
}

/// Points for picking `rider` in `race` under the given rules.
pub fn calculate_points(
    rider: &str,
    race: &Race,
    ratings: &RatingTable,
    config: &ScoringConfig,
) -> i32 {
    explain_points(rider, race, ratings, config).total
}

/// Points under the default rules.
pub fn points(rider: &str, race: &Race, ratings: &RatingTable) -> i32 {
    calculate_points(rider, race, ratings, &ScoringConfig::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn race_with(results: &[&str]) -> Race {
        let mut race = Race::new("Test Race", "2025-04-06T10:00");
        race.record_results(results.iter().copied());
        race
    }

    fn ratings(entries: &[(&str, u8)]) -> RatingTable {
        let mut table = RatingTable::new();
        for (rider, stars) in entries {
            table.set(*rider, *stars);
        }
        table
    }

    #[test]
    fn test_winner_five_stars() {
        let race = race_with(&["X"]);
        assert_eq!(points("X", &race, &ratings(&[("X", 5)])), 5);
    }

    #[test]
    fn test_third_place_one_star_danish() {
        let race = race_with(&["A", "B", "Mads Pedersen (DK)"]);
        let table = ratings(&[("Mads Pedersen (DK)", 1)]);
        assert_eq!(points("Mads Pedersen (DK)", &race, &table), 6);

        let breakdown = explain_points("Mads Pedersen (DK)", &race, &table, &ScoringConfig::default());
        assert_eq!(breakdown.position, Some(2));
        assert_eq!(breakdown.base, 3);
        assert_eq!(breakdown.bonus, 3);
        assert!(breakdown.nationality);
    }

    #[test]
    fn test_absent_rider_scores_zero() {
        let race = race_with(&["A", "B"]);
        for stars in 0..=5 {
            assert_eq!(points("Z", &race, &ratings(&[("Z", stars)])), 0);
        }
        assert_eq!(points("Z (DK)", &race, &RatingTable::new()), 0);
    }

    #[test]
    fn test_rating_branches() {
        let race = race_with(&["R"]);
        assert_eq!(points("R", &race, &ratings(&[("R", 4)])), 6);
        assert_eq!(points("R", &race, &ratings(&[("R", 3)])), 6);
        assert_eq!(points("R", &race, &ratings(&[("R", 2)])), 7);
        assert_eq!(points("R", &race, &ratings(&[("R", 1)])), 8);
        assert_eq!(points("R", &race, &ratings(&[("R", 0)])), 9);
        assert_eq!(points("R", &race, &RatingTable::new()), 9);
    }

    #[test]
    fn test_beyond_top_five_only_bonus() {
        let race = race_with(&["1", "2", "3", "4", "5", "Sixth"]);
        assert_eq!(points("Sixth", &race, &ratings(&[("Sixth", 3)])), 0);
        assert_eq!(points("Sixth", &race, &RatingTable::new()), 3);
        // 5-star penalty is not clamped
        assert_eq!(points("Sixth", &race, &ratings(&[("Sixth", 5)])), -1);
    }

    #[test]
    fn test_fifth_place_five_stars() {
        let race = race_with(&["1", "2", "3", "4", "Fifth"]);
        assert_eq!(points("Fifth", &race, &ratings(&[("Fifth", 5)])), 0);
    }

    #[test]
    fn test_points_deterministic() {
        let race = race_with(&["A", "B (DK)", "C"]);
        let table = ratings(&[("A", 2), ("B (DK)", 5)]);
        let first: Vec<i32> = ["A", "B (DK)", "C"].iter().map(|r| points(r, &race, &table)).collect();
        let second: Vec<i32> = ["A", "B (DK)", "C"].iter().map(|r| points(r, &race, &table)).collect();
        assert_eq!(first, second);
        assert_eq!(first, vec![7, 4, 6]);
    }

    #[test]
    fn test_custom_config() {
        let race = race_with(&["A", "B [NO]"]);
        let config = ScoringConfig {
            position_points: Some(vec![10, 8]),
            nationality_marker: Some("[NO]".to_string()),
            nationality_bonus: Some(2),
            favorites: None,
        };
        let table = ratings(&[("A", 3), ("B [NO]", 4)]);
        assert_eq!(calculate_points("A", &race, &table, &config), 10);
        assert_eq!(calculate_points("B [NO]", &race, &table, &config), 10);
    }
}
