pub mod autofill;
pub mod config;
pub mod points;
pub mod standings;
pub mod validation;

pub use autofill::{auto_fill, missing_pickers};
pub use config::*;
pub use points::{calculate_points, explain_points, points, PointsBreakdown};
pub use standings::{
    participant_stats, season_stats, standings, ParticipantStats, SeasonStats, StandingRow,
};
pub use validation::validate_scoring;
