pub mod calendar;
pub mod deadline;
pub mod state;
pub mod storage;
pub mod types;

pub use calendar::{missing_calendar_races, upcoming_calendar_races, CALENDAR_2025};
pub use deadline::{
    format_countdown, is_past_deadline, parse_cutoff, parse_race_start, pick_deadline,
    split_by_deadline, DEFAULT_PICK_CUTOFF,
};
pub use state::{Season, SEASON_VERSION};
pub use storage::{get_season_path, load_season, save_season};
pub use types::{
    zeroed_start_counts, Participant, Pick, PickRejection, PickWindow, Race, RatingEntry,
    RatingTable, StartCounts, DEFAULT_PICK_STARS, MAX_STARS,
};
