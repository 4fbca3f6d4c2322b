pub mod formatter;

pub use formatter::{
    format_pick_orders, format_race_detail, format_race_list, format_season_stats,
    format_standings_table, format_start_counts, should_use_colors, PickLine, RaceLine,
    StandingLine,
};
