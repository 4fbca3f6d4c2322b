use chrono::{DateTime, Duration, NaiveDateTime};

use super::types::Race;

/// Picks close this long before the race starts.
pub const DEFAULT_PICK_CUTOFF: &str = "90m";

const DATE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S"];

/// A cutoff must leave this start time with a representable deadline.
const REFERENCE_START: &str = "2000-01-01T00:00";

/// Parse a race start time. Accepts "2025-03-22T10:00", seconds, or RFC 3339.
pub fn parse_race_start(date: &str) -> Option<NaiveDateTime> {
    let date = date.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(date, fmt).ok())
        .or_else(|| {
            DateTime::parse_from_rfc3339(date)
                .ok()
                .map(|dt| dt.naive_local())
        })
}

/// Parse a cutoff like "90m" or "1h 30m".
pub fn parse_cutoff(cutoff: &str) -> anyhow::Result<Duration> {
    let std_duration = humantime::parse_duration(cutoff.trim())?;
    let cutoff = Duration::from_std(std_duration)?;

    let representable = parse_race_start(REFERENCE_START)
        .and_then(|start| start.checked_sub_signed(cutoff))
        .is_some();
    if !representable {
        anyhow::bail!("cutoff reaches past the earliest representable date");
    }

    Ok(cutoff)
}

/// Start minus cutoff. `None` for an unparseable date or a deadline out of range.
pub fn pick_deadline(race: &Race, cutoff: Duration) -> Option<NaiveDateTime> {
    parse_race_start(&race.date).and_then(|start| start.checked_sub_signed(cutoff))
}

/// A race with an unparseable date is never past its deadline.
pub fn is_past_deadline(race: &Race, cutoff: Duration, now: NaiveDateTime) -> bool {
    pick_deadline(race, cutoff).is_some_and(|deadline| deadline <= now)
}

/// Human-friendly distance to the pick deadline: "in 3 days", "2 hours ago".
pub fn format_countdown(race: &Race, cutoff: Duration, now: NaiveDateTime) -> String {
    match pick_deadline(race, cutoff) {
        None => "Invalid date".to_string(),
        Some(deadline) => {
            let delta = deadline - now;
            if delta >= Duration::zero() {
                format!("in {}", format_distance(delta))
            } else {
                format!("{} ago", format_distance(-delta))
            }
        }
    }
}

fn format_distance(delta: Duration) -> String {
    let (value, unit) = if delta.num_days() >= 365 {
        (delta.num_days() / 365, "year")
    } else if delta.num_days() >= 30 {
        (delta.num_days() / 30, "month")
    } else if delta.num_days() >= 1 {
        (delta.num_days(), "day")
    } else if delta.num_hours() >= 1 {
        (delta.num_hours(), "hour")
    } else if delta.num_minutes() >= 1 {
        (delta.num_minutes(), "minute")
    } else {
        (delta.num_seconds(), "second")
    };

    if value == 1 {
        format!("1 {}", unit)
    } else {
        format!("{} {}s", value, unit)
    }
}

/// Split races into upcoming (deadline not yet passed, soonest first) and
/// previous (most recent first).
pub fn split_by_deadline(
    races: &[Race],
    cutoff: Duration,
    now: NaiveDateTime,
) -> (Vec<(usize, &Race)>, Vec<(usize, &Race)>) {
    let (mut previous, mut upcoming): (Vec<_>, Vec<_>) = races
        .iter()
        .enumerate()
        .partition(|(_, race)| is_past_deadline(race, cutoff, now));

    upcoming.sort_by_key(|(_, race)| parse_race_start(&race.date));
    previous.sort_by(|a, b| parse_race_start(&b.1.date).cmp(&parse_race_start(&a.1.date)));

    (upcoming, previous)
}
