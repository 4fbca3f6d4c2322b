use owo_colors::OwoColorize;
use std::io::IsTerminal;
use terminal_size::{terminal_size, Width};

use crate::scoring::{ParticipantStats, PointsBreakdown, SeasonStats, StandingRow};
use crate::season::{Participant, Race, StartCounts};

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate text to fit available width, accounting for Unicode
fn truncate(text: &str, max_width: usize) -> String {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= max_width {
        text.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

/// A standings row with the participant's pick statistics, for display
pub struct StandingLine<'a> {
    pub row: &'a StandingRow,
    pub stats: ParticipantStats,
}

/// Format the season table: rank, name, points (races), average, favourites, wonderkids
pub fn format_standings_table(lines: &[StandingLine], use_colors: bool) -> String {
    if lines.is_empty() {
        return "No participants on the roster.".to_string();
    }

    let name_width = lines
        .iter()
        .map(|l| l.row.participant.chars().count())
        .max()
        .unwrap_or(0)
        .max(4);

    let header = format!(
        "{:>3}  {:<name_width$}  {:>6}  {:>7}  {:>4}  {:>4}  {:>2}",
        "#", "Name", "Points", "Races", "Avg", "Fav", "5*",
        name_width = name_width
    );

    let body = lines.iter().enumerate().map(|(idx, line)| {
        let row = line.row;
        let rank = format!("{:>2}.", idx + 1);
        let name = format!("{:<width$}", row.participant, width = name_width);
        let points = format!("{:>6}", row.total_points);
        let rest = format!(
            "  {:>7}  {:>4}  {:>4}  {:>2}",
            format!("({})", row.races_scored),
            row.formatted_average(),
            line.stats.favorites,
            line.stats.wonderkids
        );

        if use_colors {
            let name = if idx == 0 {
                name.yellow().bold().to_string()
            } else {
                name.bold().to_string()
            };
            format!("{}  {}  {}{}", rank.dimmed(), name, points.bold(), rest)
        } else {
            format!("{}  {}  {}{}", rank, name, points, rest)
        }
    });

    let header = if use_colors {
        header.dimmed().to_string()
    } else {
        header
    };
    std::iter::once(header)
        .chain(body)
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn format_season_stats(stats: &SeasonStats, use_colors: bool) -> String {
    let rows = [
        ("Races scored", stats.scored_races.to_string()),
        ("Active participants", stats.active_participants.to_string()),
        ("Best single pick", stats.max_pick_points.to_string()),
        ("Best average", format!("{:.1}", stats.best_average)),
    ];
    rows.iter()
        .map(|(label, value)| {
            if use_colors {
                format!("{:<20} {}", label.dimmed(), value.bold())
            } else {
                format!("{:<20} {}", label, value)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// One block per race: "Round N: name • date", the order, and the starter
pub fn format_pick_orders(races: &[Race], use_colors: bool) -> String {
    if races.is_empty() {
        return "No rounds generated yet.".to_string();
    }

    races
        .iter()
        .enumerate()
        .map(|(idx, race)| {
            let title = format!("Round {}: {} • {}", idx + 1, race.name, race.date);
            let order = race.pick_order.as_deref().unwrap_or_default();
            let order_line = format!("  Order: {}", order.join(" → "));
            let starter = order.first().map(String::as_str).unwrap_or("-");
            if use_colors {
                format!("{}\n{}\n  Starter: {}", title.bold(), order_line, starter.green())
            } else {
                format!("{}\n{}\n  Starter: {}", title, order_line, starter)
            }
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

pub fn format_start_counts(roster: &[Participant], counts: &StartCounts) -> String {
    roster
        .iter()
        .map(|p| {
            let c = counts.get(p).copied().unwrap_or(0);
            format!("  {}: {} start{}", p, c, if c == 1 { "" } else { "s" })
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// A race as listed by `races`: its season number, next picker and deadline text
pub struct RaceLine<'a> {
    pub number: usize,
    pub race: &'a Race,
    pub next_picker: Option<&'a str>,
    pub countdown: String,
}

pub fn format_race_list(lines: &[RaceLine], use_colors: bool) -> String {
    if lines.is_empty() {
        return "  (none)".to_string();
    }

    let term_width = get_terminal_width();
    lines
        .iter()
        .map(|line| {
            let number = format!("{:>3}.", line.number);
            let next = line.next_picker.unwrap_or("everyone has picked");
            let status = if line.race.has_results() {
                "results in"
            } else if line.race.is_closed() {
                "auto-picked"
            } else {
                "open"
            };
            let suffix = format!("  next: {}  deadline: {}  [{}]", next, line.countdown, status);

            let name = match term_width {
                Some(width) if width > suffix.chars().count() + 15 => {
                    truncate(&line.race.name, width - suffix.chars().count() - 6)
                }
                Some(_) => truncate(&line.race.name, 20),
                None => line.race.name.clone(),
            };

            if use_colors {
                format!("{} {}{}", number.dimmed(), name.bold(), suffix)
            } else {
                format!("{} {}{}", number, name, suffix)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// A participant's pick in one race with its points
pub struct PickLine<'a> {
    pub participant: &'a str,
    pub rider: Option<&'a str>,
    pub auto: bool,
    pub breakdown: Option<PointsBreakdown>,
}

fn describe_breakdown(b: &PointsBreakdown) -> String {
    match b.position {
        None => "did not place".to_string(),
        Some(pos) => {
            let rating = b
                .rating
                .map(|s| format!("{}*", s))
                .unwrap_or_else(|| "unrated".to_string());
            let mut text = format!("P{} base {} ({}) bonus {:+}", pos + 1, b.base, rating, b.bonus);
            if b.nationality {
                text.push_str(" incl. nationality");
            }
            text
        }
    }
}

pub fn format_race_detail(race: &Race, picks: &[PickLine], verbose: bool, use_colors: bool) -> String {
    let mut out = Vec::new();
    let title = format!("{} • {}", race.name, race.date);
    out.push(if use_colors {
        title.bold().to_string()
    } else {
        title
    });

    if race.has_results() {
        out.push(format!("  Results: {}", race.results.join(", ")));
    } else {
        out.push("  Results: (not yet)".to_string());
    }

    for line in picks {
        let rider = match line.rider {
            Some(r) if line.auto => format!("{} (auto)", r),
            Some(r) => r.to_string(),
            None => "-".to_string(),
        };
        let mut text = format!("  {:<12} {}", line.participant, rider);
        if let Some(ref b) = line.breakdown {
            let points = format!("{} pts", b.total);
            text.push_str(&format!(
                "  {}",
                if use_colors {
                    points.bold().to_string()
                } else {
                    points
                }
            ));
            if verbose {
                text.push_str(&format!("  [{}]", describe_breakdown(b)));
            }
        }
        out.push(text);
    }

    out.join("\n")
}
