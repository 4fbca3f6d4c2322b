use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::{Path, PathBuf};

use peloton_picks::config::{self, Config};
use peloton_picks::output::{self, PickLine, RaceLine, StandingLine};
use peloton_picks::scoring;
use peloton_picks::season::{self, Season};
use peloton_picks::{order, stderr_buffer};

const EXIT_SUCCESS: i32 = 0;
const EXIT_STORAGE: i32 = 2;
const EXIT_CONFIG: i32 = 4;
const EXIT_USAGE: i32 = 5;

#[derive(Subcommand, Debug)]
enum RaceAction {
    /// List upcoming and previous races (default)
    List,
    /// Add a race to the season
    Add {
        name: String,
        /// Start time, e.g. 2025-03-22T10:00
        date: String,
    },
    /// Import races from the 2025 calendar
    Import {
        /// Import the whole calendar, including races whose deadline has passed
        #[arg(long)]
        full: bool,
    },
    /// Show one race with its picks and points
    Show {
        /// Race number as shown by `races list`
        race: usize,
    },
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Write a default config file
    Init,
    /// Manage the race list
    Races {
        #[command(subcommand)]
        action: Option<RaceAction>,
    },
    /// Generate pick orders for races that don't have one yet
    Order {
        /// Seed for reproducible orders
        #[arg(long)]
        seed: Option<u64>,
        /// Regenerate orders for every race
        #[arg(long)]
        all: bool,
    },
    /// Show how often each participant has picked first
    Starts {
        /// Put everyone back at zero
        #[arg(long)]
        reset: bool,
    },
    /// Rate a rider from 0 to 5 stars
    Rate {
        rider: String,
        #[arg(value_parser = clap::value_parser!(u8).range(0..=5))]
        stars: u8,
    },
    /// List the rating table
    Ratings,
    /// Record a participant's pick for a race
    Pick {
        race: usize,
        participant: String,
        rider: String,
    },
    /// Record a race's finishing order, winner first
    Results {
        race: usize,
        #[arg(required = true, num_args = 1..)]
        riders: Vec<String>,
    },
    /// Auto-pick for participants who missed the deadline
    Autopick {
        /// Race number; defaults to every open race past its deadline
        race: Option<usize>,
    },
    /// Season standings and statistics
    Standings,
}

#[derive(Parser, Debug)]
#[command(name = "peloton-picks")]
#[command(about = "Cycling prediction game: pick orders, auto-picks and standings", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/peloton-picks/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Path to season file (overrides the config)
    #[arg(short, long, global = true)]
    season: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

fn exit_usage(msg: impl std::fmt::Display) -> ! {
    stderr_buffer::flush();
    eprintln!("{}", msg);
    std::process::exit(EXIT_USAGE);
}

fn race_index(season: &Season, number: usize) -> usize {
    if number < 1 || number > season.races.len() {
        exit_usage(format!(
            "Invalid race {}. Must be between 1 and {}.",
            number,
            season.races.len()
        ));
    }
    number - 1
}

fn save_or_exit(path: &Path, season: &Season, verbose: bool) {
    if let Err(e) = season::save_season(path, season) {
        stderr_buffer::flush();
        eprintln!("Season file error: {:#}", e);
        std::process::exit(EXIT_STORAGE);
    }
    if verbose {
        eprintln!("Saved season to {}", path.display());
    }
}

fn run_init(config_path: Option<PathBuf>) -> ! {
    let path = config_path.unwrap_or_else(config::get_config_path);
    match config::write_config(&path, &Config::default()) {
        Ok(()) => {
            println!("Wrote default config to {}", path.display());
            std::process::exit(EXIT_SUCCESS);
        }
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    }
}

fn race_lines<'a>(
    races: Vec<(usize, &'a season::Race)>,
    roster: &'a [season::Participant],
    cutoff: chrono::Duration,
    now: chrono::NaiveDateTime,
) -> Vec<RaceLine<'a>> {
    races
        .into_iter()
        .map(|(idx, race)| RaceLine {
            number: idx + 1,
            race,
            next_picker: race.next_picker(roster),
            countdown: season::format_countdown(race, cutoff, now),
        })
        .collect()
}

fn main() {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Races { action: None });
    let config_path = cli.config.map(PathBuf::from);

    if let Commands::Init = command {
        run_init(config_path);
    }

    let config = match config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    if let Err(errors) = config::validate_config(&config) {
        eprintln!("Config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    // Already validated; the fallback only mirrors the default
    let cutoff = season::parse_cutoff(config.pick_cutoff_str())
        .unwrap_or_else(|_| chrono::Duration::minutes(90));
    let scoring_config = config.scoring.clone().unwrap_or_default();
    let roster = config.roster.clone();

    if cli.verbose {
        eprintln!("Roster: {}", roster.join(", "));
        eprintln!("Pick cutoff: {} before start", config.pick_cutoff_str());
    }

    let season_path = cli
        .season
        .map(PathBuf::from)
        .or_else(|| config.season_file.clone())
        .unwrap_or_else(season::get_season_path);

    // Hold normalization warnings until the command's output is printed
    stderr_buffer::activate();

    let mut season = match season::load_season(&season_path) {
        Ok(s) => s,
        Err(e) => {
            stderr_buffer::flush();
            eprintln!("Season file error: {:#}", e);
            std::process::exit(EXIT_STORAGE);
        }
    };
    stderr_buffer::warn_all(season.normalize(&roster));

    if cli.verbose {
        eprintln!(
            "Loaded {} races and {} ratings from {}",
            season.races.len(),
            season.ratings.len(),
            season_path.display()
        );
    }

    let now = chrono::Local::now().naive_local();
    let use_colors = output::should_use_colors();

    match command {
        Commands::Init => {}
        Commands::Races { action } => match action.unwrap_or(RaceAction::List) {
            RaceAction::List => {
                let (upcoming, previous) = season::split_by_deadline(&season.races, cutoff, now);
                println!("Upcoming races ({}):", upcoming.len());
                let lines = race_lines(upcoming, &roster, cutoff, now);
                println!("{}", output::format_race_list(&lines, use_colors));
                println!();
                println!("Previous races ({}):", previous.len());
                let lines = race_lines(previous, &roster, cutoff, now);
                println!("{}", output::format_race_list(&lines, use_colors));
            }
            RaceAction::Add { name, date } => {
                if season::parse_race_start(&date).is_none() {
                    stderr_buffer::warn(format!(
                        "Could not parse '{}' as a start time; the race will never close",
                        date
                    ));
                }
                season.races.push(season::Race::new(name.clone(), date));
                save_or_exit(&season_path, &season, cli.verbose);
                println!("Added race {}: {}", season.races.len(), name);
            }
            RaceAction::Import { full } => {
                let imported = if full {
                    season::missing_calendar_races(&season.races)
                } else {
                    season::upcoming_calendar_races(&season.races, cutoff, now)
                };
                let count = imported.len();
                season.races.extend(imported);
                save_or_exit(&season_path, &season, cli.verbose);
                println!("Imported {} races", count);
            }
            RaceAction::Show { race } => {
                let idx = race_index(&season, race);
                let race = &season.races[idx];
                let order = race.pick_order.as_deref().unwrap_or(&roster);
                let picks: Vec<PickLine> = order
                    .iter()
                    .map(|participant| {
                        let pick = race.picks.get(participant);
                        PickLine {
                            participant,
                            rider: pick.map(|p| p.rider.as_str()),
                            auto: pick.is_some_and(|p| p.auto),
                            breakdown: pick.filter(|_| race.has_results()).map(|p| {
                                scoring::explain_points(
                                    &p.rider,
                                    race,
                                    &season.ratings,
                                    &scoring_config,
                                )
                            }),
                        }
                    })
                    .collect();
                println!(
                    "{}",
                    output::format_race_detail(race, &picks, cli.verbose, use_colors)
                );
            }
        },
        Commands::Order { seed, all } => {
            let targets: Vec<usize> = season
                .races
                .iter()
                .enumerate()
                .filter(|(_, race)| all || race.pick_order.is_none())
                .map(|(idx, _)| idx)
                .collect();
            let batch: Vec<season::Race> =
                targets.iter().map(|&idx| season.races[idx].clone()).collect();

            let mut rng = match seed {
                Some(s) => StdRng::seed_from_u64(s),
                None => StdRng::from_entropy(),
            };
            let allocation = order::allocate(&roster, &batch, &season.start_counts, &mut rng);

            for (&idx, race) in targets.iter().zip(&allocation.races) {
                season.races[idx].pick_order = race.pick_order.clone();
            }
            season.start_counts = allocation.start_counts;
            save_or_exit(&season_path, &season, cli.verbose);

            println!("{}", output::format_pick_orders(&allocation.races, use_colors));
            println!();
            println!("Starts this season:");
            println!("{}", output::format_start_counts(&roster, &season.start_counts));
        }
        Commands::Starts { reset } => {
            if reset {
                season.reset_start_counts(&roster);
                save_or_exit(&season_path, &season, cli.verbose);
            }
            println!("Starts this season:");
            println!("{}", output::format_start_counts(&roster, &season.start_counts));
        }
        Commands::Rate { rider, stars } => {
            season.ratings.set(rider.clone(), stars);
            save_or_exit(&season_path, &season, cli.verbose);
            println!("{}: {} stars", rider, stars);
        }
        Commands::Ratings => {
            if season.ratings.is_empty() {
                println!("No riders rated yet.");
            }
            for entry in season.ratings.entries() {
                println!("{:>2}*  {}", entry.stars, entry.rider);
            }
        }
        Commands::Pick {
            race,
            participant,
            rider,
        } => {
            let idx = race_index(&season, race);
            if let Err(rejection) =
                season.races[idx].record_pick(&roster, &participant, &rider, &season.ratings)
            {
                exit_usage(format!("Pick refused: {}", rejection));
            }
            let name = season.races[idx].name.clone();
            save_or_exit(&season_path, &season, cli.verbose);
            println!("{} picks {} for {}", participant, rider, name);
        }
        Commands::Results { race, riders } => {
            let idx = race_index(&season, race);
            season.races[idx].record_results(riders);
            save_or_exit(&season_path, &season, cli.verbose);
            println!("Recorded results for {}", season.races[idx].name);
        }
        Commands::Autopick { race } => {
            let targets: Vec<usize> = match race {
                Some(number) => vec![race_index(&season, number)],
                None => season
                    .races
                    .iter()
                    .enumerate()
                    .filter(|(_, r)| !r.is_closed() && season::is_past_deadline(r, cutoff, now))
                    .map(|(idx, _)| idx)
                    .collect(),
            };

            if targets.is_empty() {
                println!("No races waiting for auto-picks.");
            }
            let mut changed = false;
            for idx in targets {
                let before = &season.races[idx];
                if before.is_closed() {
                    println!("{}: auto-picks already done", before.name);
                    continue;
                }
                let filled = scoring::auto_fill(before, &roster, &season.ratings);
                let assigned = filled.picks.len() - before.picks.len();
                let still_missing = scoring::missing_pickers(&filled, &roster);
                println!("{}: auto-picked for {} participant(s)", filled.name, assigned);
                if !still_missing.is_empty() {
                    let names: Vec<&str> = still_missing.iter().map(|p| p.as_str()).collect();
                    stderr_buffer::warn(format!(
                        "{}: ran out of rated riders, no pick for {}",
                        filled.name,
                        names.join(", ")
                    ));
                }
                season.races[idx] = filled;
                changed = true;
            }
            if changed {
                save_or_exit(&season_path, &season, cli.verbose);
            }
        }
        Commands::Standings => {
            let rows = scoring::standings(&roster, &season.races, &season.ratings, &scoring_config);
            let lines: Vec<StandingLine> = rows
                .iter()
                .map(|row| StandingLine {
                    row,
                    stats: scoring::participant_stats(
                        &row.participant,
                        &season.races,
                        &season.ratings,
                        &scoring_config,
                    ),
                })
                .collect();
            let stats = scoring::season_stats(&rows, &season.races, &season.ratings, &scoring_config);

            println!("{}", output::format_standings_table(&lines, use_colors));
            println!();
            println!("{}", output::format_season_stats(&stats, use_colors));
        }
    }

    stderr_buffer::flush();
    std::process::exit(EXIT_SUCCESS);
}
