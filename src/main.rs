use clap::{Parser, Subcommand};
use std::fmt::Display;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use paddock_picks::config::{self, Config};
use paddock_picks::fetch::{fetch_and_score_weekly, fetch_season_standings, score_season};
use paddock_picks::output;
use paddock_picks::predictions::{load_predictions, save_predictions, PredictionStore};
use paddock_picks::scoring::{self, Championship, ScoringMethod};
use paddock_picks::standings::{
    clear_cache, CacheConfig, HttpStandingsProvider, ResponseCache, StandingsProvider,
};

const EXIT_SUCCESS: i32 = 0;
const EXIT_NETWORK: i32 = 2;
const EXIT_CONFIG: i32 = 4;

#[derive(Subcommand, Debug)]
enum Commands {
    /// Rank participants on their season predictions (default if no subcommand)
    Leaderboard {
        /// Rank on one championship instead of the combined total
        #[arg(long, value_enum)]
        championship: Option<Championship>,

        /// Scoring method
        #[arg(long, value_enum, default_value_t = ScoringMethod::Delta)]
        method: ScoringMethod,
    },
    /// Show a participant's prediction slot by slot against the standings
    Detail {
        /// Participant id from the config
        participant: String,

        #[arg(long, value_enum, default_value_t = Championship::Drivers)]
        championship: Championship,
    },
    /// Show current championship standings
    Standings {
        /// Only show one championship
        #[arg(long, value_enum)]
        championship: Option<Championship>,
    },
    /// Save a season prediction, replacing any earlier one
    Predict {
        /// Participant id from the config
        participant: String,

        #[arg(long, value_enum)]
        championship: Championship,

        /// Names in predicted finishing order, first place first
        #[arg(required = true, num_args = 1..)]
        names: Vec<String>,
    },
    /// Rank participants on their weekly top-10 picks
    Weekly {
        /// Only score one round
        #[arg(long)]
        round: Option<u32>,
    },
    /// Save a top-10 pick for a race weekend, replacing any earlier one
    WeeklyPredict {
        /// Participant id from the config
        participant: String,

        /// Round number within the season
        round: u32,

        /// Driver family names in predicted finishing order
        #[arg(required = true, num_args = 1..)]
        names: Vec<String>,
    },
    /// Remove cached API responses
    ClearCache,
}

#[derive(Parser, Debug)]
#[command(name = "paddock-picks")]
#[command(about = "F1 prediction league scoring CLI", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/paddock-picks/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Season to score ("current" or a year); overrides the config
    #[arg(short, long, global = true)]
    season: Option<String>,

    /// Bypass the HTTP response cache
    #[arg(long, global = true)]
    no_cache: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "paddock_picks=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn fail(code: i32, context: &str, error: impl Display) -> ! {
    eprintln!("{}: {}", context, error);
    std::process::exit(code);
}

fn print_errors(heading: &str, errors: &[String]) {
    eprintln!("{}:", heading);
    for error in errors {
        eprintln!("  - {}", error);
    }
}

fn require_participant(config: &Config, participant: &str) {
    if !config.participants.iter().any(|p| p.id == participant) {
        let known: Vec<&str> = config.participants.iter().map(|p| p.id.as_str()).collect();
        eprintln!(
            "Unknown participant '{}'. Configured participants: {}",
            participant,
            known.join(", ")
        );
        std::process::exit(EXIT_CONFIG);
    }
}

fn load_store(path: &std::path::Path) -> PredictionStore {
    match load_predictions(path) {
        Ok(store) => store,
        Err(e) => fail(EXIT_CONFIG, "Predictions error", format!("{:#}", e)),
    }
}

#[tokio::main]
async fn main() {
    // Install rustls crypto provider (required for rustls 0.23+)
    if rustls::crypto::ring::default_provider().install_default().is_err() {
        debug!("rustls crypto provider already installed");
    }

    let cli = Cli::parse();
    init_logging(cli.verbose);

    let command = cli.command.unwrap_or(Commands::Leaderboard {
        championship: None,
        method: ScoringMethod::Delta,
    });
    let start_time = Instant::now();

    // Load config
    let config_path = cli.config.map(PathBuf::from);
    let mut config = match config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => fail(EXIT_CONFIG, "Config error", format!("{:#}", e)),
    };
    if let Some(season) = cli.season {
        config.season = season;
    }

    if let Err(errors) = config::validate_config(&config) {
        print_errors("Config errors", &errors);
        std::process::exit(EXIT_CONFIG);
    }

    debug!(
        participants = config.participants.len(),
        season = %config.season,
        "config loaded"
    );

    let cache_config = match config.api.cache_ttl() {
        Ok(ttl) => CacheConfig::new(!cli.no_cache, ttl),
        Err(e) => fail(EXIT_CONFIG, "Config error", e),
    };

    if let Commands::ClearCache = command {
        match clear_cache(&cache_config.path) {
            Ok(()) => println!("Cleared cache at {}", cache_config.path.display()),
            Err(e) => fail(EXIT_CONFIG, "Failed to clear cache", format!("{:#}", e)),
        }
        std::process::exit(EXIT_SUCCESS);
    }

    let provider = match HttpStandingsProvider::new(&config.api, ResponseCache::new(cache_config)) {
        Ok(p) => p,
        Err(e) => fail(EXIT_NETWORK, "Failed to create HTTP client", format!("{:#}", e)),
    };

    let predictions_path = config::get_predictions_path(&config);
    let use_colors = output::should_use_colors();

    match command {
        Commands::Leaderboard {
            championship,
            method,
        } => {
            let store = load_store(&predictions_path);
            let standings = match fetch_season_standings(&provider, &config.season).await {
                Ok(s) => s,
                Err(e) => fail(EXIT_NETWORK, "Failed to load standings", format!("{:#}", e)),
            };
            if standings.missing_tables(championship) {
                println!("No standings for season {} yet. Nothing to score against.", standings.season);
            } else {
                let board = score_season(&standings, &config.participants, &store, championship, method);
                println!("{}", output::format_leaderboard(&board, championship, use_colors));
            }
        }
        Commands::Detail {
            participant,
            championship,
        } => {
            require_participant(&config, &participant);
            let store = load_store(&predictions_path);
            let standings = match fetch_season_standings(&provider, &config.season).await {
                Ok(s) => s,
                Err(e) => fail(EXIT_NETWORK, "Failed to load standings", format!("{:#}", e)),
            };
            let prediction = store
                .predictions_for(&standings.season, championship)
                .into_iter()
                .find(|p| p.participant_id == participant);

            match prediction {
                Some(prediction) => {
                    let result =
                        scoring::score_prediction(&prediction, standings.table(championship), championship);
                    println!(
                        "{} {} {}: delta {}, correct {}/{}",
                        participant,
                        standings.season,
                        championship,
                        result.delta_score,
                        result.correct_count,
                        prediction.ordered_names.len()
                    );
                    println!(
                        "{}",
                        output::format_details(&result.details, championship, use_colors)
                    );
                }
                None => println!(
                    "{} has no {} prediction for {}.",
                    participant, championship, standings.season
                ),
            }
        }
        Commands::Standings { championship } => {
            let standings = match fetch_season_standings(&provider, &config.season).await {
                Ok(s) => s,
                Err(e) => fail(EXIT_NETWORK, "Failed to load standings", format!("{:#}", e)),
            };
            let selected = match championship {
                Some(c) => vec![c],
                None => vec![Championship::Drivers, Championship::Constructors],
            };
            for (i, championship) in selected.into_iter().enumerate() {
                if i > 0 {
                    println!();
                }
                println!("{} {} standings", standings.season, championship);
                println!(
                    "{}",
                    output::format_standings(standings.table(championship), championship, use_colors)
                );
            }
        }
        Commands::Predict {
            participant,
            championship,
            names,
        } => {
            require_participant(&config, &participant);
            let season = match provider.resolve_season(&config.season).await {
                Ok(s) => s,
                Err(e) => fail(EXIT_NETWORK, "Failed to resolve season", format!("{:#}", e)),
            };
            // Length is checked against the standings when they can be fetched
            let expected_len = match provider.fetch_standings(&season, championship).await {
                Ok(table) => Some(table.len()),
                Err(e) => {
                    warn!(error = %e, "standings unavailable, skipping length check");
                    None
                }
            };
            if let Err(errors) = scoring::validate_prediction(championship, &names, expected_len) {
                print_errors("Prediction errors", &errors);
                std::process::exit(EXIT_CONFIG);
            }

            let mut store = load_store(&predictions_path);
            let count = names.len();
            let replaced = store.set_prediction(&participant, &season, championship, names);
            if let Err(e) = save_predictions(&predictions_path, &store) {
                fail(EXIT_CONFIG, "Failed to save predictions", format!("{:#}", e));
            }
            println!(
                "{} {} {} prediction for {} ({} names)",
                if replaced { "Replaced" } else { "Saved" },
                season,
                championship,
                participant,
                count
            );
        }
        Commands::Weekly { round } => {
            let store = load_store(&predictions_path);
            match fetch_and_score_weekly(&provider, &config.participants, &store, &config.season, round).await {
                Ok((_, board)) => println!("{}", output::format_weekly(&board, use_colors)),
                Err(e) => fail(EXIT_NETWORK, "Failed to load race results", format!("{:#}", e)),
            }
        }
        Commands::WeeklyPredict {
            participant,
            round,
            names,
        } => {
            require_participant(&config, &participant);
            if let Err(errors) = scoring::validate_weekly(round, &names) {
                print_errors("Prediction errors", &errors);
                std::process::exit(EXIT_CONFIG);
            }
            let season = match provider.resolve_season(&config.season).await {
                Ok(s) => s,
                Err(e) => fail(EXIT_NETWORK, "Failed to resolve season", format!("{:#}", e)),
            };

            let mut store = load_store(&predictions_path);
            let replaced = store.set_weekly(&participant, &season, round, names);
            if let Err(e) = save_predictions(&predictions_path, &store) {
                fail(EXIT_CONFIG, "Failed to save predictions", format!("{:#}", e));
            }
            println!(
                "{} round {} pick for {} ({})",
                if replaced { "Replaced" } else { "Saved" },
                round,
                participant,
                season
            );
        }
        Commands::ClearCache => unreachable!("handled before the client is created"),
    }

    debug!(elapsed = ?start_time.elapsed(), "done");
    std::process::exit(EXIT_SUCCESS);
}
