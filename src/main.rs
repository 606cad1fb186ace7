use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use poker_ledger::api::state::AppState;
use poker_ledger::calculate::{SortKey, SortOrder};
use poker_ledger::config::AppConfig;
use poker_ledger::models::{Game, GameId, GameType};
use poker_ledger::parse_player_entry;
use poker_ledger::storage::StorageConfig;
use poker_ledger::tracker::SessionTracker;

#[derive(Parser)]
#[command(name = "poker-ledger")]
#[command(about = "Personal poker session tracker")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "./config.toml")]
    config: String,

    /// Data directory path (overrides the config file)
    #[arg(long)]
    data_dir: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the API server
    Serve {
        /// Bind address
        #[arg(long)]
        host: Option<String>,

        /// Port number
        #[arg(long)]
        port: Option<u16>,
    },

    /// Record a game
    Add {
        /// Game type: "cash" or "tournament"
        #[arg(long, default_value = "cash")]
        game_type: String,

        /// Player result as NAME=BALANCE (repeatable)
        #[arg(long = "player", required = true)]
        players: Vec<String>,
    },

    /// List recorded games
    List {
        /// Restrict to "cash" or "tournament"
        #[arg(long)]
        filter: Option<String>,
    },

    /// Show one game's details
    Show { id: String },

    /// Delete a game by id
    Delete { id: String },

    /// Show the player roster
    Roster {
        /// Sort column: "name", "games" or "balance"
        #[arg(long, default_value = "balance")]
        sort: String,

        /// Sort order: "asc" or "desc"
        #[arg(long, default_value = "desc")]
        order: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config_path = PathBuf::from(&cli.config);
    let config = if config_path.exists() {
        AppConfig::from_file(&config_path)
            .with_context(|| format!("loading config from {:?}", config_path))?
    } else {
        AppConfig::default()
    };

    let data_dir = cli
        .data_dir
        .map(PathBuf::from)
        .unwrap_or_else(|| config.data_dir.clone());
    let storage = StorageConfig::new(data_dir);
    let currency = config.currency.clone();

    match cli.command {
        Commands::Serve { host, port } => {
            let data_dir = storage.data_dir.clone();
            let tracker = SessionTracker::load(storage);
            tracing::info!("Loaded {} games from {:?}", tracker.game_count(), data_dir);

            let state = AppState::new(tracker);
            let app = poker_ledger::api::build_router(state);

            let host = host.unwrap_or(config.server.host);
            let port = port.unwrap_or(config.server.port);
            let addr = format!("{}:{}", host, port);
            let listener = tokio::net::TcpListener::bind(&addr).await?;
            tracing::info!("Listening on http://{}", addr);
            axum::serve(listener, app).await?;
        }
        Commands::Add { game_type, players } => {
            let Some(game_type) = GameType::parse(&game_type) else {
                bail!("unknown game type {:?} (use \"cash\" or \"tournament\")", game_type);
            };

            let mut results = Vec::new();
            for spec in &players {
                match parse_player_entry(spec) {
                    Some(entry) => results.push(entry),
                    None => bail!("invalid player spec {:?} (expected NAME=BALANCE)", spec),
                }
            }

            let mut tracker = SessionTracker::load(storage);
            let game = Game::new(game_type, results);
            match tracker.add_or_update_game(game) {
                Ok(id) => {
                    let stored = tracker.game(&id).map(|g| g.total_value).unwrap_or(0.0);
                    println!("Recorded game {}", id);
                    println!("Total value: {} {}", stored, currency);
                }
                Err(e) => bail!("game rejected: {}", e),
            }
        }
        Commands::List { filter } => {
            let filter = match filter.as_deref() {
                None => None,
                Some(s) if s.eq_ignore_ascii_case("all") => None,
                Some(s) => match GameType::parse(s) {
                    Some(t) => Some(t),
                    None => bail!("unknown filter {:?}", s),
                },
            };

            let tracker = SessionTracker::load(storage);
            let games = tracker.list_games(filter);
            if games.is_empty() {
                println!("No games recorded.");
            } else {
                for game in &games {
                    println!(
                        "{}  {}  {} players  total {} {}  [{}]",
                        game.date,
                        game.game_type.label(),
                        game.players.len(),
                        game.total_value,
                        currency,
                        game.id,
                    );
                }
            }
        }
        Commands::Show { id } => {
            let tracker = SessionTracker::load(storage);
            match tracker.game(&GameId::from(id.as_str())) {
                Some(game) => {
                    println!("{}", game.game_type.label());
                    println!("{}", game.date);
                    println!("Total value: {} {}", game.total_value, currency);
                    println!("\nPlayers:");
                    for p in &game.players {
                        println!("  {:<20} {:>10.2} {}", p.name, p.balance, currency);
                    }
                }
                None => bail!("no game with id {}", id),
            }
        }
        Commands::Delete { id } => {
            let mut tracker = SessionTracker::load(storage);
            if tracker.delete_game(&GameId::from(id.as_str())) {
                println!("Deleted game {}", id);
            } else {
                bail!("no game with id {}", id);
            }
        }
        Commands::Roster { sort, order } => {
            let Some(key) = SortKey::parse(&sort) else {
                bail!("unknown sort column {:?}", sort);
            };
            let Some(order) = SortOrder::parse(&order) else {
                bail!("unknown sort order {:?}", order);
            };

            let tracker = SessionTracker::load(storage);
            let roster = tracker.roster(key, order);
            if roster.is_empty() {
                println!("No players yet.");
            } else {
                println!("{:<20} {:>6} {:>12}", "Name", "Games", "Balance");
                for player in &roster {
                    println!(
                        "{:<20} {:>6} {:>9.2} {}",
                        player.name, player.games, player.balance, currency
                    );
                }
            }
        }
    }

    Ok(())
}
