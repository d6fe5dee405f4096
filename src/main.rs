use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use league_dashboard::api::state::AppState;
use league_dashboard::calculate::{
    build_standings, compute_awards_with, filter_and_sort, upcoming_matches, LeaderboardQuery,
    PositionFilter, SortDirection, SortField,
};
use league_dashboard::config::AppConfig;
use league_dashboard::models::{AwardCategory, TeamId};
use league_dashboard::source::{create_source, Dataset, RowSource, SourceConfig};
use league_dashboard::storage::{EntityType, JsonlWriter};

#[derive(Parser)]
#[command(name = "league-dashboard")]
#[command(about = "Standings, awards races and player leaderboards for an esports league")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "./config.toml")]
    config: PathBuf,

    /// Data directory path (overrides the config file)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,

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

    /// Print team standings
    Standings {
        /// Only the top N teams
        #[arg(long)]
        limit: Option<usize>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Print the awards races
    Awards {
        #[arg(long)]
        json: bool,
    },

    /// Print the player leaderboard
    Leaderboard {
        /// Gamertag or team name substring
        #[arg(long, default_value = "")]
        search: String,

        /// Position, or "all"
        #[arg(long, default_value = "all")]
        position: String,

        /// rank, name, team, ppg, rpg, apg, spg, bpg, fg, threePt, ft
        #[arg(long)]
        sort: Option<SortField>,

        /// asc or desc
        #[arg(long)]
        direction: Option<SortDirection>,

        #[arg(long, default_value = "25")]
        limit: usize,

        #[arg(long)]
        json: bool,
    },

    /// Show matches still to be played
    Upcoming {
        #[arg(long, default_value = "10")]
        limit: usize,
    },

    /// Copy raw rows from the hosted database into the data directory
    Import,
}

fn load_config(cli: &Cli) -> Result<AppConfig> {
    let mut config = if cli.config.exists() {
        AppConfig::from_file(&cli.config)
            .with_context(|| format!("loading {}", cli.config.display()))?
    } else {
        AppConfig::default()
    };

    if let Some(ref data_dir) = cli.data_dir {
        config.data_dir = data_dir.clone();
    }
    if let Some(ref level) = cli.log_level {
        config.log_level = level.clone();
    }
    Ok(config)
}

fn init_tracing(level: &str, json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    let json_layer = json.then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr)
    });
    let text_layer =
        (!json).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    tracing_subscriber::registry()
        .with(filter)
        .with(json_layer)
        .with(text_layer)
        .init();
}

async fn load_dataset(config: &AppConfig) -> Result<Dataset> {
    let source = create_source(&config.source, &config.storage())?;
    Ok(Dataset::load(source.as_ref()).await?)
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;

    init_tracing(&config.log_level, cli.json_logs);

    tracing::info!("Starting league-dashboard v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Commands::Serve { host, port } => {
            let host = host.unwrap_or_else(|| config.server.host.clone());
            let port = port.unwrap_or(config.server.port);

            let source = create_source(&config.source, &config.storage())?;
            tracing::info!("Serving rows from the {} source", source.name());

            let state = AppState::new(source, config);
            let app = league_dashboard::api::build_router(state);
            let addr = format!("{}:{}", host, port);
            let listener = tokio::net::TcpListener::bind(&addr).await?;
            tracing::info!("Dashboard API: http://{}/api", addr);
            axum::serve(listener, app).await?;
        }
        Commands::Standings { limit, json } => {
            let dataset = load_dataset(&config).await?;
            let mut standings = build_standings(&dataset.teams, &dataset.matches);
            if let Some(limit) = limit {
                standings.truncate(limit);
            }

            if json {
                return print_json(&standings);
            }

            println!(
                "{:>3}  {:<28} {:>3} {:>3} {:>3} {:>6}  {:>5} {:>5} {:>6}",
                "#", "Team", "GP", "W", "L", "Win%", "PF", "PA", "Diff"
            );
            for (idx, s) in standings.iter().enumerate() {
                println!(
                    "{:>3}  {:<28} {:>3} {:>3} {:>3} {:>5.1}%  {:>5} {:>5} {:>+6}",
                    idx + 1,
                    s.team.name,
                    s.record.games_played,
                    s.record.wins,
                    s.record.losses,
                    s.record.win_rate() * 100.0,
                    s.record.points_for,
                    s.record.points_against,
                    s.record.points_differential
                );
            }
        }
        Commands::Awards { json } => {
            let dataset = load_dataset(&config).await?;
            let awards = compute_awards_with(&dataset.players, &config.awards);

            if json {
                return print_json(&awards);
            }

            for category in AwardCategory::ALL {
                println!("\n{}", category.title());
                let race = awards.race(category);
                if race.is_empty() {
                    println!("  (no eligible players)");
                }
                for (idx, candidate) in race.iter().enumerate() {
                    println!(
                        "  {}. {:<20} {:<24} {:>7.2}",
                        idx + 1,
                        candidate.player.gamertag,
                        candidate.player.team_name,
                        candidate.rating()
                    );
                }
            }
        }
        Commands::Leaderboard {
            search,
            position,
            sort,
            direction,
            limit,
            json,
        } => {
            let dataset = load_dataset(&config).await?;
            let query = LeaderboardQuery {
                search_term: search,
                position_filter: position.parse().unwrap_or(PositionFilter::All),
                sort_field: sort.unwrap_or(config.leaderboard.default_sort),
                sort_direction: direction.unwrap_or(config.leaderboard.default_direction),
            };
            let mut rows = filter_and_sort(&dataset.players, &query);
            rows.truncate(limit);

            if json {
                return print_json(&rows);
            }

            println!(
                "{:<20} {:<24} {:<4} {:>5} {:>5} {:>5} {:>5} {:>5} {:>3}",
                "Player", "Team", "Pos", "PPG", "RPG", "APG", "SPG", "BPG", "GP"
            );
            for p in rows {
                println!(
                    "{:<20} {:<24} {:<4} {:>5.1} {:>5.1} {:>5.1} {:>5.1} {:>5.1} {:>3}",
                    p.gamertag,
                    p.team_name,
                    p.position.as_deref().unwrap_or("-"),
                    p.points_per_game,
                    p.rebounds_per_game,
                    p.assists_per_game,
                    p.steals_per_game,
                    p.blocks_per_game,
                    p.games_played
                );
            }
        }
        Commands::Upcoming { limit } => {
            let dataset = load_dataset(&config).await?;
            let name = |id: &Option<TeamId>| {
                id.as_ref()
                    .and_then(|id| dataset.team(id))
                    .map(|t| t.name.as_str())
                    .unwrap_or("TBD")
            };

            for m in upcoming_matches(&dataset.matches, Utc::now()).into_iter().take(limit) {
                let when = m
                    .played_at
                    .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
                    .unwrap_or_else(|| "unscheduled".to_string());
                println!(
                    "{:<17} {} vs {}{}",
                    when,
                    name(&m.team_a_id),
                    name(&m.team_b_id),
                    m.stage.as_deref().map(|s| format!(" ({})", s)).unwrap_or_default()
                );
            }
        }
        Commands::Import => {
            if config.source == SourceConfig::Jsonl {
                bail!("import needs a [source] section with kind = \"rest\"");
            }
            let source = create_source(&config.source, &config.storage())?;
            import(source, &config).await?;
        }
    }

    Ok(())
}

async fn import(source: Arc<dyn RowSource>, config: &AppConfig) -> Result<()> {
    let storage = config.storage();
    let (teams, matches, players) =
        tokio::try_join!(source.teams(), source.matches(), source.players())?;

    for entity in EntityType::ALL {
        let written = match entity {
            EntityType::Team => JsonlWriter::for_entity(&storage, entity).write_all(&teams)?,
            EntityType::Match => JsonlWriter::for_entity(&storage, entity).write_all(&matches)?,
            EntityType::Player => JsonlWriter::for_entity(&storage, entity).write_all(&players)?,
        };
        println!("{:<14} {} rows", entity.filename(), written);
    }

    tracing::info!("Import into {} complete", storage.data_dir.display());
    Ok(())
}
