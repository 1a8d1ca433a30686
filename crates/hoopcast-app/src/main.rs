// hoopcast entry point.
//
// Startup sequence:
// 1. Parse arguments and validate team codes, initialize tracing (stderr;
//    stdout carries results)
// 2. Load config
// 3. Open data sources
// 4. Fetch the injury report once and project every matchup
// 5. Print results

use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::Parser;
use hoopcast_app::app::{self, Matchup, Sources};
use hoopcast_app::config;
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "hoopcast")]
#[command(about = "Project NBA game scores from season stats and today's injury report")]
struct Args {
    /// Team codes as HOME AWAY pairs, e.g. `TOR ATL` or `TOR ATL BOS CLE`
    #[arg(required = true, num_args = 2..)]
    teams: Vec<String>,

    /// Directory containing config/ (and defaults/); defaults to the current directory
    #[arg(long)]
    base_dir: Option<PathBuf>,

    /// Print each result as JSON instead of the summary line
    #[arg(long)]
    json: bool,

    /// Print the per-player breakdown for both teams
    #[arg(long)]
    breakdown: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Arguments and tracing
    let args = Args::parse();
    init_tracing()?;

    if args.teams.len() % 2 != 0 {
        bail!(
            "expected HOME AWAY pairs, got {} team codes",
            args.teams.len()
        );
    }
    let matchups: Vec<Matchup> = args
        .teams
        .chunks(2)
        .map(|pair| Matchup::new(&pair[0], &pair[1]))
        .collect();

    // Reject unknown team codes before any file or network access.
    app::validate_matchups(&matchups)?;

    // 2. Load config
    let base_dir = match args.base_dir {
        Some(dir) => dir,
        None => std::env::current_dir().context("failed to read current directory")?,
    };
    let config = config::load_config(&base_dir).context("failed to load configuration")?;
    info!("Config loaded from {}", base_dir.display());

    // 3. Open data sources
    let sources = Sources::from_config(&config).context("failed to open data sources")?;
    info!("Rosters loaded for {} teams", sources.rosters.team_count());

    // 4. Project
    let today = chrono::Local::now().date_naive();
    let games = app::project_slate(&config, &sources, &matchups, today).await?;

    // 5. Print
    for game in &games {
        print!("{}", app::render_game(game, args.json, args.breakdown)?);
    }

    Ok(())
}

/// Initialize tracing to stderr, filtered by `RUST_LOG`.
fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("hoopcast=info,hoopcast_core=info,hoopcast_app=info,warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
