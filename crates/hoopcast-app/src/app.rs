// Run orchestration: open the configured sources, fetch the injury snapshot
// once, and project each requested matchup against it.

use std::fmt::Write as _;

use anyhow::Context;
use chrono::NaiveDate;
use hoopcast_core::injury::InjuryReport;
use hoopcast_core::roster::{Roster, Strength};
use hoopcast_core::season::SeasonId;
use hoopcast_core::sources::{load_injury_report, InjurySource};
use hoopcast_core::teams;
use hoopcast_core::{GameSimulator, ProjectedGame, SimulationError};
use tracing::info;

use crate::config::Config;
use crate::sources::{self, CsvRosterSource, CsvSeasonStats};

/// A home/away pairing of team codes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matchup {
    pub home: String,
    pub away: String,
}

impl Matchup {
    pub fn new(home: impl Into<String>, away: impl Into<String>) -> Self {
        Self {
            home: home.into(),
            away: away.into(),
        }
    }
}

/// All collaborators for one run.
pub struct Sources {
    pub injuries: Box<dyn InjurySource>,
    pub rosters: CsvRosterSource,
    pub stats: CsvSeasonStats,
}

impl Sources {
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let injuries = sources::injury_source(config).context("failed to set up injury source")?;

        let roster_path = config.resolve(&config.data.rosters);
        let rosters = CsvRosterSource::from_path(&roster_path)
            .with_context(|| format!("failed to load rosters from {}", roster_path.display()))?;

        let stats_path = config.resolve(&config.data.season_stats);
        let stats = CsvSeasonStats::from_path(&stats_path)
            .with_context(|| format!("failed to load season stats from {}", stats_path.display()))?;

        Ok(Self {
            injuries,
            rosters,
            stats,
        })
    }
}

/// Check every team code against the registry without touching any source.
pub fn validate_matchups(matchups: &[Matchup]) -> Result<(), SimulationError> {
    for matchup in matchups {
        teams::lookup(&matchup.home)?;
        teams::lookup(&matchup.away)?;
    }
    Ok(())
}

/// Project every matchup against a single injury snapshot taken at the start
/// of the run. Stops at the first fatal error (unknown team, missing roster);
/// unknown codes are rejected before the injury feed is fetched.
pub async fn project_slate(
    config: &Config,
    sources: &Sources,
    matchups: &[Matchup],
    today: NaiveDate,
) -> anyhow::Result<Vec<ProjectedGame>> {
    validate_matchups(matchups)?;

    let season = config.season_for(today);
    let report = load_injury_report(
        sources.injuries.as_ref(),
        config.injury_year_for(today),
    )
    .await;
    info!("Projecting {} game(s) for season {}", matchups.len(), season);

    let mut games = Vec::with_capacity(matchups.len());
    for matchup in matchups {
        games.push(project_matchup(sources, matchup, &season, &report).await?);
    }
    Ok(games)
}

async fn project_matchup(
    sources: &Sources,
    matchup: &Matchup,
    season: &SeasonId,
    report: &InjuryReport,
) -> anyhow::Result<ProjectedGame> {
    let simulator = GameSimulator::create(
        &matchup.home,
        &matchup.away,
        season.clone(),
        report,
        &sources.rosters,
    )
    .await
    .with_context(|| format!("failed to set up {} vs {}", matchup.home, matchup.away))?;

    Ok(simulator.play_with_rosters(&sources.stats).await)
}

/// Text printed for one game. With `json` the result (or, with `breakdown`
/// too, the whole projected game) is printed as one JSON line.
pub fn render_game(game: &ProjectedGame, json: bool, breakdown: bool) -> anyhow::Result<String> {
    let out = match (json, breakdown) {
        (true, true) => format!("{}\n", serde_json::to_string(game)?),
        (true, false) => format!("{}\n", serde_json::to_string(&game.result)?),
        (false, true) => format!(
            "{}\n{}{}",
            game.result,
            format_breakdown(&game.home),
            format_breakdown(&game.away)
        ),
        (false, false) => format!("{}\n", game.result),
    };
    Ok(out)
}

/// Per-player table: name, availability, season minutes, projected points.
pub fn format_breakdown(roster: &Roster) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} ({})", roster.team.name, roster.team.code);
    for p in &roster.players {
        let status = match (p.strength, p.trimmed) {
            (Strength::Out, true) => "DNP",
            (Strength::Out, false) => "OUT",
            (Strength::Limited, _) => "DTD",
            (Strength::Full, _) => "",
        };
        let _ = writeln!(
            out,
            "  {:<26} {:>3} {:>7.0} min {:>5.1} pts",
            p.player_name, status, p.minutes, p.points
        );
    }
    let _ = writeln!(
        out,
        "  {:<26} {:>3} {:>11} {:>5.1} pts",
        "Total",
        "",
        "",
        roster.projected_points()
    );
    out
}
