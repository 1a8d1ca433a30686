// File-backed data sources: injury rows, rosters, and season stats as CSV.
//
// Malformed rows are skipped with a warning; only an unreadable file is an
// error.

use std::collections::HashMap;
use std::io::Read;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use hoopcast_core::injury::RawInjuryRow;
use hoopcast_core::roster::RosterRow;
use hoopcast_core::season::SeasonId;
use hoopcast_core::sources::{InjurySource, RosterSource, SeasonStatsSource};
use hoopcast_core::stats::{PlayerId, SeasonLine, SeasonStats};
use hoopcast_core::teams::{self, Team};
use hoopcast_core::SimulationError;
use serde::Deserialize;
use tracing::{debug, warn};

use super::SourceError;

// ---------------------------------------------------------------------------
// Raw CSV serde structs (private)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct RawRosterRow {
    team: String,
    player_id: u64,
    player: String,
}

#[derive(Debug, Deserialize)]
struct RawStatRow {
    player_id: u64,
    season: String,
    min: f64,
    pts: f64,
}

// ---------------------------------------------------------------------------
// Reader-based loaders
// ---------------------------------------------------------------------------

pub(crate) fn load_injuries_from_reader<R: Read>(rdr: R) -> Result<Vec<RawInjuryRow>, csv::Error> {
    let mut reader = csv::Reader::from_reader(rdr);
    let mut rows = Vec::new();
    for result in reader.deserialize::<RawInjuryRow>() {
        match result {
            Ok(row) => rows.push(row),
            Err(e) => warn!("skipping malformed injury row: {}", e),
        }
    }
    Ok(rows)
}

/// Rosters grouped by team code, preserving file order within each team.
fn load_rosters_from_reader<R: Read>(
    rdr: R,
) -> Result<HashMap<&'static str, Vec<RosterRow>>, csv::Error> {
    let mut reader = csv::Reader::from_reader(rdr);
    let mut rosters: HashMap<&'static str, Vec<RosterRow>> = HashMap::new();
    for result in reader.deserialize::<RawRosterRow>() {
        let raw = match result {
            Ok(raw) => raw,
            Err(e) => {
                warn!("skipping malformed roster row: {}", e);
                continue;
            }
        };
        let Ok(team) = teams::lookup(&raw.team) else {
            warn!(
                "skipping roster row for '{}': unknown team '{}'",
                raw.player.trim(),
                raw.team
            );
            continue;
        };
        rosters.entry(team.code).or_default().push(RosterRow {
            player_id: PlayerId(raw.player_id),
            player_name: raw.player.trim().to_string(),
        });
    }
    Ok(rosters)
}

fn load_season_stats_from_reader<R: Read>(rdr: R) -> Result<SeasonStats, csv::Error> {
    let mut reader = csv::Reader::from_reader(rdr);
    let mut stats = SeasonStats::new();
    for result in reader.deserialize::<RawStatRow>() {
        let raw = match result {
            Ok(raw) => raw,
            Err(e) => {
                warn!("skipping malformed stats row: {}", e);
                continue;
            }
        };
        let season = match raw.season.parse::<SeasonId>() {
            Ok(season) => season,
            Err(e) => {
                warn!("skipping stats row for player {}: {}", raw.player_id, e);
                continue;
            }
        };
        if !(raw.min.is_finite() && raw.pts.is_finite()) || raw.min < 0.0 || raw.pts < 0.0 {
            warn!(
                "skipping stats row for player {}: MIN/PTS must be finite and non-negative",
                raw.player_id
            );
            continue;
        }

        let player = PlayerId(raw.player_id);
        if stats.get(player, &season).is_some() {
            warn!(
                "duplicate stats row for player {} in {}, keeping the first",
                player, season
            );
            continue;
        }
        stats.insert(
            player,
            season,
            SeasonLine {
                minutes: raw.min,
                points_per_game: raw.pts,
            },
        );
    }
    Ok(stats)
}

fn open(path: &Path) -> Result<std::fs::File, SourceError> {
    std::fs::File::open(path).map_err(|e| SourceError::Io {
        path: path.display().to_string(),
        source: e,
    })
}

fn csv_error(path: &Path) -> impl FnOnce(csv::Error) -> SourceError + '_ {
    move |e| SourceError::Csv {
        path: path.display().to_string(),
        source: e,
    }
}

// ---------------------------------------------------------------------------
// Sources
// ---------------------------------------------------------------------------

/// Injury rows read from a CSV file (`name,status,date`) on every fetch.
#[derive(Debug, Clone)]
pub struct CsvInjurySource {
    path: PathBuf,
}

impl CsvInjurySource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn load(&self) -> Result<Vec<RawInjuryRow>, SourceError> {
        load_injuries_from_reader(open(&self.path)?).map_err(csv_error(&self.path))
    }
}

#[async_trait]
impl InjurySource for CsvInjurySource {
    async fn fetch_injuries(&self) -> Result<Vec<RawInjuryRow>, SimulationError> {
        Ok(self.load()?)
    }
}

/// Rosters loaded once from a CSV file (`team,player_id,player`).
#[derive(Debug, Clone, Default)]
pub struct CsvRosterSource {
    rosters: HashMap<&'static str, Vec<RosterRow>>,
}

impl CsvRosterSource {
    pub fn from_path(path: &Path) -> Result<Self, SourceError> {
        let rosters = load_rosters_from_reader(open(path)?).map_err(csv_error(path))?;
        debug!("loaded rosters for {} teams from {}", rosters.len(), path.display());
        Ok(Self { rosters })
    }

    pub fn from_reader<R: Read>(rdr: R) -> Result<Self, csv::Error> {
        Ok(Self {
            rosters: load_rosters_from_reader(rdr)?,
        })
    }

    pub fn team_count(&self) -> usize {
        self.rosters.len()
    }
}

#[async_trait]
impl RosterSource for CsvRosterSource {
    async fn fetch_roster(&self, team: &Team) -> Result<Vec<RosterRow>, SimulationError> {
        self.rosters.get(team.code).cloned().ok_or_else(|| {
            SimulationError::data_source("rosters", format!("no roster rows for {}", team.code))
        })
    }
}

/// Season lines loaded once from a CSV file (`player_id,season,min,pts`).
#[derive(Debug, Clone, Default)]
pub struct CsvSeasonStats {
    stats: SeasonStats,
}

impl CsvSeasonStats {
    pub fn from_path(path: &Path) -> Result<Self, SourceError> {
        let stats = load_season_stats_from_reader(open(path)?).map_err(csv_error(path))?;
        debug!("loaded {} season lines from {}", stats.len(), path.display());
        Ok(Self { stats })
    }

    pub fn from_reader<R: Read>(rdr: R) -> Result<Self, csv::Error> {
        Ok(Self {
            stats: load_season_stats_from_reader(rdr)?,
        })
    }
}

#[async_trait]
impl SeasonStatsSource for CsvSeasonStats {
    async fn fetch_season_line(
        &self,
        player: PlayerId,
        season: &SeasonId,
    ) -> Result<Option<SeasonLine>, SimulationError> {
        Ok(self.stats.get(player, season).copied())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
