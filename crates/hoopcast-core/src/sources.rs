// External collaborators (injury feed, roster source, season stats) and the
// fail-open helpers that call them.

use async_trait::async_trait;
use futures_util::future::join_all;
use tracing::{info, warn};

use crate::error::SimulationError;
use crate::injury::{InjuryReport, RawInjuryRow};
use crate::roster::{Roster, RosterRow};
use crate::season::SeasonId;
use crate::stats::{PlayerId, SeasonLine, SeasonStats};
use crate::teams::Team;

/// Delivers the raw rows of the current injury page.
#[async_trait]
pub trait InjurySource: Send + Sync {
    async fn fetch_injuries(&self) -> Result<Vec<RawInjuryRow>, SimulationError>;
}

/// Delivers a team's current roster in display order.
#[async_trait]
pub trait RosterSource: Send + Sync {
    async fn fetch_roster(&self, team: &Team) -> Result<Vec<RosterRow>, SimulationError>;
}

/// Per-player season lookups. `Ok(None)` means the player has no record for
/// the season.
#[async_trait]
pub trait SeasonStatsSource: Send + Sync {
    async fn fetch_season_line(
        &self,
        player: PlayerId,
        season: &SeasonId,
    ) -> Result<Option<SeasonLine>, SimulationError>;
}

/// Fetch and build today's injury report. A failing source yields an empty
/// report so every player is treated as healthy.
pub async fn load_injury_report(source: &dyn InjurySource, year: i32) -> InjuryReport {
    match source.fetch_injuries().await {
        Ok(rows) => {
            let total = rows.len();
            let report = InjuryReport::build(rows, year);
            info!(
                "Injury report: {} of {} rows kept (date {:?})",
                report.len(),
                total,
                report.report_date()
            );
            report
        }
        Err(e) => {
            warn!("injury source unavailable, assuming full health: {}", e);
            InjuryReport::empty()
        }
    }
}

/// Look up every roster player's season line concurrently. Failed lookups
/// are logged and left out, so they count as zero minutes and points.
pub async fn gather_season_stats(
    source: &dyn SeasonStatsSource,
    roster: &Roster,
    season: &SeasonId,
) -> SeasonStats {
    let lookups = roster.players.iter().map(|p| async move {
        (p, source.fetch_season_line(p.player_id, season).await)
    });

    let mut stats = SeasonStats::new();
    for (player, result) in join_all(lookups).await {
        match result {
            Ok(Some(line)) => {
                stats.insert(player.player_id, season.clone(), line);
            }
            Ok(None) => {}
            Err(e) => warn!(
                "{}: stat lookup failed for {} ({}), using zero: {}",
                roster.team.code, player.player_name, player.player_id, e
            ),
        }
    }
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::{build_roster, PlayerEntry, Strength};
    use crate::teams;
    use std::collections::HashMap;

    struct FixedInjuries(Vec<RawInjuryRow>);

    #[async_trait]
    impl InjurySource for FixedInjuries {
        async fn fetch_injuries(&self) -> Result<Vec<RawInjuryRow>, SimulationError> {
            Ok(self.0.clone())
        }
    }

    struct BrokenInjuries;

    #[async_trait]
    impl InjurySource for BrokenInjuries {
        async fn fetch_injuries(&self) -> Result<Vec<RawInjuryRow>, SimulationError> {
            Err(SimulationError::data_source("injuries", "connection refused"))
        }
    }

    /// Lines by player id; ids listed in `failing` return an error.
    struct MapStats {
        lines: HashMap<PlayerId, SeasonLine>,
        failing: Vec<PlayerId>,
    }

    #[async_trait]
    impl SeasonStatsSource for MapStats {
        async fn fetch_season_line(
            &self,
            player: PlayerId,
            _season: &SeasonId,
        ) -> Result<Option<SeasonLine>, SimulationError> {
            if self.failing.contains(&player) {
                return Err(SimulationError::data_source("stats", "timeout"));
            }
            Ok(self.lines.get(&player).copied())
        }
    }

    #[tokio::test]
    async fn injury_report_is_built_from_source() {
        let source = FixedInjuries(vec![
            RawInjuryRow::new("A", "Out", "Jan 4"),
            RawInjuryRow::new("B", "Out", "Jan 3"),
        ]);
        let report = load_injury_report(&source, 2017).await;
        assert_eq!(report.len(), 1);
    }

    #[tokio::test]
    async fn broken_injury_source_fails_open() {
        let report = load_injury_report(&BrokenInjuries, 2017).await;
        assert!(report.is_empty());
    }

    #[tokio::test]
    async fn failed_lookup_counts_as_missing() {
        let season = SeasonId::starting(2016);
        let line = SeasonLine {
            minutes: 900.0,
            points_per_game: 12.0,
        };
        let source = MapStats {
            lines: HashMap::from([(PlayerId(1), line), (PlayerId(2), line)]),
            failing: vec![PlayerId(2)],
        };
        let roster = Roster {
            team: *teams::lookup("TOR").unwrap(),
            players: vec![
                PlayerEntry::new(PlayerId(1), "A", Strength::Full),
                PlayerEntry::new(PlayerId(2), "B", Strength::Full),
                PlayerEntry::new(PlayerId(3), "C", Strength::Full),
            ],
        };

        let stats = gather_season_stats(&source, &roster, &season).await;

        assert_eq!(stats.len(), 1);
        assert_eq!(stats.minutes(PlayerId(1), &season), 900.0);
        assert!(stats.get(PlayerId(2), &season).is_none());
        assert!(stats.get(PlayerId(3), &season).is_none());
    }

    #[tokio::test]
    async fn empty_roster_gathers_nothing() {
        let source = MapStats {
            lines: HashMap::new(),
            failing: vec![],
        };
        let roster = build_roster(
            *teams::lookup("ATL").unwrap(),
            vec![],
            &InjuryReport::empty(),
        );
        let stats = gather_season_stats(&source, &roster, &SeasonId::starting(2016)).await;
        assert!(stats.is_empty());
    }
}
