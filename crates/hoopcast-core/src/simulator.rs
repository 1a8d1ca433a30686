// Game simulator: builds both rosters, runs trim and projection for each side,
// and turns the projected totals into a result.
//
// A simulator is consumed by `play`, so a finished projection can never be
// re-run; build a new simulator for a new projection.

use std::fmt;

use serde::Serialize;
use tracing::{debug, info};

use crate::availability::apply_minutes_and_trim;
use crate::error::SimulationError;
use crate::injury::InjuryReport;
use crate::projection::project_points;
use crate::roster::{build_roster, Roster};
use crate::season::SeasonId;
use crate::sources::{gather_season_stats, RosterSource, SeasonStatsSource};
use crate::teams::{self, Team};

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SimulationPhase {
    Created,
    RostersBuilt,
    MinutesApplied,
    PointsProjected,
    Complete,
}

/// Final projected score of one game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameResult {
    pub home_team: String,
    pub away_team: String,
    pub home_score: u32,
    pub away_score: u32,
    pub winner: String,
}

impl GameResult {
    /// The home team wins ties.
    pub fn from_scores(home: &Team, away: &Team, home_score: u32, away_score: u32) -> Self {
        let winner = if home_score >= away_score {
            home.code
        } else {
            away.code
        };
        Self {
            home_team: home.code.to_string(),
            away_team: away.code.to_string(),
            home_score,
            away_score,
            winner: winner.to_string(),
        }
    }

    pub fn home_won(&self) -> bool {
        self.winner == self.home_team
    }

    pub fn loser(&self) -> &str {
        if self.home_won() {
            &self.away_team
        } else {
            &self.home_team
        }
    }

    pub fn winner_score(&self) -> u32 {
        if self.home_won() {
            self.home_score
        } else {
            self.away_score
        }
    }

    pub fn loser_score(&self) -> u32 {
        if self.home_won() {
            self.away_score
        } else {
            self.home_score
        }
    }
}

/// `<winner> won. Score: <winner> <winner_score> - <loser> <loser_score>`
impl fmt::Display for GameResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{0} won. Score: {0} {1} - {2} {3}",
            self.winner,
            self.winner_score(),
            self.loser(),
            self.loser_score()
        )
    }
}

/// A result together with both final rosters.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectedGame {
    pub result: GameResult,
    pub home: Roster,
    pub away: Roster,
}

// ---------------------------------------------------------------------------
// GameSimulator
// ---------------------------------------------------------------------------

pub struct GameSimulator {
    season: SeasonId,
    home: Roster,
    away: Roster,
    phase: SimulationPhase,
}

impl GameSimulator {
    /// Validate both team codes, then fetch and build both rosters.
    ///
    /// Unknown codes fail before the roster source is touched. A roster
    /// source failure is fatal.
    pub async fn create(
        home_code: &str,
        away_code: &str,
        season: SeasonId,
        report: &InjuryReport,
        rosters: &dyn RosterSource,
    ) -> Result<Self, SimulationError> {
        let home_team = *teams::lookup(home_code)?;
        let away_team = *teams::lookup(away_code)?;
        debug!(
            "{} vs {}: {:?}",
            home_team.code,
            away_team.code,
            SimulationPhase::Created
        );

        let (home_rows, away_rows) = tokio::try_join!(
            rosters.fetch_roster(&home_team),
            rosters.fetch_roster(&away_team)
        )?;

        let mut simulator = Self {
            season,
            home: build_roster(home_team, home_rows, report),
            away: build_roster(away_team, away_rows, report),
            phase: SimulationPhase::Created,
        };
        simulator.advance(SimulationPhase::RostersBuilt);
        info!(
            "Rosters built: {} ({} players), {} ({} players)",
            home_team.code,
            simulator.home.len(),
            away_team.code,
            simulator.away.len()
        );
        Ok(simulator)
    }

    pub fn phase(&self) -> SimulationPhase {
        self.phase
    }

    pub fn season(&self) -> &SeasonId {
        &self.season
    }

    pub fn home(&self) -> &Roster {
        &self.home
    }

    pub fn away(&self) -> &Roster {
        &self.away
    }

    /// Project the game and return only the result.
    pub async fn play(self, stats: &dyn SeasonStatsSource) -> GameResult {
        self.play_with_rosters(stats).await.result
    }

    /// Project the game, returning the result and both final rosters.
    pub async fn play_with_rosters(mut self, stats: &dyn SeasonStatsSource) -> ProjectedGame {
        let (home_stats, away_stats) = tokio::join!(
            gather_season_stats(stats, &self.home, &self.season),
            gather_season_stats(stats, &self.away, &self.season)
        );

        let home_trimmed = apply_minutes_and_trim(&mut self.home, &home_stats, &self.season);
        let away_trimmed = apply_minutes_and_trim(&mut self.away, &away_stats, &self.season);
        debug!(
            "trimmed {} from {}, {} from {}",
            home_trimmed, self.home.team.code, away_trimmed, self.away.team.code
        );
        self.advance(SimulationPhase::MinutesApplied);

        project_points(&mut self.home, &home_stats, &self.season);
        project_points(&mut self.away, &away_stats, &self.season);
        self.advance(SimulationPhase::PointsProjected);

        let result = GameResult::from_scores(
            &self.home.team,
            &self.away.team,
            self.home.total_score(),
            self.away.total_score(),
        );
        self.advance(SimulationPhase::Complete);
        info!("{}", result);

        ProjectedGame {
            result,
            home: self.home,
            away: self.away,
        }
    }

    fn advance(&mut self, next: SimulationPhase) {
        debug_assert!(next > self.phase, "phase {:?} -> {:?}", self.phase, next);
        debug!(
            "{} vs {}: {:?} -> {:?}",
            self.home.team.code, self.away.team.code, self.phase, next
        );
        self.phase = next;
    }
}

/// Build a simulator and play it in one step.
pub async fn simulate_game(
    home_code: &str,
    away_code: &str,
    season: SeasonId,
    report: &InjuryReport,
    rosters: &dyn RosterSource,
    stats: &dyn SeasonStatsSource,
) -> Result<GameResult, SimulationError> {
    let simulator = GameSimulator::create(home_code, away_code, season, report, rosters).await?;
    Ok(simulator.play(stats).await)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::injury::RawInjuryRow;
    use crate::roster::{RosterRow, Strength};
    use crate::stats::{PlayerId, SeasonLine};
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Rosters by team code; counts every fetch.
    #[derive(Default)]
    struct MapRosters {
        rosters: HashMap<&'static str, Vec<RosterRow>>,
        fetches: AtomicUsize,
    }

    impl MapRosters {
        fn with(mut self, code: &'static str, players: &[(u64, &str)]) -> Self {
            let rows = players
                .iter()
                .map(|&(id, name)| RosterRow {
                    player_id: PlayerId(id),
                    player_name: name.to_string(),
                })
                .collect();
            self.rosters.insert(code, rows);
            self
        }
    }

    #[async_trait]
    impl RosterSource for MapRosters {
        async fn fetch_roster(&self, team: &Team) -> Result<Vec<RosterRow>, SimulationError> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            self.rosters
                .get(team.code)
                .cloned()
                .ok_or_else(|| SimulationError::data_source("rosters", "no roster"))
        }
    }

    struct MapStats(HashMap<u64, SeasonLine>);

    #[async_trait]
    impl SeasonStatsSource for MapStats {
        async fn fetch_season_line(
            &self,
            player: PlayerId,
            _season: &SeasonId,
        ) -> Result<Option<SeasonLine>, SimulationError> {
            Ok(self.0.get(&player.0).copied())
        }
    }

    fn ppg(points_per_game: f64) -> SeasonLine {
        SeasonLine {
            minutes: 1500.0,
            points_per_game,
        }
    }

    fn season() -> SeasonId {
        SeasonId::starting(2016)
    }

    /// Home (TOR) players 1..=2, away (ATL) players 11..=12.
    fn two_team_fixture(home: [f64; 2], away: [f64; 2]) -> (MapRosters, MapStats) {
        let rosters = MapRosters::default()
            .with("TOR", &[(1, "Home One"), (2, "Home Two")])
            .with("ATL", &[(11, "Away One"), (12, "Away Two")]);
        let stats = MapStats(HashMap::from([
            (1, ppg(home[0])),
            (2, ppg(home[1])),
            (11, ppg(away[0])),
            (12, ppg(away[1])),
        ]));
        (rosters, stats)
    }

    #[tokio::test]
    async fn higher_total_wins() {
        let (rosters, stats) = two_team_fixture([60.0, 41.0], [50.0, 49.0]);
        let result = simulate_game("TOR", "ATL", season(), &InjuryReport::empty(), &rosters, &stats)
            .await
            .unwrap();

        assert_eq!(result.home_score, 101);
        assert_eq!(result.away_score, 99);
        assert_eq!(result.winner, "TOR");
        assert_eq!(result.to_string(), "TOR won. Score: TOR 101 - ATL 99");
    }

    #[tokio::test]
    async fn away_win_summary_lists_away_first() {
        let (rosters, stats) = two_team_fixture([40.0, 40.0], [50.0, 50.0]);
        let result = simulate_game("TOR", "ATL", season(), &InjuryReport::empty(), &rosters, &stats)
            .await
            .unwrap();

        assert_eq!(result.winner, "ATL");
        assert_eq!(result.to_string(), "ATL won. Score: ATL 100 - TOR 80");
    }

    #[tokio::test]
    async fn home_wins_exact_tie() {
        let (rosters, stats) = two_team_fixture([50.0, 50.0], [60.0, 40.0]);
        let result = simulate_game("TOR", "ATL", season(), &InjuryReport::empty(), &rosters, &stats)
            .await
            .unwrap();

        assert_eq!(result.home_score, 100);
        assert_eq!(result.away_score, 100);
        assert_eq!(result.winner, "TOR");
    }

    #[tokio::test]
    async fn unknown_team_fails_before_any_fetch() {
        let (rosters, _) = two_team_fixture([1.0, 1.0], [1.0, 1.0]);
        let err = GameSimulator::create("ZZZ", "ATL", season(), &InjuryReport::empty(), &rosters)
            .await
            .err()
            .unwrap();

        assert!(matches!(err, SimulationError::UnknownTeam { ref code } if code == "ZZZ"));
        assert_eq!(rosters.fetches.load(Ordering::SeqCst), 0);

        let err = GameSimulator::create("TOR", "ZZZ", season(), &InjuryReport::empty(), &rosters)
            .await
            .err()
            .unwrap();
        assert!(matches!(err, SimulationError::UnknownTeam { .. }));
        assert_eq!(rosters.fetches.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn roster_source_failure_is_fatal() {
        let rosters = MapRosters::default().with("TOR", &[(1, "Home One")]);
        let result =
            GameSimulator::create("TOR", "ATL", season(), &InjuryReport::empty(), &rosters).await;
        assert!(matches!(result, Err(SimulationError::DataSource { .. })));
    }

    #[tokio::test]
    async fn injuries_discount_projection() {
        let (rosters, stats) = two_team_fixture([30.0, 20.0], [30.0, 20.0]);
        let report = InjuryReport::build(
            vec![
                RawInjuryRow::new("Home One", "Out", "Jan 4"),
                RawInjuryRow::new("Away Two", "Day-To-Day", "Jan 4"),
            ],
            2017,
        );

        let simulator = GameSimulator::create("TOR", "ATL", season(), &report, &rosters)
            .await
            .unwrap();
        assert_eq!(simulator.phase(), SimulationPhase::RostersBuilt);
        assert_eq!(simulator.season().as_str(), "2016-17");
        assert_eq!(simulator.home().players[0].strength, Strength::Out);
        assert_eq!(simulator.away().players[1].strength, Strength::Limited);

        let game = simulator.play_with_rosters(&stats).await;
        assert_eq!(game.result.home_score, 20);
        assert_eq!(game.result.away_score, 40);
        assert_eq!(game.home.players[0].points, 0.0);
        assert_eq!(game.away.players[1].points, 10.0);
    }

    #[tokio::test]
    async fn play_is_deterministic() {
        let (rosters, stats) = two_team_fixture([27.3, 18.6], [22.1, 19.9]);
        let report = InjuryReport::empty();

        let first = simulate_game("TOR", "ATL", season(), &report, &rosters, &stats)
            .await
            .unwrap();
        let second = simulate_game("TOR", "ATL", season(), &report, &rosters, &stats)
            .await
            .unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn result_serializes_to_json() {
        let tor = *teams::lookup("TOR").unwrap();
        let atl = *teams::lookup("ATL").unwrap();
        let result = GameResult::from_scores(&tor, &atl, 99, 101);

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["winner"], "ATL");
        assert_eq!(json["home_score"], 99);
        assert_eq!(result.loser(), "TOR");
    }
}
