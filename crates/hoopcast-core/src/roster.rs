// Roster construction: attach an availability multiplier to every player
// from the injury report.

use serde::Serialize;

use crate::injury::{InjuryReport, InjuryStatus};
use crate::stats::PlayerId;
use crate::teams::Team;

/// Availability multiplier applied to a player's projected scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Strength {
    /// Will not play: ruled out or trimmed from the rotation.
    Out,
    /// Day-to-day; expected to play a reduced role.
    Limited,
    Full,
}

impl Strength {
    pub fn multiplier(self) -> f64 {
        match self {
            Strength::Out => 0.0,
            Strength::Limited => 0.5,
            Strength::Full => 1.0,
        }
    }

    pub fn from_injury(status: Option<InjuryStatus>) -> Self {
        match status {
            Some(InjuryStatus::Out) => Strength::Out,
            Some(InjuryStatus::DayToDay) => Strength::Limited,
            None => Strength::Full,
        }
    }

    pub fn is_eligible(self) -> bool {
        self != Strength::Out
    }
}

/// A (player_id, display name) pair from the roster source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterRow {
    pub player_id: PlayerId,
    pub player_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerEntry {
    pub player_id: PlayerId,
    pub player_name: String,
    pub strength: Strength,
    /// Season total minutes. Set by the availability trimmer.
    pub minutes: f64,
    /// Projected points. Set by the score projector.
    pub points: f64,
    /// True when the trimmer, not the injury report, ruled the player out.
    pub trimmed: bool,
}

impl PlayerEntry {
    pub fn new(player_id: PlayerId, player_name: impl Into<String>, strength: Strength) -> Self {
        Self {
            player_id,
            player_name: player_name.into(),
            strength,
            minutes: 0.0,
            points: 0.0,
            trimmed: false,
        }
    }
}

/// One team's players in roster-source order.
#[derive(Debug, Clone, Serialize)]
pub struct Roster {
    pub team: Team,
    pub players: Vec<PlayerEntry>,
}

impl Roster {
    pub fn eligible(&self) -> impl Iterator<Item = &PlayerEntry> {
        self.players.iter().filter(|p| p.strength.is_eligible())
    }

    /// Sum of projected points, before rounding.
    pub fn projected_points(&self) -> f64 {
        self.players.iter().map(|p| p.points).sum()
    }

    /// Projected total rounded to the nearest whole point (ties to even).
    pub fn total_score(&self) -> u32 {
        let total = self.projected_points().round_ties_even();
        if total.is_finite() && total > 0.0 {
            total as u32
        } else {
            0
        }
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}

/// Build a roster for `team`, deriving each player's strength from `report`.
pub fn build_roster(team: Team, rows: Vec<RosterRow>, report: &InjuryReport) -> Roster {
    let players = rows
        .into_iter()
        .map(|row| {
            let strength = Strength::from_injury(report.status_of(&row.player_name));
            PlayerEntry::new(row.player_id, row.player_name, strength)
        })
        .collect();

    Roster { team, players }
}
