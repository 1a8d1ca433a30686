// Availability trimming: load season minutes into a roster and rule out
// everyone below the standard rotation cut.

use tracing::debug;

use crate::roster::{Roster, Strength};
use crate::season::SeasonId;
use crate::stats::SeasonStats;

/// Standard active-roster size.
pub const ROTATION_SIZE: usize = 12;

/// Write each player's season minutes from `stats`, then force every
/// eligible player with fewer minutes than the `ROTATION_SIZE`-th highest
/// eligible value to `Strength::Out`.
///
/// Players tied at the cut-off are kept, so more than `ROTATION_SIZE`
/// players may stay eligible. Returns how many players were trimmed.
pub fn apply_minutes_and_trim(roster: &mut Roster, stats: &SeasonStats, season: &SeasonId) -> usize {
    for player in roster.players.iter_mut() {
        player.minutes = stats.minutes(player.player_id, season);
    }

    let mut eligible_minutes: Vec<f64> = roster.eligible().map(|p| p.minutes).collect();
    if eligible_minutes.len() < ROTATION_SIZE {
        debug!(
            "{}: {} eligible players, no trim needed",
            roster.team.code,
            eligible_minutes.len()
        );
        return 0;
    }

    eligible_minutes.sort_by(|a, b| b.total_cmp(a));
    let threshold = eligible_minutes[ROTATION_SIZE - 1];

    let mut trimmed = 0;
    for player in roster
        .players
        .iter_mut()
        .filter(|p| p.strength.is_eligible() && p.minutes < threshold)
    {
        debug!(
            "{}: trimming {} ({:.0} min < {:.0})",
            roster.team.code, player.player_name, player.minutes, threshold
        );
        player.strength = Strength::Out;
        player.trimmed = true;
        trimmed += 1;
    }
    trimmed
}
