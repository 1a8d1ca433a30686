// Score projection: season scoring average scaled by availability.

use tracing::debug;

use crate::roster::Roster;
use crate::season::SeasonId;
use crate::stats::SeasonStats;

/// Set every player's projected points to points-per-game times strength.
///
/// Players without a record for `season` project to zero, as does anyone
/// whose strength is `Out`.
pub fn project_points(roster: &mut Roster, stats: &SeasonStats, season: &SeasonId) {
    for player in roster.players.iter_mut() {
        let ppg = stats.points_per_game(player.player_id, season);
        player.points = ppg * player.strength.multiplier();
    }
    debug!(
        "{}: projected {:.1} points",
        roster.team.code,
        roster.projected_points()
    );
}
