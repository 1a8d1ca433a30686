// Typed season statistics keyed by (player, season).

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

use crate::season::SeasonId;

/// Stats-provider player identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct PlayerId(pub u64);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One player's regular-season line.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SeasonLine {
    /// Total minutes played over the season.
    pub minutes: f64,
    /// Average points per game.
    pub points_per_game: f64,
}

/// Snapshot of season lines. A missing key means the player has no record
/// for that season, which is not the same as a recorded zero line.
#[derive(Debug, Clone, Default)]
pub struct SeasonStats {
    lines: HashMap<(PlayerId, SeasonId), SeasonLine>,
}

impl SeasonStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a line, returning the one it replaced.
    pub fn insert(&mut self, player: PlayerId, season: SeasonId, line: SeasonLine) -> Option<SeasonLine> {
        self.lines.insert((player, season), line)
    }

    pub fn get(&self, player: PlayerId, season: &SeasonId) -> Option<&SeasonLine> {
        // Keyed lookup needs an owned season; ids are short.
        self.lines.get(&(player, season.clone()))
    }

    /// Season total minutes, 0 when there is no record.
    pub fn minutes(&self, player: PlayerId, season: &SeasonId) -> f64 {
        self.get(player, season).map(|l| l.minutes).unwrap_or(0.0)
    }

    /// Season points per game, 0 when there is no record.
    pub fn points_per_game(&self, player: PlayerId, season: &SeasonId) -> f64 {
        self.get(player, season)
            .map(|l| l.points_per_game)
            .unwrap_or(0.0)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl Extend<(PlayerId, SeasonId, SeasonLine)> for SeasonStats {
    fn extend<T: IntoIterator<Item = (PlayerId, SeasonId, SeasonLine)>>(&mut self, iter: T) {
        for (player, season, line) in iter {
            self.insert(player, season, line);
        }
    }
}

impl FromIterator<(PlayerId, SeasonId, SeasonLine)> for SeasonStats {
    fn from_iter<T: IntoIterator<Item = (PlayerId, SeasonId, SeasonLine)>>(iter: T) -> Self {
        let mut stats = Self::new();
        stats.extend(iter);
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_record_differs_from_zero_line() {
        let season = SeasonId::starting(2016);
        let mut stats = SeasonStats::new();
        stats.insert(PlayerId(1), season.clone(), SeasonLine::default());

        assert!(stats.get(PlayerId(1), &season).is_some());
        assert!(stats.get(PlayerId(2), &season).is_none());
        assert_eq!(stats.minutes(PlayerId(2), &season), 0.0);
    }

    #[test]
    fn lookups_are_scoped_to_season() {
        let current = SeasonId::starting(2016);
        let previous = SeasonId::starting(2015);
        let stats: SeasonStats = vec![(
            PlayerId(7),
            previous.clone(),
            SeasonLine {
                minutes: 2000.0,
                points_per_game: 20.0,
            },
        )]
        .into_iter()
        .collect();

        assert_eq!(stats.points_per_game(PlayerId(7), &previous), 20.0);
        assert_eq!(stats.points_per_game(PlayerId(7), &current), 0.0);
        assert_eq!(stats.minutes(PlayerId(7), &current), 0.0);
    }
}
