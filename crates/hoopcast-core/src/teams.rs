// Team registry: fixed mapping from three-letter team code to stats-provider
// team id.

use serde::Serialize;

use crate::error::SimulationError;

/// A franchise known to the stats provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Team {
    pub code: &'static str,
    pub id: u32,
    pub name: &'static str,
}

const fn team(code: &'static str, id: u32, name: &'static str) -> Team {
    Team { code, id, name }
}

/// All franchises, ordered by stats-provider id.
pub static TEAMS: [Team; 30] = [
    team("ATL", 1610612737, "Atlanta Hawks"),
    team("BOS", 1610612738, "Boston Celtics"),
    team("CLE", 1610612739, "Cleveland Cavaliers"),
    team("NOP", 1610612740, "New Orleans Pelicans"),
    team("CHI", 1610612741, "Chicago Bulls"),
    team("DAL", 1610612742, "Dallas Mavericks"),
    team("DEN", 1610612743, "Denver Nuggets"),
    team("GSW", 1610612744, "Golden State Warriors"),
    team("HOU", 1610612745, "Houston Rockets"),
    team("LAC", 1610612746, "Los Angeles Clippers"),
    team("LAL", 1610612747, "Los Angeles Lakers"),
    team("MIA", 1610612748, "Miami Heat"),
    team("MIL", 1610612749, "Milwaukee Bucks"),
    team("MIN", 1610612750, "Minnesota Timberwolves"),
    team("BKN", 1610612751, "Brooklyn Nets"),
    team("NYK", 1610612752, "New York Knicks"),
    team("ORL", 1610612753, "Orlando Magic"),
    team("IND", 1610612754, "Indiana Pacers"),
    team("PHI", 1610612755, "Philadelphia 76ers"),
    team("PHX", 1610612756, "Phoenix Suns"),
    team("POR", 1610612757, "Portland Trail Blazers"),
    team("SAC", 1610612758, "Sacramento Kings"),
    team("SAS", 1610612759, "San Antonio Spurs"),
    team("OKC", 1610612760, "Oklahoma City Thunder"),
    team("TOR", 1610612761, "Toronto Raptors"),
    team("UTA", 1610612762, "Utah Jazz"),
    team("MEM", 1610612763, "Memphis Grizzlies"),
    team("WAS", 1610612764, "Washington Wizards"),
    team("DET", 1610612765, "Detroit Pistons"),
    team("CHA", 1610612766, "Charlotte Hornets"),
];

/// Look up a team by code (case-insensitive, surrounding whitespace ignored).
pub fn lookup(code: &str) -> Result<&'static Team, SimulationError> {
    let wanted = code.trim();
    TEAMS
        .iter()
        .find(|t| t.code.eq_ignore_ascii_case(wanted))
        .ok_or_else(|| SimulationError::UnknownTeam {
            code: code.to_string(),
        })
}
