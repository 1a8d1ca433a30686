// Season identifiers in the stats provider's `YYYY-YY` form.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};

use crate::error::SimulationError;

/// Month (1-based) in which a new season's identifier takes effect.
const SEASON_START_MONTH: u32 = 10;

/// A season such as `2016-17`. Always holds a validated identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SeasonId(String);

impl SeasonId {
    /// The season whose identifier applies on `date`. October onward belongs
    /// to the season starting that year.
    pub fn for_date(date: NaiveDate) -> Self {
        let start = if date.month() >= SEASON_START_MONTH {
            date.year()
        } else {
            date.year() - 1
        };
        Self::starting(start)
    }

    /// The season starting in calendar year `year`.
    pub fn starting(year: i32) -> Self {
        SeasonId(format!("{}-{:02}", year, (year + 1).rem_euclid(100)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for SeasonId {
    type Err = SimulationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let parse_err = |message: &str| SimulationError::Parse {
            input: s.to_string(),
            message: message.to_string(),
        };

        let (start, end) = s
            .split_once('-')
            .ok_or_else(|| parse_err("expected YYYY-YY"))?;
        if start.len() != 4 || end.len() != 2 {
            return Err(parse_err("expected YYYY-YY"));
        }
        let start: i32 = start.parse().map_err(|_| parse_err("start year is not a number"))?;
        let end: i32 = end.parse().map_err(|_| parse_err("end year is not a number"))?;
        if (start + 1).rem_euclid(100) != end {
            return Err(parse_err("years must be consecutive"));
        }
        Ok(Self::starting(start))
    }
}

impl fmt::Display for SeasonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
