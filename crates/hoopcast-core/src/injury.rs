// Injury report: today's injury list, built from a raw snapshot of
// (name, status, short date) rows.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::SimulationError;

/// Status label the feed uses for players who may still play.
pub const DAY_TO_DAY_LABEL: &str = "Day-To-Day";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InjuryStatus {
    Out,
    DayToDay,
}

impl InjuryStatus {
    /// Any status other than the day-to-day label rules the player out.
    pub fn from_label(label: &str) -> Self {
        if label.trim().eq_ignore_ascii_case(DAY_TO_DAY_LABEL) {
            InjuryStatus::DayToDay
        } else {
            InjuryStatus::Out
        }
    }
}

/// One unparsed row as delivered by the injury feed.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RawInjuryRow {
    pub name: String,
    pub status: String,
    pub date: String,
}

impl RawInjuryRow {
    pub fn new(name: &str, status: &str, date: &str) -> Self {
        Self {
            name: name.to_string(),
            status: status.to_string(),
            date: date.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InjuryRecord {
    pub player_name: String,
    pub status: InjuryStatus,
    pub report_date: NaiveDate,
}

/// Parse short date text like `"Jan 4"` by appending `year`.
///
/// Reports straddling Jan 1 will date December rows in the wrong year; this
/// is accepted rather than guessed around.
pub fn parse_report_date(text: &str, year: i32) -> Result<NaiveDate, SimulationError> {
    let stamped = format!("{} {}", text.trim(), year);
    NaiveDate::parse_from_str(&stamped, "%b %d %Y").map_err(|e| SimulationError::Parse {
        input: text.to_string(),
        message: e.to_string(),
    })
}

/// The injury list for the most recent report date in a snapshot.
#[derive(Debug, Clone, Default)]
pub struct InjuryReport {
    records: Vec<InjuryRecord>,
    by_name: HashMap<String, usize>,
}

impl InjuryReport {
    /// An empty report: every player is healthy.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a report from raw rows, keeping only the latest date and the
    /// first record per player.
    pub fn build<I>(rows: I, year: i32) -> Self
    where
        I: IntoIterator<Item = RawInjuryRow>,
    {
        let mut parsed = Vec::new();
        for row in rows {
            match parse_report_date(&row.date, year) {
                Ok(date) => parsed.push(InjuryRecord {
                    player_name: row.name.trim().to_string(),
                    status: InjuryStatus::from_label(&row.status),
                    report_date: date,
                }),
                Err(e) => warn!("dropping injury row for '{}': {}", row.name.trim(), e),
            }
        }

        let Some(latest) = parsed.iter().map(|r| r.report_date).max() else {
            debug!("injury snapshot has no parseable rows; treating everyone as healthy");
            return Self::empty();
        };

        let mut report = Self::empty();
        for record in parsed.into_iter().filter(|r| r.report_date == latest) {
            if report.by_name.contains_key(&record.player_name) {
                debug!("ignoring duplicate injury row for '{}'", record.player_name);
                continue;
            }
            report
                .by_name
                .insert(record.player_name.clone(), report.records.len());
            report.records.push(record);
        }

        debug!(
            "injury report for {}: {} out, {} day-to-day",
            latest,
            report.out_players().count(),
            report.day_to_day_players().count()
        );
        report
    }

    pub fn status_of(&self, player_name: &str) -> Option<InjuryStatus> {
        self.by_name
            .get(player_name.trim())
            .map(|&i| self.records[i].status)
    }

    pub fn records(&self) -> &[InjuryRecord] {
        &self.records
    }

    /// Date of the report, `None` when empty.
    pub fn report_date(&self) -> Option<NaiveDate> {
        self.records.first().map(|r| r.report_date)
    }

    pub fn out_players(&self) -> impl Iterator<Item = &str> {
        self.with_status(InjuryStatus::Out)
    }

    pub fn day_to_day_players(&self) -> impl Iterator<Item = &str> {
        self.with_status(InjuryStatus::DayToDay)
    }

    fn with_status(&self, status: InjuryStatus) -> impl Iterator<Item = &str> {
        self.records
            .iter()
            .filter(move |r| r.status == status)
            .map(|r| r.player_name.as_str())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
