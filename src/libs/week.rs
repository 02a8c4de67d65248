//! Weekly timesheet grid: week boundaries, rows and totals.
//!
//! A week is seven consecutive days starting on the configured
//! [`WeekStart`]. The grid has one row per `(project, task)` pair and one
//! column per day. Rows come from two places: entries that exist in the
//! store, and rows the user added by hand (cached per user and week, see
//! [`crate::db::week_rows`]). Rows the user removed by hand are hidden
//! unless they still carry hours.
//!
//! Every cell and total is summed from stored entry values and rounded with
//! [`round_for_storage`], then shown with [`format_for_display`].

use crate::libs::duration::{format_for_display, round_for_storage};
use crate::libs::entry::TimeEntry;
use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const DAYS_IN_WEEK: usize = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum WeekStart {
    #[default]
    Monday,
    Sunday,
}

impl WeekStart {
    pub fn weekday(&self) -> Weekday {
        match self {
            WeekStart::Monday => Weekday::Mon,
            WeekStart::Sunday => Weekday::Sun,
        }
    }
}

impl fmt::Display for WeekStart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WeekStart::Monday => write!(f, "monday"),
            WeekStart::Sunday => write!(f, "sunday"),
        }
    }
}

impl FromStr for WeekStart {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "monday" | "mon" => Ok(WeekStart::Monday),
            "sunday" | "sun" => Ok(WeekStart::Sunday),
            other => Err(format!("unknown week start '{}'", other)),
        }
    }
}

/// First day of the week containing `date`.
pub fn week_start(date: NaiveDate, first_day: WeekStart) -> NaiveDate {
    let offset = match first_day {
        WeekStart::Monday => date.weekday().num_days_from_monday(),
        WeekStart::Sunday => date.weekday().num_days_from_sunday(),
    };
    date - Duration::days(offset as i64)
}

pub fn week_days(start: NaiveDate) -> [NaiveDate; DAYS_IN_WEEK] {
    std::array::from_fn(|i| start + Duration::days(i as i64))
}

pub fn week_end(start: NaiveDate) -> NaiveDate {
    start + Duration::days(DAYS_IN_WEEK as i64 - 1)
}

/// Human label such as `"Jun 2 - Jun 8, 2025"`.
pub fn week_label(start: NaiveDate) -> String {
    let end = week_end(start);
    format!("{} - {}", start.format("%b %-d"), end.format("%b %-d, %Y"))
}

/// One row of the grid.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WeekRow {
    pub project: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task: Option<String>,
}

impl WeekRow {
    pub fn new(project: &str, task: Option<&str>) -> Self {
        WeekRow {
            project: project.to_string(),
            task: task.map(|t| t.to_string()),
        }
    }

    pub fn of(entry: &TimeEntry) -> Self {
        WeekRow {
            project: entry.project.clone(),
            task: entry.task.clone(),
        }
    }
}

impl fmt::Display for WeekRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.task {
            Some(task) => write!(f, "{} / {}", self.project, task),
            None => write!(f, "{}", self.project),
        }
    }
}

/// Rows the user added or removed by hand for one week.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WeekRows {
    #[serde(default)]
    pub added: Vec<WeekRow>,
    #[serde(default)]
    pub deleted: Vec<WeekRow>,
}

impl WeekRows {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.deleted.is_empty()
    }

    /// Adds `row`; a previously removed row is restored instead.
    pub fn add(&mut self, row: WeekRow) {
        self.deleted.retain(|r| r != &row);
        if !self.added.contains(&row) {
            self.added.push(row);
        }
    }

    /// Removes `row` from `added` and remembers it as deleted.
    pub fn remove(&mut self, row: WeekRow) {
        self.added.retain(|r| r != &row);
        if !self.deleted.contains(&row) {
            self.deleted.push(row);
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GridRow {
    pub row: WeekRow,
    pub days: [f64; DAYS_IN_WEEK],
    pub total: f64,
}

/// Aggregated hours for one week.
#[derive(Debug, Clone, PartialEq)]
pub struct WeekGrid {
    pub start: NaiveDate,
    pub rows: Vec<GridRow>,
    pub day_totals: [f64; DAYS_IN_WEEK],
    pub total: f64,
}

impl WeekGrid {
    /// Builds the grid from entries dated within the week and the cached
    /// manual rows. Entries outside the week are ignored.
    pub fn build(start: NaiveDate, entries: &[TimeEntry], manual: &WeekRows) -> Self {
        let days = week_days(start);
        let mut rows: Vec<GridRow> = Vec::new();

        for entry in entries {
            let Some(day) = days.iter().position(|d| *d == entry.date) else {
                continue;
            };
            let key = WeekRow::of(entry);
            let index = match rows.iter().position(|r| r.row == key) {
                Some(index) => index,
                None => {
                    rows.push(GridRow {
                        row: key,
                        days: [0.0; DAYS_IN_WEEK],
                        total: 0.0,
                    });
                    rows.len() - 1
                }
            };
            rows[index].days[day] += entry.hours;
        }

        for added in &manual.added {
            if !rows.iter().any(|r| &r.row == added) {
                rows.push(GridRow {
                    row: added.clone(),
                    days: [0.0; DAYS_IN_WEEK],
                    total: 0.0,
                });
            }
        }

        // A removed row with logged hours stays visible.
        rows.retain(|r| !manual.deleted.contains(&r.row) || r.days.iter().any(|h| *h > 0.0));
        rows.sort_by(|a, b| a.row.cmp(&b.row));

        let mut day_totals = [0.0; DAYS_IN_WEEK];
        for grid_row in rows.iter_mut() {
            for (i, hours) in grid_row.days.iter_mut().enumerate() {
                *hours = round_for_storage(*hours);
                day_totals[i] += *hours;
            }
            grid_row.total = round_for_storage(grid_row.days.iter().sum());
        }
        for total in day_totals.iter_mut() {
            *total = round_for_storage(*total);
        }
        let total = round_for_storage(day_totals.iter().sum());

        WeekGrid {
            start,
            rows,
            day_totals,
            total,
        }
    }

    pub fn days(&self) -> [NaiveDate; DAYS_IN_WEEK] {
        week_days(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0.0
    }

    /// Cell value as shown in the grid; empty cells render as `-`.
    pub fn display_cell(hours: f64) -> String {
        if hours == 0.0 {
            "-".to_string()
        } else {
            format_for_display(hours)
        }
    }
}
