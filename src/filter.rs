use chrono::{Duration, Months, NaiveDate, NaiveDateTime};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::record::ProformaRecord;

/// Which role's proformas are being listed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Tab {
    #[default]
    Sales,
    Telecaller,
}

impl Tab {
    pub fn title(self) -> &'static str {
        match self {
            Tab::Sales => "Sales Proforma List",
            Tab::Telecaller => "Telecaller Proforma List",
        }
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tab::Sales => write!(f, "sales"),
            Tab::Telecaller => write!(f, "telecaller"),
        }
    }
}

/// Date filter choices offered by the list view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "camelCase")]
pub enum DateRange {
    Today,
    Yesterday,
    #[value(name = "last-week", alias = "lastWeek")]
    LastWeek,
    #[value(name = "last-month", alias = "lastMonth")]
    LastMonth,
    #[value(name = "last-6-months", alias = "last6Months")]
    Last6Months,
    #[value(name = "last-year", alias = "lastYear")]
    LastYear,
    #[default]
    #[value(name = "last-365-days", alias = "last365Days")]
    Last365Days,
}

/// The set of record dates a [`DateRange`] admits, resolved against "now"
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateWindow {
    /// Same calendar day
    Day(NaiveDate),
    /// At or after the instant
    Since(NaiveDateTime),
    /// Everything, including records whose date can't be parsed
    Unbounded,
}

impl DateRange {
    pub fn window(self, now: NaiveDateTime) -> DateWindow {
        match self {
            DateRange::Today => DateWindow::Day(now.date()),
            DateRange::Yesterday => now
                .date()
                .pred_opt()
                .map_or(DateWindow::Unbounded, DateWindow::Day),
            DateRange::LastWeek => now
                .checked_sub_signed(Duration::days(7))
                .map_or(DateWindow::Unbounded, DateWindow::Since),
            DateRange::LastMonth => now
                .checked_sub_months(Months::new(1))
                .map_or(DateWindow::Unbounded, DateWindow::Since),
            // Offered in the selector but never narrowed the list
            DateRange::Last6Months | DateRange::LastYear | DateRange::Last365Days => {
                DateWindow::Unbounded
            }
        }
    }
}

impl DateWindow {
    pub fn contains(&self, record: &ProformaRecord) -> bool {
        match self {
            DateWindow::Unbounded => true,
            DateWindow::Day(day) => record.day() == Some(*day),
            DateWindow::Since(start) => record.timestamp().is_some_and(|ts| ts >= *start),
        }
    }
}

/// Case-insensitive substring match on employee id or party name.
/// An empty query matches everything.
pub fn matches_search(record: &ProformaRecord, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    let needle = query.to_lowercase();
    record.emp_id.to_lowercase().contains(&needle)
        || record.party_name.to_lowercase().contains(&needle)
}

/// Filters applied to the active tab's records
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub date_range: DateRange,
    pub search_query: String,
    pub active_tab: Tab,
}

/// Date predicate then text predicate, preserving source order
pub fn apply_filters<'a>(
    records: &'a [ProformaRecord],
    date_range: DateRange,
    search_query: &str,
    now: NaiveDateTime,
) -> Vec<&'a ProformaRecord> {
    let window = date_range.window(now);
    records
        .iter()
        .filter(|r| window.contains(r))
        .filter(|r| matches_search(r, search_query))
        .collect()
}
