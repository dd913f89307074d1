use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ProformaError;

/// Page sizes offered by the list view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub enum RowsPerPage {
    #[default]
    Five,
    Ten,
    TwentyFive,
}

impl RowsPerPage {
    pub const OPTIONS: [RowsPerPage; 3] = [
        RowsPerPage::Five,
        RowsPerPage::Ten,
        RowsPerPage::TwentyFive,
    ];

    pub fn get(self) -> usize {
        match self {
            RowsPerPage::Five => 5,
            RowsPerPage::Ten => 10,
            RowsPerPage::TwentyFive => 25,
        }
    }
}

impl From<RowsPerPage> for usize {
    fn from(rows: RowsPerPage) -> usize {
        rows.get()
    }
}

impl TryFrom<usize> for RowsPerPage {
    type Error = ProformaError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        RowsPerPage::OPTIONS
            .into_iter()
            .find(|rows| rows.get() == value)
            .ok_or_else(|| ProformaError::InvalidRowsPerPage(value.to_string()))
    }
}

impl FromStr for RowsPerPage {
    type Err = ProformaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<usize>()
            .map_err(|_| ProformaError::InvalidRowsPerPage(s.to_string()))
            .and_then(RowsPerPage::try_from)
    }
}

impl fmt::Display for RowsPerPage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.get())
    }
}

/// Current page (0-based) and page size
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageState {
    pub page: usize,
    pub rows_per_page: RowsPerPage,
}

impl PageState {
    /// Offset of the first row on the current page
    pub fn offset(&self) -> usize {
        self.page.saturating_mul(self.rows_per_page.get())
    }

    /// The current page's window of `items`. Pages past the end are empty.
    pub fn window<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let start = self.offset().min(items.len());
        let end = start.saturating_add(self.rows_per_page.get()).min(items.len());
        &items[start..end]
    }

    /// Footer label in the "6–10 of 12" form. A page past the end keeps
    /// its own start with the end clamped to the total ("11–3 of 3").
    pub fn label(&self, total: usize) -> String {
        if total == 0 {
            return "0–0 of 0".to_string();
        }
        let start = self.offset();
        let end = start.saturating_add(self.rows_per_page.get()).min(total);
        format!("{}–{} of {}", start.saturating_add(1), end, total)
    }
}

/// Number of pages needed for `total` rows
pub fn page_count(total: usize, rows_per_page: RowsPerPage) -> usize {
    total.div_ceil(rows_per_page.get())
}
