use chrono::NaiveDateTime;
use tracing::debug;

use crate::filter::{apply_filters, DateRange, FilterState, Tab};
use crate::navigation::Navigation;
use crate::pager::{PageState, RowsPerPage};
use crate::record::ProformaRecord;

/// State transitions of the list view
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    SalesLoaded(Vec<ProformaRecord>),
    TelecallerLoaded(Vec<ProformaRecord>),
    /// A fetch failed; previously loaded records for that tab stay as they are
    LoadFailed { tab: Tab, reason: String },
    SelectTab(Tab),
    SetDateRange(DateRange),
    SetSearch(String),
    SetPage(usize),
    SetRowsPerPage(RowsPerPage),
}

/// Everything the list view knows. Mutated only through [`Store::dispatch`];
/// the filtered and paged lists are derived on read.
#[derive(Debug, Default)]
pub struct Store {
    sales: Vec<ProformaRecord>,
    telecaller: Vec<ProformaRecord>,
    filter: FilterState,
    page: PageState,
}

impl Store {
    pub fn new(filter: FilterState, page: PageState) -> Self {
        Self {
            filter,
            page,
            ..Self::default()
        }
    }

    pub fn dispatch(&mut self, action: Action) {
        match action {
            Action::SalesLoaded(records) => {
                debug!(count = records.len(), "sales proformas loaded");
                self.sales = records;
            }
            Action::TelecallerLoaded(records) => {
                debug!(count = records.len(), "telecaller proformas loaded");
                self.telecaller = records;
            }
            Action::LoadFailed { tab, reason } => {
                debug!(%tab, %reason, "keeping previous records after failed load");
            }
            Action::SelectTab(tab) => self.filter.active_tab = tab,
            Action::SetDateRange(range) => self.filter.date_range = range,
            Action::SetSearch(query) => self.filter.search_query = query,
            Action::SetPage(page) => self.page.page = page,
            Action::SetRowsPerPage(rows) => {
                self.page.rows_per_page = rows;
                self.page.page = 0;
            }
        }
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn page(&self) -> PageState {
        self.page
    }

    pub fn records(&self, tab: Tab) -> &[ProformaRecord] {
        match tab {
            Tab::Sales => &self.sales,
            Tab::Telecaller => &self.telecaller,
        }
    }

    /// Raw records of the active tab
    pub fn source(&self) -> &[ProformaRecord] {
        self.records(self.filter.active_tab)
    }

    pub fn filtered(&self, now: NaiveDateTime) -> Vec<&ProformaRecord> {
        apply_filters(
            self.source(),
            self.filter.date_range,
            &self.filter.search_query,
            now,
        )
    }

    /// Rows on the current page
    pub fn visible(&self, now: NaiveDateTime) -> Vec<&ProformaRecord> {
        let filtered = self.filtered(now);
        self.page.window(&filtered).to_vec()
    }

    /// Navigation for the row with the given 1-based serial number on the
    /// current page
    pub fn select(&self, serial: usize, now: NaiveDateTime) -> Option<Navigation> {
        let index = serial.checked_sub(1)?;
        let record = self.visible(now).get(index).copied()?.clone();
        Some(Navigation::new(self.filter.active_tab, record))
    }
}
