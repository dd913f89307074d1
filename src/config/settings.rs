use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::filter::DateRange;
use crate::pager::RowsPerPage;

#[derive(Debug, Deserialize, Serialize, Default)]
pub struct Config {
    #[serde(default)]
    pub api: ApiSettings,
    #[serde(default)]
    pub list: ListSettings,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ApiSettings {
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ApiSettings {
    /// Request timeout; `timeout_secs = 0` disables it
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }
}

fn default_timeout_secs() -> u64 {
    30
}

/// Defaults applied to `list` and `open` when the flags are omitted
#[derive(Debug, Deserialize, Serialize, Default)]
pub struct ListSettings {
    #[serde(default)]
    pub rows_per_page: RowsPerPage,
    #[serde(default)]
    pub date_range: DateRange,
}
