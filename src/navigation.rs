use serde::Serialize;
use std::fmt;

use crate::filter::Tab;
use crate::record::ProformaRecord;

/// Detail views a record can be opened in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Destination {
    AccountsProformaTemplate,
    AccountsTelecallerProformaTemplate,
}

impl Destination {
    pub fn for_tab(tab: Tab) -> Self {
        match tab {
            Tab::Sales => Destination::AccountsProformaTemplate,
            Tab::Telecaller => Destination::AccountsTelecallerProformaTemplate,
        }
    }

    /// Route path of the view
    pub fn path(self) -> &'static str {
        match self {
            Destination::AccountsProformaTemplate => "/AccountsProformaTemplate",
            Destination::AccountsTelecallerProformaTemplate => {
                "/AccountsTelecallerProformaTemplate"
            }
        }
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path()[1..])
    }
}

/// State passed along with the navigation. The detail templates read the
/// record from the `profarmaData` key.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NavigationState {
    #[serde(rename = "profarmaData")]
    pub proforma_data: ProformaRecord,
}

/// A request to show one record in its detail view
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Navigation {
    pub destination: Destination,
    pub path: &'static str,
    pub state: NavigationState,
}

impl Navigation {
    pub fn new(tab: Tab, record: ProformaRecord) -> Self {
        let destination = Destination::for_tab(tab);
        Self {
            destination,
            path: destination.path(),
            state: NavigationState {
                proforma_data: record,
            },
        }
    }

    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
