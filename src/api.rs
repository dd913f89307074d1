use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use thiserror::Error;
use tracing::{debug, error, info};
use ureq::Agent;

use crate::filter::Tab;
use crate::record::ProformaRecord;
use crate::store::{Action, Store};

/// Why a listing could not be loaded. Never surfaced to the user; the
/// loader logs it and leaves the store as it was.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: ureq::Error,
    },

    #[error("response from {url} is not a proforma list: {source}")]
    Parse {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Listing endpoint for a tab, relative to the base URL
pub fn endpoint(tab: Tab) -> &'static str {
    match tab {
        Tab::Sales => "/api/proFormaInvoice/getAll",
        Tab::Telecaller => "/api/telecaller/proFormaInvoice/getAll",
    }
}

/// Blocking client for the two proforma listing endpoints
#[derive(Clone)]
pub struct ApiClient {
    agent: Agent,
    base_url: String,
}

impl ApiClient {
    /// `timeout` of None lets requests wait indefinitely
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> Self {
        let agent: Agent = Agent::config_builder()
            .timeout_global(timeout)
            .build()
            .into();

        Self {
            agent,
            base_url: base_url.into(),
        }
    }

    pub fn url(&self, tab: Tab) -> String {
        format!("{}{}", self.base_url, endpoint(tab))
    }

    pub fn fetch(&self, tab: Tab) -> Result<Vec<ProformaRecord>, FetchError> {
        let url = self.url(tab);
        debug!(%tab, %url, "fetching proformas");

        let body = self
            .agent
            .get(&url)
            .call()
            .and_then(|mut response| response.body_mut().read_to_string())
            .map_err(|source| FetchError::Http {
                url: url.clone(),
                source,
            })?;

        serde_json::from_str(&body).map_err(|source| FetchError::Parse { url, source })
    }
}

/// Turn a finished fetch into the store update it implies
fn completion(tab: Tab, result: Result<Vec<ProformaRecord>, FetchError>) -> Action {
    match result {
        Ok(records) => {
            info!(%tab, count = records.len(), "proformas loaded");
            match tab {
                Tab::Sales => Action::SalesLoaded(records),
                Tab::Telecaller => Action::TelecallerLoaded(records),
            }
        }
        Err(e) => {
            error!(%tab, error = %e, "error fetching proformas");
            Action::LoadFailed {
                tab,
                reason: e.to_string(),
            }
        }
    }
}

/// Fetch both listings at once. Events come back in completion order.
pub fn load_all(client: &ApiClient) -> Vec<Action> {
    let (tx, rx) = mpsc::channel();

    thread::scope(|scope| {
        for tab in [Tab::Sales, Tab::Telecaller] {
            let tx = tx.clone();
            scope.spawn(move || {
                let action = completion(tab, client.fetch(tab));
                // Receiver outlives the scope
                let _ = tx.send(action);
            });
        }
    });
    drop(tx);

    rx.into_iter().collect()
}

/// Load both listings and fold the results into `store`
pub fn load_into(client: &ApiClient, store: &mut Store) {
    for action in load_all(client) {
        store.dispatch(action);
    }
}
