pub mod api;
pub mod config;
pub mod error;
pub mod filter;
pub mod navigation;
pub mod pager;
pub mod record;
pub mod store;
pub mod view;

pub use api::{load_all, load_into, ApiClient, FetchError};
pub use config::{Config, ListSettings};
pub use error::{ProformaError, Result};
pub use filter::{apply_filters, DateRange, FilterState, Tab};
pub use navigation::{Destination, Navigation};
pub use pager::{PageState, RowsPerPage};
pub use record::{ProformaRecord, RecordStatus};
pub use store::{Action, Store};
