use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProformaError {
    #[error("Config directory not found at {0}. Run 'proforma init' to create it.")]
    ConfigNotFound(PathBuf),

    #[error("Config file not found: {0}")]
    ConfigFileNotFound(PathBuf),

    #[error("Failed to parse config file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Config directory already exists at {0}")]
    AlreadyInitialized(PathBuf),

    #[error(
        "No API base URL configured. \
         Set [api] base_url in config.toml, PROFORMA_API_BASE_URL, or --base-url."
    )]
    MissingBaseUrl,

    #[error("Invalid --as-of value '{0}'. Expected YYYY-MM-DD or YYYY-MM-DDTHH:MM:SS")]
    InvalidAsOf(String),

    #[error("Invalid rows per page '{0}'. Use 5, 10 or 25.")]
    InvalidRowsPerPage(String),

    #[error(
        "No row {serial} on page {page} ({shown} row(s) shown). \
         Use 'proforma list' to see available rows."
    )]
    RowNotOnPage {
        serial: usize,
        page: usize,
        shown: usize,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ProformaError>;
