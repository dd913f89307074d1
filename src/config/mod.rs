mod settings;

pub use settings::{ApiSettings, Config, ListSettings};

use crate::error::{ProformaError, Result};
use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable that overrides `[api] base_url`
pub const BASE_URL_ENV: &str = "PROFORMA_API_BASE_URL";

/// Get the config directory path (XDG config dir, or ~/.proforma/)
pub fn config_dir() -> Result<PathBuf> {
    if let Some(proj_dirs) = ProjectDirs::from("", "", "proforma") {
        return Ok(proj_dirs.config_dir().to_path_buf());
    }

    let home = std::env::var_os("HOME").map(PathBuf::from).ok_or_else(|| {
        ProformaError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Could not determine home directory",
        ))
    })?;

    Ok(home.join(".proforma"))
}

/// Load config.toml from the config directory
pub fn load_config(config_dir: &Path) -> Result<Config> {
    let path = config_dir.join("config.toml");
    if !path.exists() {
        return Err(ProformaError::ConfigFileNotFound(path));
    }
    let content = fs::read_to_string(&path)?;
    toml::from_str(&content).map_err(|e| ProformaError::ConfigParse { path, source: e })
}

/// Load config.toml, falling back to defaults when the directory was never
/// initialized. A directory without config.toml is still an error.
pub fn load_config_or_default(config_dir: &Path) -> Result<Config> {
    if !config_dir.exists() {
        tracing::debug!(dir = %config_dir.display(), "config directory missing, using defaults");
        return Ok(Config::default());
    }
    load_config(config_dir)
}

/// Pick the base URL: explicit override first, then the config file.
/// Trailing slashes are dropped so endpoint paths can be appended as-is.
pub fn resolve_base_url(config: &Config, override_url: Option<&str>) -> Result<String> {
    let url = override_url
        .or(config.api.base_url.as_deref())
        .map(str::trim)
        .filter(|u| !u.is_empty())
        .ok_or(ProformaError::MissingBaseUrl)?;
    Ok(url.trim_end_matches('/').to_string())
}

/// Template content for config.toml
pub const CONFIG_TEMPLATE: &str = r#"[api]
# Root of the ERMS backend; endpoints are appended to it, e.g.
#   {base_url}/api/proFormaInvoice/getAll
# Can be overridden with PROFORMA_API_BASE_URL or --base-url.
base_url = "http://localhost:8080"
timeout_secs = 30          # 0 waits forever

[list]
rows_per_page = 5          # 5, 10 or 25
date_range = "last365Days" # today, yesterday, lastWeek, lastMonth,
                           # last6Months, lastYear, last365Days
"#;
