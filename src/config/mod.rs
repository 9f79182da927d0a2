mod facility;

pub use facility::{BillingSettings, Config, FacilitySettings, ServerSettings};

use crate::error::{BillingError, Result};
use directories::ProjectDirs;
use std::fs;
use std::path::PathBuf;

/// Get the config directory path (~/.wardbill/ or XDG equivalent)
pub fn config_dir() -> Result<PathBuf> {
    // First try XDG-style directories
    if let Some(proj_dirs) = ProjectDirs::from("", "", "wardbill") {
        return Ok(proj_dirs.config_dir().to_path_buf());
    }

    // Fallback to ~/.wardbill/
    let home = dirs_home().ok_or_else(|| {
        BillingError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Could not determine home directory",
        ))
    })?;

    Ok(home.join(".wardbill"))
}

fn dirs_home() -> Option<PathBuf> {
    std::env::var_os("HOME").map(PathBuf::from)
}

/// Load the main config.toml
pub fn load_config(config_dir: &PathBuf) -> Result<Config> {
    let path = config_dir.join("config.toml");
    if !path.exists() {
        return Err(BillingError::ConfigFileNotFound(path));
    }
    let content = fs::read_to_string(&path)?;
    toml::from_str(&content).map_err(|e| BillingError::ConfigParse { path, source: e })
}

/// Template content for config.toml
pub const CONFIG_TEMPLATE: &str = r#"[server]
base_url = "http://localhost:8000/api"
timeout_secs = 10

[facility]
# The facility id scopes locally staged charges (pending_charges_<id>).
id = "main"
name = "Example Birthing Home"

[billing]
currency_symbol = "₱"
"#;
