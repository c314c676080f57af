//! `grid.toml` loading.
//!
//! ```toml
//! locale = "vi"
//! min_rows = 30
//! draft_columns = 2
//! date_field = "date"
//! locked_before = "2024-01-31"
//! ```
//!
//! A broken or missing file never stops the host: [`load_config`] falls
//! back to defaults and reports what went wrong as warnings.

use directories::ProjectDirs;
use ledger_grid_core::GridConfig;
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, Result};

pub const CONFIG_FILE_NAME: &str = "grid.toml";
const MAX_CONFIG_FILE_BYTES: u64 = 65_536; // 64 KiB

/// Parse a config document. Unknown keys are an error.
pub fn parse_config(content: &str) -> Result<GridConfig> {
    Ok(toml::from_str::<GridConfig>(content)?)
}

/// Read and parse one file, refusing files over the size cap.
pub fn read_config(path: &Path) -> Result<GridConfig> {
    let size = std::fs::metadata(path)?.len();
    if size > MAX_CONFIG_FILE_BYTES {
        return Err(ConfigError::TooLarge {
            path: path.to_path_buf(),
            size,
            max: MAX_CONFIG_FILE_BYTES,
        });
    }
    parse_config(&std::fs::read_to_string(path)?)
}

/// Load the grid config from `config_file`, or from the user config dir
/// when none is given. Returns the config in effect plus any warnings.
pub fn load_config(config_file: Option<&PathBuf>) -> (GridConfig, Vec<String>) {
    let mut warnings: Vec<String> = Vec::new();
    let mut config = GridConfig::default();

    if let Some(path) = config_file.cloned().or_else(user_config_path) {
        if path.exists() {
            match read_config(&path) {
                Ok(parsed) => {
                    tracing::debug!(path = %path.display(), "grid config loaded");
                    config = parsed;
                }
                Err(ConfigError::Parse(err)) => {
                    warnings.push(format!("Failed to parse {}: {}", path.display(), err))
                }
                Err(err @ ConfigError::TooLarge { .. }) => warnings.push(err.to_string()),
                Err(ConfigError::Io(err)) => {
                    warnings.push(format!("Failed to read {}: {}", path.display(), err))
                }
            }
        } else if config_file.is_some() {
            warnings.push(format!("Config file not found: {}", path.display()));
        }
    }

    warnings.extend(lint(&config));
    for warning in &warnings {
        tracing::warn!("{warning}");
    }
    (config, warnings)
}

/// Settings that parse but cannot take effect as written.
fn lint(config: &GridConfig) -> Vec<String> {
    let mut warnings = Vec::new();
    match (&config.date_field, config.locked_before) {
        (Some(field), None) => warnings.push(format!(
            "date_field = \"{field}\" has no effect without locked_before"
        )),
        (None, Some(cutoff)) => warnings.push(format!(
            "locked_before = {cutoff} has no effect without date_field"
        )),
        _ => {}
    }
    if config.min_column_width > config.default_column_width {
        warnings.push(format!(
            "min_column_width ({}) exceeds default_column_width ({})",
            config.min_column_width, config.default_column_width
        ));
    }
    warnings
}

fn user_config_path() -> Option<PathBuf> {
    let proj = ProjectDirs::from("", "", "ledger-grid")?;
    let mut path = proj.config_dir().to_path_buf();
    path.push(CONFIG_FILE_NAME);
    Some(path)
}
