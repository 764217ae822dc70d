//! Reading settings files.

use std::path::Path;

use super::{
    ConfigError,
    CopySettings,
};

/// Looked up at the workspace root.
pub const CONFIG_FILE_NAME: &str = ".site-copy.json";

/// Reads `.site-copy.json` from the workspace root.
///
/// # Returns
/// - `Ok(Some(settings))`: the file exists and parsed
/// - `Ok(None)`: there is no config file
///
/// # Errors
/// - The file could not be read
/// - The file is not valid settings JSON
pub(super) fn load_from_workspace(
    workspace_root: &Path,
) -> Result<Option<CopySettings>, ConfigError> {
    let config_path = workspace_root.join(CONFIG_FILE_NAME);

    if !config_path.exists() {
        tracing::debug!("Configuration file not found: {:?}", config_path);
        return Ok(None);
    }

    load_from_file(&config_path).map(Some)
}

/// Reads settings from an explicit path, which must exist.
///
/// # Errors
/// - The file could not be read
/// - The file is not valid settings JSON
pub(super) fn load_from_file(config_path: &Path) -> Result<CopySettings, ConfigError> {
    tracing::debug!("Loading configuration from: {:?}", config_path);

    let content = std::fs::read_to_string(config_path)?;
    let settings: CopySettings = serde_json::from_str(&content)?;

    Ok(settings)
}
