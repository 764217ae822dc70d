//! Holds the validated settings for one workspace.

use std::path::Path;

use super::{
    ConfigError,
    CopySettings,
    loader,
};

#[derive(Default, Debug, Clone)]
pub struct ConfigManager {
    /// Last settings that passed validation.
    current_settings: CopySettings,
}

impl ConfigManager {
    #[must_use]
    pub fn new() -> Self {
        Self { current_settings: CopySettings::default() }
    }

    /// Loads and validates settings.
    ///
    /// An explicit `config_file` wins over `.site-copy.json` in the workspace
    /// root; with neither, the defaults apply.
    ///
    /// # Errors
    /// - The settings file could not be read
    /// - JSON parse error
    /// - Validation error
    pub fn load_settings(
        &mut self,
        workspace_root: Option<&Path>,
        config_file: Option<&Path>,
    ) -> Result<(), ConfigError> {
        tracing::debug!("Loading settings for workspace: {:?}", workspace_root);

        let settings = match (config_file, workspace_root) {
            (Some(path), _) => loader::load_from_file(path)?,
            (None, Some(root)) => {
                loader::load_from_workspace(root)?.map_or_else(CopySettings::default, |ws| {
                    tracing::debug!("Loaded workspace settings: {:?}", ws);
                    ws
                })
            }
            (None, None) => CopySettings::default(),
        };

        settings.validate().map_err(ConfigError::ValidationErrors)?;

        self.current_settings = settings;
        tracing::debug!("Settings loaded successfully: {:?}", self.current_settings);

        Ok(())
    }

    #[must_use]
    pub const fn get_settings(&self) -> &CopySettings {
        &self.current_settings
    }

}
