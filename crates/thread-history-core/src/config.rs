//! Panel configuration and data directory resolution

use crate::error::{Result, SettingsError};
use crate::ports::KeyValueStore;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::warn;

/// Settings key the panel width is persisted under
pub const PANEL_WIDTH_KEY: &str = "threadHistoryPanelWidth";

/// Settings key holding an optional JSON-encoded [`PanelConfig`]
pub const PANEL_CONFIG_KEY: &str = "panelConfig";

/// Environment variable overriding the data directory
pub const DATA_DIR_ENV: &str = "THREAD_HISTORY_DATA_DIR";

/// Tunables for the thread history panel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PanelConfig {
    /// Narrowest width a drag may produce
    pub min_width: u32,
    /// Widest width a drag may produce
    pub max_width: u32,
    /// Width used when nothing has been persisted
    pub default_width: u32,
    /// Key-value key holding the persisted width
    pub width_key: String,
    /// Viewport width at which the panel becomes a persistent sidebar
    pub wide_layout_min_width: u32,
    /// Graphemes of preview text shown per row
    pub preview_max_chars: usize,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            min_width: 200,
            max_width: 600,
            default_width: 300,
            width_key: PANEL_WIDTH_KEY.to_string(),
            wide_layout_min_width: 1024,
            preview_max_chars: 100,
        }
    }
}

impl PanelConfig {
    /// Check the width bounds are coherent
    pub fn validate(&self) -> Result<()> {
        if self.min_width > self.max_width {
            return Err(SettingsError::InvalidConfig(format!(
                "min_width {} exceeds max_width {}",
                self.min_width, self.max_width
            ))
            .into());
        }

        if !(self.min_width..=self.max_width).contains(&self.default_width) {
            return Err(SettingsError::InvalidConfig(format!(
                "default_width {} outside [{}, {}]",
                self.default_width, self.min_width, self.max_width
            ))
            .into());
        }

        if self.width_key.is_empty() {
            return Err(SettingsError::InvalidConfig("width_key is empty".to_string()).into());
        }

        Ok(())
    }

    /// Parse a JSON-encoded config, validating it
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load the config stored under [`PANEL_CONFIG_KEY`], falling back to defaults
    pub fn load(settings: &dyn KeyValueStore) -> Self {
        match settings.get(PANEL_CONFIG_KEY) {
            Ok(Some(json)) => Self::from_json(&json).unwrap_or_else(|e| {
                warn!("Ignoring stored panel config: {}", e);
                Self::default()
            }),
            Ok(None) => Self::default(),
            Err(e) => {
                warn!("Failed to read panel config: {}", e);
                Self::default()
            }
        }
    }

    /// Clamp an x coordinate to the allowed width range
    pub fn clamp_width(&self, x: f32) -> u32 {
        let (min, max) = (self.min_width as f32, self.max_width as f32);
        if x.is_nan() {
            return self.min_width;
        }
        x.round().clamp(min, max) as u32
    }
}

/// Directory holding the thread history database
pub fn default_data_dir() -> Result<PathBuf> {
    if let Some(dir) = std::env::var_os(DATA_DIR_ENV) {
        return Ok(PathBuf::from(dir));
    }

    dirs::data_dir()
        .map(|dir| dir.join("thread-history"))
        .ok_or_else(|| SettingsError::NoDataDir.into())
}
