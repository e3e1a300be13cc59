//! Layout configuration
//!
//! Character cell metrics and continuation markers, optionally loaded from
//! `~/.config/softwrap/config.yaml`.

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::util::text::char_len;

/// Fixed-cell layout metrics used by wrapping and row layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Width of one character cell in pixels
    #[serde(default = "default_character_width")]
    pub character_width: f32,
    /// Height of one non-editing row in pixels
    #[serde(default = "default_character_height")]
    pub character_height: f32,
    /// Rendered before every fragment that continues a wrapped line
    #[serde(default = "default_leading_marker")]
    pub leading_marker: String,
    /// Rendered after every fragment that is continued on the next row
    #[serde(default = "default_trailing_marker")]
    pub trailing_marker: String,
    #[serde(default)]
    pub font_family: String,
    /// Number of committed changes kept for undo
    #[serde(default = "default_max_history")]
    pub max_history: usize,
}

fn default_character_width() -> f32 {
    10.0
}

fn default_character_height() -> f32 {
    10.0
}

fn default_leading_marker() -> String {
    " …".to_string()
}

fn default_trailing_marker() -> String {
    "…".to_string()
}

fn default_max_history() -> usize {
    1000
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            character_width: default_character_width(),
            character_height: default_character_height(),
            leading_marker: default_leading_marker(),
            trailing_marker: default_trailing_marker(),
            font_family: String::new(),
            max_history: default_max_history(),
        }
    }
}

impl LayoutConfig {
    /// Metrics for the Courier New cell used on iOS
    pub fn ios() -> Self {
        Self {
            character_width: 8.5,
            character_height: 16.0,
            font_family: "Courier New".to_string(),
            ..Self::default()
        }
    }

    /// Width of the leading marker in character cells
    pub fn leading_marker_len(&self) -> usize {
        char_len(&self.leading_marker)
    }

    /// Width of the trailing marker in character cells
    pub fn trailing_marker_len(&self) -> usize {
        char_len(&self.trailing_marker)
    }

    /// Load config from disk, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };

        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match Self::load_from(&path) {
            Ok(config) => {
                tracing::info!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                tracing::warn!("{:#}", e);
                Self::default()
            }
        }
    }

    /// Load config from a specific file
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config at {}", path.display()))?;
        serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config at {}", path.display()))
    }

    /// Save config to a specific file, creating its directory if needed
    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let content = serde_yaml::to_string(self).context("Failed to serialize config")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;

        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }
}
