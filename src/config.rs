//! Optional JSON configuration. Every field has a default, so an empty
//! object (or no file at all) yields the stock showcase.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::input_adapter::{DEFAULT_LINE_HEIGHT, DEFAULT_PAGE_FRACTION};
use crate::page::{Block, PageLayout};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serde error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Initial inner width in logical pixels
    pub width: u32,
    pub height: u32,
    pub title: String,
    pub antialias: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 800,
            title: "Scroll Showcase".to_string(),
            antialias: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    pub blocks: Vec<Block>,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            blocks: PageLayout::default().blocks().to_vec(),
        }
    }
}

impl PageConfig {
    pub fn layout(&self) -> PageLayout {
        PageLayout::new(self.blocks.clone())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Logical pixels per wheel line or arrow key
    pub line_height_px: f32,
    /// Viewport fraction scrolled by page keys
    pub page_fraction: f32,
    pub rotate_speed: f32,
    pub zoom_speed: f32,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            line_height_px: DEFAULT_LINE_HEIGHT,
            page_fraction: DEFAULT_PAGE_FRACTION,
            rotate_speed: 1.0,
            zoom_speed: 1.0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub window: WindowConfig,
    pub page: PageConfig,
    pub input: InputConfig,
}

impl Config {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("loaded config from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window.width == 0 || self.window.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "window size {}x{} must be non-zero",
                self.window.width, self.window.height
            )));
        }
        self.page.layout().validate().map_err(ConfigError::Invalid)?;

        let input = &self.input;
        for (name, value) in [
            ("line_height_px", input.line_height_px),
            ("page_fraction", input.page_fraction),
            ("rotate_speed", input.rotate_speed),
            ("zoom_speed", input.zoom_speed),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "input.{} must be positive, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }
}
