// cli.rs - Command-line interface configuration
use std::path::PathBuf;

use clap::Parser;

use crate::config::{Config, ConfigError};

#[derive(Parser, Debug, Clone)]
#[command(name = "scroll-showcase")]
#[command(about = "Scroll-driven 3D showcase", long_about = None)]
pub struct Cli {
    /// JSON config file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Initial window width in logical pixels
    #[arg(long)]
    pub width: Option<u32>,

    /// Initial window height in logical pixels
    #[arg(long)]
    pub height: Option<u32>,

    /// Disable multisample antialiasing
    #[arg(long = "no-antialias", default_value = "false")]
    pub no_antialias: bool,

    /// Log filter, e.g. "debug" or "scroll_showcase=trace"
    #[arg(long = "log-level", default_value = "info")]
    pub log_level: String,
}

impl Cli {
    /// Load the config file if given, then apply command-line overrides
    pub fn resolve_config(&self) -> Result<Config, ConfigError> {
        let mut config = match &self.config {
            Some(path) => Config::load(path)?,
            None => Config::default(),
        };
        if let Some(width) = self.width {
            config.window.width = width;
        }
        if let Some(height) = self.height {
            config.window.height = height;
        }
        if self.no_antialias {
            config.window.antialias = false;
        }
        config.validate()?;
        Ok(config)
    }
}
