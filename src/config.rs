//! Configuration management for colorwiz.
//!
//! This module handles the layered configuration system with the following precedence:
//! 1. Command-line arguments (highest priority)
//! 2. Environment variables
//! 3. JSON config file
//! 4. Default values (lowest priority)

use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ColorwizError, Result};
use crate::scale::ScaleKind;

/// Command-line arguments for colorwiz
#[derive(Parser, Debug)]
#[command(name = "colorwiz")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the JSON document listing the properties and their labels
    pub input: PathBuf,

    /// Property to color (defaults to the first collected one)
    #[arg(short, long, env = "COLORWIZ_PROPERTY")]
    pub property: Option<String>,

    /// Color scheme to apply to the selected property
    #[arg(short, long)]
    pub scheme: Option<PathBuf>,

    /// Scale to switch the selected property to
    #[arg(long, value_enum)]
    pub scale: Option<ScaleKind>,

    /// Leave elements whose label has no color untouched
    #[arg(long)]
    pub no_reset_default: bool,

    /// Output format
    #[arg(short, long, value_enum, env = "COLORWIZ_FORMAT")]
    pub format: Option<OutputFormat>,

    /// Path to JSON configuration file
    #[arg(short, long, env = "COLORWIZ_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error) [default: info]
    #[arg(long, env = "COLORWIZ_LOG_LEVEL")]
    pub log_level: Option<String>,
}

/// How the selected color map is printed
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Scheme,
}

/// Model construction settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Property selected after collection
    #[serde(default)]
    pub default_property: Option<String>,

    /// Overrides the reset-default flag of the selected color map
    #[serde(default)]
    pub reset_default: Option<bool>,

    /// Scheme document applied to the selected color map
    #[serde(default)]
    pub scheme_file: Option<PathBuf>,

    /// Scale the selected color map switches to
    #[serde(default)]
    pub scale: Option<ScaleKind>,
}

/// Output settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
}

/// Complete configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Model configuration
    #[serde(default)]
    pub model: ModelConfig,

    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,

    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Config {
    /// Load configuration from all sources with proper precedence.
    /// Returns the configuration and the input document path.
    pub fn load() -> Result<(Self, PathBuf)> {
        Self::from_args(Args::parse())
    }

    /// Build the configuration from already parsed arguments
    pub fn from_args(args: Args) -> Result<(Self, PathBuf)> {
        // Start with defaults
        let mut config = Config::default();

        // Load from JSON file if provided
        if let Some(config_path) = &args.config {
            let json_config = Self::load_from_file(config_path)?;
            config.merge(json_config);
        }

        // Override with command-line arguments
        if args.property.is_some() {
            config.model.default_property = args.property;
        }
        if args.scheme.is_some() {
            config.model.scheme_file = args.scheme;
        }
        if args.scale.is_some() {
            config.model.scale = args.scale;
        }
        if args.no_reset_default {
            config.model.reset_default = Some(false);
        }
        if let Some(format) = args.format {
            config.output.format = format;
        }
        if let Some(log_level) = args.log_level {
            config.log_level = log_level;
        }

        Ok((config, args.input))
    }

    /// Load configuration from a JSON file
    fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Merge another config into this one (other takes precedence)
    fn merge(&mut self, other: Config) {
        if other.model.default_property.is_some() {
            self.model.default_property = other.model.default_property;
        }
        if other.model.reset_default.is_some() {
            self.model.reset_default = other.model.reset_default;
        }
        if other.model.scheme_file.is_some() {
            self.model.scheme_file = other.model.scheme_file;
        }
        if other.model.scale.is_some() {
            self.model.scale = other.model.scale;
        }
        self.output = other.output;
        self.log_level = other.log_level;
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if let Some(property) = &self.model.default_property {
            if property.trim().is_empty() {
                return Err(ColorwizError::Config {
                    message: "Default property cannot be empty".to_string(),
                });
            }
        }

        if let Some(path) = &self.model.scheme_file {
            if path.as_os_str().is_empty() {
                return Err(ColorwizError::Config {
                    message: "Scheme file path cannot be empty".to_string(),
                });
            }
        }

        // Validate log level
        match self.log_level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(ColorwizError::Config {
                    message: format!(
                        "Invalid log level: {}. Must be one of: trace, debug, info, warn, error",
                        self.log_level
                    ),
                });
            }
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model: ModelConfig::default(),
            output: OutputConfig::default(),
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}
