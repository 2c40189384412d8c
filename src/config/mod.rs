//! Configuration file support for drawover.
//!
//! This module handles loading and validating user settings from the configuration file
//! located at `~/.config/drawover/config.toml`. Settings include the starting tool and
//! stroke styling, the text font, surface placement and export destination.
//!
//! If no config file exists, sensible defaults are used automatically.

pub mod enums;
pub mod types;

// Re-export commonly used types at module level
pub use enums::ColorSpec;
pub use types::{DrawingConfig, ExportConfig, SurfaceConfig, TextConfig};

use crate::draw::DrawOptions;
use crate::draw::color::TRANSPARENT;
use crate::input::TextStyle;
use crate::surface::Placement;
use anyhow::{Context, Result};
use log::{debug, info};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure containing all user settings.
///
/// This is the root configuration type that gets deserialized from the TOML file.
/// All fields have sensible defaults and will use those if not specified in the config file.
///
/// # Example TOML
/// ```toml
/// [drawing]
/// default_tool = "arrow"
/// stroke_color = "red"
/// stroke_width = 3.0
///
/// [text]
/// font_size = 18.0
///
/// [surface]
/// z_index = 9999
/// top_offset = 30.0
///
/// [export]
/// directory = "~/Pictures/DrawOver"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, JsonSchema)]
pub struct Config {
    /// Starting tool and stroke styling
    #[serde(default)]
    pub drawing: DrawingConfig,

    /// Text annotation font
    #[serde(default)]
    pub text: TextConfig,

    /// Surface placement on the page
    #[serde(default)]
    pub surface: SurfaceConfig,

    /// Export destination
    #[serde(default)]
    pub export: ExportConfig,
}

impl Config {
    /// Validates and clamps all configuration values to acceptable ranges.
    ///
    /// Invalid values are clamped to the nearest valid value and a warning is logged.
    ///
    /// Validated ranges:
    /// - `stroke_width`: 1.0 - 50.0
    /// - `font_size`: 8.0 - 72.0
    /// - `top_offset`: >= 0.0
    fn validate_and_clamp(&mut self) {
        // Stroke width: 1.0 - 50.0
        if !(1.0..=50.0).contains(&self.drawing.stroke_width) {
            log::warn!(
                "Invalid stroke_width {:.1}, clamping to 1.0-50.0 range",
                self.drawing.stroke_width
            );
            self.drawing.stroke_width = if self.drawing.stroke_width.is_nan() {
                3.0
            } else {
                self.drawing.stroke_width.clamp(1.0, 50.0)
            };
        }

        // Font size: 8.0 - 72.0
        if !(8.0..=72.0).contains(&self.text.font_size) {
            log::warn!(
                "Invalid font_size {:.1}, clamping to 8.0-72.0 range",
                self.text.font_size
            );
            self.text.font_size = if self.text.font_size.is_nan() {
                16.0
            } else {
                self.text.font_size.clamp(8.0, 72.0)
            };
        }

        if self.surface.top_offset.is_nan() || self.surface.top_offset < 0.0 {
            log::warn!(
                "Invalid top_offset {:.1}, clamping to 0.0",
                self.surface.top_offset
            );
            self.surface.top_offset = 0.0;
        }

        if self.text.font_family.trim().is_empty()
            || self.text.font_family.contains(['"', ';', '<', '>'])
        {
            log::warn!(
                "Invalid font_family '{}', falling back to 'Arial, sans-serif'",
                self.text.font_family
            );
            self.text.font_family = TextConfig::default().font_family;
        }

        if self.export.filename_template.trim().is_empty() {
            log::warn!("Empty filename_template, using the default");
            self.export.filename_template = ExportConfig::default().filename_template;
        }
    }

    /// Parses and validates configuration from TOML text.
    ///
    /// # Errors
    /// Returns an error if the text is not valid TOML for this schema.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let mut config: Config = toml::from_str(text).context("Failed to parse config")?;
        config.validate_and_clamp();
        Ok(config)
    }

    /// Returns the path to the configuration file.
    ///
    /// The config file is located at `~/.config/drawover/config.toml`.
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined (e.g., HOME not set).
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join("drawover");

        Ok(config_dir.join("config.toml"))
    }

    /// Loads configuration from file, or returns defaults if not found.
    ///
    /// All loaded values are validated and clamped to acceptable ranges.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The config directory path cannot be determined
    /// - The file exists but cannot be read
    /// - The file exists but contains invalid TOML syntax
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;
        Self::load_from(&config_path)
    }

    /// Loads configuration from an explicit path, or returns defaults if the
    /// file does not exist.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            info!("Config file not found, using defaults");
            debug!("Expected config at: {}", config_path.display());
            return Ok(Self::default());
        }

        let config_str = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config from {}", config_path.display()))?;

        let config = Self::from_toml_str(&config_str)
            .with_context(|| format!("Invalid config in {}", config_path.display()))?;

        info!("Loaded config from {}", config_path.display());
        debug!("Config: {:?}", config);

        Ok(config)
    }

    /// Creates a default configuration file with documentation comments.
    ///
    /// Writes the example config from `config.example.toml` to the user's config directory.
    ///
    /// # Errors
    /// Returns an error if:
    /// - A config file already exists at the target path
    /// - The config directory cannot be created
    /// - The file cannot be written
    pub fn create_default_file() -> Result<PathBuf> {
        let config_path = Self::get_config_path()?;

        if config_path.exists() {
            return Err(anyhow::anyhow!(
                "Config file already exists at {}",
                config_path.display()
            ));
        }

        // Create directory
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        fs::write(&config_path, Self::example_toml())
            .with_context(|| format!("Failed to write {}", config_path.display()))?;

        info!("Created default config at {}", config_path.display());
        Ok(config_path)
    }

    /// The documented example configuration bundled with the binary.
    pub fn example_toml() -> &'static str {
        include_str!("../../config.example.toml")
    }

    /// JSON schema describing the configuration file.
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Config)
    }

    /// Drawing options the overlay starts with.
    pub fn draw_options(&self) -> DrawOptions {
        let defaults = DrawOptions::default();
        DrawOptions {
            stroke_color: self.drawing.stroke_color.to_css_or(&defaults.stroke_color),
            stroke_width: self.drawing.stroke_width,
            fill_color: self.drawing.fill_color.to_css_or(TRANSPARENT),
            z_index: self.surface.z_index,
        }
    }

    pub fn text_style(&self) -> TextStyle {
        TextStyle {
            font_family: self.text.font_family.clone(),
            font_size: self.text.font_size,
        }
    }

    /// Where surfaces are mounted.
    pub fn placement(&self) -> Placement {
        Placement {
            z_index: self.surface.z_index,
            top_offset: self.surface.top_offset,
        }
    }
}
