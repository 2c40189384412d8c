//! Configuration enum types.

use crate::draw::color::{RED, is_color, rgb_to_hex};
use log::warn;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Color specification - either a CSS colour name/string or RGB values.
///
/// # Examples
/// ```toml
/// # Named color
/// stroke_color = "red"
///
/// # Any CSS colour string
/// stroke_color = "#1bfff7ff"
///
/// # Custom RGB color (0-255 per component)
/// stroke_color = [255, 128, 0]  # Orange
/// ```
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, JsonSchema)]
#[serde(untagged)]
pub enum ColorSpec {
    /// CSS colour: a name such as `red`, hex notation or `rgb(...)`
    Name(String),
    /// RGB color as [red, green, blue] where each component is 0-255
    Rgb([u8; 3]),
}

impl ColorSpec {
    /// Converts the specification to a CSS colour string.
    ///
    /// Strings that do not look like a colour fall back to `fallback` with a
    /// warning; RGB arrays become `#rrggbb`.
    pub fn to_css_or(&self, fallback: &str) -> String {
        match self {
            ColorSpec::Name(name) if is_color(name) => name.trim().to_string(),
            ColorSpec::Name(name) => {
                warn!("Unknown color '{}', using {}", name, fallback);
                fallback.to_string()
            }
            ColorSpec::Rgb(rgb) => rgb_to_hex(*rgb),
        }
    }

    /// Converts to CSS, falling back to red.
    pub fn to_css(&self) -> String {
        self.to_css_or(RED)
    }
}
