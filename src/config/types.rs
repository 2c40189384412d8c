//! Configuration type definitions.

use super::enums::ColorSpec;
use crate::draw::color::{RED, TRANSPARENT};
use crate::input::ToolKind;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Drawing-related settings.
///
/// Controls the tool and styling the overlay starts with. The toolbar can
/// change all of them at runtime.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct DrawingConfig {
    /// Tool selected on activation (freehand, line, arrow, marked-line,
    /// rectangle, text)
    #[serde(default = "default_tool")]
    pub default_tool: ToolKind,

    /// Stroke colour - a CSS colour string or an RGB array like `[255, 0, 0]`
    #[serde(default = "default_stroke_color")]
    pub stroke_color: ColorSpec,

    /// Stroke width in pixels (valid range: 1.0 - 50.0)
    #[serde(default = "default_stroke_width")]
    pub stroke_width: f64,

    /// Rectangle fill colour; `transparent` for outlines only
    #[serde(default = "default_fill_color")]
    pub fill_color: ColorSpec,

    /// Maximum number of retained shapes (0 = unlimited)
    #[serde(default)]
    pub max_shapes: usize,
}

impl Default for DrawingConfig {
    fn default() -> Self {
        Self {
            default_tool: default_tool(),
            stroke_color: default_stroke_color(),
            stroke_width: default_stroke_width(),
            fill_color: default_fill_color(),
            max_shapes: 0,
        }
    }
}

/// Text annotation settings.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct TextConfig {
    /// CSS font family list for text regions
    #[serde(default = "default_font_family")]
    pub font_family: String,

    /// Font size in pixels (valid range: 8.0 - 72.0)
    #[serde(default = "default_font_size")]
    pub font_size: f64,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            font_family: default_font_family(),
            font_size: default_font_size(),
        }
    }
}

/// Placement of the drawing surface on the page.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SurfaceConfig {
    /// Stacking order above page content
    #[serde(default = "default_z_index")]
    pub z_index: i32,

    /// Vertical offset in pixels, leaving room for the toolbar (>= 0)
    #[serde(default = "default_top_offset")]
    pub top_offset: f64,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            z_index: default_z_index(),
            top_offset: default_top_offset(),
        }
    }
}

/// Where exported drawings are written.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ExportConfig {
    /// Output directory; `~/` is expanded to the home directory
    #[serde(default = "default_export_directory")]
    pub directory: String,

    /// File name template using chrono format specifiers (extension added
    /// automatically)
    #[serde(default = "default_filename_template")]
    pub filename_template: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            directory: default_export_directory(),
            filename_template: default_filename_template(),
        }
    }
}

// =============================================================================
// Default value functions
// =============================================================================

fn default_tool() -> ToolKind {
    ToolKind::Line
}

fn default_stroke_color() -> ColorSpec {
    ColorSpec::Name(RED.to_string())
}

fn default_stroke_width() -> f64 {
    3.0
}

fn default_fill_color() -> ColorSpec {
    ColorSpec::Name(TRANSPARENT.to_string())
}

fn default_font_family() -> String {
    "Arial, sans-serif".to_string()
}

fn default_font_size() -> f64 {
    16.0
}

fn default_z_index() -> i32 {
    9999
}

fn default_top_offset() -> f64 {
    30.0
}

fn default_export_directory() -> String {
    "~/Pictures/DrawOver".to_string()
}

fn default_filename_template() -> String {
    "drawing_snapshot_%Y-%m-%d_%H%M%S".to_string()
}
