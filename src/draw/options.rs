//! Draw option snapshots and partial updates.

use super::color::{self, TRANSPARENT};
use log::warn;
use serde::{Deserialize, Serialize};

/// Styling applied to every new renderable.
///
/// Tools hold this behind an `Rc` and read it when a gesture starts, so a
/// committed shape keeps the colours it was drawn with. Changing options
/// means building a new snapshot with [`DrawOptions::merged`] and handing it
/// to every tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawOptions {
    /// Stroke colour (CSS colour string)
    pub stroke_color: String,
    /// Stroke width in pixels, always positive
    pub stroke_width: f64,
    /// Fill colour for closed shapes, or `"transparent"`
    pub fill_color: String,
    /// Stacking order of the overlay above page content
    pub z_index: i32,
}

impl Default for DrawOptions {
    fn default() -> Self {
        Self {
            stroke_color: "#1bfff7ff".to_string(),
            stroke_width: 2.0,
            fill_color: TRANSPARENT.to_string(),
            z_index: 9999,
        }
    }
}

impl DrawOptions {
    /// Returns a copy with every key present in `patch` overriding the
    /// current value.
    ///
    /// Values that fail validation (unparseable colours, non-positive or
    /// non-finite widths) are skipped with a warning; the previous value
    /// stays in effect.
    pub fn merged(&self, patch: &OptionsPatch) -> Self {
        let mut next = self.clone();

        if let Some(stroke) = &patch.stroke_color {
            if color::is_color(stroke) {
                next.stroke_color = stroke.trim().to_string();
            } else {
                warn!("Ignoring invalid stroke colour '{stroke}'");
            }
        }

        if let Some(width) = patch.stroke_width {
            if width.is_finite() && width > 0.0 {
                next.stroke_width = width;
            } else {
                warn!("Ignoring non-positive stroke width {width}");
            }
        }

        if let Some(fill) = &patch.fill_color {
            if color::is_color(fill) {
                next.fill_color = fill.trim().to_string();
            } else {
                warn!("Ignoring invalid fill colour '{fill}'");
            }
        }

        if let Some(z_index) = patch.z_index {
            next.z_index = z_index;
        }

        next
    }
}

/// Partial option update; `None` keys leave the current value untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptionsPatch {
    pub stroke_color: Option<String>,
    pub stroke_width: Option<f64>,
    pub fill_color: Option<String>,
    pub z_index: Option<i32>,
}

impl OptionsPatch {
    /// Patch that only changes the stroke colour.
    pub fn stroke_color(color: impl Into<String>) -> Self {
        Self {
            stroke_color: Some(color.into()),
            ..Self::default()
        }
    }

    /// Patch that only changes the stroke width.
    pub fn stroke_width(width: f64) -> Self {
        Self {
            stroke_width: Some(width),
            ..Self::default()
        }
    }

    /// Patch that only changes the fill colour.
    pub fn fill_color(color: impl Into<String>) -> Self {
        Self {
            fill_color: Some(color.into()),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.stroke_color.is_none()
            && self.stroke_width.is_none()
            && self.fill_color.is_none()
            && self.z_index.is_none()
    }
}
