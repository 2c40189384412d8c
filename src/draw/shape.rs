//! Committed shape records.

use crate::surface::NodeId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Attribute every committed renderable carries so it can be found again.
pub const SHAPE_ID_ATTR: &str = "data-shape-id";

/// Kind of drawn object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ShapeKind {
    /// Smoothed freehand stroke
    Freehand,
    /// Straight two-point segment
    Line,
    /// Segment with an arrowhead at its end
    Arrow,
    /// Segment with a round marker at its end ("drumstick")
    MarkedLine,
    /// Axis-aligned rectangle
    Rectangle,
    /// Text annotation
    Text,
}

impl ShapeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ShapeKind::Freehand => "freehand",
            ShapeKind::Line => "line",
            ShapeKind::Arrow => "arrow",
            ShapeKind::MarkedLine => "marked-line",
            ShapeKind::Rectangle => "rectangle",
            ShapeKind::Text => "text",
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A committed drawing object.
///
/// Shapes are only ever produced by a tool's finalize step, after the
/// gesture passed the tool's minimum-extent check, so a `Shape` never refers
/// to a half-drawn renderable. `node` is the surface handle of the rendered
/// form; the overlay only uses it to remove the renderable again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shape {
    /// Unique id, also stored on the renderable as `data-shape-id`
    pub id: String,
    /// What was drawn
    pub kind: ShapeKind,
    /// Handle to the rendered node on the surface
    pub node: NodeId,
}

impl Shape {
    pub fn new(id: String, kind: ShapeKind, node: NodeId) -> Self {
        Self { id, kind, node }
    }
}
