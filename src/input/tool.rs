//! Drawing tool selection.

use crate::draw::ShapeKind;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Drawing tool selection.
///
/// The active tool determines what the next pointer drag produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum ToolKind {
    /// Freehand drawing - follows the pointer path
    #[serde(alias = "pencil")]
    Freehand,
    /// Straight line between start and end points
    Line,
    /// Line with an arrowhead at the end point
    Arrow,
    /// Line with a round end marker
    #[serde(alias = "drumstick")]
    MarkedLine,
    /// Rectangle outline from corner to corner
    #[serde(alias = "rect")]
    Rectangle,
    /// Click to place an editable text region
    Text,
}

impl ToolKind {
    /// Every tool, in toolbar order.
    pub const ALL: [ToolKind; 6] = [
        ToolKind::Freehand,
        ToolKind::Line,
        ToolKind::Arrow,
        ToolKind::MarkedLine,
        ToolKind::Rectangle,
        ToolKind::Text,
    ];

    pub fn as_str(self) -> &'static str {
        self.shape_kind().as_str()
    }

    /// Kind of shape this tool commits.
    pub fn shape_kind(self) -> ShapeKind {
        match self {
            ToolKind::Freehand => ShapeKind::Freehand,
            ToolKind::Line => ShapeKind::Line,
            ToolKind::Arrow => ShapeKind::Arrow,
            ToolKind::MarkedLine => ShapeKind::MarkedLine,
            ToolKind::Rectangle => ShapeKind::Rectangle,
            ToolKind::Text => ShapeKind::Text,
        }
    }
}

impl fmt::Display for ToolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a tool name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown tool '{0}'")]
pub struct UnknownTool(pub String);

impl FromStr for ToolKind {
    type Err = UnknownTool;

    /// Parses toolbar names, case-insensitively, including the legacy
    /// aliases `pencil`, `drumstick` and `rect`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "freehand" | "pencil" | "pen" => Ok(ToolKind::Freehand),
            "line" => Ok(ToolKind::Line),
            "arrow" => Ok(ToolKind::Arrow),
            "marked-line" | "markedline" | "marked_line" | "drumstick" => {
                Ok(ToolKind::MarkedLine)
            }
            "rectangle" | "rect" => Ok(ToolKind::Rectangle),
            "text" => Ok(ToolKind::Text),
            _ => Err(UnknownTool(s.to_string())),
        }
    }
}
