//! Geometry helpers shared by the tools and the surface.
//!
//! This module provides:
//! - [`Point`] and [`Rect`] in surface-local coordinates
//! - Drag normalisation for rectangle-style gestures
//! - Number formatting for markup attributes

use serde::{Deserialize, Serialize};

// ============================================================================
// Points
// ============================================================================

/// A coordinate on the drawing surface.
///
/// The origin is the surface's top-left corner, independent of page scroll.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    pub fn distance_to(self, other: Point) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Point halfway between `self` and `other`.
    pub fn midpoint(self, other: Point) -> Point {
        Point::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }

    /// Vector from `origin` to `self`.
    pub fn offset_from(self, origin: Point) -> Point {
        Point::new(self.x - origin.x, self.y - origin.y)
    }
}

// ============================================================================
// Rectangles
// ============================================================================

/// Axis-aligned rectangle used for bounding boxes and client rectangles.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Builds a rectangle from min/max bounds.
    pub fn from_min_max(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self::new(min_x, min_y, max_x - min_x, max_y - min_y)
    }

    /// Top-left corner.
    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Returns true if `point` lies inside the rectangle (edges inclusive).
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x
            && point.x <= self.x + self.width
            && point.y >= self.y
            && point.y <= self.y + self.height
    }
}

/// Normalises a drag from `anchor` to `current` into a rectangle with
/// non-negative size.
///
/// Dragging up or left moves the rectangle origin to the pointer so that the
/// anchor stays at the opposite corner.
///
/// # Arguments
/// * `anchor` - Where the drag started
/// * `current` - Current pointer position
pub fn drag_rect(anchor: Point, current: Point) -> Rect {
    let (x, width) = if current.x < anchor.x {
        (current.x, anchor.x - current.x)
    } else {
        (anchor.x, current.x - anchor.x)
    };
    let (y, height) = if current.y < anchor.y {
        (current.y, anchor.y - current.y)
    } else {
        (anchor.y, current.y - anchor.y)
    };
    Rect::new(x, y, width, height)
}

// ============================================================================
// Formatting
// ============================================================================

/// Formats a coordinate for use in a markup attribute.
///
/// Whole numbers print without a fractional part (`10`, not `10.0`) and
/// negative zero prints as `0`.
pub fn fmt_num(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    format!("{value}")
}
