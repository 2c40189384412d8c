//! Host input events and dispatch results.

use crate::util::Point;
use serde::{Deserialize, Serialize};

/// A pointer event as delivered by the page, in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    /// Horizontal position relative to the viewport
    pub client_x: f64,
    /// Vertical position relative to the viewport
    pub client_y: f64,
}

impl PointerEvent {
    pub const fn new(client_x: f64, client_y: f64) -> Self {
        Self { client_x, client_y }
    }

    /// Converts to surface-local coordinates given the surface's current
    /// client origin.
    pub fn to_surface(self, surface_origin: Point) -> Point {
        Point::new(
            self.client_x - surface_origin.x,
            self.client_y - surface_origin.y,
        )
    }
}

/// What the overlay did with an event.
///
/// Hosts suppress the page's default handling (text selection, link
/// navigation) only for [`Dispatch::Handled`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// The overlay consumed the event
    Handled,
    /// The overlay ignored the event; the page should handle it normally
    Ignored,
}

impl Dispatch {
    pub fn is_handled(self) -> bool {
        self == Dispatch::Handled
    }
}
