//! Two-point segment drafts shared by the line, arrow and marked-line tools.

use super::apply_styles;
use crate::draw::DrawOptions;
use crate::surface::{ElementKind, NodeId, Surface};
use crate::util::{Point, fmt_num};

/// A `<line>` anchored at `start` whose end follows the pointer.
#[derive(Debug, Clone, Copy)]
pub(crate) struct SegmentDraft {
    pub start: Point,
    pub node: NodeId,
}

impl SegmentDraft {
    /// Inserts a zero-length line at `start` styled with `options`.
    pub fn begin(surface: &mut dyn Surface, start: Point, options: &DrawOptions) -> Self {
        let root = surface.root();
        let node = surface.append(root, ElementKind::Line);
        surface.set_attr(node, "x1", &fmt_num(start.x));
        surface.set_attr(node, "y1", &fmt_num(start.y));
        surface.set_attr(node, "x2", &fmt_num(start.x));
        surface.set_attr(node, "y2", &fmt_num(start.y));
        apply_styles(surface, node, options);
        Self { start, node }
    }

    pub fn move_end(&self, surface: &mut dyn Surface, end: Point) {
        surface.set_attr(self.node, "x2", &fmt_num(end.x));
        surface.set_attr(self.node, "y2", &fmt_num(end.y));
    }

    /// Length of the segment if it ended at `end`.
    pub fn length_to(&self, end: Point) -> f64 {
        self.start.distance_to(end)
    }
}
