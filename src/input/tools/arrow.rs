//! Arrow tool: a segment with its own arrowhead marker.

use super::decoration::{MarkerDraft, create_marker, marker_url};
use super::segment::SegmentDraft;
use super::{ToolContext, commit};
use crate::draw::{DrawOptions, Shape, ShapeKind};
use crate::surface::{ElementKind, NodeId, Surface};
use crate::util::Point;
use std::rc::Rc;

/// Shortest arrow that is kept.
pub const MIN_ARROW_LENGTH: f64 = 10.0;

const ARROWHEAD_POINTS: &str = "0 0, 10 3, 0 6";

#[derive(Debug, Clone, Copy)]
struct ArrowDraft {
    segment: SegmentDraft,
    marker: MarkerDraft,
    /// Decoration that was "most recent" before this gesture began
    previous_head: Option<NodeId>,
}

/// Draws a segment ending in an arrowhead.
///
/// Every arrow gets a dedicated marker definition so committed arrows keep
/// the colour they were drawn with. Option changes repaint only the most
/// recently created arrowhead.
#[derive(Debug)]
pub struct ArrowTool {
    options: Rc<DrawOptions>,
    draft: Option<ArrowDraft>,
    /// Polygon of the most recently created arrowhead
    last_head: Option<NodeId>,
}

impl ArrowTool {
    pub fn new(options: Rc<DrawOptions>) -> Self {
        Self {
            options,
            draft: None,
            last_head: None,
        }
    }

    pub fn on_start(&mut self, point: Point, ctx: &mut ToolContext<'_>) {
        let marker_id = ctx.ids.next_with_prefix("arrowhead");
        let marker = create_marker(ctx.surface, &marker_id);

        let head = ctx.surface.append(marker.marker, ElementKind::Polygon);
        ctx.surface.set_attr(head, "points", ARROWHEAD_POINTS);
        ctx.surface.set_attr(head, "fill", &self.options.stroke_color);

        let segment = SegmentDraft::begin(ctx.surface, point, &self.options);
        ctx.surface
            .set_attr(segment.node, "marker-end", &marker_url(&marker_id));

        self.draft = Some(ArrowDraft {
            segment,
            marker,
            previous_head: self.last_head.replace(head),
        });
    }

    pub fn on_move(&mut self, point: Point, ctx: &mut ToolContext<'_>) {
        if let Some(draft) = &self.draft {
            draft.segment.move_end(ctx.surface, point);
        }
    }

    pub fn on_end(&mut self, point: Point, ctx: &mut ToolContext<'_>) -> Option<Shape> {
        let draft = self.draft.take()?;
        draft.segment.move_end(ctx.surface, point);

        if draft.segment.length_to(point) < MIN_ARROW_LENGTH {
            self.discard(draft, ctx.surface);
            return None;
        }

        Some(commit(ctx, ShapeKind::Arrow, draft.segment.node))
    }

    fn discard(&mut self, draft: ArrowDraft, surface: &mut dyn Surface) {
        surface.remove(draft.segment.node);
        draft.marker.rollback(surface);
        self.last_head = draft.previous_head;
    }

    pub fn update_options(&mut self, options: Rc<DrawOptions>) {
        self.options = options;
    }

    pub fn repaint_decorations(&mut self, surface: &mut dyn Surface) {
        if let Some(head) = self.last_head
            && surface.contains(head)
        {
            surface.set_attr(head, "fill", &self.options.stroke_color);
        }
    }

    pub fn cancel(&mut self, surface: &mut dyn Surface) {
        if let Some(draft) = self.draft.take() {
            self.discard(draft, surface);
        }
    }

    pub fn abandon(&mut self) {
        self.draft = None;
        self.last_head = None;
    }

    pub fn is_drafting(&self) -> bool {
        self.draft.is_some()
    }
}
