//! Marked-line ("drumstick") tool: a segment ending in a filled dot.

use super::decoration::{MarkerDraft, create_marker, marker_url};
use super::segment::SegmentDraft;
use super::{ToolContext, commit};
use crate::draw::{DrawOptions, Shape, ShapeKind};
use crate::surface::{ElementKind, Surface};
use crate::util::Point;
use std::rc::Rc;

/// Shortest marked line that is kept.
pub const MIN_MARKED_LINE_LENGTH: f64 = 10.0;

/// Id of the end marker shared by every marked line on a surface.
pub const STICK_END_MARKER_ID: &str = "stickend";

#[derive(Debug, Clone, Copy)]
struct MarkedDraft {
    segment: SegmentDraft,
    marker: MarkerDraft,
}

/// Draws a segment whose end carries the shared `stickend` dot.
///
/// All marked lines reference one marker, so repainting it after a commit or
/// an option change recolours the dot of every marked line on the surface.
#[derive(Debug)]
pub struct MarkedLineTool {
    options: Rc<DrawOptions>,
    draft: Option<MarkedDraft>,
}

impl MarkedLineTool {
    pub fn new(options: Rc<DrawOptions>) -> Self {
        Self {
            options,
            draft: None,
        }
    }

    pub fn on_start(&mut self, point: Point, ctx: &mut ToolContext<'_>) {
        let marker = match ctx.surface.find_by_id(STICK_END_MARKER_ID) {
            Some(existing) => MarkerDraft::reused(existing),
            None => {
                let created = create_marker(ctx.surface, STICK_END_MARKER_ID);
                let dot = ctx.surface.append(created.marker, ElementKind::Circle);
                ctx.surface.set_attr(dot, "cx", "7");
                ctx.surface.set_attr(dot, "cy", "3");
                ctx.surface.set_attr(dot, "r", "2.5");
                ctx.surface.set_attr(dot, "fill", &self.options.stroke_color);
                created
            }
        };

        let segment = SegmentDraft::begin(ctx.surface, point, &self.options);
        ctx.surface
            .set_attr(segment.node, "marker-end", &marker_url(STICK_END_MARKER_ID));

        self.draft = Some(MarkedDraft { segment, marker });
    }

    pub fn on_move(&mut self, point: Point, ctx: &mut ToolContext<'_>) {
        if let Some(draft) = &self.draft {
            draft.segment.move_end(ctx.surface, point);
        }
    }

    pub fn on_end(&mut self, point: Point, ctx: &mut ToolContext<'_>) -> Option<Shape> {
        let draft = self.draft.take()?;
        draft.segment.move_end(ctx.surface, point);

        if draft.segment.length_to(point) < MIN_MARKED_LINE_LENGTH {
            ctx.surface.remove(draft.segment.node);
            draft.marker.rollback(ctx.surface);
            return None;
        }

        let shape = commit(ctx, ShapeKind::MarkedLine, draft.segment.node);
        self.repaint_decorations(ctx.surface);
        Some(shape)
    }

    pub fn update_options(&mut self, options: Rc<DrawOptions>) {
        self.options = options;
    }

    /// Recolours the shared end dot to the current stroke colour.
    pub fn repaint_decorations(&mut self, surface: &mut dyn Surface) {
        let dot = surface
            .find_by_id(STICK_END_MARKER_ID)
            .and_then(|marker| surface.first_child_of_kind(marker, ElementKind::Circle));
        if let Some(dot) = dot {
            surface.set_attr(dot, "fill", &self.options.stroke_color);
        }
    }

    pub fn cancel(&mut self, surface: &mut dyn Surface) {
        if let Some(draft) = self.draft.take() {
            surface.remove(draft.segment.node);
            draft.marker.rollback(surface);
        }
    }

    pub fn abandon(&mut self) {
        self.draft = None;
    }

    pub fn is_drafting(&self) -> bool {
        self.draft.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::IdGenerator;
    use crate::input::tools::test_support::{options, p, surface};

    fn dot_fill(s: &dyn Surface) -> Option<String> {
        let marker = s.find_by_id(STICK_END_MARKER_ID)?;
        let dot = s.first_child_of_kind(marker, ElementKind::Circle)?;
        s.attr(dot, "fill").map(str::to_string)
    }

    #[test]
    fn first_short_gesture_leaves_no_trace() {
        let mut s = surface();
        let mut ids = IdGenerator::with_session(1);
        let mut tool = MarkedLineTool::new(options("red"));
        let mut ctx = ToolContext {
            surface: &mut s,
            ids: &mut ids,
        };

        tool.on_start(p(0.0, 0.0), &mut ctx);
        tool.on_move(p(3.0, 3.0), &mut ctx);
        assert!(tool.on_end(p(5.0, 5.0), &mut ctx).is_none());
        assert_eq!(s.node_count(), 0);
    }

    #[test]
    fn marker_is_shared_and_survives_later_short_gestures() {
        let mut s = surface();
        let mut ids = IdGenerator::with_session(1);
        let mut tool = MarkedLineTool::new(options("red"));
        let mut ctx = ToolContext {
            surface: &mut s,
            ids: &mut ids,
        };

        tool.on_start(p(0.0, 0.0), &mut ctx);
        let first = tool.on_end(p(30.0, 0.0), &mut ctx).unwrap();
        let before = ctx.surface.node_count();

        tool.on_start(p(0.0, 20.0), &mut ctx);
        assert!(tool.on_end(p(2.0, 20.0), &mut ctx).is_none());

        assert_eq!(s.node_count(), before);
        assert_eq!(s.attr(first.node, "marker-end"), Some("url(#stickend)"));
        assert_eq!(dot_fill(&s).as_deref(), Some("red"));
    }

    #[test]
    fn commit_and_option_change_recolour_the_shared_dot() {
        let mut s = surface();
        let mut ids = IdGenerator::with_session(1);
        let mut tool = MarkedLineTool::new(options("red"));
        let mut ctx = ToolContext {
            surface: &mut s,
            ids: &mut ids,
        };

        tool.on_start(p(0.0, 0.0), &mut ctx);
        tool.on_end(p(30.0, 0.0), &mut ctx).unwrap();

        tool.update_options(options("green"));
        tool.on_start(p(0.0, 20.0), &mut ctx);
        tool.on_end(p(30.0, 20.0), &mut ctx).unwrap();
        assert_eq!(dot_fill(&s).as_deref(), Some("green"));

        tool.update_options(options("blue"));
        tool.repaint_decorations(&mut s);
        assert_eq!(dot_fill(&s).as_deref(), Some("blue"));
    }
}
