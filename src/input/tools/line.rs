//! Straight-line tool.

use super::segment::SegmentDraft;
use super::{ToolContext, commit};
use crate::draw::{DrawOptions, Shape, ShapeKind};
use crate::surface::Surface;
use crate::util::Point;
use std::rc::Rc;

/// Shortest line that is kept; anything shorter is treated as a stray click.
pub const MIN_LINE_LENGTH: f64 = 5.0;

/// Draws a straight segment from the press point to the release point.
#[derive(Debug)]
pub struct LineTool {
    options: Rc<DrawOptions>,
    draft: Option<SegmentDraft>,
}

impl LineTool {
    pub fn new(options: Rc<DrawOptions>) -> Self {
        Self {
            options,
            draft: None,
        }
    }

    pub fn on_start(&mut self, point: Point, ctx: &mut ToolContext<'_>) {
        self.draft = Some(SegmentDraft::begin(ctx.surface, point, &self.options));
    }

    pub fn on_move(&mut self, point: Point, ctx: &mut ToolContext<'_>) {
        if let Some(draft) = &self.draft {
            draft.move_end(ctx.surface, point);
        }
    }

    pub fn on_end(&mut self, point: Point, ctx: &mut ToolContext<'_>) -> Option<Shape> {
        let draft = self.draft.take()?;
        draft.move_end(ctx.surface, point);

        if draft.length_to(point) < MIN_LINE_LENGTH {
            ctx.surface.remove(draft.node);
            return None;
        }

        Some(commit(ctx, ShapeKind::Line, draft.node))
    }

    pub fn update_options(&mut self, options: Rc<DrawOptions>) {
        self.options = options;
    }

    pub fn cancel(&mut self, surface: &mut dyn Surface) {
        if let Some(draft) = self.draft.take() {
            surface.remove(draft.node);
        }
    }

    pub fn abandon(&mut self) {
        self.draft = None;
    }

    pub fn is_drafting(&self) -> bool {
        self.draft.is_some()
    }
}
