//! Axis-aligned rectangle tool.

use super::{ToolContext, apply_styles, commit};
use crate::draw::{DrawOptions, Shape, ShapeKind};
use crate::surface::{ElementKind, NodeId, Surface};
use crate::util::{Point, Rect, drag_rect, fmt_num};
use std::rc::Rc;

/// Both sides must be at least this long for a rectangle to be kept.
pub const MIN_RECT_SIDE: f64 = 5.0;

#[derive(Debug, Clone, Copy)]
struct RectDraft {
    anchor: Point,
    node: NodeId,
}

/// Draws the rectangle spanned by the press point and the pointer, whichever
/// direction the drag goes.
#[derive(Debug)]
pub struct RectangleTool {
    options: Rc<DrawOptions>,
    draft: Option<RectDraft>,
}

impl RectangleTool {
    pub fn new(options: Rc<DrawOptions>) -> Self {
        Self {
            options,
            draft: None,
        }
    }

    pub fn on_start(&mut self, point: Point, ctx: &mut ToolContext<'_>) {
        let root = ctx.surface.root();
        let node = ctx.surface.append(root, ElementKind::Rect);
        set_geometry(ctx.surface, node, Rect::new(point.x, point.y, 0.0, 0.0));
        apply_styles(ctx.surface, node, &self.options);
        self.draft = Some(RectDraft {
            anchor: point,
            node,
        });
    }

    pub fn on_move(&mut self, point: Point, ctx: &mut ToolContext<'_>) {
        if let Some(draft) = &self.draft {
            set_geometry(ctx.surface, draft.node, drag_rect(draft.anchor, point));
        }
    }

    pub fn on_end(&mut self, point: Point, ctx: &mut ToolContext<'_>) -> Option<Shape> {
        let draft = self.draft.take()?;
        let rect = drag_rect(draft.anchor, point);
        set_geometry(ctx.surface, draft.node, rect);

        if rect.width < MIN_RECT_SIDE || rect.height < MIN_RECT_SIDE {
            ctx.surface.remove(draft.node);
            return None;
        }

        Some(commit(ctx, ShapeKind::Rectangle, draft.node))
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

fn set_geometry(surface: &mut dyn Surface, node: NodeId, rect: Rect) {
    surface.set_attr(node, "x", &fmt_num(rect.x));
    surface.set_attr(node, "y", &fmt_num(rect.y));
    surface.set_attr(node, "width", &fmt_num(rect.width));
    surface.set_attr(node, "height", &fmt_num(rect.height));
}
