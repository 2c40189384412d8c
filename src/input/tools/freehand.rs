//! Freehand (pencil) tool.

use super::{ToolContext, apply_styles, commit};
use crate::draw::{DrawOptions, Shape, ShapeKind, SmoothPath};
use crate::surface::{ElementKind, NodeId, Surface};
use crate::util::Point;
use std::rc::Rc;

/// Points a stroke needs before it is kept, counting the press point.
pub const MIN_FREEHAND_POINTS: usize = 2;

#[derive(Debug)]
struct Stroke {
    points: Vec<Point>,
    node: NodeId,
}

impl Stroke {
    /// Records `point` unless the pointer has not moved since the last one.
    fn push(&mut self, point: Point) -> bool {
        if self.points.last() == Some(&point) {
            return false;
        }
        self.points.push(point);
        true
    }

    fn redraw(&self, surface: &mut dyn Surface) {
        let data = SmoothPath::through(&self.points).to_svg_data();
        surface.set_attr(self.node, "d", &data);
    }
}

/// Records every pointer position of the drag and renders them as a
/// quadratic-smoothed path.
#[derive(Debug)]
pub struct FreehandTool {
    options: Rc<DrawOptions>,
    stroke: Option<Stroke>,
}

impl FreehandTool {
    pub fn new(options: Rc<DrawOptions>) -> Self {
        Self {
            options,
            stroke: None,
        }
    }

    pub fn on_start(&mut self, point: Point, ctx: &mut ToolContext<'_>) {
        let root = ctx.surface.root();
        let node = ctx.surface.append(root, ElementKind::Path);
        apply_styles(ctx.surface, node, &self.options);
        ctx.surface.set_attr(node, "fill", "none");
        ctx.surface.set_attr(node, "stroke-linecap", "round");
        ctx.surface.set_attr(node, "stroke-linejoin", "round");

        let stroke = Stroke {
            points: vec![point],
            node,
        };
        stroke.redraw(ctx.surface);
        self.stroke = Some(stroke);
    }

    pub fn on_move(&mut self, point: Point, ctx: &mut ToolContext<'_>) {
        if let Some(stroke) = &mut self.stroke
            && stroke.push(point)
        {
            stroke.redraw(ctx.surface);
        }
    }

    pub fn on_end(&mut self, point: Point, ctx: &mut ToolContext<'_>) -> Option<Shape> {
        let mut stroke = self.stroke.take()?;

        if stroke.points.len() < MIN_FREEHAND_POINTS {
            ctx.surface.remove(stroke.node);
            return None;
        }

        if stroke.push(point) {
            stroke.redraw(ctx.surface);
        }
        Some(commit(ctx, ShapeKind::Freehand, stroke.node))
    }

    pub fn update_options(&mut self, options: Rc<DrawOptions>) {
        self.options = options;
    }

    pub fn cancel(&mut self, surface: &mut dyn Surface) {
        if let Some(stroke) = self.stroke.take() {
            surface.remove(stroke.node);
        }
    }

    pub fn abandon(&mut self) {
        self.stroke = None;
    }

    pub fn is_drafting(&self) -> bool {
        self.stroke.is_some()
    }
}
