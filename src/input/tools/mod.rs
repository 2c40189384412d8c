//! Per-kind tool state machines.
//!
//! Every tool follows the same lifecycle: `Idle` → `Drafting` on
//! [`Tool::on_start`], back to `Idle` on [`Tool::on_end`] (commit or
//! cancel). While drafting, a tool owns exactly one scratch renderable on the
//! surface and mutates it live as the pointer moves. Committing applies the
//! tool's minimum-extent check, tags the renderable with a fresh shape id and
//! returns the [`Shape`]; failing the check removes the scratch renderable
//! (and any decoration the gesture created) so the surface looks exactly as it
//! did before the gesture.
//!
//! The text tool is the odd one out: pointer-up never commits. Its region is
//! committed when editing loses focus, through [`TextTool::finalize`].

mod arrow;
mod decoration;
mod freehand;
mod line;
mod marked_line;
mod rectangle;
mod segment;
mod text;

pub use arrow::{ArrowTool, MIN_ARROW_LENGTH};
pub use freehand::{FreehandTool, MIN_FREEHAND_POINTS};
pub use line::{LineTool, MIN_LINE_LENGTH};
pub use marked_line::{MIN_MARKED_LINE_LENGTH, MarkedLineTool, STICK_END_MARKER_ID};
pub use rectangle::{MIN_RECT_SIDE, RectangleTool};
pub use text::{TextStyle, TextTool};

use super::tool::ToolKind;
use crate::draw::{DrawOptions, IdGenerator, SHAPE_ID_ATTR, Shape, ShapeKind};
use crate::surface::{NodeId, Surface};
use crate::util::{Point, fmt_num};
use std::rc::Rc;

/// What a tool needs from its environment while handling a gesture.
pub struct ToolContext<'a> {
    /// Surface the scratch renderable lives on
    pub surface: &'a mut dyn Surface,
    /// Source of shape and decoration ids
    pub ids: &'a mut IdGenerator,
}

/// One instance of every drawing mode, as a closed set.
#[derive(Debug)]
pub enum Tool {
    Freehand(FreehandTool),
    Line(LineTool),
    Arrow(ArrowTool),
    MarkedLine(MarkedLineTool),
    Rectangle(RectangleTool),
    Text(TextTool),
}

macro_rules! each_tool {
    ($self:expr, $tool:ident => $body:expr) => {
        match $self {
            Tool::Freehand($tool) => $body,
            Tool::Line($tool) => $body,
            Tool::Arrow($tool) => $body,
            Tool::MarkedLine($tool) => $body,
            Tool::Rectangle($tool) => $body,
            Tool::Text($tool) => $body,
        }
    };
}

impl Tool {
    /// Creates an idle tool of the given kind.
    pub fn new(kind: ToolKind, options: Rc<DrawOptions>, text_style: &TextStyle) -> Self {
        match kind {
            ToolKind::Freehand => Tool::Freehand(FreehandTool::new(options)),
            ToolKind::Line => Tool::Line(LineTool::new(options)),
            ToolKind::Arrow => Tool::Arrow(ArrowTool::new(options)),
            ToolKind::MarkedLine => Tool::MarkedLine(MarkedLineTool::new(options)),
            ToolKind::Rectangle => Tool::Rectangle(RectangleTool::new(options)),
            ToolKind::Text => Tool::Text(TextTool::new(options, text_style.clone())),
        }
    }

    pub fn kind(&self) -> ToolKind {
        match self {
            Tool::Freehand(_) => ToolKind::Freehand,
            Tool::Line(_) => ToolKind::Line,
            Tool::Arrow(_) => ToolKind::Arrow,
            Tool::MarkedLine(_) => ToolKind::MarkedLine,
            Tool::Rectangle(_) => ToolKind::Rectangle,
            Tool::Text(_) => ToolKind::Text,
        }
    }

    /// Begins a gesture anchored at `point`, inserting a scratch renderable.
    pub fn on_start(&mut self, point: Point, ctx: &mut ToolContext<'_>) {
        each_tool!(self, tool => tool.on_start(point, ctx))
    }

    /// Updates the scratch renderable; no-op when idle.
    pub fn on_move(&mut self, point: Point, ctx: &mut ToolContext<'_>) {
        each_tool!(self, tool => tool.on_move(point, ctx))
    }

    /// Finishes the gesture, returning the committed shape if it passed the
    /// minimum-extent check.
    pub fn on_end(&mut self, point: Point, ctx: &mut ToolContext<'_>) -> Option<Shape> {
        each_tool!(self, tool => tool.on_end(point, ctx))
    }

    /// Replaces the option snapshot used for future gestures.
    pub fn update_options(&mut self, options: Rc<DrawOptions>) {
        each_tool!(self, tool => tool.update_options(options))
    }

    /// Repaints decorations that keep their colour outside the stroke
    /// attribute (arrowheads, end markers, the text being edited).
    ///
    /// Only the most recent decoration is touched; shapes committed earlier
    /// keep theirs.
    pub fn repaint_decorations(&mut self, surface: &mut dyn Surface) {
        match self {
            Tool::Arrow(tool) => tool.repaint_decorations(surface),
            Tool::MarkedLine(tool) => tool.repaint_decorations(surface),
            Tool::Text(tool) => tool.repaint_decorations(surface),
            Tool::Freehand(_) | Tool::Line(_) | Tool::Rectangle(_) => {}
        }
    }

    /// Drops any in-progress draft, removing its scratch nodes.
    pub fn cancel(&mut self, surface: &mut dyn Surface) {
        each_tool!(self, tool => tool.cancel(surface))
    }

    /// Forgets any in-progress draft without touching a surface.
    pub fn abandon(&mut self) {
        each_tool!(self, tool => tool.abandon())
    }

    pub fn is_drafting(&self) -> bool {
        each_tool!(self, tool => tool.is_drafting())
    }

    pub fn as_text(&self) -> Option<&TextTool> {
        match self {
            Tool::Text(tool) => Some(tool),
            _ => None,
        }
    }

    pub fn as_text_mut(&mut self) -> Option<&mut TextTool> {
        match self {
            Tool::Text(tool) => Some(tool),
            _ => None,
        }
    }
}

/// Applies the stroke, stroke width and fill of `options` to `node`.
pub(crate) fn apply_styles(surface: &mut dyn Surface, node: NodeId, options: &DrawOptions) {
    surface.set_attr(node, "stroke", &options.stroke_color);
    surface.set_attr(node, "stroke-width", &fmt_num(options.stroke_width));
    surface.set_attr(node, "fill", &options.fill_color);
}

/// Turns a finished scratch renderable into a shape.
pub(crate) fn commit(ctx: &mut ToolContext<'_>, kind: ShapeKind, node: NodeId) -> Shape {
    let id = ctx.ids.next_shape_id();
    ctx.surface.set_attr(node, SHAPE_ID_ATTR, &id);
    log::debug!("Committed {kind} shape {id}");
    Shape::new(id, kind, node)
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::surface::{SurfaceSize, SvgSurface};

    pub fn surface() -> SvgSurface {
        SvgSurface::new(SurfaceSize {
            width: 1000.0,
            height: 1000.0,
        })
    }

    pub fn options(stroke: &str) -> Rc<DrawOptions> {
        Rc::new(DrawOptions {
            stroke_color: stroke.to_string(),
            stroke_width: 3.0,
            ..DrawOptions::default()
        })
    }

    pub fn p(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }
}
