//! Text annotations.
//!
//! A text gesture places an editable region at the press point. Nothing is
//! committed on pointer-up; the region becomes a shape only when editing
//! loses focus ([`TextTool::finalize`]) with non-blank content. Committed
//! regions are frozen (not editable, draggable) and can be reopened for
//! editing with a double-click.

use super::{ToolContext, commit};
use crate::draw::{DrawOptions, Shape, ShapeKind};
use crate::surface::{ElementKind, NodeId, Surface};
use crate::util::{Point, fmt_num};
use std::rc::Rc;

const INITIAL_WIDTH: f64 = 200.0;
const INITIAL_HEIGHT: f64 = 100.0;
const MIN_GROWN_WIDTH: f64 = 200.0;
const MIN_GROWN_HEIGHT: f64 = 40.0;
const PLACEHOLDER: &str = "Type text here...";

const DRAGGABLE_CLASS: &str = "text-draggable";
const DRAGGING_CLASS: &str = "text-dragging";

/// Font used for new text regions.
#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    pub font_family: String,
    pub font_size: f64,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_family: "Arial, sans-serif".to_string(),
            font_size: 16.0,
        }
    }
}

/// The region currently accepting input.
#[derive(Debug, Clone, Copy)]
struct Editing {
    region: NodeId,
    editor: NodeId,
    /// Already committed once; losing focus only freezes it again
    reopened: bool,
}

#[derive(Debug, Clone, Copy)]
struct Drag {
    region: NodeId,
    editor: Option<NodeId>,
    /// Pointer position relative to the region's anchor at drag start
    grab: Point,
}

#[derive(Debug)]
pub struct TextTool {
    options: Rc<DrawOptions>,
    style: TextStyle,
    editing: Option<Editing>,
    drag: Option<Drag>,
}

impl TextTool {
    pub fn new(options: Rc<DrawOptions>, style: TextStyle) -> Self {
        Self {
            options,
            style,
            editing: None,
            drag: None,
        }
    }

    /// Places a fresh editable region with its top-left corner at `point`.
    ///
    /// A region still being edited must be finalized first. A left-over new
    /// region is removed; a left-over reopened one is frozen again.
    pub fn on_start(&mut self, point: Point, ctx: &mut ToolContext<'_>) {
        if let Some(left_over) = self.editing.take() {
            log::warn!("Text region {:?} was still being edited", left_over.region);
            if left_over.reopened {
                freeze(ctx.surface, left_over.editor);
            } else {
                ctx.surface.remove(left_over.region);
            }
        }

        let root = ctx.surface.root();
        let region = ctx.surface.append(root, ElementKind::ForeignObject);
        ctx.surface.set_attr(region, "x", &fmt_num(point.x));
        ctx.surface.set_attr(region, "y", &fmt_num(point.y));
        ctx.surface.set_attr(region, "width", &fmt_num(INITIAL_WIDTH));
        ctx.surface.set_attr(region, "height", &fmt_num(INITIAL_HEIGHT));

        let editor = ctx.surface.append(region, ElementKind::Div);
        ctx.surface.set_attr(editor, "contenteditable", "true");
        ctx.surface.set_attr(editor, "placeholder", PLACEHOLDER);

        let font_size = format!("{}px", fmt_num(self.style.font_size));
        let stroke = &self.options.stroke_color;
        for (property, value) in [
            ("min-width", "100px"),
            ("min-height", "30px"),
            ("padding", "4px 8px"),
            ("font-family", self.style.font_family.as_str()),
            ("font-size", font_size.as_str()),
            ("color", stroke.as_str()),
            ("background", "transparent"),
            ("border", editing_border(stroke).as_str()),
            ("outline", "none"),
            ("white-space", "pre-wrap"),
            ("word-wrap", "break-word"),
            ("cursor", "text"),
        ] {
            ctx.surface.set_style(editor, property, value);
        }

        ctx.surface.focus(editor);
        self.editing = Some(Editing {
            region,
            editor,
            reopened: false,
        });
    }

    pub fn on_move(&mut self, _point: Point, _ctx: &mut ToolContext<'_>) {}

    /// Pointer-up never commits text.
    pub fn on_end(&mut self, _point: Point, _ctx: &mut ToolContext<'_>) -> Option<Shape> {
        None
    }

    /// Replaces the content of the region being edited and grows the region
    /// to fit. Returns false when nothing is being edited.
    pub fn input(&mut self, content: &str, surface: &mut dyn Surface) -> bool {
        let Some(editing) = self.editing else {
            return false;
        };
        surface.set_text(editing.editor, content);
        grow(surface, editing);
        true
    }

    /// Ends editing, as when the region loses focus.
    ///
    /// A new region with blank content is removed; otherwise it is frozen
    /// and returned as a shape. A reopened region is frozen again and keeps
    /// its existing shape, so `None` is returned.
    pub fn finalize(&mut self, ctx: &mut ToolContext<'_>) -> Option<Shape> {
        let editing = self.editing.take()?;

        if editing.reopened {
            freeze(ctx.surface, editing.editor);
            return None;
        }

        let blank = ctx
            .surface
            .text(editing.editor)
            .is_none_or(|text| text.trim().is_empty());
        if blank {
            log::debug!("Discarding empty text region");
            ctx.surface.remove(editing.region);
            return None;
        }

        freeze(ctx.surface, editing.editor);
        Some(commit(ctx, ShapeKind::Text, editing.region))
    }

    /// Makes a committed region editable again and focuses it.
    pub fn reopen(&mut self, region: NodeId, surface: &mut dyn Surface) -> bool {
        let Some(editor) = surface.first_child_of_kind(region, ElementKind::Div) else {
            return false;
        };

        surface.set_attr(editor, "contenteditable", "true");
        surface.set_style(editor, "border", &editing_border(&self.options.stroke_color));
        surface.set_style(editor, "cursor", "text");
        remove_class(surface, editor, DRAGGABLE_CLASS);
        surface.focus(editor);

        self.editing = Some(Editing {
            region,
            editor,
            reopened: true,
        });
        true
    }

    /// Starts dragging a committed region grabbed at `point`.
    pub fn begin_drag(&mut self, region: NodeId, point: Point, surface: &mut dyn Surface) {
        let anchor = Point::new(attr_num(surface, region, "x"), attr_num(surface, region, "y"));
        let editor = surface.first_child_of_kind(region, ElementKind::Div);
        if let Some(editor) = editor {
            add_class(surface, editor, DRAGGING_CLASS);
        }
        self.drag = Some(Drag {
            region,
            editor,
            grab: point.offset_from(anchor),
        });
    }

    /// Moves the dragged region so the grab point stays under the pointer.
    pub fn drag_to(&mut self, point: Point, surface: &mut dyn Surface) -> bool {
        let Some(drag) = self.drag else {
            return false;
        };
        surface.set_attr(drag.region, "x", &fmt_num(point.x - drag.grab.x));
        surface.set_attr(drag.region, "y", &fmt_num(point.y - drag.grab.y));
        true
    }

    pub fn end_drag(&mut self, surface: &mut dyn Surface) -> bool {
        let Some(drag) = self.drag.take() else {
            return false;
        };
        if let Some(editor) = drag.editor {
            remove_class(surface, editor, DRAGGING_CLASS);
        }
        true
    }

    /// Region whose content is currently being edited.
    pub fn editing_region(&self) -> Option<NodeId> {
        self.editing.map(|editing| editing.region)
    }

    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn update_options(&mut self, options: Rc<DrawOptions>) {
        self.options = options;
    }

    /// Recolours the text and border of the region being edited.
    pub fn repaint_decorations(&mut self, surface: &mut dyn Surface) {
        if let Some(editing) = self.editing {
            let stroke = &self.options.stroke_color;
            surface.set_style(editing.editor, "color", stroke);
            surface.set_style(editing.editor, "border", &editing_border(stroke));
        }
    }

    /// Drops an uncommitted region, refreezes a reopened one and releases any
    /// drag.
    pub fn cancel(&mut self, surface: &mut dyn Surface) {
        if let Some(editing) = self.editing.take() {
            if editing.reopened {
                freeze(surface, editing.editor);
            } else {
                surface.remove(editing.region);
            }
        }
        self.end_drag(surface);
    }

    pub fn abandon(&mut self) {
        self.editing = None;
        self.drag = None;
    }

    /// Text never holds a pointer-driven draft.
    pub fn is_drafting(&self) -> bool {
        false
    }
}

fn editing_border(color: &str) -> String {
    format!("2px dashed {color}")
}

fn grow(surface: &mut dyn Surface, editing: Editing) {
    let Some(content) = surface.bounding_box(editing.editor) else {
        return;
    };
    let width = MIN_GROWN_WIDTH.max(content.width + 20.0);
    let height = MIN_GROWN_HEIGHT.max(content.height + 10.0);
    surface.set_attr(editing.region, "width", &fmt_num(width));
    surface.set_attr(editing.region, "height", &fmt_num(height));
}

fn freeze(surface: &mut dyn Surface, editor: NodeId) {
    surface.set_attr(editor, "contenteditable", "false");
    surface.remove_attr(editor, "placeholder");
    surface.set_style(editor, "border", "none");
    surface.set_style(editor, "cursor", "move");
    add_class(surface, editor, DRAGGABLE_CLASS);
}

fn attr_num(surface: &dyn Surface, node: NodeId, name: &str) -> f64 {
    surface
        .attr(node, name)
        .and_then(|value| value.parse().ok())
        .unwrap_or(0.0)
}

fn add_class(surface: &mut dyn Surface, node: NodeId, class: &str) {
    let current = surface.attr(node, "class").unwrap_or("");
    if current.split_whitespace().any(|existing| existing == class) {
        return;
    }
    let updated = if current.is_empty() {
        class.to_string()
    } else {
        format!("{current} {class}")
    };
    surface.set_attr(node, "class", &updated);
}

fn remove_class(surface: &mut dyn Surface, node: NodeId, class: &str) {
    let Some(current) = surface.attr(node, "class") else {
        return;
    };
    let remaining: Vec<&str> = current
        .split_whitespace()
        .filter(|existing| *existing != class)
        .collect();
    if remaining.is_empty() {
        surface.remove_attr(node, "class");
    } else {
        let updated = remaining.join(" ");
        surface.set_attr(node, "class", &updated);
    }
}
