//! Tool registry and gesture dispatcher.

use super::tool::ToolKind;
use super::tools::{TextStyle, TextTool, Tool, ToolContext};
use crate::draw::{DrawOptions, Shape};
use crate::surface::Surface;
use crate::util::Point;
use log::debug;
use std::rc::Rc;

/// Owns one instance of every tool and routes gestures to them.
///
/// All six tools are built up front, so switching tools never allocates and
/// an inactive tool still sees every option change. A gesture stays bound to
/// the tool that started it: selecting another tool mid-gesture only affects
/// the next pointer-down.
#[derive(Debug)]
pub struct ToolRegistry {
    /// Indexed by `ToolKind as usize` (declaration order, same as `ToolKind::ALL`)
    tools: Vec<Tool>,
    active: ToolKind,
    /// Tool that owns the gesture in flight
    gesture: Option<ToolKind>,
}

impl ToolRegistry {
    pub fn new(options: Rc<DrawOptions>, text_style: &TextStyle, active: ToolKind) -> Self {
        let tools = ToolKind::ALL
            .into_iter()
            .map(|kind| Tool::new(kind, Rc::clone(&options), text_style))
            .collect();
        Self {
            tools,
            active,
            gesture: None,
        }
    }

    fn tool_mut(&mut self, kind: ToolKind) -> &mut Tool {
        &mut self.tools[kind as usize]
    }

    pub fn active(&self) -> ToolKind {
        self.active
    }

    pub fn select(&mut self, kind: ToolKind) {
        if kind != self.active {
            debug!("Tool changed: {} -> {}", self.active, kind);
        }
        self.active = kind;
    }

    /// Selects a tool by name (aliases such as `pencil` or `drumstick` are
    /// accepted). Unknown names leave the selection unchanged.
    pub fn select_by_name(&mut self, name: &str) -> bool {
        match name.parse::<ToolKind>() {
            Ok(kind) => {
                self.select(kind);
                true
            }
            Err(err) => {
                debug!("Ignoring tool selection: {err}");
                false
            }
        }
    }

    /// Tool that owns the gesture in flight, if any.
    pub fn gesture(&self) -> Option<ToolKind> {
        self.gesture
    }

    /// Starts a gesture on the active tool.
    ///
    /// Refused (returns false) while another gesture is still in flight.
    pub fn start(&mut self, point: Point, ctx: &mut ToolContext<'_>) -> bool {
        if let Some(owner) = self.gesture {
            debug!("Ignoring gesture start: {owner} gesture still in progress");
            return false;
        }
        let kind = self.active;
        self.gesture = Some(kind);
        self.tool_mut(kind).on_start(point, ctx);
        true
    }

    /// Forwards a pointer move to the gesture owner; false when no gesture is
    /// in flight.
    pub fn move_to(&mut self, point: Point, ctx: &mut ToolContext<'_>) -> bool {
        let Some(kind) = self.gesture else {
            return false;
        };
        self.tool_mut(kind).on_move(point, ctx);
        true
    }

    /// Finishes the gesture in flight and returns the committed shape, if any.
    pub fn end(&mut self, point: Point, ctx: &mut ToolContext<'_>) -> Option<Shape> {
        let kind = self.gesture.take()?;
        self.tool_mut(kind).on_end(point, ctx)
    }

    /// Hands a new option snapshot to every tool, active or not.
    pub fn update_options(&mut self, options: &Rc<DrawOptions>) {
        for tool in &mut self.tools {
            tool.update_options(Rc::clone(options));
        }
    }

    /// Lets every tool recolour the decorations it owns.
    pub fn repaint_decorations(&mut self, surface: &mut dyn Surface) {
        for tool in &mut self.tools {
            tool.repaint_decorations(surface);
        }
    }

    /// Cancels drafts, text editing and drags, removing their scratch nodes.
    pub fn cancel(&mut self, surface: &mut dyn Surface) {
        self.gesture = None;
        for tool in &mut self.tools {
            tool.cancel(surface);
        }
    }

    /// Forgets all transient tool state without touching a surface.
    pub fn abandon(&mut self) {
        self.gesture = None;
        for tool in &mut self.tools {
            tool.abandon();
        }
    }

    /// True while the gesture owner holds an uncommitted draft.
    pub fn is_drafting(&self) -> bool {
        self.gesture
            .is_some_and(|kind| self.tools[kind as usize].is_drafting())
    }

    pub fn text(&self) -> Option<&TextTool> {
        self.tools[ToolKind::Text as usize].as_text()
    }

    pub fn text_mut(&mut self) -> Option<&mut TextTool> {
        self.tool_mut(ToolKind::Text).as_text_mut()
    }
}
