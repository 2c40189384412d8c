//! Overlay surface manager.
//!
//! [`Overlay`] is the public face of the crate. It owns the drawing surface
//! lifecycle (activate/deactivate), the retained shape collection and the
//! current option snapshot, and turns page-level pointer events into tool
//! gestures through the [`ToolRegistry`].

use crate::config::Config;
use crate::draw::{DrawOptions, IdGenerator, OptionsPatch, Shape, ShapeCollection, ShapeKind};
use crate::input::{Dispatch, PointerEvent, TextStyle, ToolContext, ToolKind, ToolRegistry};
use crate::surface::{Host, NodeId, Placement, PointerEvents, Surface};
use crate::util::Point;
use log::{debug, info, warn};
use std::rc::Rc;

#[cfg(test)]
mod tests;

/// Drawing overlay bound to one host page.
///
/// While inactive there is no surface: pointer events are ignored and
/// [`export_markup`](Self::export_markup) returns an empty string. Every
/// operation is infallible; requests that cannot apply (unknown tool name,
/// unknown shape id, stray pointer-up) are no-ops.
pub struct Overlay<H: Host> {
    /// Page the overlay is injected into
    host: H,
    /// Current option snapshot, shared with every tool
    options: Rc<DrawOptions>,
    /// One instance per tool kind plus the gesture guard
    registry: ToolRegistry,
    /// Mounted surface; `None` while inactive
    surface: Option<H::Surface>,
    /// Committed shapes in commit order
    shapes: ShapeCollection,
    ids: IdGenerator,
    /// Vertical offset used when mounting
    top_offset: f64,
    /// Retained shape limit (0 = unlimited)
    max_shapes: usize,
}

impl<H: Host> Overlay<H> {
    /// Creates an inactive overlay with the line tool selected.
    pub fn new(host: H, options: DrawOptions, text_style: TextStyle) -> Self {
        let options = Rc::new(options);
        Self {
            host,
            registry: ToolRegistry::new(Rc::clone(&options), &text_style, ToolKind::Line),
            options,
            surface: None,
            shapes: ShapeCollection::new(),
            ids: IdGenerator::new(),
            top_offset: 0.0,
            max_shapes: 0,
        }
    }

    /// Creates an inactive overlay using the tool, styling, placement and
    /// limits from `config`.
    pub fn from_config(host: H, config: &Config) -> Self {
        let mut overlay = Self::new(host, config.draw_options(), config.text_style());
        overlay.registry.select(config.drawing.default_tool);
        overlay.top_offset = config.placement().top_offset;
        overlay.max_shapes = config.drawing.max_shapes;
        overlay
    }

    /// Replaces the id generator (fixed sessions give reproducible ids).
    pub fn with_ids(mut self, ids: IdGenerator) -> Self {
        self.ids = ids;
        self
    }

    // ------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------

    /// Mounts a surface covering the whole document and starts listening for
    /// pointer events. No-op if already active.
    pub fn activate(&mut self) {
        if self.surface.is_some() {
            debug!("Overlay already active");
            return;
        }

        let size = self.host.page_metrics().document_size();
        let placement = Placement {
            z_index: self.options.z_index,
            top_offset: self.top_offset,
        };
        let mut surface = self.host.mount(size, placement);
        surface.set_pointer_events(PointerEvents::None);
        self.host.attach_listeners();
        self.surface = Some(surface);

        info!(
            "Overlay activated ({}x{} surface, tool {})",
            size.width,
            size.height,
            self.registry.active()
        );
    }

    /// Tears down the surface with everything drawn on it. Drafts and text
    /// editing are cancelled; committed shapes are forgotten. No-op if
    /// already inactive.
    pub fn deactivate(&mut self) {
        let Some(mut surface) = self.surface.take() else {
            debug!("Overlay already inactive");
            return;
        };

        self.registry.cancel(&mut surface);
        self.registry.abandon();
        self.host.detach_listeners();
        self.host.unmount(surface);
        let dropped = self.shapes.drain().len();

        info!("Overlay deactivated ({} shapes discarded)", dropped);
    }

    pub fn is_active(&self) -> bool {
        self.surface.is_some()
    }

    // ------------------------------------------------------------------
    // Tools and options
    // ------------------------------------------------------------------

    /// Selects the tool for the next gesture.
    pub fn set_tool(&mut self, kind: ToolKind) {
        self.registry.select(kind);
    }

    /// Selects a tool by name; unknown names are ignored (returns false).
    pub fn set_tool_by_name(&mut self, name: &str) -> bool {
        self.registry.select_by_name(name)
    }

    pub fn active_tool(&self) -> ToolKind {
        self.registry.active()
    }

    /// Merges `patch` into the current options and hands the new snapshot
    /// to every tool. Shapes already drawn keep their styling, apart from
    /// the most recent marker decorations.
    pub fn set_options(&mut self, patch: &OptionsPatch) {
        if patch.is_empty() {
            return;
        }
        self.options = Rc::new(self.options.merged(patch));
        self.registry.update_options(&self.options);
        if let Some(surface) = self.surface.as_mut() {
            self.registry.repaint_decorations(surface);
        }
        debug!("Options updated: {:?}", self.options);
    }

    pub fn options(&self) -> &DrawOptions {
        &self.options
    }

    // ------------------------------------------------------------------
    // Shapes
    // ------------------------------------------------------------------

    /// Removes every committed shape. Drafts in progress are left alone.
    pub fn clear(&mut self) {
        if self.shapes.is_empty() {
            debug!("Nothing to clear");
            return;
        }
        let shapes = self.shapes.drain();
        if let Some(surface) = self.surface.as_mut() {
            for shape in &shapes {
                surface.remove(shape.node);
            }
        }
        info!("Cleared {} shapes", shapes.len());
    }

    /// Removes one shape by id. Returns false (and changes nothing) when the
    /// id is unknown.
    pub fn remove_shape(&mut self, id: &str) -> bool {
        let Some(shape) = self.shapes.remove(id) else {
            debug!("No shape with id {id}");
            return false;
        };
        if let Some(surface) = self.surface.as_mut() {
            surface.remove(shape.node);
        }
        true
    }

    /// Copy of the committed shapes in commit order.
    pub fn shapes(&self) -> Vec<Shape> {
        self.shapes.snapshot()
    }

    pub fn shape_count(&self) -> usize {
        self.shapes.len()
    }

    /// Serialises the surface; empty when inactive.
    pub fn export_markup(&self) -> String {
        self.surface
            .as_ref()
            .map(|surface| surface.to_markup())
            .unwrap_or_default()
    }

    // ------------------------------------------------------------------
    // Host events
    // ------------------------------------------------------------------

    /// Starts a gesture (or a text drag) at the pointer position.
    pub fn pointer_down(&mut self, event: PointerEvent) -> Dispatch {
        let Some(point) = self.surface_point(event) else {
            return Dispatch::Ignored;
        };

        if let Some(region) = self.editing_region() {
            if self.region_contains(region, point) {
                // Caret placement inside the editor belongs to the page.
                return Dispatch::Ignored;
            }
            self.focus_lost();
        }

        let Some(surface) = self.surface.as_mut() else {
            return Dispatch::Ignored;
        };

        if let Some(region) = text_region_at(&self.shapes, &*surface, point)
            && let Some(text) = self.registry.text_mut()
        {
            text.begin_drag(region, point, surface);
            surface.set_pointer_events(PointerEvents::All);
            return Dispatch::Handled;
        }

        let mut ctx = ToolContext {
            surface,
            ids: &mut self.ids,
        };
        if !self.registry.start(point, &mut ctx) {
            return Dispatch::Ignored;
        }
        ctx.surface.set_pointer_events(PointerEvents::All);
        Dispatch::Handled
    }

    /// Updates the gesture (or text drag) in flight.
    pub fn pointer_move(&mut self, event: PointerEvent) -> Dispatch {
        let Some(point) = self.surface_point(event) else {
            return Dispatch::Ignored;
        };
        let Some(surface) = self.surface.as_mut() else {
            return Dispatch::Ignored;
        };

        if let Some(text) = self.registry.text_mut()
            && text.drag_to(point, surface)
        {
            return Dispatch::Handled;
        }

        let mut ctx = ToolContext {
            surface,
            ids: &mut self.ids,
        };
        if self.registry.move_to(point, &mut ctx) {
            Dispatch::Handled
        } else {
            Dispatch::Ignored
        }
    }

    /// Finishes the gesture in flight, retaining the committed shape, and
    /// makes the surface click-through again.
    pub fn pointer_up(&mut self, event: PointerEvent) -> Dispatch {
        let Some(point) = self.surface_point(event) else {
            return Dispatch::Ignored;
        };
        let Some(surface) = self.surface.as_mut() else {
            return Dispatch::Ignored;
        };

        if let Some(text) = self.registry.text_mut()
            && text.end_drag(surface)
        {
            surface.set_pointer_events(PointerEvents::None);
            return Dispatch::Handled;
        }

        if self.registry.gesture().is_none() {
            return Dispatch::Ignored;
        }

        let mut ctx = ToolContext {
            surface,
            ids: &mut self.ids,
        };
        let committed = self.registry.end(point, &mut ctx);
        ctx.surface.set_pointer_events(PointerEvents::None);

        if let Some(shape) = committed {
            self.retain(shape);
        }
        Dispatch::Handled
    }

    /// Re-opens a committed text region for editing.
    pub fn double_click(&mut self, event: PointerEvent) -> Dispatch {
        let Some(point) = self.surface_point(event) else {
            return Dispatch::Ignored;
        };

        if let Some(region) = self.editing_region() {
            if self.region_contains(region, point) {
                return Dispatch::Ignored;
            }
            self.focus_lost();
        }

        let Some(surface) = self.surface.as_mut() else {
            return Dispatch::Ignored;
        };
        let Some(region) = text_region_at(&self.shapes, &*surface, point) else {
            return Dispatch::Ignored;
        };
        let reopened = self
            .registry
            .text_mut()
            .is_some_and(|text| text.reopen(region, surface));
        if reopened {
            Dispatch::Handled
        } else {
            Dispatch::Ignored
        }
    }

    /// Replaces the content of the text region being edited.
    pub fn text_input(&mut self, content: &str) -> Dispatch {
        let Some(surface) = self.surface.as_mut() else {
            return Dispatch::Ignored;
        };
        let accepted = self
            .registry
            .text_mut()
            .is_some_and(|text| text.input(content, surface));
        if accepted {
            Dispatch::Handled
        } else {
            Dispatch::Ignored
        }
    }

    /// Delivers loss of focus to the text region being edited.
    ///
    /// This is the commit point for text: a new region with content becomes
    /// a shape, which is retained and returned. Blank new regions are
    /// discarded; reopened regions are frozen again and keep their shape.
    pub fn focus_lost(&mut self) -> Option<Shape> {
        let surface = self.surface.as_mut()?;
        let text = self.registry.text_mut()?;
        let mut ctx = ToolContext {
            surface,
            ids: &mut self.ids,
        };
        let shape = text.finalize(&mut ctx)?;
        self.retain(shape.clone()).then_some(shape)
    }

    /// True while a pointer gesture is in flight.
    pub fn is_drawing(&self) -> bool {
        self.registry.gesture().is_some()
    }

    /// True while a text region accepts input.
    pub fn is_editing_text(&self) -> bool {
        self.editing_region().is_some()
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn surface(&self) -> Option<&H::Surface> {
        self.surface.as_ref()
    }

    // ------------------------------------------------------------------
    // Helpers
    // ------------------------------------------------------------------

    /// Converts viewport coordinates using the surface's current client
    /// rectangle, queried per event so scrolling mid-gesture stays aligned.
    fn surface_point(&self, event: PointerEvent) -> Option<Point> {
        let surface = self.surface.as_ref()?;
        Some(event.to_surface(surface.client_rect().origin()))
    }

    fn editing_region(&self) -> Option<NodeId> {
        self.registry.text()?.editing_region()
    }

    fn region_contains(&self, region: NodeId, point: Point) -> bool {
        self.surface
            .as_ref()
            .and_then(|surface| surface.bounding_box(region))
            .is_some_and(|rect| rect.contains(point))
    }

    /// Adds a committed shape to the collection, or removes its renderable
    /// again when the collection is full.
    fn retain(&mut self, shape: Shape) -> bool {
        match self.shapes.try_push(shape, self.max_shapes) {
            Ok(()) => true,
            Err(rejected) => {
                warn!(
                    "Shape limit of {} reached, discarding {} {}",
                    self.max_shapes, rejected.kind, rejected.id
                );
                if let Some(surface) = self.surface.as_mut() {
                    surface.remove(rejected.node);
                }
                false
            }
        }
    }
}

/// Topmost committed text region under `point`.
fn text_region_at(shapes: &ShapeCollection, surface: &dyn Surface, point: Point) -> Option<NodeId> {
    shapes
        .iter()
        .rev()
        .filter(|shape| shape.kind == ShapeKind::Text)
        .find(|shape| {
            surface
                .bounding_box(shape.node)
                .is_some_and(|rect| rect.contains(point))
        })
        .map(|shape| shape.node)
}
