//! Host boundary: the drawable vector surface and the page it lives on.
//!
//! The overlay never talks to a concrete rendering backend. It drives:
//! - a [`Surface`]: a retained tree of vector nodes it can create, style,
//!   measure, remove and serialise to markup
//! - a [`Host`]: the page that reports its rendered size, mounts/unmounts
//!   surfaces and attaches the page-wide pointer listeners
//!
//! [`SvgSurface`] and [`HeadlessHost`] implement both boundaries in memory,
//! which is what the CLI and the test-suite run against.

pub mod headless;
pub mod svg;

pub use headless::{HeadlessHost, Viewport};
pub use svg::SvgSurface;

use crate::util::Rect;
use serde::{Deserialize, Serialize};

/// Opaque handle to a node on a surface.
///
/// Handles stay valid (and are never reused) for the lifetime of the surface
/// that issued them; a removed node simply stops being
/// [`contained`](Surface::contains).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(usize);

impl NodeId {
    pub const fn from_raw(raw: usize) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> usize {
        self.0
    }
}

/// Element types a surface can create.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    /// Surface root
    Svg,
    /// Container for reusable definitions (markers)
    Defs,
    Marker,
    Polygon,
    Circle,
    Path,
    Line,
    Rect,
    /// Embedded HTML region hosting editable text
    ForeignObject,
    /// HTML block element inside a foreign object
    Div,
}

impl ElementKind {
    /// Markup tag name.
    pub fn tag(self) -> &'static str {
        match self {
            ElementKind::Svg => "svg",
            ElementKind::Defs => "defs",
            ElementKind::Marker => "marker",
            ElementKind::Polygon => "polygon",
            ElementKind::Circle => "circle",
            ElementKind::Path => "path",
            ElementKind::Line => "line",
            ElementKind::Rect => "rect",
            ElementKind::ForeignObject => "foreignObject",
            ElementKind::Div => "div",
        }
    }
}

/// Whether the surface intercepts pointer input.
///
/// Between gestures the surface is click-through (`None`) so the page stays
/// usable; during a gesture it captures input (`All`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PointerEvents {
    #[default]
    None,
    All,
}

impl PointerEvents {
    pub fn as_css(self) -> &'static str {
        match self {
            PointerEvents::None => "none",
            PointerEvents::All => "all",
        }
    }
}

/// A drawable vector surface.
///
/// Object safe so tools can work against `&mut dyn Surface` regardless of
/// which host created it. Operations on removed or unknown nodes are no-ops.
pub trait Surface {
    /// The root node; tools append their renderables here.
    fn root(&self) -> NodeId;

    /// Creates a node as the last child of `parent`.
    fn append(&mut self, parent: NodeId, kind: ElementKind) -> NodeId;

    /// Creates a node as the first child of `parent`.
    fn prepend(&mut self, parent: NodeId, kind: ElementKind) -> NodeId;

    /// Detaches `node` and its subtree. Returns false if it was not attached.
    fn remove(&mut self, node: NodeId) -> bool;

    /// Returns true if `node` is currently attached to this surface.
    fn contains(&self, node: NodeId) -> bool;

    fn kind(&self, node: NodeId) -> Option<ElementKind>;

    fn parent(&self, node: NodeId) -> Option<NodeId>;

    fn children(&self, node: NodeId) -> Vec<NodeId>;

    fn set_attr(&mut self, node: NodeId, name: &str, value: &str);

    fn attr(&self, node: NodeId, name: &str) -> Option<&str>;

    fn remove_attr(&mut self, node: NodeId, name: &str);

    /// Sets an inline style property (`border`, `cursor`, ...).
    fn set_style(&mut self, node: NodeId, property: &str, value: &str);

    fn style(&self, node: NodeId, property: &str) -> Option<&str>;

    /// Replaces the node's text content.
    fn set_text(&mut self, node: NodeId, text: &str);

    fn text(&self, node: NodeId) -> Option<&str>;

    /// Finds an attached node by its `id` attribute.
    fn find_by_id(&self, id: &str) -> Option<NodeId>;

    /// First direct child of `parent` with the given kind.
    fn first_child_of_kind(&self, parent: NodeId, kind: ElementKind) -> Option<NodeId> {
        self.children(parent)
            .into_iter()
            .find(|child| self.kind(*child) == Some(kind))
    }

    /// Number of attached nodes below the root.
    fn node_count(&self) -> usize;

    /// Rendered bounding box of `node` in surface coordinates.
    fn bounding_box(&self, node: NodeId) -> Option<Rect>;

    /// Current position and size of the surface in viewport coordinates.
    ///
    /// Changes whenever the page scrolls, so callers must query it per event.
    fn client_rect(&self) -> Rect;

    fn set_pointer_events(&mut self, mode: PointerEvents);

    fn pointer_events(&self) -> PointerEvents;

    /// Moves keyboard focus to `node`.
    fn focus(&mut self, node: NodeId);

    fn focused(&self) -> Option<NodeId>;

    /// Serialises the whole surface to markup.
    fn to_markup(&self) -> String;
}

/// Rendered size of one page element, as reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ElementMetrics {
    pub scroll_width: f64,
    pub scroll_height: f64,
    pub offset_width: f64,
    pub offset_height: f64,
    pub client_width: f64,
    pub client_height: f64,
}

impl ElementMetrics {
    /// Metrics of an element whose every measure equals `width` × `height`.
    pub fn uniform(width: f64, height: f64) -> Self {
        Self {
            scroll_width: width,
            scroll_height: height,
            offset_width: width,
            offset_height: height,
            client_width: width,
            client_height: height,
        }
    }
}

/// Measurements of the page's body and root elements.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PageMetrics {
    pub body: ElementMetrics,
    pub html: ElementMetrics,
}

impl PageMetrics {
    pub fn uniform(width: f64, height: f64) -> Self {
        Self {
            body: ElementMetrics::uniform(width, height),
            html: ElementMetrics::uniform(width, height),
        }
    }

    /// Size that covers the whole document, including content below the
    /// visible viewport.
    ///
    /// Takes the maximum of the body's scroll/offset sizes and the root's
    /// client/scroll/offset sizes on each axis.
    pub fn document_size(&self) -> SurfaceSize {
        let width = [
            self.body.scroll_width,
            self.body.offset_width,
            self.html.client_width,
            self.html.scroll_width,
            self.html.offset_width,
        ]
        .into_iter()
        .fold(0.0, f64::max);

        let height = [
            self.body.scroll_height,
            self.body.offset_height,
            self.html.client_height,
            self.html.scroll_height,
            self.html.offset_height,
        ]
        .into_iter()
        .fold(0.0, f64::max);

        SurfaceSize { width, height }
    }
}

/// Fixed size of a mounted surface.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SurfaceSize {
    pub width: f64,
    pub height: f64,
}

/// Where and how a surface is mounted on the page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// Stacking order above page content
    pub z_index: i32,
    /// Vertical offset of the surface inside its container
    pub top_offset: f64,
}

impl Default for Placement {
    fn default() -> Self {
        Self {
            z_index: 9999,
            top_offset: 0.0,
        }
    }
}

/// The page an overlay is injected into.
pub trait Host {
    type Surface: Surface + 'static;

    /// Measures the page's rendered size.
    fn page_metrics(&self) -> PageMetrics;

    /// Creates a surface of `size` and attaches it to the page.
    fn mount(&mut self, size: SurfaceSize, placement: Placement) -> Self::Surface;

    /// Detaches `surface` (and everything drawn on it) from the page.
    fn unmount(&mut self, surface: Self::Surface);

    /// Starts delivering page-wide pointer events to the overlay.
    fn attach_listeners(&mut self);

    /// Stops delivering page-wide pointer events.
    fn detach_listeners(&mut self);
}
