//! In-memory SVG surface.

use super::{ElementKind, NodeId, Placement, PointerEvents, Surface, SurfaceSize, Viewport};
use crate::util::{Point, Rect, fmt_num};

const SVG_NS: &str = "http://www.w3.org/2000/svg";
const XHTML_NS: &str = "http://www.w3.org/1999/xhtml";

/// Average glyph advance relative to the font size, used for headless text
/// measurement.
const GLYPH_ADVANCE: f64 = 0.6;
const LINE_HEIGHT: f64 = 1.2;
const DEFAULT_FONT_SIZE: f64 = 16.0;

#[derive(Debug, Clone)]
struct Node {
    kind: ElementKind,
    attrs: Vec<(String, String)>,
    style: Vec<(String, String)>,
    text: Option<String>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    attached: bool,
}

impl Node {
    fn new(kind: ElementKind, parent: Option<NodeId>) -> Self {
        Self {
            kind,
            attrs: Vec::new(),
            style: Vec::new(),
            text: None,
            parent,
            children: Vec::new(),
            attached: true,
        }
    }

    fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    fn num(&self, name: &str) -> Option<f64> {
        self.attr(name).and_then(parse_length)
    }

    fn style(&self, property: &str) -> Option<&str> {
        self.style
            .iter()
            .find(|(key, _)| key == property)
            .map(|(_, value)| value.as_str())
    }
}

/// A retained SVG document held entirely in memory.
///
/// Nodes live in an arena indexed by [`NodeId`]; removed nodes stay in the
/// arena marked as detached so stale handles can never alias new nodes.
#[derive(Debug, Clone)]
pub struct SvgSurface {
    nodes: Vec<Node>,
    root: NodeId,
    size: SurfaceSize,
    /// Position of the surface on the page (before scrolling)
    page_origin: Point,
    viewport: Viewport,
    focused: Option<NodeId>,
}

impl SvgSurface {
    /// Creates a detached surface at the page origin with its own viewport.
    pub fn new(size: SurfaceSize) -> Self {
        Self::mounted(size, Placement::default(), Viewport::default())
    }

    /// Creates a surface placed on a page whose scroll position is `viewport`.
    pub fn mounted(size: SurfaceSize, placement: Placement, viewport: Viewport) -> Self {
        let mut surface = Self {
            nodes: vec![Node::new(ElementKind::Svg, None)],
            root: NodeId::from_raw(0),
            size,
            page_origin: Point::new(0.0, placement.top_offset),
            viewport,
            focused: None,
        };

        let root = surface.root;
        surface.set_attr(root, "width", &format!("{}px", fmt_num(size.width)));
        surface.set_attr(root, "height", &format!("{}px", fmt_num(size.height)));
        surface.set_style(root, "position", "absolute");
        surface.set_style(root, "top", &format!("{}px", fmt_num(placement.top_offset)));
        surface.set_style(root, "left", "0");
        surface.set_style(root, "z-index", &placement.z_index.to_string());
        surface.set_pointer_events(PointerEvents::None);
        surface
    }

    pub fn size(&self) -> SurfaceSize {
        self.size
    }

    fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.raw()).filter(|node| node.attached)
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.raw()).filter(|node| node.attached)
    }

    fn insert(&mut self, parent: NodeId, kind: ElementKind, at_front: bool) -> NodeId {
        let id = NodeId::from_raw(self.nodes.len());
        let parent = if self.node(parent).is_some() {
            parent
        } else {
            log::debug!("Parent {parent:?} is detached; attaching {} to root", kind.tag());
            self.root
        };

        self.nodes.push(Node::new(kind, Some(parent)));
        if let Some(parent_node) = self.node_mut(parent) {
            if at_front {
                parent_node.children.insert(0, id);
            } else {
                parent_node.children.push(id);
            }
        }
        id
    }

    fn detach_subtree(&mut self, id: NodeId) {
        let children = match self.nodes.get_mut(id.raw()) {
            Some(node) => {
                node.attached = false;
                std::mem::take(&mut node.children)
            }
            None => return,
        };
        if self.focused == Some(id) {
            self.focused = None;
        }
        for child in children {
            self.detach_subtree(child);
        }
    }

    /// Attached nodes in document order, root first.
    fn walk(&self) -> Vec<NodeId> {
        let mut order = Vec::new();
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            let Some(node) = self.node(id) else { continue };
            order.push(id);
            stack.extend(node.children.iter().rev().copied());
        }
        order
    }

    fn measure_text(&self, node: &Node) -> (f64, f64) {
        let font_size = node
            .style("font-size")
            .and_then(parse_length)
            .unwrap_or(DEFAULT_FONT_SIZE);
        let text = node.text.as_deref().unwrap_or("");

        let columns = text.lines().map(|line| line.chars().count()).max().unwrap_or(0);
        let rows = text.lines().count().max(1);

        let padding = node.style("padding").map(parse_padding).unwrap_or((0.0, 0.0));
        let border = match node.style("border") {
            Some(border) if border != "none" => border
                .split_whitespace()
                .find_map(parse_length)
                .unwrap_or(0.0),
            _ => 0.0,
        };

        let width = columns as f64 * font_size * GLYPH_ADVANCE + 2.0 * (padding.1 + border);
        let height = rows as f64 * font_size * LINE_HEIGHT + 2.0 * (padding.0 + border);

        let min_width = node.style("min-width").and_then(parse_length).unwrap_or(0.0);
        let min_height = node.style("min-height").and_then(parse_length).unwrap_or(0.0);

        (width.max(min_width), height.max(min_height))
    }

    fn write_node(&self, id: NodeId, out: &mut String) {
        let Some(node) = self.node(id) else { return };
        let tag = node.kind.tag();

        out.push('<');
        out.push_str(tag);

        let implicit_ns = match node.kind {
            ElementKind::Svg => Some(SVG_NS),
            ElementKind::Div => Some(XHTML_NS),
            _ => None,
        };
        if let Some(ns) = implicit_ns
            && node.attr("xmlns").is_none()
        {
            out.push_str(&format!(" xmlns=\"{ns}\""));
        }

        for (name, value) in &node.attrs {
            out.push_str(&format!(" {name}=\"{}\"", escape(value)));
        }

        if !node.style.is_empty() {
            let declarations: Vec<String> = node
                .style
                .iter()
                .map(|(property, value)| format!("{property}: {value}"))
                .collect();
            out.push_str(&format!(" style=\"{}\"", escape(&declarations.join("; "))));
        }

        let text = node.text.as_deref().unwrap_or("");
        if node.children.is_empty() && text.is_empty() && node.kind != ElementKind::Div {
            out.push_str("/>");
            return;
        }

        out.push('>');
        out.push_str(&escape(text));
        for child in &node.children {
            self.write_node(*child, out);
        }
        out.push_str(&format!("</{tag}>"));
    }
}

impl Surface for SvgSurface {
    fn root(&self) -> NodeId {
        self.root
    }

    fn append(&mut self, parent: NodeId, kind: ElementKind) -> NodeId {
        self.insert(parent, kind, false)
    }

    fn prepend(&mut self, parent: NodeId, kind: ElementKind) -> NodeId {
        self.insert(parent, kind, true)
    }

    fn remove(&mut self, node: NodeId) -> bool {
        if node == self.root {
            return false;
        }
        let Some(parent) = self.node(node).and_then(|n| n.parent) else {
            return false;
        };
        if let Some(parent_node) = self.node_mut(parent) {
            parent_node.children.retain(|child| *child != node);
        }
        self.detach_subtree(node);
        true
    }

    fn contains(&self, node: NodeId) -> bool {
        self.node(node).is_some()
    }

    fn kind(&self, node: NodeId) -> Option<ElementKind> {
        self.node(node).map(|n| n.kind)
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.node(node).and_then(|n| n.parent)
    }

    fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.node(node)
            .map(|n| n.children.clone())
            .unwrap_or_default()
    }

    fn set_attr(&mut self, node: NodeId, name: &str, value: &str) {
        let Some(node) = self.node_mut(node) else { return };
        match node.attrs.iter_mut().find(|(key, _)| key == name) {
            Some((_, existing)) => *existing = value.to_string(),
            None => node.attrs.push((name.to_string(), value.to_string())),
        }
    }

    fn attr(&self, node: NodeId, name: &str) -> Option<&str> {
        self.node(node)?.attr(name)
    }

    fn remove_attr(&mut self, node: NodeId, name: &str) {
        if let Some(node) = self.node_mut(node) {
            node.attrs.retain(|(key, _)| key != name);
        }
    }

    fn set_style(&mut self, node: NodeId, property: &str, value: &str) {
        let Some(node) = self.node_mut(node) else { return };
        match node.style.iter_mut().find(|(key, _)| key == property) {
            Some((_, existing)) => *existing = value.to_string(),
            None => node.style.push((property.to_string(), value.to_string())),
        }
    }

    fn style(&self, node: NodeId, property: &str) -> Option<&str> {
        self.node(node)?.style(property)
    }

    fn set_text(&mut self, node: NodeId, text: &str) {
        if let Some(node) = self.node_mut(node) {
            node.text = Some(text.to_string());
        }
    }

    fn text(&self, node: NodeId) -> Option<&str> {
        self.node(node)?.text.as_deref()
    }

    fn find_by_id(&self, id: &str) -> Option<NodeId> {
        self.walk()
            .into_iter()
            .find(|node| self.attr(*node, "id") == Some(id))
    }

    fn node_count(&self) -> usize {
        self.walk().len() - 1
    }

    fn bounding_box(&self, id: NodeId) -> Option<Rect> {
        let node = self.node(id)?;
        match node.kind {
            ElementKind::Svg => Some(Rect::new(0.0, 0.0, self.size.width, self.size.height)),
            ElementKind::Line => {
                let (x1, y1) = (node.num("x1")?, node.num("y1")?);
                let (x2, y2) = (node.num("x2")?, node.num("y2")?);
                Some(Rect::from_min_max(
                    x1.min(x2),
                    y1.min(y2),
                    x1.max(x2),
                    y1.max(y2),
                ))
            }
            ElementKind::Rect | ElementKind::ForeignObject => Some(Rect::new(
                node.num("x").unwrap_or(0.0),
                node.num("y").unwrap_or(0.0),
                node.num("width").unwrap_or(0.0),
                node.num("height").unwrap_or(0.0),
            )),
            ElementKind::Circle => {
                let r = node.num("r").unwrap_or(0.0);
                let (cx, cy) = (node.num("cx").unwrap_or(0.0), node.num("cy").unwrap_or(0.0));
                Some(Rect::new(cx - r, cy - r, 2.0 * r, 2.0 * r))
            }
            ElementKind::Path => bounds_of(&numbers_in(node.attr("d")?)),
            ElementKind::Polygon => bounds_of(&numbers_in(node.attr("points")?)),
            ElementKind::Div => {
                let origin = node
                    .parent
                    .and_then(|parent| self.bounding_box(parent))
                    .map(|rect| rect.origin())
                    .unwrap_or_default();
                let (width, height) = self.measure_text(node);
                Some(Rect::new(origin.x, origin.y, width, height))
            }
            ElementKind::Defs | ElementKind::Marker => None,
        }
    }

    fn client_rect(&self) -> Rect {
        let scroll = self.viewport.scroll();
        Rect::new(
            self.page_origin.x - scroll.x,
            self.page_origin.y - scroll.y,
            self.size.width,
            self.size.height,
        )
    }

    fn set_pointer_events(&mut self, mode: PointerEvents) {
        let root = self.root;
        self.set_style(root, "pointer-events", mode.as_css());
    }

    fn pointer_events(&self) -> PointerEvents {
        match self.style(self.root, "pointer-events") {
            Some("all") => PointerEvents::All,
            _ => PointerEvents::None,
        }
    }

    fn focus(&mut self, node: NodeId) {
        if self.contains(node) {
            self.focused = Some(node);
        }
    }

    fn focused(&self) -> Option<NodeId> {
        self.focused.filter(|node| self.contains(*node))
    }

    fn to_markup(&self) -> String {
        let mut out = String::new();
        self.write_node(self.root, &mut out);
        out
    }
}

/// Parses `12`, `12.5` or `12px`.
fn parse_length(value: &str) -> Option<f64> {
    value.trim().trim_end_matches("px").parse().ok()
}

/// Parses a CSS padding shorthand into (vertical, horizontal).
fn parse_padding(value: &str) -> (f64, f64) {
    let parts: Vec<f64> = value.split_whitespace().filter_map(parse_length).collect();
    match parts.as_slice() {
        [all] => (*all, *all),
        [vertical, horizontal, ..] => (*vertical, *horizontal),
        [] => (0.0, 0.0),
    }
}

/// Extracts every number from path data or a point list.
fn numbers_in(data: &str) -> Vec<f64> {
    data.split(|c: char| c.is_whitespace() || c == ',' || c.is_ascii_alphabetic())
        .filter_map(|token| token.parse().ok())
        .collect()
}

fn bounds_of(numbers: &[f64]) -> Option<Rect> {
    let mut pairs = numbers.chunks_exact(2);
    let first = pairs.next()?;
    let (mut min_x, mut min_y, mut max_x, mut max_y) = (first[0], first[1], first[0], first[1]);
    for pair in pairs {
        min_x = min_x.min(pair[0]);
        max_x = max_x.max(pair[0]);
        min_y = min_y.min(pair[1]);
        max_y = max_y.max(pair[1]);
    }
    Some(Rect::from_min_max(min_x, min_y, max_x, max_y))
}

fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
