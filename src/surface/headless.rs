//! A page without a browser: fixed metrics, a scrollable viewport and an
//! [`SvgSurface`] per mount.

use super::{Host, PageMetrics, Placement, SurfaceSize, SvgSurface};
use crate::util::Point;
use std::cell::Cell;
use std::rc::Rc;

/// Shared scroll position of a page.
///
/// Surfaces mounted by a [`HeadlessHost`] hold a clone, so scrolling the host
/// moves every surface's client rectangle just like a real page would.
#[derive(Debug, Clone, Default)]
pub struct Viewport {
    scroll: Rc<Cell<Point>>,
}

impl Viewport {
    pub fn scroll(&self) -> Point {
        self.scroll.get()
    }

    pub fn scroll_to(&self, position: Point) {
        self.scroll.set(position);
    }
}

/// In-memory [`Host`] used by the CLI and the tests.
#[derive(Debug, Clone)]
pub struct HeadlessHost {
    metrics: PageMetrics,
    viewport: Viewport,
    listening: bool,
    mounted: usize,
}

impl HeadlessHost {
    pub fn new(metrics: PageMetrics) -> Self {
        Self {
            metrics,
            viewport: Viewport::default(),
            listening: false,
            mounted: 0,
        }
    }

    /// Page whose body and root both measure `width` × `height`.
    pub fn with_page_size(width: f64, height: f64) -> Self {
        Self::new(PageMetrics::uniform(width, height))
    }

    pub fn scroll_to(&self, x: f64, y: f64) {
        self.viewport.scroll_to(Point::new(x, y));
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Whether page-wide pointer listeners are attached.
    pub fn is_listening(&self) -> bool {
        self.listening
    }

    /// Number of surfaces currently attached to the page.
    pub fn mounted_surfaces(&self) -> usize {
        self.mounted
    }
}

impl Default for HeadlessHost {
    fn default() -> Self {
        Self::with_page_size(1280.0, 2000.0)
    }
}

impl Host for HeadlessHost {
    type Surface = SvgSurface;

    fn page_metrics(&self) -> PageMetrics {
        self.metrics
    }

    fn mount(&mut self, size: SurfaceSize, placement: Placement) -> SvgSurface {
        self.mounted += 1;
        SvgSurface::mounted(size, placement, self.viewport.clone())
    }

    fn unmount(&mut self, surface: SvgSurface) {
        self.mounted = self.mounted.saturating_sub(1);
        drop(surface);
    }

    fn attach_listeners(&mut self) {
        self.listening = true;
    }

    fn detach_listeners(&mut self) {
        self.listening = false;
    }
}
