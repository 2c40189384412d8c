//! Marker definitions referenced by segment tools.

use crate::surface::{ElementKind, NodeId, Surface};

/// A marker created (or reused) for the gesture in progress.
///
/// Remembers which nodes the gesture itself inserted so a cancelled gesture
/// can put the surface back exactly as it found it.
#[derive(Debug, Clone, Copy)]
pub(crate) struct MarkerDraft {
    pub marker: NodeId,
    created_marker: bool,
    created_defs: Option<NodeId>,
}

impl MarkerDraft {
    /// A marker that already existed before the gesture.
    pub fn reused(marker: NodeId) -> Self {
        Self {
            marker,
            created_marker: false,
            created_defs: None,
        }
    }

    /// Removes whatever this gesture added.
    pub fn rollback(self, surface: &mut dyn Surface) {
        if self.created_marker {
            surface.remove(self.marker);
        }
        if let Some(defs) = self.created_defs
            && surface.children(defs).is_empty()
        {
            surface.remove(defs);
        }
    }
}

/// Creates a `<marker>` with the geometry shared by arrowheads and end
/// markers, inside the surface's `<defs>` (created as the first child of the
/// root on first use).
pub(crate) fn create_marker(surface: &mut dyn Surface, id: &str) -> MarkerDraft {
    let root = surface.root();
    let (defs, created_defs) = match surface.first_child_of_kind(root, ElementKind::Defs) {
        Some(defs) => (defs, None),
        None => {
            let defs = surface.prepend(root, ElementKind::Defs);
            (defs, Some(defs))
        }
    };

    let marker = surface.append(defs, ElementKind::Marker);
    surface.set_attr(marker, "id", id);
    surface.set_attr(marker, "markerWidth", "10");
    surface.set_attr(marker, "markerHeight", "10");
    surface.set_attr(marker, "refX", "9");
    surface.set_attr(marker, "refY", "3");
    surface.set_attr(marker, "orient", "auto");

    MarkerDraft {
        marker,
        created_marker: true,
        created_defs,
    }
}

/// Value for a `marker-end` attribute pointing at `id`.
pub(crate) fn marker_url(id: &str) -> String {
    format!("url(#{id})")
}
