//! Shape primitives and drawing options.
//!
//! This module defines the plain data the overlay works with:
//! - [`Shape`]: a committed drawing object and its [`ShapeKind`]
//! - [`DrawOptions`] / [`OptionsPatch`]: stroke and fill styling snapshots
//! - [`SmoothPath`]: quadratic smoothing for freehand strokes
//! - [`ShapeCollection`]: the retained list of committed shapes
//! - [`IdGenerator`]: unique shape and decoration ids

pub mod color;
pub mod frame;
pub mod ids;
pub mod options;
pub mod path;
pub mod shape;

// Re-export commonly used types at module level
pub use frame::ShapeCollection;
pub use ids::IdGenerator;
pub use options::{DrawOptions, OptionsPatch};
pub use path::{PathCommand, SmoothPath};
pub use shape::{SHAPE_ID_ATTR, Shape, ShapeKind};

#[allow(unused_imports)]
pub use color::{RED, TRANSPARENT};
