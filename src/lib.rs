//! Library exports for the drawover overlay.
//!
//! Exposes the overlay controller, its tools and the surface abstraction so
//! that hosts (a browser extension shim, the replay CLI, tests) can drive the
//! same state machine and share configuration handling with the main binary.

pub mod config;
pub mod draw;
pub mod export;
pub mod input;
pub mod overlay;
pub mod replay;
pub mod surface;
pub mod util;

pub use config::Config;
pub use draw::{DrawOptions, OptionsPatch, Shape, ShapeKind};
pub use input::{Dispatch, PointerEvent, ToolKind};
pub use overlay::Overlay;
pub use replay::{ReplayReport, Script, Step};
pub use surface::{HeadlessHost, Host, Surface};
