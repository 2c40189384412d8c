//! Input handling and tool state machines.
//!
//! This module turns pointer gestures into committed shapes. It holds the
//! tool selection, one state machine per drawing mode and the registry that
//! routes each gesture to the tool that started it.

pub mod events;
pub mod registry;
pub mod tool;
pub mod tools;

// Re-export commonly used types at module level
pub use events::{Dispatch, PointerEvent};
pub use registry::ToolRegistry;
pub use tool::{ToolKind, UnknownTool};
pub use tools::{TextStyle, Tool, ToolContext};
