//! Gesture scripts.
//!
//! A script is a JSON array of steps, each tagged with `"op"`, that stands in
//! for the page's pointer stream and the toolbar:
//!
//! ```json
//! [
//!   { "op": "activate" },
//!   { "op": "tool", "kind": "arrow" },
//!   { "op": "options", "stroke_color": "blue" },
//!   { "op": "down", "x": 10, "y": 10 },
//!   { "op": "move", "x": 60, "y": 40 },
//!   { "op": "up", "x": 110, "y": 70 }
//! ]
//! ```
//!
//! Coordinates are viewport coordinates, exactly as a page would deliver them.

use crate::draw::OptionsPatch;
use crate::input::{Dispatch, PointerEvent};
use crate::overlay::Overlay;
use crate::surface::HeadlessHost;
use anyhow::{Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// One host event or toolbar action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Step {
    Activate,
    Deactivate,
    /// Select a tool by name (aliases accepted, unknown names ignored)
    Tool { kind: String },
    /// Merge partial options
    Options(OptionsPatch),
    Down { x: f64, y: f64 },
    Move { x: f64, y: f64 },
    Up { x: f64, y: f64 },
    DoubleClick { x: f64, y: f64 },
    /// Replace the content of the text region being edited
    Input { text: String },
    /// The text region being edited loses focus
    Blur,
    /// Scroll the page to an absolute position
    Scroll { x: f64, y: f64 },
    Clear,
    /// Remove a shape by id, or by its index in the current collection
    Remove {
        #[serde(default)]
        id: Option<String>,
        #[serde(default)]
        index: Option<usize>,
    },
}

/// Outcome of replaying a script.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplayReport {
    /// Steps executed
    pub steps: usize,
    /// Pointer/text events the overlay consumed
    pub handled: usize,
    /// Pointer/text events left to the page
    pub ignored: usize,
    /// Shapes committed during the replay (including ones later removed)
    pub committed: usize,
}

impl ReplayReport {
    fn record(&mut self, dispatch: Dispatch) {
        match dispatch {
            Dispatch::Handled => self.handled += 1,
            Dispatch::Ignored => self.ignored += 1,
        }
    }
}

/// A parsed gesture script.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Script {
    pub steps: Vec<Step>,
}

impl Script {
    /// Parses a script from JSON text.
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).context("Failed to parse gesture script")
    }

    /// Reads and parses a script file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read script {}", path.display()))?;
        let script = Self::from_json(&text)
            .with_context(|| format!("Invalid script {}", path.display()))?;
        info!("Loaded {} steps from {}", script.steps.len(), path.display());
        Ok(script)
    }

    /// Feeds every step into `overlay`, in order.
    pub fn run(&self, overlay: &mut Overlay<HeadlessHost>) -> ReplayReport {
        let mut report = ReplayReport::default();

        for step in &self.steps {
            let before = overlay.shape_count();
            apply(step, overlay, &mut report);
            report.steps += 1;

            let after = overlay.shape_count();
            if after > before {
                report.committed += after - before;
            }
        }

        debug!("Replay finished: {:?}", report);
        report
    }
}

fn apply(step: &Step, overlay: &mut Overlay<HeadlessHost>, report: &mut ReplayReport) {
    match step {
        Step::Activate => overlay.activate(),
        Step::Deactivate => overlay.deactivate(),
        Step::Tool { kind } => {
            overlay.set_tool_by_name(kind);
        }
        Step::Options(patch) => overlay.set_options(patch),
        Step::Down { x, y } => report.record(overlay.pointer_down(PointerEvent::new(*x, *y))),
        Step::Move { x, y } => report.record(overlay.pointer_move(PointerEvent::new(*x, *y))),
        Step::Up { x, y } => report.record(overlay.pointer_up(PointerEvent::new(*x, *y))),
        Step::DoubleClick { x, y } => {
            report.record(overlay.double_click(PointerEvent::new(*x, *y)))
        }
        Step::Input { text } => report.record(overlay.text_input(text)),
        Step::Blur => {
            overlay.focus_lost();
        }
        Step::Scroll { x, y } => overlay.host().scroll_to(*x, *y),
        Step::Clear => overlay.clear(),
        Step::Remove { id, index } => {
            let target = match (id, index) {
                (Some(id), _) => Some(id.clone()),
                (None, Some(index)) => overlay.shapes().get(*index).map(|shape| shape.id.clone()),
                (None, None) => None,
            };
            match target {
                Some(id) => {
                    overlay.remove_shape(&id);
                }
                None => debug!("Remove step matched no shape"),
            }
        }
    }
}
