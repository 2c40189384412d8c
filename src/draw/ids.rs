//! Unique identifiers for shapes and decorations.

use chrono::Utc;

/// Generates identifiers that are unique for the lifetime of an overlay.
///
/// Ids combine the creation time of the generator with a monotonically
/// increasing counter, e.g. `shape-1760601234567-3`. The counter alone
/// guarantees uniqueness; the timestamp keeps ids from different page loads
/// apart when exported markup is merged.
#[derive(Debug, Clone)]
pub struct IdGenerator {
    session: i64,
    counter: u64,
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::with_session(Utc::now().timestamp_millis())
    }

    /// Creates a generator with a fixed session stamp.
    pub fn with_session(session: i64) -> Self {
        Self {
            session,
            counter: 0,
        }
    }

    /// Next shape id.
    pub fn next_shape_id(&mut self) -> String {
        self.next_with_prefix("shape")
    }

    /// Next id with a custom prefix (marker definitions use `arrowhead`).
    pub fn next_with_prefix(&mut self, prefix: &str) -> String {
        self.counter += 1;
        format!("{prefix}-{}-{}", self.session, self.counter)
    }
}
