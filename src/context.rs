use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Per-call context passed alongside a record.
///
/// Carries request-scoped values and an optional deadline. Delivery
/// honors whichever fires first, the context deadline or the client
/// timeout. Which value (if any) is copied onto events as `request_id`
/// is chosen by the handler's configured context key.
#[derive(Clone, Debug, Default)]
pub struct LogContext {
    values: HashMap<String, serde_json::Value>,
    deadline: Option<Instant>,
}

impl LogContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn with_timeout(self, timeout: Duration) -> Self {
        let deadline = Instant::now() + timeout;
        self.with_deadline(deadline)
    }

    pub fn value(&self, key: &str) -> Option<&serde_json::Value> {
        self.values.get(key)
    }

    /// The string stored under `key`, when present and actually a string.
    pub fn string_value(&self, key: &str) -> Option<&str> {
        self.values.get(key).and_then(|v| v.as_str())
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Time left until the deadline, saturating at zero once it has
    /// passed. `None` when no deadline was set.
    pub fn remaining(&self) -> Option<Duration> {
        self.deadline
            .map(|d| d.saturating_duration_since(Instant::now()))
    }
}
