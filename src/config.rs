use std::time::Duration;

use crate::level::Level;

/// Client timeout applied when none is configured explicitly.
pub const DEFAULT_CLIENT_TIMEOUT: Duration = Duration::from_secs(5);

/// Connection and behavior settings for a Seq handler.
///
/// Built once, then handed to the handler and never mutated. The
/// chained `with_*` constructors each return a new value, so a shared
/// base config can be specialized per handler without locking.
#[derive(Clone, Debug)]
pub struct SeqConfig {
    /// Base URL of the Seq server, e.g. "http://127.0.0.1:5341".
    pub endpoint: String,
    /// API key sent as `X-Seq-ApiKey`. Empty means the header is omitted.
    pub api_key: String,
    /// Records below this level are dropped without building an event.
    pub min_level: Level,
    /// Attach the `source` object (file, line, function) to events.
    pub add_source: bool,
    /// Context key looked up for the `request_id` field. Empty disables
    /// the lookup.
    pub request_id_key: String,
    pub client_timeout: Duration,
}

impl SeqConfig {
    /// Construct a config for the given endpoint with defaults:
    /// Information-and-above, no source tracking, no request-id lookup,
    /// five second client timeout.
    pub fn new(endpoint: impl Into<String>) -> Self {
        SeqConfig {
            endpoint: endpoint.into(),
            api_key: String::new(),
            min_level: Level::INFO,
            add_source: false,
            request_id_key: String::new(),
            client_timeout: DEFAULT_CLIENT_TIMEOUT,
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = api_key.into();
        self
    }

    pub fn with_min_level(mut self, level: Level) -> Self {
        self.min_level = level;
        self
    }

    pub fn with_source_tracking(mut self) -> Self {
        self.add_source = true;
        self
    }

    pub fn with_request_id_key(mut self, key: impl Into<String>) -> Self {
        self.request_id_key = key.into();
        self
    }

    pub fn with_client_timeout(mut self, timeout: Duration) -> Self {
        self.client_timeout = timeout;
        self
    }
}
