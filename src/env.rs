//! Environment variable names used by this crate for convenient
//! configuration from microservices.
//!
//! These are purely helpers; the core handler types remain decoupled
//! from environment access.

use std::time::Duration;

use crate::config::SeqConfig;
use crate::level::Level;

/// Seq ingestion base URL, e.g. `http://127.0.0.1:5341`.
pub const SEQ_ENDPOINT_ENV: &str = "SEQ_ENDPOINT";

/// Optional Seq API key.
pub const SEQ_API_KEY_ENV: &str = "SEQ_API_KEY";

/// Minimum level name (`debug`, `info`, `warn`, `error`).
pub const SEQ_MIN_LEVEL_ENV: &str = "SEQ_MIN_LEVEL";

/// Set to `1` or `true` to attach source locations to events.
pub const SEQ_ADD_SOURCE_ENV: &str = "SEQ_ADD_SOURCE";

/// Context key carrying the request-correlation id.
pub const SEQ_REQUEST_ID_KEY_ENV: &str = "SEQ_REQUEST_ID_KEY";

/// Client timeout in milliseconds.
pub const SEQ_TIMEOUT_MS_ENV: &str = "SEQ_TIMEOUT_MS";

/// Read an environment variable or fall back to a provided default.
pub fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Build a [`SeqConfig`] from `SEQ_*` environment variables.
///
/// Unset or unparsable values fall back to the same defaults as
/// [`SeqConfig::new`].
pub fn seq_config_from_env() -> SeqConfig {
    let mut config = SeqConfig::new(env_or(SEQ_ENDPOINT_ENV, "http://127.0.0.1:5341"))
        .with_api_key(env_or(SEQ_API_KEY_ENV, ""))
        .with_min_level(Level::parse_or_info(&env_or(SEQ_MIN_LEVEL_ENV, "info")))
        .with_request_id_key(env_or(SEQ_REQUEST_ID_KEY_ENV, ""));

    match env_or(SEQ_ADD_SOURCE_ENV, "").as_str() {
        "1" | "true" | "TRUE" => config = config.with_source_tracking(),
        _ => {}
    }

    if let Ok(ms) = env_or(SEQ_TIMEOUT_MS_ENV, "").parse::<u64>() {
        config = config.with_client_timeout(Duration::from_millis(ms));
    }

    config
}

#[cfg(test)]
mod tests {
    use super::*;

    // Single test so the process-global environment is touched from
    // one place only.
    #[test]
    fn builds_config_from_environment() {
        std::env::set_var(SEQ_ENDPOINT_ENV, "http://seq.test:5341");
        std::env::set_var(SEQ_API_KEY_ENV, "abc123");
        std::env::set_var(SEQ_MIN_LEVEL_ENV, "warn");
        std::env::set_var(SEQ_ADD_SOURCE_ENV, "true");
        std::env::set_var(SEQ_REQUEST_ID_KEY_ENV, "request_id");
        std::env::set_var(SEQ_TIMEOUT_MS_ENV, "2500");

        let config = seq_config_from_env();
        assert_eq!(config.endpoint, "http://seq.test:5341");
        assert_eq!(config.api_key, "abc123");
        assert_eq!(config.min_level, Level::WARN);
        assert!(config.add_source);
        assert_eq!(config.request_id_key, "request_id");
        assert_eq!(config.client_timeout, Duration::from_millis(2500));

        for key in [
            SEQ_ENDPOINT_ENV,
            SEQ_API_KEY_ENV,
            SEQ_MIN_LEVEL_ENV,
            SEQ_ADD_SOURCE_ENV,
            SEQ_REQUEST_ID_KEY_ENV,
            SEQ_TIMEOUT_MS_ENV,
        ] {
            std::env::remove_var(key);
        }
    }
}
