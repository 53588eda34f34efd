use std::time::Duration;

use seq_sink::env::seq_config_from_env;
use seq_sink::{seq_error, seq_info, seq_warn};
use seq_sink::{Attr, LogContext, Logger};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    // Reads SEQ_ENDPOINT and friends; defaults to http://127.0.0.1:5341.
    let config = seq_config_from_env().with_source_tracking();
    let logger = Logger::new(config).expect("failed to build logger");
    let ctx = LogContext::new();

    if let Err(err) = seq_info!(logger, ctx, "service starting on port {}", 8080) {
        eprintln!("delivery failed: {err}");
    }

    let result = seq_warn!(
        logger, ctx, "cache almost full";
        Attr::new("used_mb", 480u64),
        Attr::new("capacity_mb", 512u64),
        Attr::new("ttl", Duration::from_secs(300)),
    );
    if let Err(err) = result {
        eprintln!("delivery failed: {err}");
    }

    let cause = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "upstream refused");
    let result = seq_error!(
        logger, ctx, "payment provider unreachable";
        Attr::error("cause", cause),
        Attr::new("provider", "acme-pay"),
    );
    if let Err(err) = result {
        eprintln!("delivery failed: {err}");
    }

    println!("done; check the Seq UI for three events");
}
