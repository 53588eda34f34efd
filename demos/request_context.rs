use std::time::Duration;

use seq_sink::env::seq_config_from_env;
use seq_sink::{Attr, LogContext, Logger};

/// Simulates one HTTP request being handled: a request-scoped logger
/// with bound attributes, a context carrying the correlation id and a
/// deadline, and a request id that shows up on every event.
#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let config = seq_config_from_env().with_request_id_key("request_id");
    let logger = Logger::new(config).expect("failed to build logger");

    // Per-service attributes bound once, carried by every record.
    let service_logger = logger.with_attrs(vec![
        Attr::new("service", "checkout"),
        Attr::new("version", "1.4.2"),
    ]);

    // Per-request context: correlation id plus a delivery deadline.
    let ctx = LogContext::new()
        .with_value("request_id", "c3f1d2a4")
        .with_timeout(Duration::from_secs(2));

    let result = service_logger
        .info(
            &ctx,
            "request received",
            vec![Attr::group(
                "http",
                [
                    Attr::new("method", "POST"),
                    Attr::new("path", "/orders"),
                    Attr::new("status", 201i64),
                ],
            )],
        )
        .await;
    if let Err(err) = result {
        eprintln!("delivery failed: {err}");
    }

    // Opaque JSON payloads are flattened into dotted keys.
    let result = service_logger
        .info(
            &ctx,
            "order summary",
            vec![Attr::raw(
                "order",
                r#"{"id":1042,"total":{"amount":99.5,"currency":"EUR"}}"#,
            )],
        )
        .await;
    if let Err(err) = result {
        eprintln!("delivery failed: {err}");
    }

    println!("done; both events carry request_id=c3f1d2a4");
}
