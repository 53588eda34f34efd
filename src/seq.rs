use std::error::Error;
use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde_json::{Map, Value};
use tracing::debug;

use crate::config::SeqConfig;
use crate::context::LogContext;
use crate::error::SeqError;
use crate::event::build_event;
use crate::handler::LogHandler;
use crate::level::Level;
use crate::record::{Attr, Record};

/// Content type for newline-delimited CLEF payloads.
pub const CLEF_CONTENT_TYPE: &str = "application/vnd.serilog.clef";

/// Header carrying the optional API key.
pub const API_KEY_HEADER: &str = "X-Seq-ApiKey";

/// Ingestion path appended to the configured endpoint.
pub const INGEST_PATH: &str = "/ingest/clef";

/// Seq implementation of [`LogHandler`] using the CLEF HTTP interface.
///
/// Each handled record becomes exactly one POST; there is no batching
/// and no retry. Derived handlers share the HTTP client and connection
/// pool but own their base-attribute lists exclusively.
#[derive(Clone)]
pub struct SeqHandler {
    config: SeqConfig,
    client: Client,
    attrs: Vec<Attr>,
}

impl SeqHandler {
    /// Construct a new handler using the provided configuration.
    ///
    /// **Parameters**
    /// - `config`: [`SeqConfig`] describing endpoint, API key, minimum
    ///   level and timeout.
    ///
    /// **Returns**
    /// - A ready-to-use [`SeqHandler`], or [`SeqError::Http`] if the
    ///   HTTP client could not be built.
    pub fn new(config: SeqConfig) -> Result<Self, SeqError> {
        let client = Client::builder().timeout(config.client_timeout).build()?;
        debug!(
            endpoint = %config.endpoint,
            min_level = %config.min_level,
            "seq handler initialized"
        );
        Ok(SeqHandler {
            config,
            client,
            attrs: Vec::new(),
        })
    }

    fn ingest_url(&self) -> Result<Url, url::ParseError> {
        Url::parse(&format!("{}{}", self.config.endpoint, INGEST_PATH))
    }

    /// Deliver one already-built CLEF document.
    ///
    /// **Returns**
    /// - `Ok(())` exactly when the server answered 201 Created.
    /// - [`SeqError::Rejected`] for any other status, carrying the
    ///   status code and the response body verbatim.
    /// - [`SeqError::Serialize`], [`SeqError::Request`] or
    ///   [`SeqError::Http`] when the event never reached the server.
    pub async fn deliver(
        &self,
        ctx: &LogContext,
        event: &Map<String, Value>,
    ) -> Result<(), SeqError> {
        let mut body = serde_json::to_vec(event)?;
        body.push(b'\n');

        let mut request = self
            .client
            .post(self.ingest_url()?)
            .header(reqwest::header::CONTENT_TYPE, CLEF_CONTENT_TYPE)
            .body(body);

        if !self.config.api_key.is_empty() {
            request = request.header(API_KEY_HEADER, self.config.api_key.clone());
        }

        // A per-request timeout replaces the client-level one, so take
        // whichever of the two fires first.
        if let Some(remaining) = ctx.remaining() {
            request = request.timeout(remaining.min(self.config.client_timeout));
        }

        let response = request.send().await?;
        let status = response.status();
        if status != StatusCode::CREATED {
            let body = response.text().await.unwrap_or_default();
            return Err(SeqError::Rejected { status, body });
        }

        Ok(())
    }
}

#[async_trait]
impl LogHandler for SeqHandler {
    fn enabled(&self, _ctx: &LogContext, level: Level) -> bool {
        level >= self.config.min_level
    }

    async fn handle(
        &self,
        ctx: &LogContext,
        record: &Record,
    ) -> Result<(), Box<dyn Error + Send + Sync>> {
        if !self.enabled(ctx, record.level) {
            return Ok(());
        }

        let event = build_event(&self.config, ctx, record, &self.attrs);
        self.deliver(ctx, &event).await?;
        Ok(())
    }

    fn with_attrs(self: Arc<Self>, attrs: Vec<Attr>) -> Arc<dyn LogHandler> {
        let mut merged = self.attrs.clone();
        merged.extend(attrs);
        Arc::new(SeqHandler {
            config: self.config.clone(),
            client: self.client.clone(),
            attrs: merged,
        })
    }

    // Named grouping is not implemented; attributes only nest through
    // group-valued attrs. Returning the receiver unchanged is the
    // documented behavior, not an oversight.
    fn with_group(self: Arc<Self>, _name: &str) -> Arc<dyn LogHandler> {
        self
    }
}
