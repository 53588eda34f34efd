use std::error::Error;
use std::sync::Arc;

use async_trait::async_trait;

use crate::context::LogContext;
use crate::level::Level;
use crate::record::{Attr, Record};

/// Destination for [`Record`]s produced by a logging frontend.
///
/// Implementations transport records to a concrete backend (Seq, a
/// test double, nothing at all). Delivery is awaited at the call site;
/// there is no background queue, so a returned error always refers to
/// the record just handled.
#[async_trait]
pub trait LogHandler: Send + Sync {
    /// Whether a record at `level` would be processed at all.
    ///
    /// Pure predicate, no side effects. Frontends use it to skip
    /// record construction entirely.
    fn enabled(&self, ctx: &LogContext, level: Level) -> bool;

    /// Process a single record.
    ///
    /// **Parameters**
    /// - `ctx`: per-call context; carries the request id and deadline.
    /// - `record`: fully-populated record from the frontend.
    ///
    /// **Returns**
    /// - `Ok(())` if the record was accepted (or filtered out).
    /// - `Err(..)` if the backend failed (network error, serialization
    ///   error, HTTP status, etc.). The caller decides whether to
    ///   surface or discard the error; nothing is retried here.
    async fn handle(
        &self,
        ctx: &LogContext,
        record: &Record,
    ) -> Result<(), Box<dyn Error + Send + Sync>>;

    /// Derive a handler that attaches `attrs` to every future record.
    ///
    /// The derived handler owns an independent copy of the combined
    /// attribute list; the receiver is left untouched, so parent and
    /// child can be used concurrently without locking.
    fn with_attrs(self: Arc<Self>, attrs: Vec<Attr>) -> Arc<dyn LogHandler>;

    /// Derive a handler that opens a named attribute group.
    ///
    /// Implementations may return the receiver unchanged when they do
    /// not support name-prefixed grouping.
    fn with_group(self: Arc<Self>, name: &str) -> Arc<dyn LogHandler>;
}
