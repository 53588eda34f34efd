use std::error::Error;
use std::sync::Arc;

use async_trait::async_trait;

use crate::context::LogContext;
use crate::handler::LogHandler;
use crate::level::Level;
use crate::record::{Attr, Record};

/// A handler that simply drops all records.
///
/// Useful for measuring the overhead of record construction without
/// any network I/O, and for unit tests that don't care about delivery.
#[derive(Clone, Copy, Default)]
pub struct NoopHandler;

#[async_trait]
impl LogHandler for NoopHandler {
    fn enabled(&self, _ctx: &LogContext, _level: Level) -> bool {
        false
    }

    async fn handle(
        &self,
        _ctx: &LogContext,
        _record: &Record,
    ) -> Result<(), Box<dyn Error + Send + Sync>> {
        Ok(())
    }

    fn with_attrs(self: Arc<Self>, _attrs: Vec<Attr>) -> Arc<dyn LogHandler> {
        self
    }

    fn with_group(self: Arc<Self>, _name: &str) -> Arc<dyn LogHandler> {
        self
    }
}
