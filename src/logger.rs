use std::error::Error;
use std::sync::Arc;

use crate::config::SeqConfig;
use crate::context::LogContext;
use crate::error::SeqError;
use crate::handler::LogHandler;
use crate::level::Level;
use crate::record::{Attr, Record};
use crate::seq::SeqHandler;

/// Лёгкий фронтенд поверх [`LogHandler`].
///
/// Хранит обработчик за `Arc`, поэтому клонирование логгера дёшево и
/// безопасно между задачами. Методы уровня (`debug`, `info`, `warn`,
/// `error`) собирают [`Record`] и сразу ожидают доставки; фоновой
/// очереди нет, ошибка доставки возвращается вызывающему коду.
///
/// **Поля**
/// - `handler`: текущий обработчик; производные логгеры получают
///   производный обработчик через [`LogHandler::with_attrs`].
#[derive(Clone)]
pub struct Logger {
    handler: Arc<dyn LogHandler>,
}

impl Logger {
    /// Build a logger backed by a [`SeqHandler`] for `config`.
    ///
    /// **Returns**
    /// - A ready-to-use [`Logger`], or [`SeqError::Http`] if the HTTP
    ///   client could not be built.
    pub fn new(config: SeqConfig) -> Result<Self, SeqError> {
        Ok(Logger {
            handler: Arc::new(SeqHandler::new(config)?),
        })
    }

    /// Build a logger on top of an existing handler.
    pub fn with_handler(handler: Arc<dyn LogHandler>) -> Self {
        Logger { handler }
    }

    /// The handler records are dispatched to.
    pub fn handler(&self) -> &Arc<dyn LogHandler> {
        &self.handler
    }

    /// Derive a logger whose handler attaches `attrs` to every record.
    pub fn with_attrs(&self, attrs: Vec<Attr>) -> Logger {
        Logger {
            handler: self.handler.clone().with_attrs(attrs),
        }
    }

    /// Derive a logger with a named attribute group opened.
    pub fn with_group(&self, name: &str) -> Logger {
        Logger {
            handler: self.handler.clone().with_group(name),
        }
    }

    /// Whether a record at `level` would be dispatched at all.
    pub fn enabled(&self, ctx: &LogContext, level: Level) -> bool {
        self.handler.enabled(ctx, level)
    }

    /// Assemble a record and hand it to the handler.
    ///
    /// **Parameters**
    /// - `ctx`: per-call context for the request id and deadline.
    /// - `level`, `message`, `attrs`: record contents.
    ///
    /// **Returns**
    /// - Whatever the handler returned; `Ok(())` when the record was
    ///   filtered out by level.
    pub async fn log(
        &self,
        ctx: &LogContext,
        level: Level,
        message: impl Into<String>,
        attrs: Vec<Attr>,
    ) -> Result<(), Box<dyn Error + Send + Sync>> {
        // Проверка уровня идёт до сборки записи.
        if !self.handler.enabled(ctx, level) {
            return Ok(());
        }

        let mut record = Record::new(level, message);
        record.add_attrs(attrs);
        self.handler.handle(ctx, &record).await
    }

    /// Dispatch an already-assembled record, source location included.
    pub async fn log_record(
        &self,
        ctx: &LogContext,
        record: &Record,
    ) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.handler.handle(ctx, record).await
    }

    pub async fn debug(
        &self,
        ctx: &LogContext,
        message: impl Into<String>,
        attrs: Vec<Attr>,
    ) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.log(ctx, Level::DEBUG, message, attrs).await
    }

    pub async fn info(
        &self,
        ctx: &LogContext,
        message: impl Into<String>,
        attrs: Vec<Attr>,
    ) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.log(ctx, Level::INFO, message, attrs).await
    }

    pub async fn warn(
        &self,
        ctx: &LogContext,
        message: impl Into<String>,
        attrs: Vec<Attr>,
    ) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.log(ctx, Level::WARN, message, attrs).await
    }

    pub async fn error(
        &self,
        ctx: &LogContext,
        message: impl Into<String>,
        attrs: Vec<Attr>,
    ) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.log(ctx, Level::ERROR, message, attrs).await
    }
}
