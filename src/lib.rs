pub mod level;
pub mod record;
pub mod context;
pub mod event;

pub mod config;
pub mod env;
pub mod error;

pub mod handler;
pub mod seq;
pub mod noop;

pub mod logger;
mod macros;

pub use config::SeqConfig;
pub use context::LogContext;
pub use error::SeqError;
pub use handler::LogHandler;
pub use level::{Level, Severity};
pub use logger::Logger;
pub use noop::NoopHandler;
pub use record::{AnyValue, Attr, AttrValue, Record, SourceLocation};
pub use seq::SeqHandler;
