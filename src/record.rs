use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::level::Level;

/// Where a record was emitted, captured at the call site.
///
/// Serializes to the `source` object shape carried on events.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct SourceLocation {
    pub file: &'static str,
    pub line: u32,
    pub function: &'static str,
}

/// A single log record on its way to a handler.
#[derive(Clone, Debug)]
pub struct Record {
    pub time: DateTime<Utc>,
    pub level: Level,
    pub message: String,
    pub source: Option<SourceLocation>,
    attrs: Vec<Attr>,
}

impl Record {
    pub fn new(level: Level, message: impl Into<String>) -> Self {
        Record {
            time: Utc::now(),
            level,
            message: message.into(),
            source: None,
            attrs: Vec::new(),
        }
    }

    pub fn with_time(mut self, time: DateTime<Utc>) -> Self {
        self.time = time;
        self
    }

    pub fn with_source(mut self, source: SourceLocation) -> Self {
        self.source = Some(source);
        self
    }

    pub fn add_attr(&mut self, attr: Attr) {
        self.attrs.push(attr);
    }

    pub fn add_attrs(&mut self, attrs: impl IntoIterator<Item = Attr>) {
        self.attrs.extend(attrs);
    }

    pub fn attrs(&self) -> impl Iterator<Item = &Attr> {
        self.attrs.iter()
    }
}

/// A key/value pair attached to a record or bound onto a handler.
#[derive(Clone, Debug)]
pub struct Attr {
    pub key: String,
    pub value: AttrValue,
}

impl Attr {
    pub fn new(key: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        Attr {
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn group(key: impl Into<String>, attrs: impl IntoIterator<Item = Attr>) -> Self {
        Attr {
            key: key.into(),
            value: AttrValue::Group(attrs.into_iter().collect()),
        }
    }

    pub fn error(key: impl Into<String>, err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Attr {
            key: key.into(),
            value: AttrValue::Any(AnyValue::Error(Arc::new(err))),
        }
    }

    pub fn bytes(key: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Attr {
            key: key.into(),
            value: AttrValue::Any(AnyValue::Bytes(bytes.into())),
        }
    }

    pub fn raw(key: impl Into<String>, text: impl Into<String>) -> Self {
        Attr {
            key: key.into(),
            value: AttrValue::Any(AnyValue::Str(text.into())),
        }
    }

    pub fn any(key: impl Into<String>, value: serde_json::Value) -> Self {
        Attr {
            key: key.into(),
            value: AttrValue::Any(AnyValue::Other(value)),
        }
    }
}

/// The value side of an [`Attr`].
#[derive(Clone, Debug)]
pub enum AttrValue {
    Str(String),
    Int(i64),
    Uint(u64),
    Float(f64),
    Bool(bool),
    Time(DateTime<Utc>),
    Duration(Duration),
    Group(Vec<Attr>),
    Any(AnyValue),
}

/// Opaque values carried through [`AttrValue::Any`].
///
/// These get a second dispatch when the event is built: errors become
/// the `@x` field, byte and string payloads are sniffed for JSON, and
/// everything else passes through untouched.
#[derive(Clone, Debug)]
pub enum AnyValue {
    Error(Arc<dyn std::error::Error + Send + Sync>),
    Time(DateTime<Utc>),
    Duration(Duration),
    Bytes(Vec<u8>),
    Str(String),
    Other(serde_json::Value),
}

impl From<&str> for AttrValue {
    fn from(v: &str) -> Self {
        AttrValue::Str(v.to_owned())
    }
}

impl From<String> for AttrValue {
    fn from(v: String) -> Self {
        AttrValue::Str(v)
    }
}

impl From<i32> for AttrValue {
    fn from(v: i32) -> Self {
        AttrValue::Int(v.into())
    }
}

impl From<i64> for AttrValue {
    fn from(v: i64) -> Self {
        AttrValue::Int(v)
    }
}

impl From<u32> for AttrValue {
    fn from(v: u32) -> Self {
        AttrValue::Uint(v.into())
    }
}

impl From<u64> for AttrValue {
    fn from(v: u64) -> Self {
        AttrValue::Uint(v)
    }
}

impl From<f64> for AttrValue {
    fn from(v: f64) -> Self {
        AttrValue::Float(v)
    }
}

impl From<bool> for AttrValue {
    fn from(v: bool) -> Self {
        AttrValue::Bool(v)
    }
}

impl From<DateTime<Utc>> for AttrValue {
    fn from(v: DateTime<Utc>) -> Self {
        AttrValue::Time(v)
    }
}

impl From<Duration> for AttrValue {
    fn from(v: Duration) -> Self {
        AttrValue::Duration(v)
    }
}

impl From<serde_json::Value> for AttrValue {
    fn from(v: serde_json::Value) -> Self {
        AttrValue::Any(AnyValue::Other(v))
    }
}
