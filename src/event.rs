use std::time::Duration;

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{Map, Value};

use crate::config::SeqConfig;
use crate::context::LogContext;
use crate::record::{AnyValue, Attr, AttrValue, Record};

/// Event timestamp, RFC 3339 with nanosecond precision, UTC.
pub const TIMESTAMP_KEY: &str = "@t";

/// Rendered message. Always identical to [`MESSAGE_TEMPLATE_KEY`]:
/// CLEF distinguishes a rendered message from its template, but this
/// handler does not template.
pub const MESSAGE_KEY: &str = "@m";

/// Message template, carried verbatim.
pub const MESSAGE_TEMPLATE_KEY: &str = "@mt";

/// Mapped severity name (`Debug` through `Fatal`).
pub const LEVEL_KEY: &str = "@l";

/// Exception text; populated only when an opaque attribute value is an
/// error.
pub const EXCEPTION_KEY: &str = "@x";

/// Request-correlation id, added when the configured context key holds
/// a string.
pub const REQUEST_ID_KEY: &str = "request_id";

/// Call-site object with `file`, `line`, `function`.
pub const SOURCE_KEY: &str = "source";

/// Build the CLEF document for one record.
///
/// **Parameters**
/// - `config`: handler configuration; controls the request-id lookup
///   and source tracking.
/// - `ctx`: per-call context the request id is read from.
/// - `record`: the record being shipped.
/// - `base_attrs`: attributes bound onto the handler, processed before
///   the record's own attributes so record attributes win on key
///   collision.
///
/// **Returns**
/// - A flat map ready for JSON serialization, one event per line.
pub fn build_event(
    config: &SeqConfig,
    ctx: &LogContext,
    record: &Record,
    base_attrs: &[Attr],
) -> Map<String, Value> {
    let mut event = Map::new();
    event.insert(
        TIMESTAMP_KEY.to_string(),
        Value::String(format_timestamp(record.time)),
    );
    event.insert(
        MESSAGE_KEY.to_string(),
        Value::String(record.message.clone()),
    );
    event.insert(
        MESSAGE_TEMPLATE_KEY.to_string(),
        Value::String(record.message.clone()),
    );
    event.insert(
        LEVEL_KEY.to_string(),
        Value::String(record.level.severity().as_str().to_string()),
    );

    for attr in base_attrs {
        process_attribute(&mut event, attr);
    }
    for attr in record.attrs() {
        process_attribute(&mut event, attr);
    }

    if !config.request_id_key.is_empty() {
        if let Some(request_id) = ctx.string_value(&config.request_id_key) {
            event.insert(
                REQUEST_ID_KEY.to_string(),
                Value::String(request_id.to_string()),
            );
        }
    }

    if config.add_source {
        if let Some(source) = record.source {
            event.insert(SOURCE_KEY.to_string(), serde_json::json!(source));
        }
    }

    event
}

fn format_timestamp(time: DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

/// Nanosecond count of a duration, saturating at `u64::MAX`.
fn duration_nanos(duration: Duration) -> u64 {
    u64::try_from(duration.as_nanos()).unwrap_or(u64::MAX)
}

/// Write one attribute into `event`, dispatching on its value kind.
///
/// Scalar attributes (string, integer, float, boolean) ship as their
/// text rendering. Only values arriving through `Any` keep native JSON
/// shapes.
fn process_attribute(event: &mut Map<String, Value>, attr: &Attr) {
    match &attr.value {
        AttrValue::Group(attrs) => {
            let mut group = Map::new();
            for member in attrs {
                process_attribute(&mut group, member);
            }
            event.insert(attr.key.clone(), Value::Object(group));
        }
        AttrValue::Time(time) => {
            event.insert(attr.key.clone(), Value::String(format_timestamp(*time)));
        }
        AttrValue::Duration(duration) => {
            event.insert(attr.key.clone(), Value::from(duration_nanos(*duration)));
        }
        AttrValue::Any(value) => process_any_attribute(event, &attr.key, value),
        AttrValue::Str(s) => {
            event.insert(attr.key.clone(), Value::String(s.clone()));
        }
        AttrValue::Int(i) => {
            event.insert(attr.key.clone(), Value::String(i.to_string()));
        }
        AttrValue::Uint(u) => {
            event.insert(attr.key.clone(), Value::String(u.to_string()));
        }
        AttrValue::Float(f) => {
            event.insert(attr.key.clone(), Value::String(f.to_string()));
        }
        AttrValue::Bool(b) => {
            event.insert(attr.key.clone(), Value::String(b.to_string()));
        }
    }
}

fn process_any_attribute(event: &mut Map<String, Value>, key: &str, value: &AnyValue) {
    match value {
        // The attribute's own key is discarded: errors always travel on
        // the CLEF exception channel. A later error overwrites an
        // earlier one.
        AnyValue::Error(err) => {
            event.insert(EXCEPTION_KEY.to_string(), Value::String(err.to_string()));
        }
        AnyValue::Time(time) => {
            event.insert(key.to_string(), Value::String(format_timestamp(*time)));
        }
        AnyValue::Duration(duration) => {
            event.insert(key.to_string(), Value::from(duration_nanos(*duration)));
        }
        AnyValue::Bytes(data) => parse_json_into(event, key, data),
        AnyValue::Str(text) => parse_json_into(event, key, text.as_bytes()),
        AnyValue::Other(value) => {
            event.insert(key.to_string(), value.clone());
        }
    }
}

/// Treat `data` as a JSON object and flatten it under `base_key`.
/// Anything that is not a JSON object, arrays included, is stored as
/// verbatim text instead.
fn parse_json_into(event: &mut Map<String, Value>, base_key: &str, data: &[u8]) {
    match serde_json::from_slice::<Map<String, Value>>(data) {
        Ok(object) => flatten_json(event, base_key, object),
        Err(_) => {
            event.insert(
                base_key.to_string(),
                Value::String(String::from_utf8_lossy(data).into_owned()),
            );
        }
    }
}

/// Recursively flatten a JSON object into dotted composite keys.
/// Arrays and scalars are stored as-is under their full key; they keep
/// their native JSON types.
fn flatten_json(event: &mut Map<String, Value>, base_key: &str, object: Map<String, Value>) {
    for (key, value) in object {
        let full_key = if base_key.is_empty() {
            key
        } else {
            format!("{base_key}.{key}")
        };

        match value {
            Value::Object(nested) => flatten_json(event, &full_key, nested),
            other => {
                event.insert(full_key, other);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use chrono::TimeZone;
    use serde_json::json;

    use super::*;
    use crate::level::Level;

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 45).unwrap()
            + chrono::Duration::nanoseconds(123_456_789)
    }

    fn build(record: &Record) -> Map<String, Value> {
        build_event(
            &SeqConfig::new("http://localhost:5341"),
            &LogContext::new(),
            record,
            &[],
        )
    }

    #[test]
    fn reserved_keys_carry_header_fields() {
        let record = Record::new(Level::WARN, "disk almost full").with_time(fixed_time());
        let event = build(&record);

        assert_eq!(event["@t"], json!("2024-05-01T12:30:45.123456789Z"));
        assert_eq!(event["@m"], json!("disk almost full"));
        assert_eq!(event["@mt"], json!("disk almost full"));
        assert_eq!(event["@l"], json!("Warning"));
    }

    #[test]
    fn scalar_attributes_are_stringified() {
        let mut record = Record::new(Level::INFO, "m");
        record.add_attrs([
            Attr::new("text", "hello"),
            Attr::new("int", -42i64),
            Attr::new("uint", 7u64),
            Attr::new("float", 2.5f64),
            Attr::new("flag", true),
        ]);
        let event = build(&record);

        assert_eq!(event["text"], json!("hello"));
        assert_eq!(event["int"], json!("-42"));
        assert_eq!(event["uint"], json!("7"));
        assert_eq!(event["float"], json!("2.5"));
        assert_eq!(event["flag"], json!("true"));
    }

    #[test]
    fn time_and_duration_attributes_keep_structure() {
        let mut record = Record::new(Level::INFO, "m");
        record.add_attr(Attr::new("at", fixed_time()));
        record.add_attr(Attr::new("took", Duration::from_micros(1500)));
        let event = build(&record);

        assert_eq!(event["at"], json!("2024-05-01T12:30:45.123456789Z"));
        assert_eq!(event["took"], json!(1_500_000u64));
    }

    #[test]
    fn opaque_time_and_duration_match_their_typed_forms() {
        // Times and durations smuggled through the opaque channel keep
        // the attribute's key, unlike opaque errors.
        let mut record = Record::new(Level::INFO, "m");
        record.add_attr(Attr {
            key: "at".to_string(),
            value: AttrValue::Any(AnyValue::Time(fixed_time())),
        });
        record.add_attr(Attr {
            key: "took".to_string(),
            value: AttrValue::Any(AnyValue::Duration(Duration::from_micros(1500))),
        });
        let event = build(&record);

        assert_eq!(event["at"], json!("2024-05-01T12:30:45.123456789Z"));
        assert_eq!(event["took"], json!(1_500_000u64));
    }

    #[test]
    fn extreme_durations_saturate_at_the_u64_limit() {
        let mut record = Record::new(Level::INFO, "m");
        record.add_attr(Attr::new("took", Duration::from_secs(u64::MAX)));
        let event = build(&record);

        assert_eq!(event["took"], json!(u64::MAX));
    }

    #[test]
    fn groups_become_nested_maps() {
        let mut record = Record::new(Level::INFO, "m");
        record.add_attr(Attr::group(
            "net",
            [
                Attr::new("host", "x"),
                Attr::new("port", 80i64),
                Attr::group("peer", [Attr::new("ip", "10.0.0.1")]),
            ],
        ));
        let event = build(&record);

        // Scalars inside groups are stringified like everywhere else.
        assert_eq!(
            event["net"],
            json!({"host": "x", "port": "80", "peer": {"ip": "10.0.0.1"}})
        );
    }

    #[test]
    fn error_values_travel_on_the_exception_channel() {
        let mut record = Record::new(Level::ERROR, "m");
        record.add_attr(Attr::error(
            "cause",
            std::io::Error::new(std::io::ErrorKind::Other, "first"),
        ));
        record.add_attr(Attr::error(
            "cause2",
            std::io::Error::new(std::io::ErrorKind::Other, "second"),
        ));
        let event = build(&record);

        assert_eq!(event["@x"], json!("second"));
        assert!(!event.contains_key("cause"));
        assert!(!event.contains_key("cause2"));
    }

    #[test]
    fn json_strings_flatten_with_dotted_keys() {
        let mut record = Record::new(Level::INFO, "m");
        record.add_attr(Attr::raw(
            "payload",
            r#"{"user":{"id":7,"name":"ada"},"tags":["a","b"],"ok":true}"#,
        ));
        let event = build(&record);

        assert_eq!(event["payload.user.id"], json!(7));
        assert_eq!(event["payload.user.name"], json!("ada"));
        assert_eq!(event["payload.tags"], json!(["a", "b"]));
        assert_eq!(event["payload.ok"], json!(true));
        assert!(!event.contains_key("payload"));
    }

    #[test]
    fn json_bytes_flatten_like_strings() {
        let mut record = Record::new(Level::INFO, "m");
        record.add_attr(Attr::bytes("blob", br#"{"n":1}"#.to_vec()));
        let event = build(&record);

        assert_eq!(event["blob.n"], json!(1));
    }

    #[test]
    fn non_object_payloads_fall_back_to_verbatim_text() {
        let mut record = Record::new(Level::INFO, "m");
        record.add_attr(Attr::raw("broken", "not json"));
        record.add_attr(Attr::raw("list", "[1,2,3]"));
        record.add_attr(Attr::raw("scalar", "42"));
        let event = build(&record);

        assert_eq!(event["broken"], json!("not json"));
        assert_eq!(event["list"], json!("[1,2,3]"));
        assert_eq!(event["scalar"], json!("42"));
    }

    #[test]
    fn invalid_utf8_bytes_fall_back_to_lossy_text() {
        let mut record = Record::new(Level::INFO, "m");
        record.add_attr(Attr::bytes("blob", b"not json \xff".to_vec()));
        let event = build(&record);

        // The undecodable byte becomes the replacement character; the
        // payload is still never dropped.
        assert_eq!(event["blob"], json!("not json \u{fffd}"));
    }

    #[test]
    fn empty_json_object_contributes_nothing() {
        let mut record = Record::new(Level::INFO, "m");
        record.add_attr(Attr::raw("empty", "{}"));
        let event = build(&record);

        assert!(!event.contains_key("empty"));
    }

    #[test]
    fn flattening_a_flat_object_with_empty_prefix_is_identity() {
        let mut target = Map::new();
        let object = json!({"a": 1}).as_object().unwrap().clone();
        flatten_json(&mut target, "", object);

        assert_eq!(Value::Object(target), json!({"a": 1}));
    }

    #[test]
    fn flattening_produces_dotted_composite_keys() {
        let mut target = Map::new();
        let object = json!({"a": {"b": 1, "c": {"d": 2}}})
            .as_object()
            .unwrap()
            .clone();
        flatten_json(&mut target, "", object);

        assert_eq!(Value::Object(target), json!({"a.b": 1, "a.c.d": 2}));
    }

    #[test]
    fn any_values_pass_through_without_flattening() {
        let mut record = Record::new(Level::INFO, "m");
        record.add_attr(Attr::any("meta", json!({"a": 1, "b": [true, null]})));
        let event = build(&record);

        assert_eq!(event["meta"], json!({"a": 1, "b": [true, null]}));
    }

    #[test]
    fn record_attributes_override_base_attributes() {
        let mut record = Record::new(Level::INFO, "m");
        record.add_attr(Attr::new("env", "production"));
        let base = [Attr::new("env", "staging"), Attr::new("service", "billing")];
        let event = build_event(
            &SeqConfig::new("http://localhost:5341"),
            &LogContext::new(),
            &record,
            &base,
        );

        assert_eq!(event["env"], json!("production"));
        assert_eq!(event["service"], json!("billing"));
    }

    #[test]
    fn request_id_requires_configured_key_and_string_value() {
        let record = Record::new(Level::INFO, "m");
        let ctx = LogContext::new().with_value("request_id", "req-7");

        let config = SeqConfig::new("http://localhost:5341").with_request_id_key("request_id");
        let event = build_event(&config, &ctx, &record, &[]);
        assert_eq!(event["request_id"], json!("req-7"));

        // Key not configured: the context value is ignored.
        let config = SeqConfig::new("http://localhost:5341");
        let event = build_event(&config, &ctx, &record, &[]);
        assert!(!event.contains_key("request_id"));

        // Non-string context value: no field.
        let config = SeqConfig::new("http://localhost:5341").with_request_id_key("request_id");
        let ctx = LogContext::new().with_value("request_id", 7);
        let event = build_event(&config, &ctx, &record, &[]);
        assert!(!event.contains_key("request_id"));
    }

    #[test]
    fn context_request_id_wins_over_attribute() {
        let mut record = Record::new(Level::INFO, "m");
        record.add_attr(Attr::new("request_id", "from-attr"));
        let ctx = LogContext::new().with_value("request_id", "from-ctx");
        let config = SeqConfig::new("http://localhost:5341").with_request_id_key("request_id");

        let event = build_event(&config, &ctx, &record, &[]);
        assert_eq!(event["request_id"], json!("from-ctx"));
    }

    #[test]
    fn source_location_is_opt_in() {
        use crate::record::SourceLocation;

        let source = SourceLocation {
            file: "src/billing.rs",
            line: 42,
            function: "billing::charge",
        };
        let record = Record::new(Level::INFO, "m").with_source(source);

        let config = SeqConfig::new("http://localhost:5341").with_source_tracking();
        let event = build_event(&config, &LogContext::new(), &record, &[]);
        assert_eq!(
            event["source"],
            json!({"file": "src/billing.rs", "line": 42, "function": "billing::charge"})
        );

        // Tracking disabled: no source object even when captured.
        let config = SeqConfig::new("http://localhost:5341");
        let event = build_event(&config, &LogContext::new(), &record, &[]);
        assert!(!event.contains_key("source"));

        // Tracking enabled but nothing captured: no source object.
        let config = SeqConfig::new("http://localhost:5341").with_source_tracking();
        let record = Record::new(Level::INFO, "m");
        let event = build_event(&config, &LogContext::new(), &record, &[]);
        assert!(!event.contains_key("source"));
    }
}
