//! Logging macros that capture source location.
//!
//! Each macro captures `file!()`, `line!()`, and `module_path!()` at
//! the call site and embeds them in the record, so events carry a
//! `source` object when the handler has source tracking enabled.
//! Delivery is awaited inside the expansion, so the macros can only be
//! used in async contexts; the delivery result is the macro's value.
//!
//! # Examples
//!
//! ```rust,ignore
//! use seq_sink::{Attr, LogContext, Logger};
//!
//! let ctx = LogContext::new();
//! seq_info!(logger, ctx, "server started on port {}", 8080);
//! seq_warn!(logger, ctx, "disk almost full"; Attr::new("free_mb", 12u64));
//! ```

/// Log a message at `DEBUG` level, capturing the call site's source
/// location.
///
/// Accepts a plain string, `format!`-style arguments, or a message
/// followed by `;` and a list of [`Attr`](crate::Attr)s.
#[macro_export]
macro_rules! seq_debug {
    ($logger:expr, $ctx:expr, $message:expr) => {
        $crate::__seq_impl!($logger, $ctx, $crate::Level::DEBUG, [], $message)
    };
    ($logger:expr, $ctx:expr, $message:expr; $($attr:expr),+ $(,)?) => {
        $crate::__seq_impl!($logger, $ctx, $crate::Level::DEBUG, [$($attr),+], $message)
    };
    ($logger:expr, $ctx:expr, $fmt:expr, $($arg:tt)+) => {
        $crate::__seq_impl!($logger, $ctx, $crate::Level::DEBUG, [], ::std::format!($fmt, $($arg)+))
    };
}

/// Log a message at `INFO` level, capturing the call site's source
/// location.
///
/// Accepts a plain string, `format!`-style arguments, or a message
/// followed by `;` and a list of [`Attr`](crate::Attr)s.
#[macro_export]
macro_rules! seq_info {
    ($logger:expr, $ctx:expr, $message:expr) => {
        $crate::__seq_impl!($logger, $ctx, $crate::Level::INFO, [], $message)
    };
    ($logger:expr, $ctx:expr, $message:expr; $($attr:expr),+ $(,)?) => {
        $crate::__seq_impl!($logger, $ctx, $crate::Level::INFO, [$($attr),+], $message)
    };
    ($logger:expr, $ctx:expr, $fmt:expr, $($arg:tt)+) => {
        $crate::__seq_impl!($logger, $ctx, $crate::Level::INFO, [], ::std::format!($fmt, $($arg)+))
    };
}

/// Log a message at `WARN` level, capturing the call site's source
/// location.
///
/// Accepts a plain string, `format!`-style arguments, or a message
/// followed by `;` and a list of [`Attr`](crate::Attr)s.
#[macro_export]
macro_rules! seq_warn {
    ($logger:expr, $ctx:expr, $message:expr) => {
        $crate::__seq_impl!($logger, $ctx, $crate::Level::WARN, [], $message)
    };
    ($logger:expr, $ctx:expr, $message:expr; $($attr:expr),+ $(,)?) => {
        $crate::__seq_impl!($logger, $ctx, $crate::Level::WARN, [$($attr),+], $message)
    };
    ($logger:expr, $ctx:expr, $fmt:expr, $($arg:tt)+) => {
        $crate::__seq_impl!($logger, $ctx, $crate::Level::WARN, [], ::std::format!($fmt, $($arg)+))
    };
}

/// Log a message at `ERROR` level, capturing the call site's source
/// location.
///
/// Accepts a plain string, `format!`-style arguments, or a message
/// followed by `;` and a list of [`Attr`](crate::Attr)s.
#[macro_export]
macro_rules! seq_error {
    ($logger:expr, $ctx:expr, $message:expr) => {
        $crate::__seq_impl!($logger, $ctx, $crate::Level::ERROR, [], $message)
    };
    ($logger:expr, $ctx:expr, $message:expr; $($attr:expr),+ $(,)?) => {
        $crate::__seq_impl!($logger, $ctx, $crate::Level::ERROR, [$($attr),+], $message)
    };
    ($logger:expr, $ctx:expr, $fmt:expr, $($arg:tt)+) => {
        $crate::__seq_impl!($logger, $ctx, $crate::Level::ERROR, [], ::std::format!($fmt, $($arg)+))
    };
}

/// Internal implementation macro — not part of the public API.
///
/// Captures `file!()`, `line!()`, and `module_path!()` at the expansion
/// site (which is the caller's site because the public macros delegate
/// here via `$crate`), assembles a [`Record`](crate::Record) and awaits
/// [`Logger::log_record`](crate::Logger::log_record). When the level is
/// disabled the record is never built.
#[doc(hidden)]
#[macro_export]
macro_rules! __seq_impl {
    ($logger:expr, $ctx:expr, $level:expr, [$($attr:expr),*], $message:expr) => {{
        let logger = &$logger;
        let ctx = &$ctx;
        let level = $level;
        if logger.enabled(ctx, level) {
            let mut record = $crate::Record::new(level, $message).with_source(
                $crate::SourceLocation {
                    file: ::std::file!(),
                    line: ::std::line!(),
                    function: ::std::module_path!(),
                },
            );
            record.add_attrs([$($attr),*]);
            logger.log_record(ctx, &record).await
        } else {
            ::std::result::Result::Ok(())
        }
    }};
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::{LogContext, Logger, NoopHandler};

    #[tokio::test]
    async fn disabled_logger_short_circuits() {
        let logger = Logger::with_handler(Arc::new(NoopHandler));
        let ctx = LogContext::new();
        let result = crate::seq_info!(logger, ctx, "dropped {}", 1);
        assert!(result.is_ok());
    }
}
