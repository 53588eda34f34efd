use std::fmt;
use std::str::FromStr;

/// Numeric severity of a log record.
///
/// Levels are plain integers so callers can define custom severities
/// between or beyond the four standard constants. Ordering follows the
/// numeric value: a record is shipped when its level is at least the
/// configured minimum.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Level(i16);

impl Level {
    pub const DEBUG: Level = Level(-4);
    pub const INFO: Level = Level(0);
    pub const WARN: Level = Level(4);
    pub const ERROR: Level = Level(8);

    pub const fn new(value: i16) -> Self {
        Level(value)
    }

    pub const fn value(self) -> i16 {
        self.0
    }

    /// Map this level onto the CLEF severity tier written to `@l`.
    ///
    /// The mapping is total and monotonic: every level lands in exactly
    /// one tier, ties go to the lower-named tier, and anything above
    /// [`Level::ERROR`] is `Fatal`.
    pub fn severity(self) -> Severity {
        if self <= Level::DEBUG {
            Severity::Debug
        } else if self <= Level::INFO {
            Severity::Information
        } else if self <= Level::WARN {
            Severity::Warning
        } else if self <= Level::ERROR {
            Severity::Error
        } else {
            Severity::Fatal
        }
    }

    /// Parse a level name, falling back to [`Level::INFO`] on anything
    /// unrecognized.
    pub fn parse_or_info(s: &str) -> Self {
        s.parse().unwrap_or(Self::INFO)
    }
}

impl Default for Level {
    fn default() -> Self {
        Level::INFO
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn named(f: &mut fmt::Formatter<'_>, name: &str, delta: i16) -> fmt::Result {
            if delta == 0 {
                f.write_str(name)
            } else {
                write!(f, "{}{:+}", name, delta)
            }
        }

        if *self < Level::INFO {
            named(f, "DEBUG", self.0 - Level::DEBUG.0)
        } else if *self < Level::WARN {
            named(f, "INFO", self.0 - Level::INFO.0)
        } else if *self < Level::ERROR {
            named(f, "WARN", self.0 - Level::WARN.0)
        } else {
            named(f, "ERROR", self.0 - Level::ERROR.0)
        }
    }
}

impl FromStr for Level {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "DEBUG" => Ok(Self::DEBUG),
            "INFO" | "INFORMATION" => Ok(Self::INFO),
            "WARN" | "WARNING" => Ok(Self::WARN),
            "ERROR" => Ok(Self::ERROR),
            _ => Err(()),
        }
    }
}

/// The five CLEF output tiers carried in the `@l` field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Debug,
    Information,
    Warning,
    Error,
    Fatal,
}

impl Severity {
    pub const fn as_str(self) -> &'static str {
        match self {
            Severity::Debug => "Debug",
            Severity::Information => "Information",
            Severity::Warning => "Warning",
            Severity::Error => "Error",
            Severity::Fatal => "Fatal",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
