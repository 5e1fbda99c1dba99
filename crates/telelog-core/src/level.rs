use crate::{Error, Result};

/// Severity scale for the relay.
///
/// The numeric values are part of the config format. Note the hole at 2: it
/// is a reserved slot, not a bug, so validity is exact set membership rather
/// than a range check.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Level {
    Debug = 0,
    Info = 1,
    Warning = 3,
    Error = 4,
    Critical = 5,
}

impl Level {
    pub const ALL: [Level; 5] = [
        Level::Debug,
        Level::Info,
        Level::Warning,
        Level::Error,
        Level::Critical,
    ];

    pub fn value(self) -> u8 {
        self as u8
    }

    /// True iff `value` is exactly one of {0, 1, 3, 4, 5}.
    pub fn is_valid(value: u8) -> bool {
        Self::ALL.iter().any(|l| l.value() == value)
    }

    pub fn from_value(value: u8) -> Result<Level> {
        Self::ALL
            .iter()
            .copied()
            .find(|l| l.value() == value)
            .ok_or(Error::UnknownLevel(value))
    }

    pub fn from_name(name: &str) -> Result<Level> {
        match name.to_ascii_lowercase().as_str() {
            "debug" => Ok(Level::Debug),
            "info" => Ok(Level::Info),
            "warning" => Ok(Level::Warning),
            "error" => Ok(Level::Error),
            "critical" => Ok(Level::Critical),
            _ => Err(Error::UnknownLevelName(name.to_string())),
        }
    }

    /// Lowercase name: file routing key, emoji lookup key, hashtag suffix.
    pub fn name(self) -> &'static str {
        match self {
            Level::Debug => "debug",
            Level::Info => "info",
            Level::Warning => "warning",
            Level::Error => "error",
            Level::Critical => "critical",
        }
    }

    /// Uppercase name used in file and chat headers.
    pub fn name_upper(self) -> &'static str {
        match self {
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warning => "WARNING",
            Level::Error => "ERROR",
            Level::Critical => "CRITICAL",
        }
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
