//! Default values for optional config keys.

use std::collections::HashMap;
use std::path::PathBuf;

use crate::level::Level;

/// Default chat threshold: WARNING.
pub const LEVEL: u8 = Level::Warning as u8;

pub const GREETING: &str = "I'm ready!";

pub const DTF: &str = "%d/%b/%Y %H:%M:%S";

/// One `<level>.txt` per level, in the working directory.
pub fn paths() -> HashMap<String, PathBuf> {
    Level::ALL
        .iter()
        .map(|l| (l.name().to_string(), PathBuf::from(format!("{}.txt", l.name()))))
        .collect()
}

pub fn emojis() -> HashMap<String, String> {
    [
        ("debug", "⚙"),
        ("info", "ℹ"),
        ("warning", "⚠"),
        ("error", "❌"),
        ("critical", "🔴"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}
