//! Log entry rendering, file form and chat form.
//!
//! Pure functions: deterministic given `now`, no side effects. The chat form
//! is byte-compatible with the established output (hashtag casing included),
//! so Telegram-side searches keep working.

use chrono::{DateTime, Local};

use crate::level::Level;

/// `[LEVEL:TIMESTAMP] message`
pub fn file_entry(level: Level, message: &str, now: DateTime<Local>, dtf: &str) -> String {
    format!("[{}:{}] {message}", level.name_upper(), now.format(dtf))
}

/// Multi-line chat block: project, emoji + LEVEL, timestamp, message, then
/// three search hashtags (`#project`, `#project_level`, `#level`).
pub fn chat_entry(
    level: Level,
    message: &str,
    now: DateTime<Local>,
    project: &str,
    emoji: &str,
    dtf: &str,
) -> String {
    format!(
        "{project}\n\n{emoji}{}\n{}\n\n{message}\n\n{}",
        level.name_upper(),
        now.format(dtf),
        hashtags(project, level),
    )
}

fn hashtags(project: &str, level: Level) -> String {
    [
        project.to_string(),
        format!("{project}_{}", level.name()),
        level.name().to_string(),
    ]
    .iter()
    .map(|tag| format!("#{tag}"))
    .collect::<Vec<_>>()
    .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defaults;
    use chrono::TimeZone;

    fn fixed_now() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap()
    }

    #[test]
    fn file_entry_has_upper_level_and_timestamp() {
        let entry = file_entry(Level::Error, "disk full", fixed_now(), defaults::DTF);
        assert_eq!(entry, "[ERROR:02/Jan/2024 03:04:05] disk full");
    }

    #[test]
    fn chat_entry_matches_expected_block() {
        let entry = chat_entry(
            Level::Error,
            "disk full",
            fixed_now(),
            "MyProj",
            "❌",
            defaults::DTF,
        );
        assert_eq!(
            entry,
            "MyProj\n\n❌ERROR\n02/Jan/2024 03:04:05\n\ndisk full\n\n#MyProj\n#MyProj_error\n#error"
        );
    }

    #[test]
    fn chat_entry_has_exactly_three_hashtags_in_order() {
        let entry = chat_entry(
            Level::Warning,
            "low disk",
            fixed_now(),
            "Proj",
            "⚠",
            defaults::DTF,
        );
        let tags: Vec<&str> = entry
            .lines()
            .filter(|line| line.starts_with('#'))
            .collect();
        assert_eq!(tags, vec!["#Proj", "#Proj_warning", "#warning"]);
    }

    #[test]
    fn custom_time_format_is_honored() {
        let entry = file_entry(Level::Info, "hi", fixed_now(), "%Y-%m-%d");
        assert_eq!(entry, "[INFO:2024-01-02] hi");
    }
}
