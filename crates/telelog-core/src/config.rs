use std::{
    collections::HashMap,
    fs,
    io::Write,
    path::{Path, PathBuf},
};

use serde::Deserialize;

use crate::{defaults, level::Level, Error, Result};

/// File routing mode: one stream per level, or a single shared stream.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SinkMode {
    Multi,
    Single,
}

/// Raw YAML document; every key except the identity fields is optional.
#[derive(Debug, Deserialize)]
struct ConfigFile {
    token: String,
    username: String,
    project: String,
    level: Option<u8>,
    mode: Option<SinkMode>,
    paths: Option<HashMap<String, PathBuf>>,
    greeting: Option<String>,
    dtf: Option<String>,
    emojis: Option<HashMap<String, String>>,
    chat_id: Option<i64>,
}

/// Typed relay configuration, loaded once at startup.
///
/// `chat_id` may additionally be written back to the source file exactly once
/// by the binding handshake (best-effort append).
#[derive(Clone, Debug)]
pub struct Config {
    pub token: String,
    /// Messenger username allowed to bind the destination chat.
    pub username: String,
    /// Project name with spaces stripped (it doubles as a hashtag).
    pub project: String,
    /// Chat delivery threshold (a valid `Level` value).
    pub level: u8,
    pub mode: SinkMode,
    /// Level name -> log file path.
    pub paths: HashMap<String, PathBuf>,
    pub greeting: String,
    /// strftime-style timestamp format, validated at load.
    pub dtf: String,
    /// Level name -> glyph prepended to the chat header.
    pub emojis: HashMap<String, String>,
    pub chat_id: Option<i64>,
    pub cfg_path: PathBuf,
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)?;
        Self::from_yaml(&raw, path)
    }

    fn from_yaml(raw: &str, path: &Path) -> Result<Self> {
        let file: ConfigFile = serde_yaml::from_str(raw)?;

        let level = file.level.unwrap_or(defaults::LEVEL);
        if !Level::is_valid(level) {
            return Err(Error::Config(format!(
                "unknown logging level in config: {level}"
            )));
        }

        let dtf = file.dtf.unwrap_or_else(|| defaults::DTF.to_string());
        validate_dtf(&dtf)?;

        let mode = file.mode.unwrap_or(SinkMode::Multi);
        let paths = file.paths.unwrap_or_else(defaults::paths);
        if mode == SinkMode::Multi {
            for l in Level::ALL {
                if !paths.contains_key(l.name()) {
                    eprintln!(
                        "[telelog] no file path configured for level '{}'; \
                         records at that level will not reach a file",
                        l.name()
                    );
                }
            }
        }

        Ok(Self {
            token: file.token,
            username: file.username,
            project: file.project.replace(' ', ""),
            level,
            mode,
            paths,
            greeting: file.greeting.unwrap_or_else(|| defaults::GREETING.to_string()),
            dtf,
            emojis: file.emojis.unwrap_or_else(defaults::emojis),
            chat_id: file.chat_id,
            cfg_path: path.to_path_buf(),
        })
    }

    /// Append the bound chat id back to the config file so later runs start
    /// already bound. Best-effort, not transactional.
    pub fn persist_chat_id(&self, chat_id: i64) -> Result<()> {
        let mut f = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.cfg_path)?;
        write!(f, "\n\nchat_id: {chat_id}")?;
        Ok(())
    }
}

fn validate_dtf(dtf: &str) -> Result<()> {
    use chrono::format::{Item, StrftimeItems};
    if StrftimeItems::new(dtf).any(|item| matches!(item, Item::Error)) {
        return Err(Error::Config(format!("invalid datetime format: {dtf}")));
    }
    Ok(())
}
