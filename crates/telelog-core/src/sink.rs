//! Per-level file persistence.
//!
//! Streams are opened once at construction and owned exclusively by the sink.
//! Writes are best-effort: an unconfigured level is a no-op (an explicit map
//! lookup, not error-driven control flow) and write failures are swallowed;
//! chat delivery is the primary guarantee, files are secondary.

use std::{
    collections::HashMap,
    fs::File,
    io::Write,
    path::PathBuf,
    sync::Mutex,
};

use crate::{config::SinkMode, Result};

/// In single mode every record routes to this stream.
pub const SINGLE_STREAM_KEY: &str = "debug";

pub struct FileSink {
    mode: SinkMode,
    streams: Mutex<HashMap<String, File>>,
}

impl FileSink {
    /// Open one writable (truncating) stream per configured path. In single
    /// mode only the shared stream is opened.
    pub fn open(mode: SinkMode, paths: &HashMap<String, PathBuf>) -> Result<Self> {
        let mut streams = HashMap::new();
        match mode {
            SinkMode::Multi => {
                for (name, path) in paths {
                    streams.insert(name.clone(), File::create(path)?);
                }
            }
            SinkMode::Single => {
                if let Some(path) = paths.get(SINGLE_STREAM_KEY) {
                    streams.insert(SINGLE_STREAM_KEY.to_string(), File::create(path)?);
                }
            }
        }
        Ok(Self {
            mode,
            streams: Mutex::new(streams),
        })
    }

    /// Write one entry to the stream for `level_name` (mode-aware routing).
    pub fn write(&self, level_name: &str, text: &str) {
        let key = match self.mode {
            SinkMode::Multi => level_name,
            SinkMode::Single => SINGLE_STREAM_KEY,
        };
        let Ok(mut streams) = self.streams.lock() else {
            return;
        };
        if let Some(stream) = streams.get_mut(key) {
            let _ = writeln!(stream, "{text}");
        }
    }

    /// Release every open stream. Safe to call more than once.
    pub fn close(&self) {
        if let Ok(mut streams) = self.streams.lock() {
            streams.clear();
        }
    }
}
