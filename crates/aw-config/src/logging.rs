use std::collections::HashMap;
use std::path::PathBuf;

use serde::Deserialize;

/// Shape of an emitted log line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable single lines.
    #[default]
    Plain,
    /// Structured output for log collectors.
    Json,
}

/// The `[logging]` table. Every field carries a default, so the whole table
/// can be left out of `audiowatch.toml`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Base level directive; `"info"` when unset.
    pub level: String,
    /// Per-module overrides layered on top of `level`, keyed by target
    /// (`"aw_core::registry" = "debug"`).
    pub modules: HashMap<String, String>,
    /// Log file destination. A relative path lands next to the config file.
    pub file: Option<PathBuf>,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: "info".into(),
            modules: HashMap::new(),
            file: None,
            format: LogFormat::default(),
        }
    }
}
