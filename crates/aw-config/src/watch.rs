use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;

use crate::filters::GlobalFilters;
use crate::logging::LoggingConfig;
use crate::rule::RuleConfig;
use crate::validate;

/// Parsed and validated `audiowatch.toml`. Rule order follows the file; the
/// registry preserves it when producing match events.
#[derive(Debug, Clone, Deserialize)]
pub struct WatchConfig {
    /// Watch rules, in file order.
    pub rules: Vec<RuleConfig>,
    #[serde(default)]
    pub global_filters: GlobalFilters,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl WatchConfig {
    /// Read and parse an `audiowatch.toml` file.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| anyhow::anyhow!("failed to read {}: {e}", path.as_ref().display()))?;
        content.parse()
    }
}

impl FromStr for WatchConfig {
    type Err = anyhow::Error;

    /// Parse a TOML string into a validated [`WatchConfig`]. Rule expressions
    /// are not compiled here; duplicate names and expression errors are left
    /// for the registry to report per rule.
    fn from_str(toml_str: &str) -> anyhow::Result<Self> {
        let config: WatchConfig = toml::from_str(toml_str)?;
        validate::validate(&config)?;
        Ok(config)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
