use serde::Deserialize;

use crate::filters::RuleFilters;

/// One `[[rules]]` entry from `audiowatch.toml`. The expression is kept as
/// raw text here; compilation happens when the rule registry is built, so a
/// broken expression in one rule never prevents loading the config.
#[derive(Debug, Clone, Deserialize)]
pub struct RuleConfig {
    /// Unique rule name, used in match events and diagnostics.
    pub name: String,
    /// Rule expression text, e.g. `title contains "HD800" AND price < 1000`.
    pub expression: String,
    /// Disabled rules are compiled and kept, but never evaluated.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Notification channel tags attached to every match this rule produces.
    #[serde(default = "default_notify_via")]
    pub notify_via: Vec<String>,
    /// Per-rule filter overrides; absent dimensions inherit the globals.
    #[serde(default)]
    pub filters: Option<RuleFilters>,
}

fn default_enabled() -> bool {
    true
}

fn default_notify_via() -> Vec<String> {
    vec!["discord".to_string()]
}
