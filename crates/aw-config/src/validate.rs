use crate::watch::WatchConfig;

/// Internal validation, called automatically during `WatchConfig::from_str` /
/// `load`. Expression syntax and duplicate rule names are deliberately not
/// checked here: those are reported per rule by the registry so one bad rule
/// cannot block the rest.
pub(crate) fn validate(config: &WatchConfig) -> anyhow::Result<()> {
    if config.rules.is_empty() {
        anyhow::bail!("config must define at least one [[rules]] entry");
    }

    for (i, rule) in config.rules.iter().enumerate() {
        if rule.name.trim().is_empty() {
            anyhow::bail!("rules[{i}]: name must not be empty");
        }
        if rule.expression.trim().is_empty() {
            anyhow::bail!("rule {:?}: expression must not be empty", rule.name);
        }
        if rule.notify_via.is_empty() {
            anyhow::bail!(
                "rule {:?}: notify_via must contain at least one channel tag",
                rule.name,
            );
        }
        for tag in &rule.notify_via {
            if tag.trim().is_empty() {
                anyhow::bail!("rule {:?}: notify_via contains a blank channel tag", rule.name);
            }
        }
    }

    Ok(())
}
