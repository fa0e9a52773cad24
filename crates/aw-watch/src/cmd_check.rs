use std::collections::{HashMap, HashSet};
use std::io::IsTerminal;
use std::path::PathBuf;
use std::process;

use anyhow::Result;

use aw_config::WatchConfig;
use aw_core::{RegistryError, RuleRegistry};

fn print_ok(name: &str, color: bool) {
    if color {
        eprintln!("\x1b[1;32mok\x1b[0m: rule `{name}`");
    } else {
        eprintln!("ok: rule `{name}`");
    }
}

fn print_error(name: &str, error: &RegistryError, color: bool) {
    if color {
        eprintln!("\x1b[1;31merror\x1b[0m: rule `{name}`: {error}");
    } else {
        eprintln!("error: rule `{name}`: {error}");
    }
}

pub fn run(config: PathBuf) -> Result<()> {
    let watch_config = WatchConfig::load(&config)?;
    let color = std::io::stderr().is_terminal();

    let (registry, diagnostics) =
        RuleRegistry::compile_all(&watch_config.rules, watch_config.global_filters.clone());

    let by_rule: HashMap<&str, &RegistryError> = diagnostics
        .iter()
        .map(|d| (d.rule.as_str(), &d.error))
        .collect();

    // One status line per distinct rule name, in definition order.
    let mut seen = HashSet::new();
    for rule in &watch_config.rules {
        if !seen.insert(rule.name.as_str()) {
            continue;
        }
        match by_rule.get(rule.name.as_str()) {
            Some(error) => print_error(&rule.name, error, color),
            None => print_ok(&rule.name, color),
        }
    }

    if diagnostics.is_empty() {
        if color {
            eprintln!("\x1b[1;32mAll {} rule(s) compiled.\x1b[0m", registry.len());
        } else {
            eprintln!("All {} rule(s) compiled.", registry.len());
        }
    } else {
        eprintln!(
            "\n{} rule(s) compiled, {} rejected",
            registry.len(),
            diagnostics.len()
        );
        process::exit(1);
    }

    Ok(())
}
