use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use anyhow::Result;
use chrono::Utc;

use aw_config::WatchConfig;
use aw_core::{
    FileMatchSink, MatchSink, RuleRegistry, StdoutMatchSink, dispatch, evaluate_batch, read_jsonl,
};

use crate::tracing_init::init_tracing;

pub fn run(config: PathBuf, listings: PathBuf, out: Option<PathBuf>) -> Result<()> {
    let config_path = config
        .canonicalize()
        .map_err(|e| anyhow::anyhow!("config path '{}': {e}", config.display()))?;
    let watch_config = WatchConfig::load(&config_path)?;
    let base_dir = config_path
        .parent()
        .expect("config path must have a parent directory");

    let _guard = init_tracing(&watch_config.logging, base_dir)?;

    // Rejected rules are reported through the registry's warnings; the batch
    // still runs with whatever compiled, even if that is nothing.
    let (registry, _) =
        RuleRegistry::compile_all(&watch_config.rules, watch_config.global_filters.clone());

    let batch = if listings.as_os_str() == "-" {
        read_jsonl(std::io::stdin().lock()).map_err(|e| anyhow::anyhow!("{e}"))?
    } else {
        let file = File::open(&listings)
            .map_err(|e| anyhow::anyhow!("listings path '{}': {e}", listings.display()))?;
        read_jsonl(BufReader::new(file)).map_err(|e| anyhow::anyhow!("{e}"))?
    };

    let events = evaluate_batch(&registry, &batch, Utc::now());

    let sink: Box<dyn MatchSink> = match out {
        Some(ref path) => Box::new(FileMatchSink::open(path)?),
        None => Box::new(StdoutMatchSink),
    };
    let sent = dispatch(&events, sink.as_ref()).map_err(|e| anyhow::anyhow!("{e}"))?;

    match out {
        Some(ref path) => {
            tracing::info!(matches = sent, out = %path.display(), "match events appended")
        }
        None => tracing::info!(matches = sent, "match events written to stdout"),
    }

    Ok(())
}
