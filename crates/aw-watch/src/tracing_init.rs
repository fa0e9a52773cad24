use std::path::Path;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

use aw_config::{LogFormat, LoggingConfig};

/// Wire up the `tracing` subscriber for the process.
///
/// Log lines go to stderr so that match events keep stdout to themselves.
/// When `[logging] file` is set, a non-blocking file layer is added as well
/// and the returned [`WorkerGuard`] has to stay alive until exit, or buffered
/// lines are lost. `RUST_LOG`, when present, wins over every config-derived
/// directive.
pub fn init_tracing(config: &LoggingConfig, base_dir: &Path) -> Result<Option<WorkerGuard>> {
    let filter = match std::env::var("RUST_LOG") {
        Ok(_) => EnvFilter::from_default_env(),
        Err(_) => {
            let directives = std::iter::once(config.level.clone())
                .chain(
                    config
                        .modules
                        .iter()
                        .map(|(module, level)| format!("{module}={level}")),
                )
                .collect::<Vec<_>>()
                .join(",");
            EnvFilter::try_new(&directives)
                .with_context(|| format!("bad [logging] directives {directives:?}"))?
        }
    };

    let mut guard: Option<WorkerGuard> = None;
    let json = config.format == LogFormat::Json;

    if let Some(ref file_path) = config.file {
        // join() discards base_dir when the configured path is absolute.
        let resolved = base_dir.join(file_path);
        let dir = resolved
            .parent()
            .context("log file path has no parent directory")?;
        let name = resolved.file_name().context("log file path has no file name")?;
        std::fs::create_dir_all(dir)?;

        let (writer, file_guard) =
            tracing_appender::non_blocking(tracing_appender::rolling::never(dir, name));
        guard = Some(file_guard);

        if json {
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .json()
                        .with_target(false)
                        .with_writer(std::io::stderr)
                        .with_filter(filter),
                )
                .with(
                    fmt::layer()
                        .json()
                        .with_target(false)
                        .with_ansi(false)
                        .with_writer(writer),
                )
                .init();
        } else {
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_target(false)
                        .with_writer(std::io::stderr)
                        .with_filter(filter),
                )
                .with(
                    fmt::layer()
                        .with_target(false)
                        .with_ansi(false)
                        .with_writer(writer),
                )
                .init();
        }
    } else if json {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .json()
                    .with_target(false)
                    .with_writer(std::io::stderr)
                    .with_filter(filter),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr)
                    .with_filter(filter),
            )
            .init();
    }

    Ok(guard)
}
