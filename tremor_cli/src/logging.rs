//! Tracing setup: console (pretty or JSON, always stderr) plus an optional
//! JSON file sink with rotation.

use std::path::Path;

use eyre::WrapErr;
use tracing_appender::rolling;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

use crate::cli::FILE_GUARD;

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// `RUST_LOG` wins over `--log-level`, which wins over `[logging] level`.
pub fn init_tracing(
    json: bool,
    cli_level: Option<&str>,
    logging: &tremor_config::Logging,
) -> eyre::Result<()> {
    let level = cli_level.or(logging.level.as_deref()).unwrap_or("info");
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .wrap_err_with(|| format!("invalid log level '{level}'"))?;

    let mut layers: Vec<BoxedLayer> = Vec::new();
    let console = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);
    if json {
        layers.push(console.json().boxed());
    } else {
        layers.push(console.boxed());
    }

    if let Some(file) = logging.file.as_deref() {
        let path = Path::new(file);
        let dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let name = path
            .file_name()
            .ok_or_else(|| eyre::eyre!("logging.file has no file name: {file}"))?;
        std::fs::create_dir_all(dir).wrap_err_with(|| format!("create log directory {dir:?}"))?;
        let appender = match logging.rotation.as_deref().unwrap_or("never") {
            "daily" => rolling::daily(dir, name),
            "hourly" => rolling::hourly(dir, name),
            _ => rolling::never(dir, name),
        };
        let (writer, guard) = tracing_appender::non_blocking(appender);
        let _ = FILE_GUARD.set(guard);
        layers.push(
            tracing_subscriber::fmt::layer()
                .json()
                .with_ansi(false)
                .with_writer(writer)
                .boxed(),
        );
    }

    tracing_subscriber::registry()
        .with(layers)
        .with(filter)
        .try_init()
        .wrap_err("initialize tracing")?;
    Ok(())
}
