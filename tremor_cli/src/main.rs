mod cli;
mod commands;
mod error_fmt;
mod logging;

use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use clap::Parser;
use eyre::WrapErr;

use crate::cli::{Cli, Commands, JSON_MODE, json_mode};
use crate::error_fmt::{exit_code_for_error, format_error_json, humanize};

fn main() {
    let cli = Cli::parse();
    let _ = JSON_MODE.set(cli.json);
    if !cli.json {
        // Pretty panic/error reports for humans only.
        let _ = color_eyre::install();
    }

    if let Err(err) = run(cli) {
        if json_mode() {
            eprintln!("{}", format_error_json(&err));
        } else {
            eprintln!("{}", humanize(&err));
        }
        tracing::error!(error = %err, "run failed");
        std::process::exit(exit_code_for_error(&err));
    }
}

fn load_config(path: Option<&Path>) -> eyre::Result<tremor_config::Config> {
    let cfg = match path {
        Some(p) => {
            let text = std::fs::read_to_string(p).wrap_err_with(|| format!("read config {p:?}"))?;
            tremor_config::load_toml(&text).wrap_err_with(|| format!("parse config {p:?}"))?
        }
        None => tremor_config::Config::default(),
    };
    cfg.validate().wrap_err("invalid configuration")?;
    Ok(cfg)
}

fn run(cli: Cli) -> eyre::Result<()> {
    let cfg = load_config(cli.config.as_deref())?;
    logging::init_tracing(cli.json, cli.log_level.as_deref(), &cfg.logging)?;

    let shutdown = Arc::new(AtomicBool::new(false));
    {
        let flag = Arc::clone(&shutdown);
        ctrlc::set_handler(move || flag.store(true, Ordering::Relaxed))
            .wrap_err("install Ctrl-C handler")?;
    }

    match cli.cmd {
        Commands::Hold { tick_ms, seed } => {
            commands::hold::run(&cfg, tick_ms, seed.or(cfg.simulation.seed), &shutdown)
        }
        Commands::Tap {
            tick_ms,
            simulate,
            interval_ms,
            drift_ms,
            jitter_ms,
            seed,
        } => {
            let opts = commands::tap::TapOpts {
                tick_ms,
                simulate,
                interval_ms,
                drift_ms,
                jitter_ms,
                seed: seed.or(cfg.simulation.seed),
            };
            commands::tap::run(&cfg, &opts, &shutdown)
        }
        Commands::Trace {
            points,
            displayed_width,
            displayed_height,
            simulate,
            seed,
        } => {
            let opts = commands::trace::TraceOpts {
                points,
                displayed_width,
                displayed_height,
                simulate,
                seed: seed.or(cfg.simulation.seed),
            };
            commands::trace::run(&cfg, &opts)
        }
        Commands::Summary { fixtures } => commands::summary::run(&cfg, fixtures.as_deref()),
        Commands::Patients { search } => commands::patients::run(&cfg, &search),
        Commands::Monitor { samples, seed } => {
            commands::monitor::run(&cfg, samples, seed.or(cfg.simulation.seed))
        }
        Commands::SelfCheck => {
            tracing::info!("config ok");
            println!("ok");
            Ok(())
        }
    }
}
