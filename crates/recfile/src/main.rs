use std::io::Write;

use anyhow::Result;
use recfile::{dispatch, format_profiling, run_profiled, Flags};
use recfile_config::Config;
use tracing::debug;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let flags = Flags::from_env();

    // The log level lives in the config, so the config loads before logging exists.
    let config = match &flags.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    // stdout carries results, so logs go to stderr.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    if !flags.ignored.is_empty() {
        debug!(ignored = ?flags.ignored, "ignoring arguments after the first non-flag");
    }

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    if flags.profile {
        let (result, stats) = run_profiled("dispatch", || {
            dispatch(&flags, &config.output, &mut out)
        });
        eprintln!("{}", format_profiling(&stats));
        result?;
    } else {
        dispatch(&flags, &config.output, &mut out)?;
    }
    out.flush()?;

    Ok(())
}
