use anyhow::{Context, Result};
use log::LevelFilter;
use std::env;

/// Map the `-v` count to a log level
#[must_use]
pub const fn level_for(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Initialize logging to stderr; `RUST_LOG` directives override the `-v` level
///
/// # Errors
///
/// Returns an error if a logger was already installed
pub fn init(verbosity: u8) -> Result<()> {
    let mut builder = env_logger::Builder::new();
    builder.filter_level(level_for(verbosity));

    if let Ok(filters) = env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }

    builder.try_init().context("failed to initialize logger")
}
