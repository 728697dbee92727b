//! abx-cli library root.
//!
//! Re-exports the command layer so that integration tests can drive the
//! subcommands against temporary workbooks without spawning the binary.

pub mod cli;
pub mod commands;
pub mod config;
pub mod workbook;

use tracing_subscriber::EnvFilter;

use crate::config::{AbxConfig, LogFormat};

/// Install the global subscriber. `RUST_LOG` wins over the config filter.
pub fn init_tracing(config: &AbxConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    match config.log_format {
        LogFormat::Compact => builder.compact().init(),
        LogFormat::Json => builder.json().init(),
    }
}
