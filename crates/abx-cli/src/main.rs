use clap::Parser;
use eyre::Result;

use abx_cli::cli::Cli;
use abx_cli::{commands, config, init_tracing};

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    let config_path = match cli.config.clone() {
        Some(path) => path,
        None => config::config_path()?,
    };

    let mut config = config::load_config(&config_path)?;
    if let Some(actor) = cli.actor.clone() {
        config.actor = actor;
    }
    if let Some(format) = cli.log_format {
        config.log_format = format;
    }
    init_tracing(&config);

    let output = commands::run(cli.command, &config, &config_path)?;
    print!("{output}");
    Ok(())
}
