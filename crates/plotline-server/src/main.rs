//! Main entry point for the Plotline server.

use anyhow::Context;
use clap::Parser;
use plotline_common::init_logging;
use plotline_config::ConfigLoader;
use plotline_server::Cli;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => ConfigLoader::load_from_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => ConfigLoader::load()?,
    };
    if let Some(bind) = cli.bind {
        config.server.bind_address = bind;
    }
    config.validate()?;

    if let Some(path) = &cli.write_config {
        ConfigLoader::save(&config, path)
            .with_context(|| format!("writing {}", path.display()))?;
        println!("wrote configuration to {}", path.display());
        return Ok(());
    }

    let _log_guard = init_logging(&config.logging.to_logging_config()?)?;
    info!(version = env!("CARGO_PKG_VERSION"), "starting Plotline server");

    plotline_server::serve(config).await?;
    Ok(())
}
