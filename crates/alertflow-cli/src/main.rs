use clap::Parser;
use tracing_subscriber::EnvFilter;

use alertflow_cli::{run, AlertflowConfig, Cli};

fn init_tracing(verbose: bool, config_level: Option<&str>) {
    let level = if verbose {
        "debug"
    } else {
        config_level.unwrap_or("info")
    };
    // RUST_LOG wins over both --verbose and the config file.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("alertflow={level}")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = AlertflowConfig::load(cli.config.as_deref())?;
    init_tracing(cli.verbose, config.log_level.as_deref());

    tracing::debug!(command = ?cli.command, "Starting alertflow");
    let output = run(&cli, &config)?;
    println!("{}", output.trim_end());
    Ok(())
}
