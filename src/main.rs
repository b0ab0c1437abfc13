use anyhow::Result;
use bistro_order::{
    cli::{Args, CliApp},
    utils::Config,
};
use clap::Parser;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let args = Args::parse();

    let config = Config::from_env().map_err(|e| {
        eprintln!("Failed to load configuration: {}", e);
        e
    })?;

    let filter = if args.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("🍔 Bistro order starting...");
    tracing::info!(
        "Configuration loaded for {} environment",
        config.environment
    );

    let app = CliApp::new(config, &args)?;
    app.run(args.command)?;

    tracing::info!("🍔 Bistro order stopped");
    Ok(())
}
