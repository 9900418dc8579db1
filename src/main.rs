use std::path::PathBuf;
use std::str::FromStr;

use anyhow::anyhow;
use clap::Parser;
use dotenv::dotenv;
use tracing::Level;

use envprobe::config::ConfigLoader;
use envprobe::envprobe as probe;

#[derive(Parser)]
#[command(version, about = "Reports whether an API key is configured, without revealing it")]
struct Args {
    /// TOML config file; environment variables are used when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print the supported environment variables and exit
    #[arg(long)]
    help_env: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let args = Args::parse();

    if args.help_env {
        ConfigLoader::print_help();
        return Ok(());
    }

    let config = match &args.config {
        Some(path) => ConfigLoader::load_file(path).await?,
        None => ConfigLoader::load()?,
    };
    ConfigLoader::validate(&config)?;

    let level = Level::from_str(&config.log_level)
        .map_err(|_| anyhow!("Invalid log level: {}", config.log_level))?;

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_level(true)
        .with_thread_names(true)
        .with_target(true)
        .init();

    probe::run(config).await
}
