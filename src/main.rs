use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use prompt_props::AppConfig;

#[derive(Parser)]
#[command(name = "prompt-props")]
#[command(about = "Edit reusable prompt property templates")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    /// Config file to use instead of the platform default
    #[arg(long)]
    config: Option<PathBuf>,

    /// Database file, overriding the configured one
    #[arg(long)]
    database: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG still wins over the level picked here.
    let level = if cli.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    let mut config = AppConfig::load(cli.config.as_deref())?;
    if let Some(database) = cli.database {
        config.database_path = database;
    }
    log::info!("using database {:?}", config.database_path);

    prompt_props::run_gui(config, cli.config)
}
