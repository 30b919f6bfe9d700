use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use skyline::{
    advisor,
    config::ConfigLoader,
    save::{LoadOutcome, SaveOutcome},
    store::FileStore,
    Session,
};

#[derive(Debug, Parser)]
#[command(author, version, about = "Skyline headless city runner")]
struct Cli {
    /// Path to the game config YAML file
    #[arg(long, default_value = "configs/skyline.yaml")]
    config: PathBuf,

    /// Override the master seed
    #[arg(long)]
    seed: Option<u64>,

    /// Days to simulate
    #[arg(long, default_value_t = 30)]
    days: u64,

    /// Load a save by id or name before simulating
    #[arg(long)]
    load: Option<String>,

    /// Save the city under this name afterwards
    #[arg(long)]
    save: Option<String>,

    /// Directory for the save store
    #[arg(long)]
    store_dir: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let loader = ConfigLoader::new(".");
    let mut config = loader
        .load(&cli.config)
        .with_context(|| format!("Failed to load config {}", cli.config.display()))?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if cli.seed.is_some() {
        config.seed = cli.seed;
    }
    let store_dir = cli.store_dir.unwrap_or_else(|| config.storage.dir.clone());
    let mut session = Session::new(&config, FileStore::new(&store_dir));
    tracing::info!(config = %config.name, seed = session.seed(), store = %store_dir.display(), "session ready");

    if let Some(selector) = &cli.load {
        match session.load(selector) {
            LoadOutcome::Loaded { name } => println!("Loaded '{name}'"),
            LoadOutcome::NotFound => anyhow::bail!("No save matches '{selector}'"),
            LoadOutcome::Rejected { reason } => anyhow::bail!("Save '{selector}' rejected: {reason}"),
        }
    }

    session.simulate_days(cli.days)?;

    if let Some(name) = &cli.save {
        match session.save(name) {
            SaveOutcome::Saved { id, name } => println!("Saved '{name}' as {id}"),
            SaveOutcome::BlankName => anyhow::bail!("Save name must not be blank"),
            SaveOutcome::Failed { reason } => anyhow::bail!("Save failed: {reason}"),
        }
    }

    let stats = &session.state.stats;
    println!(
        "{} day {}: population {}, treasury {}, net income {}, happiness {}",
        stats.name,
        stats.day,
        advisor::group_thousands(stats.population),
        stats.treasury,
        stats.net_income,
        stats.happiness
    );
    println!("{}", advisor::brief(stats, session.state.grid.tiles()));
    Ok(())
}
