mod generate;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "cashea")]
#[command(about = "Builds the CASHEA Data Explorer index files")]
struct Cli {
    /// Root of the site data; source folders default to `SAMPLE_*` under it
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Where index files are written and read back from
    #[arg(long, global = true)]
    output_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Build the merchants, stores, and orders indexes
    Index {
        /// Build a single index instead of all three
        #[arg(long, value_enum)]
        only: Option<Entity>,
    },
    /// Build payments_analytics.json from store payment methods
    Payments(SmoothingArgs),
    /// Build every index and the payments analytics (the default)
    All(SmoothingArgs),
    /// Print dashboard rollups computed from the index files
    Report,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Entity {
    Merchants,
    Stores,
    Orders,
}

#[derive(Debug, Default, Args)]
struct SmoothingArgs {
    /// Seed the bank smoothing RNG for reproducible output
    #[arg(long)]
    seed: Option<u64>,

    /// Tally banks exactly as they appear in the source files
    #[arg(long)]
    no_smoothing: bool,
}

fn apply_overrides(config: &mut cashea_core::AppConfig, cli: &Cli) {
    if let Some(dir) = &cli.data_dir {
        config.set_data_dir(dir.clone());
    }
    if let Some(dir) = &cli.output_dir {
        config.output_dir.clone_from(dir);
    }
}

/// Load `.env` once, read the environment, then apply command-line overrides.
fn load_config(cli: &Cli) -> anyhow::Result<cashea_core::AppConfig> {
    dotenvy::dotenv().ok();
    let mut config = cashea_core::load_app_config_from_env()?;
    apply_overrides(&mut config, cli);
    Ok(config)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = load_config(&cli)?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();
    tracing::debug!(?config, "configuration loaded");

    match cli.command {
        Some(Commands::Index { only }) => generate::run_index(&config, only),
        Some(Commands::Payments(args)) => generate::run_payments(&config, &args),
        Some(Commands::All(args)) => generate::run_all(&config, &args),
        Some(Commands::Report) => generate::run_report(&config),
        None => generate::run_all(&config, &SmoothingArgs::default()),
    }
}
