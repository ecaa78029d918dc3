//! Command handlers. Each step runs to completion before the next starts;
//! the first fatal error aborts the remaining steps.

use cashea_core::{AppConfig, RegionCatalog};
use cashea_index::{
    run_merchants_index, run_orders_index, run_payments_analytics, run_stores_index,
    BankSmoothing, IndexCache, IndexError, StepReport,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::{Entity, SmoothingArgs};

fn print_report(report: &StepReport) {
    match report {
        StepReport::Written {
            file,
            records,
            skipped_files,
            ..
        } => {
            if *skipped_files > 0 {
                println!(
                    "created {file} with {records} records ({skipped_files} unreadable files skipped)"
                );
            } else {
                println!("created {file} with {records} records");
            }
        }
        StepReport::SourceMissing { file, dir } => {
            println!("skipped {file}: {} does not exist", dir.display());
        }
    }
}

/// Build the merchant, store, and order indexes, or just one of them.
pub(crate) fn run_index(config: &AppConfig, only: Option<Entity>) -> anyhow::Result<()> {
    let catalog = RegionCatalog::venezuela();
    let wants = |entity: Entity| only.is_none_or(|o| o == entity);

    if wants(Entity::Merchants) {
        print_report(&run_merchants_index(config, &catalog)?);
    }
    if wants(Entity::Stores) {
        print_report(&run_stores_index(config)?);
    }
    if wants(Entity::Orders) {
        print_report(&run_orders_index(config)?);
    }
    Ok(())
}

fn smoothing_from(config: &AppConfig, args: &SmoothingArgs) -> (BankSmoothing, StdRng) {
    let settings = &config.bank_smoothing;
    let smoothing = if settings.enabled && !args.no_smoothing {
        BankSmoothing::with_probability(settings.probability)
    } else {
        BankSmoothing::off()
    };
    let rng = match args.seed.or(settings.seed) {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    (smoothing, rng)
}

/// Build `payments_analytics.json`.
pub(crate) fn run_payments(config: &AppConfig, args: &SmoothingArgs) -> anyhow::Result<()> {
    let (smoothing, mut rng) = smoothing_from(config, args);
    tracing::debug!(probability = smoothing.probability(), "bank smoothing");
    print_report(&run_payments_analytics(config, &smoothing, &mut rng)?);
    Ok(())
}

pub(crate) fn run_all(config: &AppConfig, args: &SmoothingArgs) -> anyhow::Result<()> {
    run_index(config, None)?;
    run_payments(config, args)
}

/// An index that has not been generated yet reads as empty.
fn or_empty<T>(result: Result<Vec<T>, IndexError>, what: &str) -> anyhow::Result<Vec<T>> {
    match result {
        Ok(entries) => Ok(entries),
        Err(IndexError::Io { path, source }) if source.kind() == std::io::ErrorKind::NotFound => {
            tracing::warn!(%path, "{what} index not found; treating as empty");
            Ok(Vec::new())
        }
        Err(e) => Err(e.into()),
    }
}

/// Print the dashboard rollups as pretty JSON.
pub(crate) fn run_report(config: &AppConfig) -> anyhow::Result<()> {
    let mut cache = IndexCache::new(config.output_dir.clone());
    let merchants = or_empty(cache.merchants_index(), "merchants")?;
    let orders = or_empty(cache.orders_index(), "orders")?;

    let report = cashea_report::build_report(&merchants, &orders);
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
