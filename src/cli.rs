use std::{path::PathBuf, process};

use clap::{Parser, Subcommand};

use geostage_core::usecases;
use geostage_db_json::GeocodeCacheFiles;

use crate::{config::Config, gateways};

#[derive(Debug, Parser)]
#[command(name = "geostage", version, about = "Precompute and promote the geocode cache")]
struct Args {
    /// Path to the TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Resolve all configured locations and write the staging cache
    Run,
    /// Replace the production cache with the reviewed staging cache
    Promote,
}

pub fn run() {
    let args = Args::parse();
    let cfg = match Config::try_load_from_file_or_default(args.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(err) => {
            log::error!("Invalid configuration: {err:#}");
            process::exit(1);
        }
    };
    let repo = GeocodeCacheFiles::new(&cfg.cache.staging_file, &cfg.cache.production_file);
    match args.command {
        Command::Run => run_pipeline(&cfg, &repo),
        Command::Promote => promote(&repo),
    }
}

fn run_pipeline(cfg: &Config, repo: &GeocodeCacheFiles) {
    // A missing contact is a configuration error and must abort
    // before any network activity.
    let gateway = match gateways::geocoding_gateway(&cfg.geocoding) {
        Ok(gateway) => gateway,
        Err(err) => {
            log::error!("{err:#}");
            process::exit(1);
        }
    };
    match usecases::precompute_geocode_cache(&gateway, repo, &cfg.locations) {
        Ok(summary) => {
            // Individual failures are expected and reviewed manually,
            // so they do not fail the run.
            log::info!(
                "Wrote staging cache to {}: {} resolved, {} failed",
                repo.staging_path().display(),
                summary.resolved,
                summary.failed
            );
            if summary.failed > 0 {
                log::warn!(
                    "{} of {} locations could not be resolved",
                    summary.failed,
                    summary.total()
                );
            }
        }
        Err(err) => {
            log::error!("Could not write the staging cache: {err}");
            process::exit(1);
        }
    }
}

fn promote(repo: &GeocodeCacheFiles) {
    match usecases::promote_staging_cache(repo) {
        Ok(count) => {
            log::info!(
                "Promoted {count} entries to {}",
                repo.production_path().display()
            );
        }
        Err(err) => {
            log::error!("Promotion failed: {err}");
            process::exit(1);
        }
    }
}
