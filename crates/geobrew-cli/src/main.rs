//! geobrew: load world cities and breweries into Redis and query them
//!
//! Each positional argument names a step. Steps run in the order given,
//! against a single Redis connection; a failing step is logged and the next
//! one still runs.
//!
//! Usage examples
//! --------------
//!
//! - Ingest everything, then run all three queries for London
//!   $ geobrew all
//!
//! - Only rebuild the brewery geo index
//!   $ geobrew build-brewery-geo-index --breweries data/breweries.csv
//!
//! - Country and coordinates of a city, as JSON
//!   $ geobrew --city "Belo Horizonte" --json city-location
//!
//! - Ten nearest breweries within 500 km
//!   $ geobrew --city London --radius-km 500 nearest-breweries
//!
//! Connection
//! ----------
//!
//! `--host`, `--port` and `--password` default to `REDIS_HOST`,
//! `REDIS_PORT` and `REDIS_PASSWORD`, then to `127.0.0.1:6379` without AUTH.
//! Log verbosity follows `RUST_LOG` (default `info`).
mod args;

use crate::args::CliArgs;
use anyhow::Context;
use clap::Parser;
use geobrew_core::pipeline::{self, Outcome};
use geobrew_core::store::RedisStore;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = CliArgs::parse();
    let config = args.store_config();
    let settings = args.settings();
    let ops = args.operations();

    info!("Starting geobrew...");
    let mut store = RedisStore::connect(&config)
        .with_context(|| format!("Cannot connect to Redis at {}:{}", config.host, config.port))?;

    let results = pipeline::run(&mut store, &settings, &ops);

    let mut failed = 0;
    for (op, result) in &results {
        match result {
            Ok(outcome) if args.json => {
                println!("{}", serde_json::to_string_pretty(outcome)?);
            }
            Ok(outcome) => print_outcome(outcome),
            Err(e) if e.is_not_found() => {
                eprintln!("{op}: {e}");
                failed += 1;
            }
            Err(_) => failed += 1,
        }
    }

    info!(steps = results.len(), failed, "Done");
    Ok(())
}

fn print_outcome(outcome: &Outcome) {
    match outcome {
        Outcome::Ingested(report) => {
            println!(
                "  Rows: {}  Written: {}  Skipped: {}",
                report.rows, report.written, report.skipped
            );
        }
        Outcome::City(city) => {
            println!("City: {} ({})", city.name, city.id);
            println!("  ASCII name: {}", city.ascii_name);
            println!("  Country: {} ({})", city.country, city.iso3);
            println!("  Region: {}", city.admin_name);
            println!("  Capital: {}", city.capital);
            println!("  Population: {}", city.population);
            println!("  Lat/Lng: {}, {}", city.latitude, city.longitude);
        }
        Outcome::Location(loc) => {
            println!("City: {}", loc.name);
            println!("  Country: {}", loc.country);
            println!("  Lat/Lng (record): {}, {}", loc.latitude, loc.longitude);
            match loc.geo_position {
                Some(p) => println!("  Lat/Lng (geo index): {}, {}", p.latitude, p.longitude),
                None => println!("  Lat/Lng (geo index): -"),
            }
        }
        Outcome::Breweries(list) if list.is_empty() => {
            println!("No breweries found in range");
        }
        Outcome::Breweries(list) => {
            for (i, b) in list.iter().enumerate() {
                println!(
                    "{:>2}. {} - {}, {} ({:.1} km)",
                    i + 1,
                    b.brewery.name,
                    b.brewery.city,
                    b.brewery.country,
                    b.distance_km
                );
            }
        }
    }
}
