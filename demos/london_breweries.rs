//! End-to-end run against a live Redis
//!
//! Loads both CSVs, builds the three indexes and prints the breweries
//! closest to London. Connection settings come from `REDIS_HOST`,
//! `REDIS_PORT` and `REDIS_PASSWORD`; dataset paths are the defaults under
//! `external_resources/`.
//!
//!   $ cargo run --example london_breweries

use geobrew_rs::pipeline::{self, Operation, Outcome};
use geobrew_rs::store::RedisStore;
use geobrew_rs::{Result, Settings, StoreConfig};

fn main() -> Result<()> {
    tracing_subscriber::fmt().init();

    let config = StoreConfig::from_env()?;

    println!("=== geobrew: nearest breweries to London ===\n");
    let mut store = RedisStore::connect(&config)?;
    let settings = Settings::default();

    for (op, result) in pipeline::run(&mut store, &settings, &Operation::ALL) {
        match result {
            Ok(Outcome::Ingested(report)) => {
                println!("✓ {op}: {} written, {} skipped", report.written, report.skipped)
            }
            Ok(Outcome::Breweries(list)) => {
                println!("✓ {op}:");
                for b in list {
                    println!("  - {} ({:.1} km)", b.brewery.name, b.distance_km);
                }
            }
            Ok(_) => println!("✓ {op}"),
            Err(e) => println!("✗ {op}: {e}"),
        }
    }

    Ok(())
}
