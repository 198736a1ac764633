// crates/geobrew-core/src/lib.rs

//! geobrew-core
//! ============
//!
//! Loads the world-cities and breweries CSVs into Redis hashes and geo sets,
//! then answers a few questions against them: a city by name, its country
//! and coordinates, and the breweries closest to it.
//!
//! All spatial work (indexing, radius search, ranking) is done by Redis.
//! This crate reads the CSVs, maps rows to records and issues the commands.
//!
//! ```rust
//! use geobrew_core::store::MemoryStore;
//! use geobrew_core::{search, GeoStore, IndexKeys};
//!
//! let keys = IndexKeys::default();
//! let mut store = MemoryStore::new();
//! store.set_index_entry(&keys.city_by_name, "London", "1").unwrap();
//! store.set_fields("city:1", &[("name".into(), "London".into())]).unwrap();
//!
//! let city = search::find_city(&mut store, &keys, "London").unwrap();
//! assert_eq!(city.name, "London");
//! ```

pub mod common;
pub mod config;
pub mod error;
pub mod loader;
pub mod model;
pub mod pipeline;
pub mod search;
pub mod store;
pub mod traits;

pub use loader::builder;

// Re-exports
pub use crate::common::{brewery_key, city_key, IngestReport};
pub use crate::config::{DatasetPaths, IndexKeys, NearestQuery, Settings, StoreConfig};
pub use crate::error::{GeoBrewError, Result};
pub use crate::model::{
    Brewery, City, CityLocation, GeoHit, GeoPoint, NearbyBrewery, SortOrder,
};
pub use crate::pipeline::{Operation, Outcome};
pub use crate::traits::GeoStore;
