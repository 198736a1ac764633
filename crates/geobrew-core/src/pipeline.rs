// crates/geobrew-core/src/pipeline.rs

//! Runs an explicit list of ingestion and query steps against one store.

use crate::common::IngestReport;
use crate::config::Settings;
use crate::error::Result;
use crate::loader::builder;
use crate::model::{City, CityLocation, NearbyBrewery};
use crate::search;
use crate::traits::GeoStore;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{error, info};

/// One step a run can perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operation {
    LoadCities,
    LoadBreweries,
    BuildNameIndex,
    BuildCityGeoIndex,
    BuildBreweryGeoIndex,
    FindCity,
    CityLocation,
    NearestBreweries,
}

impl Operation {
    /// Every operation, ingestion first, in the order `all` runs them.
    pub const ALL: [Operation; 8] = [
        Operation::LoadCities,
        Operation::LoadBreweries,
        Operation::BuildNameIndex,
        Operation::BuildCityGeoIndex,
        Operation::BuildBreweryGeoIndex,
        Operation::FindCity,
        Operation::CityLocation,
        Operation::NearestBreweries,
    ];

    pub fn is_ingestion(self) -> bool {
        !self.is_query()
    }

    pub fn is_query(self) -> bool {
        matches!(
            self,
            Operation::FindCity | Operation::CityLocation | Operation::NearestBreweries
        )
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Operation::LoadCities => "load-cities",
            Operation::LoadBreweries => "load-breweries",
            Operation::BuildNameIndex => "build-name-index",
            Operation::BuildCityGeoIndex => "build-city-geo-index",
            Operation::BuildBreweryGeoIndex => "build-brewery-geo-index",
            Operation::FindCity => "find-city",
            Operation::CityLocation => "city-location",
            Operation::NearestBreweries => "nearest-breweries",
        };
        f.write_str(s)
    }
}

/// What a successful step produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "result", rename_all = "snake_case")]
pub enum Outcome {
    Ingested(IngestReport),
    City(City),
    Location(CityLocation),
    Breweries(Vec<NearbyBrewery>),
}

/// Executes one operation.
pub fn execute<S: GeoStore + ?Sized>(
    store: &mut S,
    settings: &Settings,
    op: Operation,
) -> Result<Outcome> {
    let paths = &settings.datasets;
    let keys = &settings.keys;
    let outcome = match op {
        Operation::LoadCities => Outcome::Ingested(builder::load_cities(store, &paths.cities)?),
        Operation::LoadBreweries => {
            Outcome::Ingested(builder::load_breweries(store, &paths.breweries)?)
        }
        Operation::BuildNameIndex => Outcome::Ingested(builder::build_name_index(
            store,
            &paths.cities,
            &keys.city_by_name,
        )?),
        Operation::BuildCityGeoIndex => Outcome::Ingested(builder::build_city_geo_index(
            store,
            &paths.cities,
            &keys.city_geo,
        )?),
        Operation::BuildBreweryGeoIndex => Outcome::Ingested(builder::build_brewery_geo_index(
            store,
            &paths.breweries,
            &keys.brewery_geo,
        )?),
        Operation::FindCity => Outcome::City(search::find_city(store, keys, &settings.city)?),
        Operation::CityLocation => {
            Outcome::Location(search::city_location(store, keys, &settings.city)?)
        }
        Operation::NearestBreweries => Outcome::Breweries(search::nearest_breweries(
            store,
            keys,
            &settings.city,
            &settings.nearest,
        )?),
    };
    Ok(outcome)
}

/// Runs `ops` in order. A failing step is logged and recorded; the next one
/// still runs.
pub fn run<S: GeoStore + ?Sized>(
    store: &mut S,
    settings: &Settings,
    ops: &[Operation],
) -> Vec<(Operation, Result<Outcome>)> {
    ops.iter()
        .map(|&op| {
            info!(operation = %op, "Running");
            let result = execute(&mut *store, settings, op);
            if let Err(e) = &result {
                error!(operation = %op, error = %e, "Operation failed");
            }
            (op, result)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn failures_do_not_stop_the_run() {
        let mut store = MemoryStore::new();
        let mut settings = Settings::default();
        settings.datasets.cities = "missing/worldcities.csv".into();

        let results = run(
            &mut store,
            &settings,
            &[Operation::BuildNameIndex, Operation::FindCity],
        );
        assert_eq!(results.len(), 2);
        assert!(results.iter().all(|(_, r)| r.is_err()));
    }

    #[test]
    fn all_lists_ingestion_before_queries() {
        let first_query = Operation::ALL
            .iter()
            .position(|op| op.is_query())
            .unwrap();
        assert!(Operation::ALL[..first_query]
            .iter()
            .all(|op| op.is_ingestion()));
        assert!(Operation::ALL[first_query..].iter().all(|op| op.is_query()));
    }

    #[test]
    fn display_is_kebab_case() {
        assert_eq!(Operation::BuildCityGeoIndex.to_string(), "build-city-geo-index");
    }
}
