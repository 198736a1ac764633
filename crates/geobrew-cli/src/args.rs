use clap::{Parser, ValueEnum};
use geobrew_core::config::{
    DEFAULT_BREWERIES_CSV, DEFAULT_CITIES_CSV, DEFAULT_LIMIT, DEFAULT_RADIUS_KM,
    DEFAULT_REDIS_HOST, DEFAULT_REDIS_PORT, REDIS_HOST_ENV, REDIS_PASSWORD_ENV, REDIS_PORT_ENV,
};
use geobrew_core::{
    DatasetPaths, IndexKeys, NearestQuery, Operation, Settings, SortOrder, StoreConfig,
};
use std::path::PathBuf;

/// CLI arguments for geobrew
#[derive(Debug, Parser)]
#[command(
    name = "geobrew",
    version,
    about = "Load world cities and breweries into Redis and query the geo indexes"
)]
pub struct CliArgs {
    /// Redis host
    #[arg(long, env = REDIS_HOST_ENV, default_value = DEFAULT_REDIS_HOST)]
    pub host: String,

    /// Redis port
    #[arg(long, env = REDIS_PORT_ENV, default_value_t = DEFAULT_REDIS_PORT)]
    pub port: u16,

    /// Redis password (omit for no AUTH)
    #[arg(long, env = REDIS_PASSWORD_ENV, hide_env_values = true)]
    pub password: Option<String>,

    /// Comma-delimited world cities CSV
    #[arg(long, default_value = DEFAULT_CITIES_CSV)]
    pub cities: PathBuf,

    /// Semicolon-delimited breweries CSV
    #[arg(long, default_value = DEFAULT_BREWERIES_CSV)]
    pub breweries: PathBuf,

    /// City the query steps ask about (e.g. "Belo Horizonte")
    #[arg(short = 'c', long, default_value = "London")]
    pub city: String,

    /// Search radius for nearest-breweries, in kilometres
    #[arg(long, default_value_t = DEFAULT_RADIUS_KM)]
    pub radius_km: f64,

    /// Maximum number of breweries returned
    #[arg(long, default_value_t = DEFAULT_LIMIT)]
    pub limit: usize,

    /// Farthest first instead of nearest first
    #[arg(long)]
    pub desc: bool,

    /// Print query results as JSON
    #[arg(long)]
    pub json: bool,

    /// Steps to run, in order
    #[arg(value_enum, required = true, num_args = 1..)]
    pub steps: Vec<Step>,
}

/// Command-line names of the pipeline operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Step {
    /// Every step below, ingestion first
    All,
    /// Store every city row as a `city:<id>` hash
    LoadCities,
    /// Store every brewery row as a `brw:<id>` hash
    LoadBreweries,
    /// Build the city name -> id index
    BuildNameIndex,
    /// Build the city geo index
    BuildCityGeoIndex,
    /// Build the brewery geo index
    BuildBreweryGeoIndex,
    /// Look the city up by name
    FindCity,
    /// Country and coordinates of the city
    CityLocation,
    /// Breweries closest to the city
    NearestBreweries,
}

impl Step {
    fn operations(self) -> &'static [Operation] {
        match self {
            Step::All => &Operation::ALL,
            Step::LoadCities => &[Operation::LoadCities],
            Step::LoadBreweries => &[Operation::LoadBreweries],
            Step::BuildNameIndex => &[Operation::BuildNameIndex],
            Step::BuildCityGeoIndex => &[Operation::BuildCityGeoIndex],
            Step::BuildBreweryGeoIndex => &[Operation::BuildBreweryGeoIndex],
            Step::FindCity => &[Operation::FindCity],
            Step::CityLocation => &[Operation::CityLocation],
            Step::NearestBreweries => &[Operation::NearestBreweries],
        }
    }
}

impl CliArgs {
    pub fn store_config(&self) -> StoreConfig {
        StoreConfig {
            host: self.host.clone(),
            port: self.port,
            password: self.password.clone(),
        }
    }

    pub fn settings(&self) -> Settings {
        Settings {
            datasets: DatasetPaths {
                cities: self.cities.clone(),
                breweries: self.breweries.clone(),
            },
            keys: IndexKeys::default(),
            nearest: NearestQuery {
                radius_km: self.radius_km,
                limit: self.limit,
                order: if self.desc {
                    SortOrder::Descending
                } else {
                    SortOrder::Ascending
                },
            },
            city: self.city.clone(),
        }
    }

    /// The requested steps expanded to operations, in the order given.
    pub fn operations(&self) -> Vec<Operation> {
        self.steps
            .iter()
            .flat_map(|s| s.operations().iter().copied())
            .collect()
    }
}
