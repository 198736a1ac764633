// crates/geobrew-core/src/config.rs

//! Run configuration: where the store lives, where the CSVs are, which keys
//! the indexes use and how the nearest-brewery search is shaped.

use crate::error::{GeoBrewError, Result};
use crate::model::SortOrder;
use redis::{ConnectionAddr, ConnectionInfo, RedisConnectionInfo};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_REDIS_HOST: &str = "127.0.0.1";
pub const DEFAULT_REDIS_PORT: u16 = 6379;

pub const REDIS_HOST_ENV: &str = "REDIS_HOST";
pub const REDIS_PORT_ENV: &str = "REDIS_PORT";
pub const REDIS_PASSWORD_ENV: &str = "REDIS_PASSWORD";

pub const DEFAULT_CITIES_CSV: &str = "external_resources/worldcities.csv";
pub const DEFAULT_BREWERIES_CSV: &str = "external_resources/breweries.csv";

pub const DEFAULT_NAME_INDEX_KEY: &str = "idx:city_by_name";
pub const DEFAULT_CITY_GEO_INDEX_KEY: &str = "idx:cities";
pub const DEFAULT_BREWERY_GEO_INDEX_KEY: &str = "idx:breweries";

pub const DEFAULT_RADIUS_KM: f64 = 1000.0;
pub const DEFAULT_LIMIT: usize = 10;

/// Connection settings for the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    pub host: String,
    pub port: u16,
    /// `None` or empty means no `AUTH`.
    pub password: Option<String>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_REDIS_HOST.to_string(),
            port: DEFAULT_REDIS_PORT,
            password: None,
        }
    }
}

impl StoreConfig {
    /// Reads `REDIS_HOST`, `REDIS_PORT` and `REDIS_PASSWORD`, falling back to
    /// the defaults for unset variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`from_env`](Self::from_env) over any variable source.
    ///
    /// An unparsable port is an error rather than a silent fallback.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();
        let port = match lookup(REDIS_PORT_ENV) {
            Some(raw) => raw.trim().parse().map_err(|_| {
                GeoBrewError::InvalidData(format!("{REDIS_PORT_ENV} is not a port: {raw:?}"))
            })?,
            None => defaults.port,
        };
        Ok(Self {
            host: lookup(REDIS_HOST_ENV).unwrap_or(defaults.host),
            port,
            password: lookup(REDIS_PASSWORD_ENV),
        })
    }

    /// Connection info for database 0, built without going through a URL so
    /// passwords need no escaping.
    pub fn connection_info(&self) -> ConnectionInfo {
        ConnectionInfo {
            addr: ConnectionAddr::Tcp(self.host.clone(), self.port),
            redis: RedisConnectionInfo {
                db: 0,
                password: self.password.clone().filter(|p| !p.is_empty()),
                ..Default::default()
            },
        }
    }
}

/// Locations of the two input files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetPaths {
    pub cities: PathBuf,
    pub breweries: PathBuf,
}

impl Default for DatasetPaths {
    fn default() -> Self {
        Self {
            cities: PathBuf::from(DEFAULT_CITIES_CSV),
            breweries: PathBuf::from(DEFAULT_BREWERIES_CSV),
        }
    }
}

/// Store keys of the three indexes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexKeys {
    pub city_by_name: String,
    pub city_geo: String,
    pub brewery_geo: String,
}

impl Default for IndexKeys {
    fn default() -> Self {
        Self {
            city_by_name: DEFAULT_NAME_INDEX_KEY.to_string(),
            city_geo: DEFAULT_CITY_GEO_INDEX_KEY.to_string(),
            brewery_geo: DEFAULT_BREWERY_GEO_INDEX_KEY.to_string(),
        }
    }
}

/// Shape of the nearest-brewery radius search.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NearestQuery {
    pub radius_km: f64,
    pub limit: usize,
    pub order: SortOrder,
}

impl Default for NearestQuery {
    fn default() -> Self {
        Self {
            radius_km: DEFAULT_RADIUS_KM,
            limit: DEFAULT_LIMIT,
            order: SortOrder::Ascending,
        }
    }
}

/// Everything a pipeline run needs besides the store handle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub datasets: DatasetPaths,
    pub keys: IndexKeys,
    pub nearest: NearestQuery,
    /// City the query operations ask about.
    pub city: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            datasets: DatasetPaths::default(),
            keys: IndexKeys::default(),
            nearest: NearestQuery::default(),
            city: "London".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let s = Settings::default();
        assert_eq!(s.keys.city_by_name, "idx:city_by_name");
        assert_eq!(s.keys.city_geo, "idx:cities");
        assert_eq!(s.keys.brewery_geo, "idx:breweries");
        assert_eq!(s.nearest.limit, 10);
        assert_eq!(s.nearest.radius_km, 1000.0);
        assert_eq!(StoreConfig::default().port, 6379);
    }

    #[test]
    fn empty_password_means_no_auth() {
        let cfg = StoreConfig {
            password: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(cfg.connection_info().redis.password, None);

        let cfg = StoreConfig {
            password: Some("s3cret".into()),
            ..Default::default()
        };
        let info = cfg.connection_info();
        assert_eq!(info.redis.password.as_deref(), Some("s3cret"));
        assert_eq!(info.redis.db, 0);
    }

    fn vars<'a>(pairs: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        move |name: &str| {
            pairs
                .iter()
                .find(|(k, _)| *k == name)
                .map(|(_, v)| v.to_string())
        }
    }

    #[test]
    fn unset_variables_fall_back_to_defaults() {
        let cfg = StoreConfig::from_lookup(vars(&[])).unwrap();
        assert_eq!(cfg, StoreConfig::default());
    }

    #[test]
    fn variables_override_connection_settings() {
        let cfg = StoreConfig::from_lookup(vars(&[
            ("REDIS_HOST", "redis.internal"),
            ("REDIS_PORT", "6380"),
            ("REDIS_PASSWORD", "s3cret"),
        ]))
        .unwrap();
        assert_eq!(cfg.host, "redis.internal");
        assert_eq!(cfg.port, 6380);
        assert_eq!(cfg.password.as_deref(), Some("s3cret"));
    }

    #[test]
    fn bad_port_variable_is_rejected() {
        let err = StoreConfig::from_lookup(vars(&[("REDIS_PORT", "sixty")])).unwrap_err();
        assert!(matches!(err, GeoBrewError::InvalidData(_)));
    }
}
