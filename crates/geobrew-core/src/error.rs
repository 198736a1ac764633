// crates/geobrew-core/src/error.rs
use thiserror::Error;

/// Everything that can go wrong while ingesting CSVs or querying the store.
#[derive(Debug, Error)]
pub enum GeoBrewError {
    /// A dataset file is missing, or a query found nothing under the given name.
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Ingestion failed: {0}")]
    Ingestion(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The store rejected a command or the connection dropped.
    #[error("Store error: {0}")]
    Store(#[from] redis::RedisError),

    /// The store answered, but with something we cannot turn into a record.
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

pub type Result<T> = std::result::Result<T, GeoBrewError>;

impl GeoBrewError {
    /// `true` for query misses and missing dataset files.
    pub fn is_not_found(&self) -> bool {
        matches!(self, GeoBrewError::NotFound(_))
    }
}
