// crates/geobrew-core/src/loader/common_io.rs
use crate::error::{GeoBrewError, Result};
use std::fs::File;
use std::io::{BufReader, ErrorKind, Read};
use std::path::Path;

/// Opens a dataset file for buffered reading.
///
/// A missing file maps to [`GeoBrewError::NotFound`]; every other open
/// failure is an ingestion fault.
pub fn open_stream(path: &Path) -> Result<Box<dyn Read>> {
    let file = File::open(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => {
            GeoBrewError::NotFound(format!("CSV file not found: {}", path.display()))
        }
        _ => GeoBrewError::Ingestion(format!("Cannot open {}: {}", path.display(), e)),
    })?;

    Ok(Box::new(BufReader::new(file)))
}
