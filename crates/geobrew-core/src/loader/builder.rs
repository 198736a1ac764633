// crates/geobrew-core/src/loader/builder.rs

//! # Index Builder
//!
//! Streams the dataset CSVs and writes records and indexes into a
//! [`GeoStore`]. Each procedure stands alone: none checks that another ran
//! first, and re-running one over the same file yields the same store state.
//!
//! A file that cannot be opened or parsed aborts the procedure with an error;
//! writes already issued are not rolled back. Rows lacking an id or usable
//! coordinates are logged and skipped.

use super::{open_rows, Delimiter};
use crate::common::{brewery_key, city_key, IngestReport};
use crate::error::Result;
use crate::model::{brewery_from_row, city_from_row, parse_coordinates, GeoPoint};
use crate::traits::GeoStore;
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info, warn};

// -----------------------------------------------------------------------------
// INDEXES
// -----------------------------------------------------------------------------

/// Builds the name→id index from the cities CSV with a single batched write.
///
/// Names are not unique; the last row with a given name wins.
pub fn build_name_index<S: GeoStore + ?Sized>(
    store: &mut S,
    cities_csv: impl AsRef<Path>,
    index_key: &str,
) -> Result<IngestReport> {
    let path = cities_csv.as_ref();
    info!(index = index_key, csv = %path.display(), "Creating name index");

    let mut report = IngestReport::default();
    let mut entries: HashMap<String, String> = HashMap::new();

    for row in open_rows(path, Delimiter::Comma)? {
        let row = row?;
        match row.present("id") {
            Some(id) => {
                let name = row.get_or_empty("city");
                debug!(id, city = name, "Indexing city name");
                entries.insert(name.to_string(), id.to_string());
                report.record_written();
            }
            None => {
                warn!(?row, "Missing city ID in row");
                report.record_skipped();
            }
        }
    }

    let entries: Vec<(String, String)> = entries.into_iter().collect();
    store.set_index_entries(index_key, &entries)?;
    info!(
        index = index_key,
        names = entries.len(),
        skipped = report.skipped,
        "Name index written"
    );
    Ok(report)
}

/// Adds every city with an id and coordinates to the city geo index, one
/// `GEOADD` per row.
pub fn build_city_geo_index<S: GeoStore + ?Sized>(
    store: &mut S,
    cities_csv: impl AsRef<Path>,
    index_key: &str,
) -> Result<IngestReport> {
    let path = cities_csv.as_ref();
    info!(index = index_key, csv = %path.display(), "Creating city geo index");

    let mut report = IngestReport::default();
    for row in open_rows(path, Delimiter::Comma)? {
        let row = row?;
        let point = match (row.present("lat"), row.present("lng")) {
            (Some(lat), Some(lng)) => GeoPoint::parse(lng, lat),
            _ => None,
        };
        match (row.present("id"), point) {
            (Some(id), Some(point)) => {
                debug!(id, "Adding city to geo index");
                store.geo_add(index_key, id, point)?;
                report.record_written();
            }
            (id, _) => {
                warn!(id = id.unwrap_or(""), ?row, "Missing or invalid geodata for city");
                report.record_skipped();
            }
        }
    }

    info!(index = index_key, added = report.written, skipped = report.skipped, "City geo index written");
    Ok(report)
}

/// Adds every brewery with an id and a valid `coordinates` column to the
/// brewery geo index.
pub fn build_brewery_geo_index<S: GeoStore + ?Sized>(
    store: &mut S,
    breweries_csv: impl AsRef<Path>,
    index_key: &str,
) -> Result<IngestReport> {
    let path = breweries_csv.as_ref();
    info!(index = index_key, csv = %path.display(), "Creating brewery geo index");

    let mut report = IngestReport::default();
    for row in open_rows(path, Delimiter::Semicolon)? {
        let row = row?;
        let raw = row.get_or_empty("coordinates");
        match (row.present("id"), parse_coordinates(raw)) {
            (Some(id), Some(point)) => {
                debug!(id, coordinates = raw, "Adding brewery to geo index");
                store.geo_add(index_key, id, point)?;
                report.record_written();
            }
            (id, _) => {
                warn!(id = id.unwrap_or(""), coordinates = raw, "Missing or invalid geodata for brewery");
                report.record_skipped();
            }
        }
    }

    info!(index = index_key, added = report.written, skipped = report.skipped, "Brewery geo index written");
    Ok(report)
}

// -----------------------------------------------------------------------------
// RECORDS
// -----------------------------------------------------------------------------

/// Stores every city row with an id as a `city:<id>` hash.
pub fn load_cities<S: GeoStore + ?Sized>(
    store: &mut S,
    cities_csv: impl AsRef<Path>,
) -> Result<IngestReport> {
    let path = cities_csv.as_ref();
    info!(csv = %path.display(), "Loading city records");

    let mut report = IngestReport::default();
    for row in open_rows(path, Delimiter::Comma)? {
        let row = row?;
        if row.present("id").is_none() {
            warn!(?row, "Missing city ID in row");
            report.record_skipped();
            continue;
        }
        let city = city_from_row(&row);
        store.set_fields(&city_key(&city.id), &city.to_fields())?;
        debug!(id = %city.id, "Stored city");
        report.record_written();
    }

    info!(stored = report.written, skipped = report.skipped, "City records loaded");
    Ok(report)
}

/// Stores every brewery row with an id as a `brw:<id>` hash.
pub fn load_breweries<S: GeoStore + ?Sized>(
    store: &mut S,
    breweries_csv: impl AsRef<Path>,
) -> Result<IngestReport> {
    let path = breweries_csv.as_ref();
    info!(csv = %path.display(), "Loading brewery records");

    let mut report = IngestReport::default();
    for row in open_rows(path, Delimiter::Semicolon)? {
        let row = row?;
        if row.present("id").is_none() {
            warn!(?row, "Missing brewery ID in row");
            report.record_skipped();
            continue;
        }
        let brewery = brewery_from_row(&row);
        store.set_fields(&brewery_key(&brewery.id), &brewery.to_fields())?;
        debug!(id = %brewery.id, "Stored brewery");
        report.record_written();
    }

    info!(stored = report.written, skipped = report.skipped, "Brewery records loaded");
    Ok(report)
}
