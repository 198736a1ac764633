// crates/geobrew-core/src/model/convert.rs
use super::flat::{Brewery, City};
use super::GeoPoint;
use crate::loader::Row;

/// **City Mapper:** world-cities row -> [`City`].
///
/// No validation happens here; missing columns become empty strings.
pub fn city_from_row(row: &Row) -> City {
    City {
        id: row.get_or_empty("id").to_string(),
        name: row.get_or_empty("city").to_string(),
        ascii_name: row.get_or_empty("city_ascii").to_string(),
        latitude: row.get_or_empty("lat").to_string(),
        longitude: row.get_or_empty("lng").to_string(),
        country: row.get_or_empty("country").to_string(),
        iso3: row.get_or_empty("iso3").to_string(),
        admin_name: row.get_or_empty("admin_name").to_string(),
        capital: row.get_or_empty("capital").to_string(),
        population: row.get_or_empty("population").to_string(),
    }
}

/// **Brewery Mapper:** breweries row -> [`Brewery`].
///
/// The `coordinates` column is parsed with [`parse_coordinates`]; a bad value
/// leaves `coordinates` as `None`.
pub fn brewery_from_row(row: &Row) -> Brewery {
    Brewery {
        id: row.get_or_empty("id").to_string(),
        name: row.get_or_empty("breweries").to_string(),
        city: row.get_or_empty("city").to_string(),
        state: row.get_or_empty("state").to_string(),
        code: row.get_or_empty("code").to_string(),
        country: row.get_or_empty("country").to_string(),
        phone: row.get_or_empty("phone").to_string(),
        website: row.get_or_empty("website").to_string(),
        coordinates: row.get("coordinates").and_then(parse_coordinates),
    }
}

/// Parses a `"lat,long"` pair.
///
/// Exactly two comma-separated parts must be present, both must be
/// numbers and the point must be inside the geo index range.
///
/// # Examples
///
/// ```rust
/// use geobrew_core::model::parse_coordinates;
///
/// let p = parse_coordinates("51.5074,-0.1278").unwrap();
/// assert_eq!(p.latitude, 51.5074);
/// assert_eq!(p.longitude, -0.1278);
///
/// assert!(parse_coordinates("51.5074").is_none());
/// assert!(parse_coordinates("1,2,3").is_none());
/// assert!(parse_coordinates("91.5,-0.12").is_none());
/// ```
pub fn parse_coordinates(raw: &str) -> Option<GeoPoint> {
    let parts: Vec<&str> = raw.split(',').collect();
    match parts.as_slice() {
        [lat, lng] => GeoPoint::parse(lng, lat),
        _ => None,
    }
}
