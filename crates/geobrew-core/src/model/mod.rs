// crates/geobrew-core/src/model/mod.rs
pub mod convert;
pub mod flat;

pub use convert::{brewery_from_row, city_from_row, parse_coordinates};
pub use flat::{Brewery, City, CityLocation, NearbyBrewery};

use serde::{Deserialize, Serialize};

/// Latitude bound of the Web Mercator projection geo indexes use.
pub const MAX_LATITUDE: f64 = 85.05112878;
pub const MAX_LONGITUDE: f64 = 180.0;

/// A position on the globe, in the (longitude, latitude) order Redis uses.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub longitude: f64,
    pub latitude: f64,
}

impl GeoPoint {
    pub fn new(longitude: f64, latitude: f64) -> Self {
        Self {
            longitude,
            latitude,
        }
    }

    /// Parses a longitude/latitude pair of raw strings (as read from CSV).
    ///
    /// Returns `None` unless both parse and the point [is valid](Self::is_valid).
    pub fn parse(longitude: &str, latitude: &str) -> Option<Self> {
        let longitude = longitude.trim().parse().ok()?;
        let latitude = latitude.trim().parse().ok()?;
        Some(Self::new(longitude, latitude)).filter(GeoPoint::is_valid)
    }

    /// `true` if the point is finite and inside the range a geo index accepts.
    pub fn is_valid(&self) -> bool {
        self.longitude.is_finite()
            && self.latitude.is_finite()
            && (-MAX_LONGITUDE..=MAX_LONGITUDE).contains(&self.longitude)
            && (-MAX_LATITUDE..=MAX_LATITUDE).contains(&self.latitude)
    }

    /// `true` if both coordinates are within `tolerance` degrees of `other`.
    pub fn approx_eq(&self, other: &GeoPoint, tolerance: f64) -> bool {
        (self.longitude - other.longitude).abs() <= tolerance
            && (self.latitude - other.latitude).abs() <= tolerance
    }
}

/// Sort direction of a radius search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortOrder {
    /// Nearest first.
    #[default]
    Ascending,
    Descending,
}

impl SortOrder {
    /// The Redis keyword for this order.
    pub fn as_keyword(self) -> &'static str {
        match self {
            SortOrder::Ascending => "ASC",
            SortOrder::Descending => "DESC",
        }
    }
}

/// One member returned by a radius search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoHit {
    pub id: String,
    pub distance_km: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_rejects_points_a_geo_index_cannot_hold() {
        assert_eq!(GeoPoint::parse("-0.12", "51.5"), Some(GeoPoint::new(-0.12, 51.5)));
        assert_eq!(GeoPoint::parse("-0.12", "91.5"), None);
        assert_eq!(GeoPoint::parse("180.5", "10"), None);
        assert_eq!(GeoPoint::parse("0", "-85.1"), None);
        assert_eq!(GeoPoint::parse("inf", "NaN"), None);
        assert_eq!(GeoPoint::parse("NaN", "0"), None);
    }

    #[test]
    fn range_bounds_are_inclusive() {
        assert!(GeoPoint::new(180.0, MAX_LATITUDE).is_valid());
        assert!(GeoPoint::new(-180.0, -MAX_LATITUDE).is_valid());
        assert!(!GeoPoint::new(f64::INFINITY, 0.0).is_valid());
    }
}
