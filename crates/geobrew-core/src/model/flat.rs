// crates/geobrew-core/src/model/flat.rs
//! Records as they live in the store: one flat hash per entity.
use super::GeoPoint;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Field/value pairs ready for `HSET`.
pub type Fields = Vec<(String, String)>;

/// A world-cities row. Values stay as the raw CSV strings.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct City {
    pub id: String,
    pub name: String,
    pub ascii_name: String,
    pub latitude: String,
    pub longitude: String,
    pub country: String,
    pub iso3: String,
    pub admin_name: String,
    pub capital: String,
    pub population: String,
}

impl City {
    pub fn to_fields(&self) -> Fields {
        vec![
            field("_id", &self.id),
            field("name", &self.name),
            field("ascii_name", &self.ascii_name),
            field("latitude", &self.latitude),
            field("longitude", &self.longitude),
            field("country", &self.country),
            field("iso3", &self.iso3),
            field("admin_name", &self.admin_name),
            field("capital", &self.capital),
            field("population", &self.population),
        ]
    }

    /// Rebuilds a city from an `HGETALL` reply. Absent fields become empty.
    pub fn from_fields(fields: &HashMap<String, String>) -> Self {
        Self {
            id: take(fields, "_id"),
            name: take(fields, "name"),
            ascii_name: take(fields, "ascii_name"),
            latitude: take(fields, "latitude"),
            longitude: take(fields, "longitude"),
            country: take(fields, "country"),
            iso3: take(fields, "iso3"),
            admin_name: take(fields, "admin_name"),
            capital: take(fields, "capital"),
            population: take(fields, "population"),
        }
    }

    /// The record's own coordinates, if both parse.
    pub fn point(&self) -> Option<GeoPoint> {
        GeoPoint::parse(&self.longitude, &self.latitude)
    }
}

/// A breweries row, with the `coordinates` column already split.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Brewery {
    pub id: String,
    pub name: String,
    pub city: String,
    pub state: String,
    /// Country code, e.g. `GB`.
    pub code: String,
    pub country: String,
    pub phone: String,
    pub website: String,
    pub coordinates: Option<GeoPoint>,
}

impl Brewery {
    pub fn to_fields(&self) -> Fields {
        let mut out = vec![
            field("_id", &self.id),
            field("name", &self.name),
            field("city", &self.city),
            field("state", &self.state),
            field("code", &self.code),
            field("country", &self.country),
            field("phone", &self.phone),
            field("website", &self.website),
        ];
        if let Some(p) = self.coordinates {
            out.push(("latitude".to_string(), p.latitude.to_string()));
            out.push(("longitude".to_string(), p.longitude.to_string()));
        }
        out
    }

    pub fn from_fields(fields: &HashMap<String, String>) -> Self {
        let coordinates = match (fields.get("longitude"), fields.get("latitude")) {
            (Some(lng), Some(lat)) => GeoPoint::parse(lng, lat),
            _ => None,
        };
        Self {
            id: take(fields, "_id"),
            name: take(fields, "name"),
            city: take(fields, "city"),
            state: take(fields, "state"),
            code: take(fields, "code"),
            country: take(fields, "country"),
            phone: take(fields, "phone"),
            website: take(fields, "website"),
            coordinates,
        }
    }
}

/// Result of the country + coordinates lookup.
///
/// `geo_position` comes from the geo index rather than the record; it is
/// `None` when the city was never added to the geo index.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CityLocation {
    pub name: String,
    pub latitude: String,
    pub longitude: String,
    pub geo_position: Option<GeoPoint>,
    pub country: String,
}

/// A brewery together with its distance from the search origin.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NearbyBrewery {
    pub brewery: Brewery,
    pub distance_km: f64,
}

fn field(name: &str, value: &str) -> (String, String) {
    (name.to_string(), value.to_string())
}

fn take(fields: &HashMap<String, String>, key: &str) -> String {
    fields.get(key).cloned().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn city_fields_use_stored_names() {
        let city = City {
            id: "1".into(),
            name: "London".into(),
            latitude: "51.5072".into(),
            longitude: "-0.1275".into(),
            ..Default::default()
        };
        let fields: HashMap<_, _> = city.to_fields().into_iter().collect();
        assert_eq!(fields["_id"], "1");
        assert_eq!(fields["name"], "London");
        assert_eq!(fields.len(), 10);
        assert_eq!(City::from_fields(&fields), city);
    }

    #[test]
    fn brewery_without_coordinates_has_no_position_fields() {
        let brewery = Brewery {
            id: "7".into(),
            name: "Fuller's".into(),
            ..Default::default()
        };
        let fields: HashMap<_, _> = brewery.to_fields().into_iter().collect();
        assert!(!fields.contains_key("latitude"));
        assert_eq!(Brewery::from_fields(&fields).coordinates, None);
    }

    #[test]
    fn city_point_needs_both_coordinates() {
        let mut city = City {
            latitude: "48.8566".into(),
            longitude: "2.3522".into(),
            ..Default::default()
        };
        assert_eq!(city.point(), Some(GeoPoint::new(2.3522, 48.8566)));
        city.longitude.clear();
        assert_eq!(city.point(), None);
    }
}
