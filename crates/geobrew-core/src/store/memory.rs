// crates/geobrew-core/src/store/memory.rs
use crate::error::{GeoBrewError, Result};
use crate::model::{GeoHit, GeoPoint, SortOrder};
use crate::traits::GeoStore;
use std::collections::{BTreeMap, HashMap};

// Same sphere Redis uses for its geo commands.
const EARTH_RADIUS_KM: f64 = 6372.797560856;

/// In-process [`GeoStore`].
///
/// Hashes and geo sets live in plain maps; radius search is a linear scan
/// with great-circle distances.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    hashes: HashMap<String, HashMap<String, String>>,
    geo: HashMap<String, BTreeMap<String, GeoPoint>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of members in a geo index.
    pub fn geo_len(&self, index: &str) -> usize {
        self.geo.get(index).map_or(0, BTreeMap::len)
    }

    /// Number of fields in a hash.
    pub fn hash_len(&self, key: &str) -> usize {
        self.hashes.get(key).map_or(0, HashMap::len)
    }

    /// `true` if a hash exists under `key`.
    pub fn contains_key(&self, key: &str) -> bool {
        self.hashes.contains_key(key)
    }
}

impl GeoStore for MemoryStore {
    fn set_fields(&mut self, key: &str, fields: &[(String, String)]) -> Result<()> {
        if fields.is_empty() {
            return Ok(());
        }
        let hash = self.hashes.entry(key.to_string()).or_default();
        for (f, v) in fields {
            hash.insert(f.clone(), v.clone());
        }
        Ok(())
    }

    fn get_fields(&mut self, key: &str) -> Result<HashMap<String, String>> {
        Ok(self.hashes.get(key).cloned().unwrap_or_default())
    }

    fn get_index_entry(&mut self, index: &str, field: &str) -> Result<Option<String>> {
        Ok(self.hashes.get(index).and_then(|h| h.get(field)).cloned())
    }

    fn geo_add(&mut self, index: &str, member: &str, point: GeoPoint) -> Result<()> {
        if !point.is_valid() {
            return Err(GeoBrewError::InvalidData(format!(
                "invalid longitude,latitude pair {},{}",
                point.longitude, point.latitude
            )));
        }
        self.geo
            .entry(index.to_string())
            .or_default()
            .insert(member.to_string(), point);
        Ok(())
    }

    fn geo_position(&mut self, index: &str, member: &str) -> Result<Option<GeoPoint>> {
        Ok(self.geo.get(index).and_then(|g| g.get(member)).copied())
    }

    fn geo_search_nearest(
        &mut self,
        index: &str,
        origin: GeoPoint,
        radius_km: f64,
        limit: usize,
        order: SortOrder,
    ) -> Result<Vec<GeoHit>> {
        let Some(members) = self.geo.get(index) else {
            return Ok(Vec::new());
        };
        let mut hits: Vec<GeoHit> = members
            .iter()
            .map(|(id, p)| GeoHit {
                id: id.clone(),
                distance_km: haversine_km(origin, *p),
            })
            .filter(|h| h.distance_km <= radius_km)
            .collect();
        hits.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));
        if order == SortOrder::Descending {
            hits.reverse();
        }
        hits.truncate(limit);
        Ok(hits)
    }
}

fn haversine_km(a: GeoPoint, b: GeoPoint) -> f64 {
    let (lat1, lat2) = (a.latitude.to_radians(), b.latitude.to_radians());
    let dlat = lat2 - lat1;
    let dlng = (b.longitude - a.longitude).to_radians();
    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlng / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * h.sqrt().asin()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn london_to_paris_is_about_344_km() {
        let london = GeoPoint::new(-0.1278, 51.5074);
        let paris = GeoPoint::new(2.3522, 48.8566);
        let d = haversine_km(london, paris);
        assert!((d - 343.5).abs() < 2.0, "got {d}");
    }

    #[test]
    fn search_respects_radius_limit_and_order() {
        let mut store = MemoryStore::new();
        let origin = GeoPoint::new(0.0, 0.0);
        for (id, lng) in [("a", 0.1), ("b", 0.3), ("c", 0.2), ("far", 40.0)] {
            store.geo_add("g", id, GeoPoint::new(lng, 0.0)).unwrap();
        }

        let hits = store
            .geo_search_nearest("g", origin, 100.0, 10, SortOrder::Ascending)
            .unwrap();
        let ids: Vec<_> = hits.iter().map(|h| h.id.as_str()).collect();
        assert_eq!(ids, ["a", "c", "b"]);

        let hits = store
            .geo_search_nearest("g", origin, 100.0, 2, SortOrder::Descending)
            .unwrap();
        let ids: Vec<_> = hits.iter().map(|h| h.id.as_str()).collect();
        assert_eq!(ids, ["b", "c"]);
    }

    #[test]
    fn out_of_range_positions_are_rejected() {
        let mut store = MemoryStore::new();
        assert!(store.geo_add("g", "x", GeoPoint::new(10.0, 89.0)).is_err());
        assert_eq!(store.geo_len("g"), 0);
    }

    #[test]
    fn missing_hash_reads_as_empty() {
        let mut store = MemoryStore::new();
        assert!(store.get_fields("city:404").unwrap().is_empty());
        assert_eq!(store.get_index_entry("idx", "x").unwrap(), None);
    }
}
