// crates/geobrew-core/src/traits.rs
use crate::error::Result;
use crate::model::{GeoHit, GeoPoint, SortOrder};
use std::collections::HashMap;

/// Store abstraction: the hash and geo commands the builders and queries need.
///
/// Every method is a thin pass-through to one store command. Distance
/// computation, spatial indexing and ranking stay on the store side.
///
/// Methods take `&mut self` because a single blocking connection is used for
/// the whole run; callers construct it once and pass it down.
///
/// # Example
///
/// ```rust
/// use geobrew_core::store::MemoryStore;
/// use geobrew_core::{GeoPoint, GeoStore};
///
/// let mut store = MemoryStore::new();
/// store.geo_add("idx:cities", "1", GeoPoint::new(-0.1275, 51.5072)).unwrap();
/// let pos = store.geo_position("idx:cities", "1").unwrap();
/// assert_eq!(pos, Some(GeoPoint::new(-0.1275, 51.5072)));
/// ```
pub trait GeoStore {
    /// Writes a record as a hash under `key` (`HSET`). An empty mapping is a no-op.
    fn set_fields(&mut self, key: &str, fields: &[(String, String)]) -> Result<()>;

    /// Reads a whole hash (`HGETALL`). A missing key yields an empty map.
    fn get_fields(&mut self, key: &str) -> Result<HashMap<String, String>>;

    /// Sets one field of an index hash.
    fn set_index_entry(&mut self, index: &str, field: &str, value: &str) -> Result<()> {
        self.set_index_entries(index, &[(field.to_string(), value.to_string())])
    }

    /// Sets many fields of an index hash in one round-trip.
    fn set_index_entries(&mut self, index: &str, entries: &[(String, String)]) -> Result<()> {
        self.set_fields(index, entries)
    }

    /// Reads one field of an index hash (`HGET`).
    fn get_index_entry(&mut self, index: &str, field: &str) -> Result<Option<String>>;

    /// Adds or moves `member` in a geo index (`GEOADD`).
    fn geo_add(&mut self, index: &str, member: &str, point: GeoPoint) -> Result<()>;

    /// Position of `member` in a geo index (`GEOPOS`), `None` if absent.
    fn geo_position(&mut self, index: &str, member: &str) -> Result<Option<GeoPoint>>;

    /// Members within `radius_km` of `origin`, at most `limit`, in `order`
    /// (`GEOSEARCH ... BYRADIUS ... WITHDIST`).
    fn geo_search_nearest(
        &mut self,
        index: &str,
        origin: GeoPoint,
        radius_km: f64,
        limit: usize,
        order: SortOrder,
    ) -> Result<Vec<GeoHit>>;
}

impl<S: GeoStore + ?Sized> GeoStore for &mut S {
    fn set_fields(&mut self, key: &str, fields: &[(String, String)]) -> Result<()> {
        (**self).set_fields(key, fields)
    }

    fn get_fields(&mut self, key: &str) -> Result<HashMap<String, String>> {
        (**self).get_fields(key)
    }

    fn set_index_entry(&mut self, index: &str, field: &str, value: &str) -> Result<()> {
        (**self).set_index_entry(index, field, value)
    }

    fn set_index_entries(&mut self, index: &str, entries: &[(String, String)]) -> Result<()> {
        (**self).set_index_entries(index, entries)
    }

    fn get_index_entry(&mut self, index: &str, field: &str) -> Result<Option<String>> {
        (**self).get_index_entry(index, field)
    }

    fn geo_add(&mut self, index: &str, member: &str, point: GeoPoint) -> Result<()> {
        (**self).geo_add(index, member, point)
    }

    fn geo_position(&mut self, index: &str, member: &str) -> Result<Option<GeoPoint>> {
        (**self).geo_position(index, member)
    }

    fn geo_search_nearest(
        &mut self,
        index: &str,
        origin: GeoPoint,
        radius_km: f64,
        limit: usize,
        order: SortOrder,
    ) -> Result<Vec<GeoHit>> {
        (**self).geo_search_nearest(index, origin, radius_km, limit, order)
    }
}
