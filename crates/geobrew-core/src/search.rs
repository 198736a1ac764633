// crates/geobrew-core/src/search.rs

//! # Query Runner
//!
//! Fixed sequences of store calls answering the demonstrated questions.
//! Every lookup starts at the name index; a miss at any step yields
//! [`GeoBrewError::NotFound`] instead of a half-filled result.

use crate::common::{brewery_key, city_key};
use crate::config::{IndexKeys, NearestQuery};
use crate::error::{GeoBrewError, Result};
use crate::model::{Brewery, City, CityLocation, NearbyBrewery};
use crate::traits::GeoStore;
use tracing::{debug, info, warn};

/// Resolves a display name to a city id through the name index.
pub fn resolve_city_id<S: GeoStore + ?Sized>(
    store: &mut S,
    keys: &IndexKeys,
    name: &str,
) -> Result<String> {
    let id = store
        .get_index_entry(&keys.city_by_name, name)?
        .ok_or_else(|| GeoBrewError::NotFound(format!("City '{name}' is not in the name index")))?;
    info!(city = name, id = %id, "City ID from name index");
    Ok(id)
}

/// Looks a city up by display name and reads its full record.
pub fn find_city<S: GeoStore + ?Sized>(
    store: &mut S,
    keys: &IndexKeys,
    name: &str,
) -> Result<City> {
    let id = resolve_city_id(store, keys, name)?;
    read_city(store, &id)
}

/// Country and coordinates of a city, with the position also read back from
/// the city geo index.
pub fn city_location<S: GeoStore + ?Sized>(
    store: &mut S,
    keys: &IndexKeys,
    name: &str,
) -> Result<CityLocation> {
    let id = resolve_city_id(store, keys, name)?;
    let city = read_city(store, &id)?;
    let geo_position = store.geo_position(&keys.city_geo, &id)?;
    if geo_position.is_none() {
        warn!(id = %id, "City has a record but no geo index entry");
    }

    Ok(CityLocation {
        name: city.name,
        latitude: city.latitude,
        longitude: city.longitude,
        geo_position,
        country: city.country,
    })
}

/// Breweries around a city, nearest first by default.
///
/// The origin is the city's position in the city geo index. Ids returned by
/// the radius search whose record is missing are logged and left out.
pub fn nearest_breweries<S: GeoStore + ?Sized>(
    store: &mut S,
    keys: &IndexKeys,
    name: &str,
    query: &NearestQuery,
) -> Result<Vec<NearbyBrewery>> {
    let id = resolve_city_id(store, keys, name)?;
    let origin = store.geo_position(&keys.city_geo, &id)?.ok_or_else(|| {
        GeoBrewError::NotFound(format!("City '{name}' (id {id}) is not in the geo index"))
    })?;
    debug!(lng = origin.longitude, lat = origin.latitude, "Search origin");

    let hits = store.geo_search_nearest(
        &keys.brewery_geo,
        origin,
        query.radius_km,
        query.limit,
        query.order,
    )?;
    info!(city = name, hits = hits.len(), radius_km = query.radius_km, "Brewery radius search");

    let mut out = Vec::with_capacity(hits.len());
    for hit in hits {
        let fields = store.get_fields(&brewery_key(&hit.id))?;
        if fields.is_empty() {
            warn!(id = %hit.id, "Brewery in geo index has no stored record");
            continue;
        }
        out.push(NearbyBrewery {
            brewery: Brewery::from_fields(&fields),
            distance_km: hit.distance_km,
        });
    }
    Ok(out)
}

fn read_city<S: GeoStore + ?Sized>(store: &mut S, id: &str) -> Result<City> {
    let key = city_key(id);
    let fields = store.get_fields(&key)?;
    if fields.is_empty() {
        return Err(GeoBrewError::NotFound(format!("No record stored under {key}")));
    }
    debug!(key = %key, fields = fields.len(), "Read city record");
    Ok(City::from_fields(&fields))
}
