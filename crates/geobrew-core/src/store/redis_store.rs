// crates/geobrew-core/src/store/redis_store.rs
use crate::config::StoreConfig;
use crate::error::Result;
use crate::model::{GeoHit, GeoPoint, SortOrder};
use crate::traits::GeoStore;
use redis::{Client, Cmd, Connection};
use std::collections::HashMap;
use tracing::{debug, info};

/// [`GeoStore`] over one blocking Redis connection.
pub struct RedisStore {
    conn: Connection,
}

impl RedisStore {
    /// Opens the connection described by `config`.
    ///
    /// This is the only fatal step of a run: if it fails there is nothing to
    /// ingest into or query.
    pub fn connect(config: &StoreConfig) -> Result<Self> {
        info!(host = %config.host, port = config.port, "Connecting to Redis");
        let client = Client::open(config.connection_info())?;
        let conn = client.get_connection()?;
        Ok(Self { conn })
    }
}

impl GeoStore for RedisStore {
    fn set_fields(&mut self, key: &str, fields: &[(String, String)]) -> Result<()> {
        let Some(cmd) = hset_cmd(key, fields) else {
            return Ok(());
        };
        cmd.query::<()>(&mut self.conn)?;
        debug!(key, fields = fields.len(), "HSET");
        Ok(())
    }

    fn get_fields(&mut self, key: &str) -> Result<HashMap<String, String>> {
        Ok(hgetall_cmd(key).query(&mut self.conn)?)
    }

    fn get_index_entry(&mut self, index: &str, field: &str) -> Result<Option<String>> {
        Ok(hget_cmd(index, field).query(&mut self.conn)?)
    }

    fn geo_add(&mut self, index: &str, member: &str, point: GeoPoint) -> Result<()> {
        geoadd_cmd(index, member, point).query::<()>(&mut self.conn)?;
        Ok(())
    }

    fn geo_position(&mut self, index: &str, member: &str) -> Result<Option<GeoPoint>> {
        let reply = geopos_cmd(index, member).query(&mut self.conn)?;
        Ok(first_position(reply))
    }

    fn geo_search_nearest(
        &mut self,
        index: &str,
        origin: GeoPoint,
        radius_km: f64,
        limit: usize,
        order: SortOrder,
    ) -> Result<Vec<GeoHit>> {
        let Some(cmd) = geosearch_cmd(index, origin, radius_km, limit, order) else {
            return Ok(Vec::new());
        };
        let reply = cmd.query(&mut self.conn)?;
        Ok(into_hits(reply))
    }
}

// ---------------------------------------------------------------------------
// Command builders and reply decoding
// ---------------------------------------------------------------------------

/// `HSET key f1 v1 f2 v2 ...`; `None` when there is nothing to write.
fn hset_cmd(key: &str, fields: &[(String, String)]) -> Option<Cmd> {
    if fields.is_empty() {
        return None;
    }
    let mut cmd = redis::cmd("HSET");
    cmd.arg(key).arg(fields);
    Some(cmd)
}

fn hgetall_cmd(key: &str) -> Cmd {
    let mut cmd = redis::cmd("HGETALL");
    cmd.arg(key);
    cmd
}

fn hget_cmd(index: &str, field: &str) -> Cmd {
    let mut cmd = redis::cmd("HGET");
    cmd.arg(index).arg(field);
    cmd
}

/// `GEOADD index lon lat member`.
fn geoadd_cmd(index: &str, member: &str, point: GeoPoint) -> Cmd {
    let mut cmd = redis::cmd("GEOADD");
    cmd.arg(index)
        .arg(point.longitude)
        .arg(point.latitude)
        .arg(member);
    cmd
}

fn geopos_cmd(index: &str, member: &str) -> Cmd {
    let mut cmd = redis::cmd("GEOPOS");
    cmd.arg(index).arg(member);
    cmd
}

/// `GEOSEARCH index FROMLONLAT lon lat BYRADIUS r km ASC|DESC COUNT n WITHDIST`.
///
/// `None` for `limit == 0`: Redis rejects `COUNT 0`.
fn geosearch_cmd(
    index: &str,
    origin: GeoPoint,
    radius_km: f64,
    limit: usize,
    order: SortOrder,
) -> Option<Cmd> {
    if limit == 0 {
        return None;
    }
    let mut cmd = redis::cmd("GEOSEARCH");
    cmd.arg(index)
        .arg("FROMLONLAT")
        .arg(origin.longitude)
        .arg(origin.latitude)
        .arg("BYRADIUS")
        .arg(radius_km)
        .arg("km")
        .arg(order.as_keyword())
        .arg("COUNT")
        .arg(limit)
        .arg("WITHDIST");
    Some(cmd)
}

/// GEOPOS answers one `[lng, lat]` pair (or nil) per requested member.
fn first_position(reply: Vec<Option<(f64, f64)>>) -> Option<GeoPoint> {
    reply
        .into_iter()
        .next()
        .flatten()
        .map(|(lng, lat)| GeoPoint::new(lng, lat))
}

/// WITHDIST answers `[member, distance]` pairs in the requested order.
fn into_hits(reply: Vec<(String, f64)>) -> Vec<GeoHit> {
    reply
        .into_iter()
        .map(|(id, distance_km)| GeoHit { id, distance_km })
        .collect()
}
