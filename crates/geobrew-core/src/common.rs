// crates/geobrew-core/src/common.rs
use serde::{Deserialize, Serialize};

pub const CITY_KEY_PREFIX: &str = "city";
pub const BREWERY_KEY_PREFIX: &str = "brw";

/// Hash key of a stored city record, e.g. `city:1826645935`.
pub fn city_key(id: &str) -> String {
    format!("{CITY_KEY_PREFIX}:{id}")
}

/// Hash key of a stored brewery record, e.g. `brw:42`.
pub fn brewery_key(id: &str) -> String {
    format!("{BREWERY_KEY_PREFIX}:{id}")
}

/// Row counts of one ingestion pass.
///
/// Returned by every procedure in [`crate::builder`]. `rows` counts what the
/// CSV yielded, `written` what reached the store, `skipped` the rows dropped
/// for missing ids or unusable geodata.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestReport {
    pub rows: usize,
    pub written: usize,
    pub skipped: usize,
}

impl IngestReport {
    pub(crate) fn record_written(&mut self) {
        self.rows += 1;
        self.written += 1;
    }

    pub(crate) fn record_skipped(&mut self) {
        self.rows += 1;
        self.skipped += 1;
    }
}
