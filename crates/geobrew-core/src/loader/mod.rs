// crates/geobrew-core/src/loader/mod.rs

//! # CSV Reader
//!
//! Opens a dataset file and yields its rows lazily as header→value
//! mappings. The cities file is comma-delimited, the breweries file uses
//! semicolons.

use crate::error::Result;
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

pub mod builder;
mod common_io;

pub use common_io::open_stream;

/// Field separator of a dataset file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    Comma,
    Semicolon,
}

impl Delimiter {
    pub fn as_byte(self) -> u8 {
        match self {
            Delimiter::Comma => b',',
            Delimiter::Semicolon => b';',
        }
    }
}

/// One CSV record keyed by header name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    fields: HashMap<String, String>,
}

impl Row {
    /// Raw value of a column, empty strings included.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    /// Value of a column only if it carries something besides whitespace.
    pub fn present(&self, key: &str) -> Option<&str> {
        self.get(key).filter(|v| !v.trim().is_empty())
    }

    /// Raw value, or `""` when the column is missing.
    pub fn get_or_empty(&self, key: &str) -> &str {
        self.get(key).unwrap_or("")
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Lazy, single-pass iterator over the rows of one file.
pub struct CsvRows {
    headers: Vec<String>,
    records: csv::StringRecordsIntoIter<Box<dyn Read>>,
}

impl CsvRows {
    pub fn headers(&self) -> &[String] {
        &self.headers
    }
}

impl Iterator for CsvRows {
    type Item = Result<Row>;

    fn next(&mut self) -> Option<Self::Item> {
        let record = match self.records.next()? {
            Ok(r) => r,
            Err(e) => return Some(Err(e.into())),
        };
        // Short rows are allowed; their trailing columns stay absent.
        let row: Row = self
            .headers
            .iter()
            .zip(record.iter())
            .map(|(h, v)| (h.as_str(), v))
            .collect();
        Some(Ok(row))
    }
}

/// Opens `path` and returns its rows.
pub fn open_rows(path: impl AsRef<Path>, delimiter: Delimiter) -> Result<CsvRows> {
    let stream = open_stream(path.as_ref())?;
    rows_from_reader(stream, delimiter)
}

/// Same as [`open_rows`] for an already open reader.
pub fn rows_from_reader(reader: Box<dyn Read>, delimiter: Delimiter) -> Result<CsvRows> {
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(delimiter.as_byte())
        .flexible(true)
        .from_reader(reader);
    let headers = rdr.headers()?.iter().map(str::to_string).collect();
    Ok(CsvRows {
        headers,
        records: rdr.into_records(),
    })
}
