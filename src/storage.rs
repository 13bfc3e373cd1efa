//! Loading model output and options from disk.

use crate::error::Result;
use crate::options::PlotOptions;
use csv::{ReaderBuilder, WriterBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs::File;
use std::io::{BufReader, Write};
use std::path::Path;

/// Read a headerless numeric CSV, one item per row. Rows may differ in length.
pub fn load_matrix_csv<P: AsRef<Path>>(path: P) -> Result<Vec<Vec<f64>>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path.as_ref())?;
    let mut rows = Vec::new();
    for record in rdr.deserialize::<Vec<f64>>() {
        rows.push(record?);
    }
    log::debug!("loaded {} rows from {}", rows.len(), path.as_ref().display());
    Ok(rows)
}

/// Write rows as a headerless CSV.
pub fn save_matrix_csv<P: AsRef<Path>>(rows: &[Vec<f64>], path: P) -> Result<()> {
    let mut wtr = WriterBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)?;
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn load_json<T: DeserializeOwned, P: AsRef<Path>>(path: P) -> Result<T> {
    let f = File::open(path)?;
    Ok(serde_json::from_reader(BufReader::new(f))?)
}

/// Save any serializable value as pretty JSON.
pub fn save_json<T: Serialize + ?Sized, P: AsRef<Path>>(value: &T, path: P) -> Result<()> {
    let mut f = File::create(path)?;
    let s = serde_json::to_string_pretty(value)?;
    f.write_all(s.as_bytes())?;
    Ok(())
}

/// Options file; missing fields take their defaults.
pub fn load_options<P: AsRef<Path>>(path: P) -> Result<PlotOptions> {
    load_json(path)
}

pub fn save_options<P: AsRef<Path>>(options: &PlotOptions, path: P) -> Result<()> {
    save_json(options, path)
}
