//! Loading a delimited file into a [`Table`] and writing it back out.

use std::path::Path;

use encoding_rs::{Encoding, UTF_8};
use log::{debug, info};

use crate::{
    data::Cell,
    error::{DemographicsError, Result},
    frame::Table,
    io_utils,
};

#[derive(Debug, Clone, Copy)]
pub struct LoadOptions {
    pub delimiter: Option<u8>,
    pub encoding: &'static Encoding,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            delimiter: None,
            encoding: UTF_8,
        }
    }
}

pub fn read_dataset(path: &Path, options: &LoadOptions) -> Result<Table> {
    let delimiter = io_utils::resolve_input_delimiter(path, options.delimiter);
    let mut reader = io_utils::open_csv_reader_from_path(path, delimiter)?;
    let headers = io_utils::reader_headers(path, &mut reader, options.encoding)?;
    debug!("Headers for {path:?}: {headers:?}");

    let mut table = Table::with_headers(&headers);
    for (row_idx, record) in reader.byte_records().enumerate() {
        let record = record.map_err(|err| DemographicsError::from_csv(path, err))?;
        let decoded = io_utils::decode_record(path, &record, options.encoding)?;
        let row = decoded.iter().map(|field| Cell::from_field(field)).collect();
        table.push_row(row).map_err(|err| {
            DemographicsError::parse(path, format!("Row {}: {err}", row_idx + 2))
        })?;
    }
    info!(
        "Loaded {} row(s) across {} column(s) from {:?}",
        table.row_count(),
        table.column_count(),
        path
    );
    Ok(table)
}

/// Writes `table` with a header row and no index column, replacing any file
/// already at `path`.
pub fn save_dataset(table: &Table, path: &Path, delimiter: u8) -> Result<()> {
    let mut writer = io_utils::open_csv_writer(path, delimiter)?;
    writer
        .write_record(table.headers())
        .map_err(|err| DemographicsError::from_csv(path, err))?;
    for row in table.rows() {
        writer
            .write_record(&row)
            .map_err(|err| DemographicsError::from_csv(path, err))?;
    }
    writer
        .flush()
        .map_err(|err| DemographicsError::file(path, err))?;
    info!("Wrote {} row(s) to {:?}", table.row_count(), path);
    Ok(())
}
