use log::{debug, info};
use serde::Serialize;

use crate::{
    data::{Cell, MISSING_SENTINEL},
    error::Result,
    frame::{GENDER_COLUMN, Table},
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CleanSummary {
    pub filled_cells: usize,
    pub normalized_genders: usize,
}

/// Exact-match Gender shorthand; anything else is left untouched.
pub fn normalize_gender(value: &str) -> Option<&'static str> {
    match value {
        "M" | "m" => Some("Male"),
        "F" | "f" => Some("Female"),
        _ => None,
    }
}

/// Fills every missing cell with the sentinel, then normalizes Gender.
pub fn clean_data(table: &mut Table) -> Result<CleanSummary> {
    table.require(GENDER_COLUMN)?;

    let mut summary = CleanSummary::default();
    for column in table.columns_mut() {
        let mut filled = 0usize;
        for cell in column.cells.iter_mut().filter(|cell| cell.is_missing()) {
            *cell = Cell::Text(MISSING_SENTINEL.to_string());
            filled += 1;
        }
        if filled > 0 {
            debug!("Filled {filled} missing cell(s) in '{}'", column.name);
        }
        summary.filled_cells += filled;
    }

    summary.normalized_genders = normalize_gender_column(table)?;
    info!(
        "Cleaned {} row(s): {} missing cell(s) filled, {} gender value(s) normalized",
        table.row_count(),
        summary.filled_cells,
        summary.normalized_genders
    );
    Ok(summary)
}

/// Applies [`normalize_gender`] to the Gender column and returns how many
/// cells changed. Running it twice changes nothing the second time.
pub fn normalize_gender_column(table: &mut Table) -> Result<usize> {
    let column = table.require_mut(GENDER_COLUMN)?;
    let mut changed = 0usize;
    for cell in column.cells.iter_mut() {
        let replacement = cell.as_text().and_then(normalize_gender);
        if let Some(normalized) = replacement {
            *cell = Cell::Text(normalized.to_string());
            changed += 1;
        }
    }
    Ok(changed)
}
