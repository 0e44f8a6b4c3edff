//! In-memory column store shared by every pipeline stage.
//!
//! A [`Table`] keeps its columns in creation order, each column holding one
//! [`Cell`] per row. Stages mutate cells in place; no stage adds or removes
//! rows.

use std::collections::HashMap;

use crate::{
    data::Cell,
    error::{DemographicsError, Result},
};

pub const GENDER_COLUMN: &str = "Gender";
pub const AGE_COLUMN: &str = "Age";
pub const OCCUPATION_COLUMN: &str = "Occupation";

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub cells: Vec<Cell>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: Vec<Column>,
    row_count: usize,
}

impl Table {
    /// Creates an empty table with the given headers. Duplicate names receive
    /// `.1`, `.2`, ... suffixes so every column is addressable by name.
    pub fn with_headers<S: AsRef<str>>(headers: &[S]) -> Self {
        let columns = dedupe_headers(headers)
            .into_iter()
            .map(|name| Column {
                name,
                cells: Vec::new(),
            })
            .collect();
        Self {
            columns,
            row_count: 0,
        }
    }

    /// Appends a row of cells; the row width must match the column count.
    pub fn push_row(&mut self, row: Vec<Cell>) -> Result<()> {
        if row.len() != self.columns.len() {
            return Err(DemographicsError::Validation(format!(
                "Row {} has {} field(s) but the table has {} column(s)",
                self.row_count + 1,
                row.len(),
                self.columns.len()
            )));
        }
        for (column, cell) in self.columns.iter_mut().zip(row) {
            column.cells.push(cell);
        }
        self.row_count += 1;
        Ok(())
    }

    /// Builds a table from raw text rows, recognising null tokens.
    pub fn from_records<S, R, F>(headers: &[S], records: R) -> Result<Self>
    where
        S: AsRef<str>,
        R: IntoIterator<Item = Vec<F>>,
        F: AsRef<str>,
    {
        let mut table = Table::with_headers(headers);
        for record in records {
            let row = record
                .iter()
                .map(|field| Cell::from_field(field.as_ref()))
                .collect();
            table.push_row(row)?;
        }
        Ok(table)
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn headers(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }

    pub fn columns_mut(&mut self) -> &mut [Column] {
        &mut self.columns
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn column_mut(&mut self, name: &str) -> Option<&mut Column> {
        self.columns.iter_mut().find(|c| c.name == name)
    }

    /// Like [`Table::column`] but fails with a validation error when absent.
    pub fn require(&self, name: &str) -> Result<&Column> {
        self.column(name)
            .ok_or_else(|| DemographicsError::missing_column(name))
    }

    pub fn require_mut(&mut self, name: &str) -> Result<&mut Column> {
        self.column_mut(name)
            .ok_or_else(|| DemographicsError::missing_column(name))
    }

    pub fn cell(&self, row: usize, column: &str) -> Option<&Cell> {
        self.column(column).and_then(|c| c.cells.get(row))
    }

    /// Display values of one row, in column order.
    pub fn row_values(&self, row: usize) -> Option<Vec<String>> {
        if row >= self.row_count {
            return None;
        }
        Some(
            self.columns
                .iter()
                .map(|column| column.cells[row].as_display())
                .collect(),
        )
    }

    pub fn rows(&self) -> impl Iterator<Item = Vec<String>> + '_ {
        (0..self.row_count).filter_map(|row| self.row_values(row))
    }
}

fn dedupe_headers<S: AsRef<str>>(headers: &[S]) -> Vec<String> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    let mut names = Vec::with_capacity(headers.len());
    for header in headers {
        let base = header.as_ref().to_string();
        let mut name = base.clone();
        while seen.contains_key(&name) {
            let counter = seen.entry(base.clone()).or_insert(0);
            *counter += 1;
            name = format!("{base}.{counter}");
        }
        seen.insert(name.clone(), 0);
        names.push(name);
    }
    names
}
