//! Order statistics, Age histogram, and Occupation grouping.

use std::collections::BTreeMap;

use itertools::Itertools;
use log::{debug, info};
use serde::Serialize;

use crate::{
    data::Cell,
    error::{DemographicsError, Result},
    frame::{AGE_COLUMN, OCCUPATION_COLUMN, Table},
};

pub const DEFAULT_TOP_N: usize = 5;
pub const AGE_BIN_COUNT: usize = 10;

/// One row picked by an order statistic, with its display values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedRow {
    pub index: usize,
    pub age: f64,
    pub values: Vec<String>,
}

/// Right-closed interval `(lower, upper]`; the first bin also holds the minimum.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgeBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

/// Row indices per Occupation value, keys sorted, rows in table order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct OccupationGroups {
    groups: BTreeMap<String, Vec<usize>>,
}

impl OccupationGroups {
    pub fn get(&self, occupation: &str) -> Option<&[usize]> {
        self.groups.get(occupation).map(Vec::as_slice)
    }

    /// Display values of every row in the group.
    pub fn rows(&self, table: &Table, occupation: &str) -> Vec<Vec<String>> {
        self.get(occupation)
            .unwrap_or_default()
            .iter()
            .filter_map(|&row| table.row_values(row))
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[usize])> {
        self.groups
            .iter()
            .map(|(name, rows)| (name.as_str(), rows.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdvancedReport {
    pub top_oldest: Vec<RankedRow>,
    pub top_youngest: Vec<RankedRow>,
    pub age_range_counts: Vec<AgeBin>,
    pub occupation_groups: OccupationGroups,
}

/// `top_n` must be at least 1; values above the row count are clamped.
pub fn advanced_analysis(table: &Table, top_n: usize) -> Result<AdvancedReport> {
    if top_n == 0 {
        return Err(DemographicsError::Validation(
            "Top-N must be a positive number of rows".to_string(),
        ));
    }
    let ages = &table.require(AGE_COLUMN)?.cells;
    let occupations = &table.require(OCCUPATION_COLUMN)?.cells;

    let limit = top_n.min(table.row_count());
    if limit < top_n {
        debug!("Top-N {top_n} exceeds {} row(s); clamped", table.row_count());
    }

    let known: Vec<(usize, f64)> = ages
        .iter()
        .enumerate()
        .filter_map(|(idx, cell)| cell.as_number().map(|age| (idx, age)))
        .collect();

    let report = AdvancedReport {
        top_oldest: ranked(table, &known, limit, true),
        top_youngest: ranked(table, &known, limit, false),
        age_range_counts: age_bins(&known.iter().map(|(_, age)| *age).collect_vec()),
        occupation_groups: group_rows(occupations),
    };
    info!(
        "Advanced analysis: top {} row(s), {} age bin(s), {} occupation group(s)",
        limit,
        report.age_range_counts.len(),
        report.occupation_groups.len()
    );
    Ok(report)
}

fn ranked(table: &Table, known: &[(usize, f64)], limit: usize, descending: bool) -> Vec<RankedRow> {
    known
        .iter()
        .sorted_by(|a, b| {
            if descending {
                b.1.total_cmp(&a.1)
            } else {
                a.1.total_cmp(&b.1)
            }
        })
        .take(limit)
        .map(|&(index, age)| RankedRow {
            index,
            age,
            values: table.row_values(index).unwrap_or_default(),
        })
        .collect()
}

/// Splits `[min, max]` into [`AGE_BIN_COUNT`] equal-width bins and counts
/// the values falling in each.
pub fn age_bins(values: &[f64]) -> Vec<AgeBin> {
    if values.is_empty() {
        return Vec::new();
    }
    let mut min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let mut max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if min == max {
        let pad = if min == 0.0 { 0.001 } else { min.abs() * 0.001 };
        min -= pad;
        max += pad;
    }

    let step = (max - min) / AGE_BIN_COUNT as f64;
    let edges = (0..=AGE_BIN_COUNT)
        .map(|i| {
            if i == AGE_BIN_COUNT {
                max
            } else {
                min + step * i as f64
            }
        })
        .collect_vec();

    let mut counts = vec![0usize; AGE_BIN_COUNT];
    for &value in values {
        let bin = edges[1..]
            .iter()
            .position(|&upper| value <= upper)
            .unwrap_or(AGE_BIN_COUNT - 1);
        counts[bin] += 1;
    }

    edges
        .iter()
        .tuple_windows()
        .zip(counts)
        .map(|((&lower, &upper), count)| AgeBin {
            lower,
            upper,
            count,
        })
        .collect()
}

fn group_rows(occupations: &[Cell]) -> OccupationGroups {
    let mut groups: BTreeMap<String, Vec<usize>> = BTreeMap::new();
    for (idx, cell) in occupations.iter().enumerate() {
        if cell.is_missing() {
            continue;
        }
        groups.entry(cell.as_display()).or_default().push(idx);
    }
    OccupationGroups { groups }
}
