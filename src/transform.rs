use std::collections::HashMap;

use log::{debug, info, warn};
use serde::Serialize;

use crate::{
    data::Cell,
    error::Result,
    frame::{AGE_COLUMN, GENDER_COLUMN, Table},
};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TransformSummary {
    /// Age cells that failed numeric coercion.
    pub coerced_to_missing: usize,
    pub imputed: usize,
    /// Age cells left missing because their Gender group had no known ages.
    pub unresolved: usize,
    /// Mean Age per Gender group, in first-appearance order.
    pub group_means: Vec<(String, f64)>,
}

/// Coerces Age to numeric and fills its gaps with the mean Age of each row's
/// Gender group. Groups without a single known Age leave their gaps missing.
pub fn transform_data(table: &mut Table) -> Result<TransformSummary> {
    table.require(GENDER_COLUMN)?;
    let mut summary = TransformSummary::default();

    let age = table.require_mut(AGE_COLUMN)?;
    for cell in age.cells.iter_mut() {
        let coerced = cell.coerce_numeric();
        if coerced.is_missing() {
            summary.coerced_to_missing += 1;
        }
        *cell = coerced;
    }
    debug!(
        "Coerced '{AGE_COLUMN}' to numeric; {} value(s) missing",
        summary.coerced_to_missing
    );

    let genders = group_keys(table)?;
    let means = group_means(&genders, &table.require(AGE_COLUMN)?.cells);

    let age = table.require_mut(AGE_COLUMN)?;
    for (cell, gender) in age.cells.iter_mut().zip(&genders) {
        if !cell.is_missing() {
            continue;
        }
        match gender.as_deref().and_then(|g| means.lookup(g)) {
            Some(mean) => {
                *cell = Cell::Number(mean);
                summary.imputed += 1;
            }
            None => summary.unresolved += 1,
        }
    }

    if summary.unresolved > 0 {
        warn!(
            "{} '{AGE_COLUMN}' value(s) left missing: their '{GENDER_COLUMN}' group has no known ages",
            summary.unresolved
        );
    }
    summary.group_means = means.into_vec();
    info!(
        "Imputed {} '{AGE_COLUMN}' value(s) from {} gender group mean(s)",
        summary.imputed,
        summary.group_means.len()
    );
    Ok(summary)
}

fn group_keys(table: &Table) -> Result<Vec<Option<String>>> {
    Ok(table
        .require(GENDER_COLUMN)?
        .cells
        .iter()
        .map(|cell| match cell {
            Cell::Missing => None,
            other => Some(other.as_display()),
        })
        .collect())
}

#[derive(Default)]
struct GroupMeans {
    order: Vec<String>,
    totals: HashMap<String, (f64, usize)>,
}

impl GroupMeans {
    fn lookup(&self, group: &str) -> Option<f64> {
        self.totals
            .get(group)
            .filter(|(_, count)| *count > 0)
            .map(|(sum, count)| sum / *count as f64)
    }

    fn into_vec(self) -> Vec<(String, f64)> {
        self.order
            .iter()
            .filter_map(|group| self.lookup(group).map(|mean| (group.clone(), mean)))
            .collect()
    }
}

fn group_means(genders: &[Option<String>], ages: &[Cell]) -> GroupMeans {
    let mut means = GroupMeans::default();
    for (gender, age) in genders.iter().zip(ages) {
        let Some(gender) = gender else { continue };
        if !means.totals.contains_key(gender) {
            means.order.push(gender.clone());
        }
        let entry = means.totals.entry(gender.clone()).or_insert((0.0, 0));
        if let Some(value) = age.as_number() {
            entry.0 += value;
            entry.1 += 1;
        }
    }
    means
}
