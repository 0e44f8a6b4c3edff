use std::collections::HashMap;

use log::info;
use serde::Serialize;

use crate::{
    data::{Cell, round_to},
    error::Result,
    frame::{AGE_COLUMN, GENDER_COLUMN, Table},
};

pub const MALE: &str = "Male";
pub const FEMALE: &str = "Female";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    pub overall_avg_age: f64,
    pub male_avg_age: f64,
    pub female_avg_age: f64,
    /// `(max, min)`, in that order.
    pub male_age_range: (f64, f64),
    /// `(max, min)`, in that order.
    pub female_age_range: (f64, f64),
    /// Distinct Gender values by descending count; ties keep first-appearance order.
    pub gender_distribution: Vec<(String, usize)>,
}

pub fn analyze_data(table: &Table) -> Result<AnalysisReport> {
    let genders = &table.require(GENDER_COLUMN)?.cells;
    let ages = &table.require(AGE_COLUMN)?.cells;

    let all_ages = known_ages(ages.iter());
    let male_ages = ages_for_gender(genders, ages, MALE);
    let female_ages = ages_for_gender(genders, ages, FEMALE);

    let report = AnalysisReport {
        overall_avg_age: round_to(mean(&all_ages), 2),
        male_avg_age: round_to(mean(&male_ages), 2),
        female_avg_age: round_to(mean(&female_ages), 2),
        male_age_range: max_min(&male_ages),
        female_age_range: max_min(&female_ages),
        gender_distribution: value_counts(genders),
    };
    info!(
        "Analyzed {} row(s); {} distinct gender value(s)",
        table.row_count(),
        report.gender_distribution.len()
    );
    Ok(report)
}

fn known_ages<'a>(cells: impl Iterator<Item = &'a Cell>) -> Vec<f64> {
    cells.filter_map(Cell::as_number).collect()
}

fn ages_for_gender(genders: &[Cell], ages: &[Cell], gender: &str) -> Vec<f64> {
    known_ages(
        genders
            .iter()
            .zip(ages)
            .filter(|(g, _)| g.as_text() == Some(gender))
            .map(|(_, age)| age),
    )
}

/// Arithmetic mean; NaN for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        f64::NAN
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

/// `(max, min)` of the values; `(NaN, NaN)` for an empty slice.
pub fn max_min(values: &[f64]) -> (f64, f64) {
    if values.is_empty() {
        return (f64::NAN, f64::NAN);
    }
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    (max, min)
}

/// Counts each non-missing value, ordered by descending count with ties in
/// first-appearance order.
pub fn value_counts(cells: &[Cell]) -> Vec<(String, usize)> {
    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut counts: Vec<(String, usize)> = Vec::new();
    for cell in cells.iter().filter(|cell| !cell.is_missing()) {
        let value = cell.as_display();
        match positions.get(&value) {
            Some(&idx) => counts[idx].1 += 1,
            None => {
                positions.insert(value.clone(), counts.len());
                counts.push((value, 1));
            }
        }
    }
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{clean::clean_data, transform::transform_data};

    fn prepared(rows: Vec<Vec<&str>>) -> Table {
        let mut table = Table::from_records(&["Gender", "Age", "Occupation"], rows).unwrap();
        clean_data(&mut table).unwrap();
        transform_data(&mut table).unwrap();
        table
    }

    #[test]
    fn analyze_computes_means_and_ranges() {
        let table = prepared(vec![
            vec!["M", "30", "Engineer"],
            vec!["m", "41", "Engineer"],
            vec!["F", "25", "Nurse"],
            vec!["Female", "28", "Teacher"],
            vec!["F", "", "Nurse"],
        ]);
        let report = analyze_data(&table).expect("analyze");

        assert_eq!(report.male_avg_age, 35.5);
        assert_eq!(report.female_avg_age, 26.5);
        assert_eq!(report.overall_avg_age, 30.1);
        assert_eq!(report.male_age_range, (41.0, 30.0));
        assert_eq!(report.female_age_range, (28.0, 25.0));
        assert_eq!(
            report.gender_distribution,
            vec![("Female".to_string(), 3), ("Male".to_string(), 2)]
        );
    }

    #[test]
    fn empty_group_yields_nan() {
        let table = prepared(vec![vec!["M", "30", "Engineer"], vec!["M", "34", "Nurse"]]);
        let report = analyze_data(&table).expect("analyze");
        assert!(report.female_avg_age.is_nan());
        assert!(report.female_age_range.0.is_nan());
        assert!(report.female_age_range.1.is_nan());
        assert_eq!(report.male_avg_age, 32.0);
    }

    #[test]
    fn means_round_to_two_places() {
        let table = prepared(vec![
            vec!["M", "30", "a"],
            vec!["M", "30", "a"],
            vec!["M", "31", "a"],
        ]);
        let report = analyze_data(&table).expect("analyze");
        assert_eq!(report.male_avg_age, 30.33);
    }

    #[test]
    fn mean_on_an_exact_half_rounds_to_even() {
        let mut rows = vec![vec!["M", "30", "a"]; 7];
        rows.push(vec!["M", "31", "a"]);
        let table = prepared(rows);
        let report = analyze_data(&table).expect("analyze");
        assert_eq!(report.male_avg_age, 30.12);
        assert_eq!(report.overall_avg_age, 30.12);
    }

    #[test]
    fn value_counts_orders_by_descending_count() {
        let cells = vec![
            Cell::Text("Male".into()),
            Cell::Text("Male".into()),
            Cell::Text("Female".into()),
        ];
        assert_eq!(
            value_counts(&cells),
            vec![("Male".to_string(), 2), ("Female".to_string(), 1)]
        );
    }

    #[test]
    fn value_counts_breaks_ties_by_first_appearance() {
        let cells = vec![
            Cell::Text("Other".into()),
            Cell::Text("Male".into()),
            Cell::Missing,
            Cell::Text("Female".into()),
            Cell::Text("Male".into()),
            Cell::Text("Other".into()),
        ];
        assert_eq!(
            value_counts(&cells),
            vec![
                ("Other".to_string(), 2),
                ("Male".to_string(), 2),
                ("Female".to_string(), 1),
            ]
        );
    }
}
