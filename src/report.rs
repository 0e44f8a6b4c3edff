//! Text and JSON rendering of analysis results. No computation happens here.

use std::fmt::Write as _;

use serde::Serialize;

use crate::{
    advanced::{AdvancedReport, RankedRow},
    analyze::AnalysisReport,
    data::format_float,
    error::Result,
    frame::GENDER_COLUMN,
    table::{Align, TextTable},
};

pub fn render_report(analysis: &AnalysisReport) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Overall Average Age: {}",
        format_float(analysis.overall_avg_age)
    );
    let _ = writeln!(out, "Male Average Age: {}", format_float(analysis.male_avg_age));
    let _ = writeln!(
        out,
        "Female Average Age: {}",
        format_float(analysis.female_avg_age)
    );
    let _ = writeln!(out, "Male Age Range: {}", format_range(analysis.male_age_range));
    let _ = writeln!(
        out,
        "Female Age Range: {}",
        format_range(analysis.female_age_range)
    );
    let _ = writeln!(out, "Gender Distribution:");

    let mut table = TextTable::new([GENDER_COLUMN, "count"]).align(1, Align::Right);
    for (gender, count) in &analysis.gender_distribution {
        table.push_row(vec![gender.clone(), count.to_string()]);
    }
    out.push_str(&table.render());
    out
}

pub fn render_advanced_report(advanced: &AdvancedReport, headers: &[String]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Top {} Oldest:", advanced.top_oldest.len());
    out.push_str(&ranked_table(&advanced.top_oldest, headers));
    let _ = writeln!(out, "Top {} Youngest:", advanced.top_youngest.len());
    out.push_str(&ranked_table(&advanced.top_youngest, headers));

    let _ = writeln!(out, "Age Distribution:");
    let mut bins = TextTable::new(["range", "count"]).align(1, Align::Right);
    for bin in &advanced.age_range_counts {
        bins.push_row(vec![
            format!("({:.3}, {:.3}]", bin.lower, bin.upper),
            bin.count.to_string(),
        ]);
    }
    out.push_str(&bins.render());

    let _ = writeln!(out, "Occupation Groups:");
    let mut groups = TextTable::new(["Occupation", "rows"]).align(1, Align::Right);
    for (occupation, rows) in advanced.occupation_groups.iter() {
        groups.push_row(vec![occupation.to_string(), rows.len().to_string()]);
    }
    out.push_str(&groups.render());
    out
}

fn ranked_table(rows: &[RankedRow], headers: &[String]) -> String {
    let mut table = TextTable::new(std::iter::once("row".to_string()).chain(headers.iter().cloned()))
        .align(0, Align::Right);
    for row in rows {
        let mut cells = Vec::with_capacity(row.values.len() + 1);
        cells.push(row.index.to_string());
        cells.extend(row.values.iter().cloned());
        table.push_row(cells);
    }
    table.render()
}

/// `(max, min)` rendered as a tuple, NaN as `nan`.
pub fn format_range((max, min): (f64, f64)) -> String {
    format!("({}, {})", format_float(max), format_float(min))
}

#[derive(Serialize)]
struct JsonReport<'a> {
    analysis: &'a AnalysisReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    advanced: Option<&'a AdvancedReport>,
}

/// Pretty JSON; NaN statistics serialize as `null`.
pub fn render_json(analysis: &AnalysisReport, advanced: Option<&AdvancedReport>) -> Result<String> {
    let mut rendered = serde_json::to_string_pretty(&JsonReport { analysis, advanced })?;
    rendered.push('\n');
    Ok(rendered)
}
