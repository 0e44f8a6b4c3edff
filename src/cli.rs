use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::advanced::DEFAULT_TOP_N;

#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "Clean, impute, and profile a demographic CSV dataset",
    long_about = None
)]
pub struct Cli {
    /// Input CSV file with Gender, Age, and Occupation columns
    pub filename: PathBuf,
    /// Number of rows in the oldest/youngest listings
    #[arg(long = "top", default_value_t = DEFAULT_TOP_N)]
    pub top: usize,
    /// CSV delimiter character for reading input (supports ',', 'tab', ';', '|')
    #[arg(long, value_parser = parse_delimiter)]
    pub delimiter: Option<u8>,
    /// Character encoding of the input file (defaults to utf-8)
    #[arg(long = "input-encoding")]
    pub input_encoding: Option<String>,
    /// Also print oldest/youngest rows, age bins, and occupation groups
    #[arg(long)]
    pub advanced: bool,
    /// Report format written to stdout
    #[arg(long = "report-format", value_enum, default_value = "text")]
    pub report_format: ReportFormat,
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq, Default)]
#[value(rename_all = "kebab-case")]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

pub fn parse_delimiter(value: &str) -> Result<u8, String> {
    match value {
        "tab" | "\t" => Ok(b'\t'),
        "comma" | "," => Ok(b','),
        "|" | "pipe" => Ok(b'|'),
        ";" | "semicolon" => Ok(b';'),
        other => {
            let mut chars = other.chars();
            let first = chars
                .next()
                .ok_or_else(|| "Delimiter cannot be empty".to_string())?;
            if chars.next().is_some() {
                return Err("Delimiter must be a single character".to_string());
            }
            if !first.is_ascii() {
                return Err("Delimiter must be ASCII".to_string());
            }
            Ok(first as u8)
        }
    }
}
