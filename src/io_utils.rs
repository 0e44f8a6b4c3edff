//! Reader and writer construction for delimited files.
//!
//! - **Delimiter resolution**: `.tsv` inputs default to tab, everything else
//!   to comma, unless a delimiter is supplied explicitly.
//! - **Encoding**: input bytes are decoded through `encoding_rs`, UTF-8 by
//!   default.
//! - **Output naming**: the cleaned copy lands next to the input as
//!   `<stem>_cleaned.csv`.

use std::{
    fs::File,
    io::{BufReader, BufWriter, Read, Write},
    path::{Path, PathBuf},
};

use csv::QuoteStyle;
use encoding_rs::{Encoding, UTF_8};

use crate::error::{DemographicsError, Result};

pub const DEFAULT_CSV_DELIMITER: u8 = b',';
pub const DEFAULT_TSV_DELIMITER: u8 = b'\t';
pub const CLEANED_SUFFIX: &str = "_cleaned.csv";

pub fn resolve_encoding(label: Option<&str>) -> Result<&'static Encoding> {
    if let Some(value) = label {
        Encoding::for_label(value.trim().as_bytes())
            .ok_or_else(|| DemographicsError::Validation(format!("Unknown encoding '{value}'")))
    } else {
        Ok(UTF_8)
    }
}

pub fn resolve_input_delimiter(path: &Path, provided: Option<u8>) -> u8 {
    provided.unwrap_or_else(|| match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("tsv") => DEFAULT_TSV_DELIMITER,
        _ => DEFAULT_CSV_DELIMITER,
    })
}

/// `people.csv` becomes `people_cleaned.csv` in the same directory. Only a
/// lowercase `.csv` suffix is stripped; any other name (`people.CSV`,
/// `people.tsv`) is kept whole as the stem.
pub fn cleaned_output_path(input: &Path) -> PathBuf {
    let raw = input.to_string_lossy();
    let stem = raw.strip_suffix(".csv").unwrap_or(raw.as_ref());
    PathBuf::from(format!("{stem}{CLEANED_SUFFIX}"))
}

pub fn open_csv_reader<R>(reader: R, delimiter: u8) -> csv::Reader<R>
where
    R: Read,
{
    let mut builder = csv::ReaderBuilder::new();
    builder
        .has_headers(true)
        .delimiter(delimiter)
        .double_quote(true)
        .flexible(false);
    builder.from_reader(reader)
}

pub fn open_csv_reader_from_path(path: &Path, delimiter: u8) -> Result<csv::Reader<BufReader<File>>> {
    let file = File::open(path).map_err(|err| DemographicsError::file(path, err))?;
    Ok(open_csv_reader(BufReader::new(file), delimiter))
}

pub fn open_csv_writer(path: &Path, delimiter: u8) -> Result<csv::Writer<Box<dyn Write>>> {
    let file = File::create(path).map_err(|err| DemographicsError::file(path, err))?;
    let base: Box<dyn Write> = Box::new(BufWriter::new(file));
    let mut builder = csv::WriterBuilder::new();
    builder
        .delimiter(delimiter)
        .quote_style(QuoteStyle::Necessary)
        .double_quote(true);
    Ok(builder.from_writer(base))
}

pub fn decode_bytes(path: &Path, bytes: &[u8], encoding: &'static Encoding) -> Result<String> {
    let (text, _, had_errors) = encoding.decode(bytes);
    if had_errors {
        Err(DemographicsError::parse(
            path,
            format!("Failed to decode text with encoding {}", encoding.name()),
        ))
    } else {
        Ok(text.into_owned())
    }
}

pub fn decode_record(
    path: &Path,
    record: &csv::ByteRecord,
    encoding: &'static Encoding,
) -> Result<Vec<String>> {
    record
        .iter()
        .map(|field| decode_bytes(path, field, encoding))
        .collect()
}

pub fn reader_headers<R>(
    path: &Path,
    reader: &mut csv::Reader<R>,
    encoding: &'static Encoding,
) -> Result<Vec<String>>
where
    R: Read,
{
    let headers = reader
        .byte_headers()
        .map_err(|err| DemographicsError::from_csv(path, err))?
        .clone();
    decode_record(path, &headers, encoding)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cleaned_output_path_strips_csv_extension() {
        assert_eq!(
            cleaned_output_path(Path::new("people.csv")),
            PathBuf::from("people_cleaned.csv")
        );
        assert_eq!(
            cleaned_output_path(Path::new("data/people.csv")),
            PathBuf::from("data/people_cleaned.csv")
        );
        assert_eq!(
            cleaned_output_path(Path::new("people.txt")),
            PathBuf::from("people.txt_cleaned.csv")
        );
    }

    #[test]
    fn cleaned_output_path_keeps_uppercase_extension() {
        assert_eq!(
            cleaned_output_path(Path::new("data/people.CSV")),
            PathBuf::from("data/people.CSV_cleaned.csv")
        );
        assert_eq!(
            cleaned_output_path(Path::new("people.csv.bak")),
            PathBuf::from("people.csv.bak_cleaned.csv")
        );
    }

    #[test]
    fn tsv_extension_selects_tab() {
        assert_eq!(resolve_input_delimiter(Path::new("a.tsv"), None), b'\t');
        assert_eq!(resolve_input_delimiter(Path::new("a.csv"), None), b',');
        assert_eq!(resolve_input_delimiter(Path::new("a.csv"), Some(b';')), b';');
    }

    #[test]
    fn unknown_encoding_is_rejected() {
        assert!(resolve_encoding(Some("not-an-encoding")).is_err());
        assert_eq!(resolve_encoding(Some("latin1")).unwrap().name(), "windows-1252");
    }
}
