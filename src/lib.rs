pub mod advanced;
pub mod analyze;
pub mod clean;
pub mod cli;
pub mod data;
pub mod dataset;
pub mod error;
pub mod frame;
pub mod io_utils;
pub mod pipeline;
pub mod report;
pub mod table;
pub mod transform;

use std::{env, ffi::OsString, sync::OnceLock};

use anyhow::Result;
use clap::{Parser, error::ErrorKind};
use log::{LevelFilter, debug};

use crate::{cli::Cli, error::DemographicsError};

static LOGGER: OnceLock<()> = OnceLock::new();

fn init_logging() {
    LOGGER.get_or_init(|| {
        let mut builder = env_logger::Builder::from_env(env_logger::Env::default());
        if env::var("RUST_LOG").is_err() {
            builder.filter_module("csv_demographics", LevelFilter::Info);
        }
        let _ = builder.format_timestamp_millis().try_init();
    });
}

pub fn run() -> Result<()> {
    run_from(env::args_os())
}

/// Parses `args` and runs the pipeline. Argument errors surface as
/// [`DemographicsError::Usage`] carrying the rendered usage text; `--help`
/// and `--version` print and exit as usual.
pub fn run_from<I, T>(args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    init_logging();
    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(err) => match err.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => err.exit(),
            _ => return Err(DemographicsError::Usage(err.render().to_string()).into()),
        },
    };
    debug!("Parsed arguments: {cli:?}");
    pipeline::execute(&cli)
}

pub(crate) fn printable_delimiter(delimiter: u8) -> String {
    match delimiter {
        b',' => ",".to_string(),
        b'\t' => "\\t".to_string(),
        other => (other as char).to_string(),
    }
}
