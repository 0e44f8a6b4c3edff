//! Load → clean → transform → analyze → report/write.

use std::{
    io::{self, Write},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use log::info;

use crate::{
    advanced::{AdvancedReport, advanced_analysis},
    analyze::{AnalysisReport, analyze_data},
    clean::{CleanSummary, clean_data},
    cli::{Cli, ReportFormat},
    dataset::{LoadOptions, read_dataset, save_dataset},
    frame::Table,
    io_utils, report,
    transform::{TransformSummary, transform_data},
};

/// Everything one run produces before anything is written.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub table: Table,
    pub clean: CleanSummary,
    pub transform: TransformSummary,
    pub analysis: AnalysisReport,
    pub advanced: AdvancedReport,
}

pub fn process_dataset(path: &Path, options: &LoadOptions, top_n: usize) -> Result<PipelineOutput> {
    let mut table =
        read_dataset(path, options).with_context(|| format!("Reading dataset {path:?}"))?;
    let rows = table.row_count();

    let clean = clean_data(&mut table).with_context(|| format!("Cleaning {path:?}"))?;
    let transform =
        transform_data(&mut table).with_context(|| format!("Transforming {path:?}"))?;
    debug_assert_eq!(rows, table.row_count());

    let analysis = analyze_data(&table).context("Analyzing dataset")?;
    let advanced = advanced_analysis(&table, top_n).context("Running advanced analysis")?;

    Ok(PipelineOutput {
        table,
        clean,
        transform,
        analysis,
        advanced,
    })
}

pub fn execute(args: &Cli) -> Result<()> {
    let options = LoadOptions {
        delimiter: args.delimiter,
        encoding: io_utils::resolve_encoding(args.input_encoding.as_deref())?,
    };
    let delimiter = io_utils::resolve_input_delimiter(&args.filename, args.delimiter);
    info!(
        "Processing '{}' with delimiter '{}'",
        args.filename.display(),
        crate::printable_delimiter(delimiter)
    );

    let output = process_dataset(&args.filename, &options, args.top)?;

    let rendered = match args.report_format {
        ReportFormat::Text => {
            let mut text = report::render_report(&output.analysis);
            if args.advanced {
                text.push_str(&report::render_advanced_report(
                    &output.advanced,
                    &output.table.headers(),
                ));
            }
            text
        }
        ReportFormat::Json => report::render_json(
            &output.analysis,
            args.advanced.then_some(&output.advanced),
        )?,
    };

    let mut stdout = io::stdout().lock();
    stdout
        .write_all(rendered.as_bytes())
        .context("Writing report to stdout")?;

    let output_path = write_cleaned(&output.table, &args.filename)?;
    writeln!(stdout, "Cleaned dataset saved to {}", output_path.display())
        .context("Writing report to stdout")?;
    stdout.flush().context("Flushing stdout")?;
    Ok(())
}

/// Writes the cleaned table next to `input` and returns the destination.
pub fn write_cleaned(table: &Table, input: &Path) -> Result<PathBuf> {
    let output_path = io_utils::cleaned_output_path(input);
    save_dataset(table, &output_path, io_utils::DEFAULT_CSV_DELIMITER)
        .with_context(|| format!("Writing cleaned dataset to {output_path:?}"))?;
    Ok(output_path)
}
