//! Dataset rendering and output destinations shared by `process` and `batch`.

use std::fs;
use std::path::{Path, PathBuf};

use console::style;
use tracing::debug;

use pcard_core::{RecordField, ReportDataset};

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON dataset keyed by page index
    Json,
    /// CSV, one row per record
    Csv,
    /// Plain text summary
    Text,
}

/// Render a dataset in the requested format.
pub fn format_dataset(
    dataset: &ReportDataset,
    format: OutputFormat,
    pretty: bool,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(dataset.to_json(pretty)?),
        OutputFormat::Csv => format_csv(dataset),
        OutputFormat::Text => Ok(format_text(dataset)),
    }
}

fn format_csv(dataset: &ReportDataset) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    let header = std::iter::once("page_index").chain(RecordField::ALL.iter().map(|f| f.name()));
    wtr.write_record(header)?;

    for (index, records) in dataset.pages() {
        for record in records {
            let row = std::iter::once(index.to_string())
                .chain(RecordField::ALL.iter().map(|f| record.field(*f)));
            wtr.write_record(row)?;
        }
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(dataset: &ReportDataset) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "Report: {} pages, {} records\n",
        dataset.page_count(),
        dataset.record_count()
    ));

    for (index, records) in dataset.pages() {
        output.push('\n');
        match records.first() {
            Some(first) => output.push_str(&format!(
                "Page index {} (page {}, {}):\n",
                index, first.page, first.agency
            )),
            None => {
                output.push_str(&format!("Page index {}: no records\n", index));
                continue;
            }
        }

        for record in records {
            output.push_str(&format!(
                "  {:<40} {:<10} {:>12}\n",
                record.vendor, record.date, record.amount
            ));
        }
    }

    output
}

/// Write rendered output to `path`, or to stdout when `path` is `None`.
pub fn write_output(content: &str, path: Option<&Path>) -> anyhow::Result<()> {
    match path {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            fs::write(path, content)?;
            debug!("Wrote output to {}", path.display());
            println!(
                "{} Output written to {}",
                style("✓").green(),
                path.display()
            );
        }
        None => println!("{}", content),
    }
    Ok(())
}

/// Pick the destination: stdout, the explicit path, or the configured dataset path.
pub fn destination(stdout: bool, output: Option<PathBuf>, default: &Path) -> Option<PathBuf> {
    if stdout {
        None
    } else {
        Some(output.unwrap_or_else(|| default.to_path_buf()))
    }
}
