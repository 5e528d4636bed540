//! Batch command - extract records from a set of page text files.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use futures_util::{stream, StreamExt};
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, error, warn};

use pcard_core::{PageBatch, PageExtraction, PageParser, ReportPageParser};

use super::output::{self, OutputFormat};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Glob pattern matching page text files, one file per page
    #[arg(required = true)]
    input: String,

    /// Output file (default: the configured dataset path)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print to stdout instead of writing a file
    #[arg(long, conflicts_with = "output")]
    stdout: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,

    /// Number of parallel workers (default: from config)
    #[arg(short = 'j', long)]
    jobs: Option<usize>,

    /// Abort on the first unreadable page file instead of recording it as an empty page
    #[arg(long)]
    fail_fast: bool,
}

/// Result of extracting one page file.
struct PageResult {
    index: usize,
    path: PathBuf,
    extraction: anyhow::Result<PageExtraction>,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = super::load_config(config_path)?;

    let mut files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| !p.is_dir())
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    sort_pages(&mut files);

    eprintln!(
        "{} Found {} page files to process",
        style("ℹ").blue(),
        files.len()
    );

    let jobs = args.jobs.unwrap_or(config.extraction.workers).max(1);
    debug!("Extracting with {} workers", jobs);

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} pages")?
            .progress_chars("=>-"),
    );

    let parser = ReportPageParser::new();
    let results: Vec<PageResult> = stream::iter(files.into_iter().enumerate())
        .map(|(index, path)| {
            let pb = pb.clone();
            async move {
                let extraction = extract_file(parser, path.clone()).await;
                pb.inc(1);
                PageResult {
                    index,
                    path,
                    extraction,
                }
            }
        })
        .buffer_unordered(jobs)
        .collect()
        .await;

    pb.finish_and_clear();

    let mut batch = PageBatch::with_parser(parser)
        .keep_empty_pages(config.extraction.keep_empty_pages);
    let mut failed = Vec::new();
    let mut skipped = 0;

    for result in results {
        match result.extraction {
            Ok(extraction) => {
                skipped += batch.insert_extraction(result.index, extraction).len();
            }
            Err(e) if args.fail_fast => {
                error!("Failed to read {}: {}", result.path.display(), e);
                anyhow::bail!("Processing failed for {}: {}", result.path.display(), e);
            }
            Err(e) => {
                warn!("Failed to read {}, recording an empty page: {}", result.path.display(), e);
                batch.extract_page(result.index, None);
                failed.push((result.path, e.to_string()));
            }
        }
    }

    let dataset = batch.finish();

    let pretty = args.pretty || config.output.pretty;
    let rendered = output::format_dataset(&dataset, args.format, pretty)?;
    let destination = output::destination(args.stdout, args.output, &config.output.dataset_path);
    output::write_output(&rendered, destination.as_deref())?;

    eprintln!(
        "{} Extracted {} records from {} pages in {:?} ({} diagnostics)",
        style("✓").green(),
        dataset.record_count(),
        dataset.page_count(),
        start.elapsed(),
        skipped
    );

    if !failed.is_empty() {
        eprintln!("{}", style("Failed files:").red());
        for (path, message) in &failed {
            eprintln!("  - {}: {}", path.display(), message);
        }
    }

    Ok(())
}

/// Read and parse one page file on the blocking pool.
/// Invalid UTF-8 is replaced rather than rejected.
async fn extract_file(parser: ReportPageParser, path: PathBuf) -> anyhow::Result<PageExtraction> {
    let extraction = tokio::task::spawn_blocking(move || -> anyhow::Result<PageExtraction> {
        let bytes = fs::read(&path)?;
        let text = String::from_utf8_lossy(&bytes);
        Ok(parser.parse(Some(&text)))
    })
    .await??;
    Ok(extraction)
}

/// Order page files by the trailing number in their stem, then by path, so
/// `page_2.txt` precedes `page_10.txt`. The position in this order is the
/// page index.
fn sort_pages(files: &mut [PathBuf]) {
    files.sort_by(|a, b| {
        trailing_number(a)
            .cmp(&trailing_number(b))
            .then_with(|| a.cmp(b))
    });
}

fn trailing_number(path: &Path) -> Option<u64> {
    let stem = path.file_stem()?.to_str()?;
    let digits = stem.len() - stem.trim_end_matches(|c: char| c.is_ascii_digit()).len();
    stem[stem.len() - digits..].parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_number() {
        assert_eq!(trailing_number(Path::new("pages/page_12.txt")), Some(12));
        assert_eq!(trailing_number(Path::new("003.txt")), Some(3));
        assert_eq!(trailing_number(Path::new("cover.txt")), None);
    }

    #[test]
    fn test_sort_pages_numeric() {
        let mut files = vec![
            PathBuf::from("page_10.txt"),
            PathBuf::from("page_2.txt"),
            PathBuf::from("page_1.txt"),
        ];
        sort_pages(&mut files);

        assert_eq!(
            files,
            vec![
                PathBuf::from("page_1.txt"),
                PathBuf::from("page_2.txt"),
                PathBuf::from("page_10.txt"),
            ]
        );
    }

    #[tokio::test]
    async fn test_extract_invalid_utf8() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("page_1.txt");
        let mut bytes = b"Vendor Name \xC9 ($)\n".to_vec();
        bytes.extend_from_slice(b"ACME 01/02/2022$4.50\nLOWES 01/03/2022$2.00\n");
        fs::write(&path, bytes).unwrap();

        let extraction = extract_file(ReportPageParser::new(), path).await.unwrap();
        let vendors: Vec<_> = extraction.records.iter().map(|r| r.vendor.as_str()).collect();

        assert_eq!(vendors, vec!["ACME", "LOWES"]);
    }

    #[tokio::test]
    async fn test_extract_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = extract_file(ReportPageParser::new(), dir.path().join("missing.txt")).await;

        assert!(result.is_err());
    }
}
