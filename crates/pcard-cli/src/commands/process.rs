//! Process command - extract records from a single report PDF.

use std::fs;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Args;
use console::style;
use futures_util::StreamExt;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use pcard_core::models::config::DownloadConfig;
use pcard_core::{ExtractionError, PageBatch, PdfExtractor, PdfProcessor};

use super::output::{self, OutputFormat};

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input report PDF
    #[arg(required_unless_present = "url", conflicts_with = "url")]
    input: Option<PathBuf>,

    /// Download the report PDF from a URL instead of reading a file
    #[arg(long)]
    url: Option<String>,

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

    /// Report skipped entries and missing page structure
    #[arg(long)]
    show_diagnostics: bool,
}

pub async fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = super::load_config(config_path)?;

    let data = match (&args.input, &args.url) {
        (Some(path), _) => {
            if !path.exists() {
                anyhow::bail!("Input file not found: {}", path.display());
            }
            info!("Processing file: {}", path.display());
            fs::read(path)?
        }
        (None, Some(url)) => {
            info!("Downloading report: {}", url);
            let client = build_client(&config.download)?;
            download_report(&client, url).await?
        }
        (None, None) => anyhow::bail!("Either an input file or --url is required"),
    };

    let mut extractor = PdfExtractor::from_config(&config.pdf);
    extractor.load(&data)?;
    debug!("PDF has {} pages", extractor.page_count());

    let content = extractor.extract_all()?;
    if content.is_blank() {
        anyhow::bail!("No text could be extracted from the PDF");
    }

    let pb = ProgressBar::new(content.pages.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} pages")?
            .progress_chars("##-"),
    );

    let mut batch = PageBatch::new().keep_empty_pages(config.extraction.keep_empty_pages);
    let mut diagnostics: Vec<(usize, ExtractionError)> = Vec::new();

    for (index, text) in content.page_texts().into_iter().enumerate() {
        let page_diagnostics = batch.extract_page(index, text);
        diagnostics.extend(page_diagnostics.into_iter().map(|d| (index, d)));
        pb.inc(1);
    }

    pb.finish_and_clear();
    let dataset = batch.finish();

    if args.show_diagnostics && !diagnostics.is_empty() {
        eprintln!("{}", style("Extraction diagnostics:").yellow());
        for (index, diagnostic) in &diagnostics {
            eprintln!("  - page index {}: {}", index, diagnostic);
        }
    }

    let pretty = args.pretty || config.output.pretty;
    let rendered = output::format_dataset(&dataset, args.format, pretty)?;
    let destination = output::destination(args.stdout, args.output, &config.output.dataset_path);
    output::write_output(&rendered, destination.as_deref())?;

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

/// Build the HTTP client used for report downloads.
fn build_client(config: &DownloadConfig) -> anyhow::Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()?;
    Ok(client)
}

/// Stream a report into memory with a progress bar.
async fn download_report(client: &reqwest::Client, url: &str) -> anyhow::Result<Vec<u8>> {
    let response = client.get(url).send().await?;

    if !response.status().is_success() {
        anyhow::bail!("HTTP {} for {}", response.status(), url);
    }

    let pb = ProgressBar::new(0);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:30.cyan/blue}] {bytes}/{total_bytes} ({eta})")?
            .progress_chars("##-"),
    );

    // Get content length if available
    if let Some(content_length) = response.content_length() {
        pb.set_length(content_length);
    }

    let mut data = Vec::new();
    let mut stream = response.bytes_stream();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        data.extend_from_slice(&chunk);
        pb.set_position(data.len() as u64);
    }

    pb.finish_and_clear();
    debug!("Downloaded {} bytes from {}", data.len(), url);

    Ok(data)
}
