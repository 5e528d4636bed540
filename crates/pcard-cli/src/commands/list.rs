//! List command - print the listing document for a stored dataset.

use std::path::PathBuf;

use clap::Args;
use tracing::info;

use pcard_core::{Listing, ReportDataset};

/// Arguments for the list command.
#[derive(Args)]
pub struct ListArgs {
    /// Dataset file (default: the configured dataset path)
    dataset: Option<PathBuf>,

    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,

    /// Print only the vendor names, as a JSON array
    #[arg(long)]
    vendors: bool,
}

pub async fn run(args: ListArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = super::load_config(config_path)?;
    let path = args.dataset.unwrap_or(config.output.dataset_path);

    if !path.exists() {
        anyhow::bail!("Dataset not found: {}", path.display());
    }

    let dataset = ReportDataset::from_file(&path)?;
    let listing = Listing::from_dataset(&dataset);
    info!("Listing {} records from {}", listing.tax_sales.len(), path.display());

    let pretty = args.pretty || config.output.pretty;
    let json = match (args.vendors, pretty) {
        (true, true) => serde_json::to_string_pretty(&listing.vendors())?,
        (true, false) => serde_json::to_string(&listing.vendors())?,
        (false, true) => serde_json::to_string_pretty(&listing)?,
        (false, false) => serde_json::to_string(&listing)?,
    };
    println!("{}", json);

    Ok(())
}
