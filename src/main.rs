//! Prints the allocation report for the data directory as JSON.
//!
//! `tourops quote <rate_id> <nights>` prints a rate's price breakdown instead.

use anyhow::{bail, Context};
use chrono::Utc;
use tracing::{info, warn};

use tourops::allocation::{build_report, quote_rate_response};
use tourops::store::{DataStore, JsonFileStore};
use tourops::{logging, Settings};

fn main() -> anyhow::Result<()> {
    logging::init();
    let settings = Settings::from_env().context("loading settings")?;

    info!("Reading collections from {}", settings.data_dir.display());
    let store = DataStore::open(JsonFileStore::new(settings.data_dir.clone()))
        .context("opening data store")?;

    let args: Vec<String> = std::env::args().skip(1).collect();
    let output = match args.as_slice() {
        [] => {
            let report = build_report(&store, &settings.thresholds, Utc::now());
            if !report.conflicts.is_empty() {
                warn!("{} pools need attention", report.conflicts.len());
            }
            serde_json::to_string_pretty(&report)?
        }
        [command, rate_id, nights] if command == "quote" => {
            let nights: u32 = nights
                .parse()
                .with_context(|| format!("invalid night count: {}", nights))?;
            let quote = quote_rate_response(&store, rate_id, nights, &settings.currency)?;
            serde_json::to_string_pretty(&quote)?
        }
        _ => bail!("usage: tourops [quote <rate_id> <nights>]"),
    };

    println!("{}", output);
    Ok(())
}
