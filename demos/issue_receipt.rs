//! Receipt issuer
//!
//! Issues one comprobante de pago from a record JSON file. The next folio is
//! kept in a JSON file so consecutive runs continue the sequence.
//!
//! Usage:
//!   cargo run --example issue_receipt -- <record.json> [config.json] [output_dir]
//!
//! Examples:
//!   cargo run --example issue_receipt -- input/receipt.json
//!   RUST_LOG=debug cargo run --example issue_receipt -- input/receipt.json config.json output

use anyhow::{bail, Context};
use receipt::{parse_record, JsonFileStore, ReceiptConfig, ReceiptIssuer, StoredFolioCounter};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: {} <record.json> [config.json] [output_dir]", args[0]);
        std::process::exit(1);
    }

    let record_path = &args[1];
    let config = match args.get(2) {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config '{}'", path))?;
            ReceiptConfig::from_json(&json)?
        }
        None => ReceiptConfig::default(),
    };
    let output_dir = args
        .get(3)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("output"));
    std::fs::create_dir_all(&output_dir)?;

    let record_json = std::fs::read_to_string(record_path)
        .with_context(|| format!("Failed to read record '{}'", record_path))?;
    let record = parse_record(&record_json)?;

    let store = JsonFileStore::new(output_dir.join("folio.json"));
    let mut issuer = ReceiptIssuer::new(config, StoredFolioCounter::new(store));

    let Some(receipt) = issuer.issue(record)? else {
        bail!("Receipt could not be rendered; see the log for details");
    };

    let output_path = output_dir.join(&receipt.file_name);
    std::fs::write(&output_path, &receipt.pdf)?;

    println!("Generated: {}", output_path.display());
    println!("Next folio: {}", receipt.folio + 1);

    Ok(())
}
