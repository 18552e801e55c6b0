use std::sync::Arc;

use pramaan_ledger::{LedgerConfig, RpcLedgerClient};
use pramaan_service::{
    extract_record, read_records_file, service_info, BatchIngestor, VerificationOutcome,
    VerificationService,
};
use pramaan_types::Record;

use crate::cli::{Cli, Command, OutputFormat};

pub async fn run_command(cli: Cli) -> anyhow::Result<()> {
    let config = LedgerConfig::load(&cli.config)?;
    // Connecting up front makes a dead ledger a startup failure for every
    // subcommand, not a surprise on first use.
    let client = Arc::new(RpcLedgerClient::connect(&config).await?);

    match cli.command {
        Command::Ingest(args) => {
            let records = read_records_file(&args.file)?;
            let mut ingestor = BatchIngestor::new(client);
            if let Some(signer) = config.signer {
                ingestor = ingestor.with_signer(signer);
            }
            let report = ingestor.ingest(&records).await?;
            match cli.format {
                OutputFormat::Text => println!(
                    "ingested {} records in tx {} ({} consumed)",
                    report.hashes_count, report.tx_id, report.cost_consumed
                ),
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
            }
        }

        Command::Verify(args) => {
            let record = Record::new(
                args.roll_no,
                args.name,
                args.course,
                args.branch,
                args.grade,
                args.year,
            );
            let outcome = VerificationService::new(client).verify(&record).await?;
            print_outcome(&outcome, &cli.format)?;
        }

        Command::Extract(args) => {
            let text = std::fs::read_to_string(&args.file)?;
            let record = extract_record(&text)?;
            match cli.format {
                OutputFormat::Text => {
                    for (name, value) in record.fields() {
                        println!("{name}: {value}");
                    }
                }
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&record)?),
            }
            if args.verify {
                let outcome = VerificationService::new(client).verify(&record).await?;
                print_outcome(&outcome, &cli.format)?;
            }
        }

        Command::Info(_) => {
            let info = service_info(client.as_ref()).await?;
            match cli.format {
                OutputFormat::Text => {
                    println!("contract: {}", info.contract);
                    match info.signer {
                        Some(signer) => println!("signer:   {signer}"),
                        None => println!("signer:   (none listed)"),
                    }
                    println!("network:  {}", info.network);
                }
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&info)?),
            }
        }
    }
    Ok(())
}

fn print_outcome(outcome: &VerificationOutcome, format: &OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => {
            if outcome.valid {
                let issuer = outcome
                    .issuer
                    .map(|a| a.to_hex())
                    .unwrap_or_else(|| "unknown".into());
                println!(
                    "VALID — recorded at {} by {issuer} (hash {})",
                    outcome.timestamp.unwrap_or_default(),
                    outcome.candidate_hash
                );
            } else {
                println!(
                    "INVALID — no attestation for hash {}",
                    outcome.candidate_hash
                );
            }
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(outcome)?),
    }
    Ok(())
}
