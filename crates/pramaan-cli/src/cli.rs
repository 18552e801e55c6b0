use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "pramaan",
    about = "Pramaan — certificate attestation vault",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Ledger connection configuration (TOML).
    #[arg(short, long, global = true, default_value = "pramaan.toml")]
    pub config: PathBuf,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Hash a record file and append the batch to the ledger
    Ingest(IngestArgs),
    /// Check one certificate's fields against the ledger
    Verify(VerifyArgs),
    /// Pull record fields out of raw certificate text
    Extract(ExtractArgs),
    /// Show ledger address, active signer, and network
    Info(InfoArgs),
}

#[derive(Args)]
pub struct IngestArgs {
    /// Delimiter-separated record file, header row = field names
    pub file: PathBuf,
}

#[derive(Args)]
pub struct VerifyArgs {
    #[arg(long)]
    pub roll_no: String,
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub course: String,
    #[arg(long)]
    pub branch: String,
    #[arg(long)]
    pub grade: String,
    #[arg(long)]
    pub year: String,
}

#[derive(Args)]
pub struct ExtractArgs {
    /// Text file with the certificate's OCR output
    pub file: PathBuf,
    /// Also verify the extracted record against the ledger
    #[arg(long)]
    pub verify: bool,
}

#[derive(Args)]
pub struct InfoArgs {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_ingest() {
        let cli = Cli::try_parse_from(["pramaan", "ingest", "records.csv"]).unwrap();
        if let Command::Ingest(args) = cli.command {
            assert_eq!(args.file, PathBuf::from("records.csv"));
        } else {
            panic!("wrong command");
        }
    }

    #[test]
    fn parse_verify_requires_all_fields() {
        let result = Cli::try_parse_from(["pramaan", "verify", "--roll-no", "1"]);
        assert!(result.is_err());
    }

    #[test]
    fn parse_verify() {
        let cli = Cli::try_parse_from([
            "pramaan", "verify", "--roll-no", "1", "--name", "Alice", "--course", "CS",
            "--branch", "AI", "--grade", "A", "--year", "2024",
        ])
        .unwrap();
        if let Command::Verify(args) = cli.command {
            assert_eq!(args.roll_no, "1");
            assert_eq!(args.year, "2024");
        } else {
            panic!("wrong command");
        }
    }

    #[test]
    fn parse_extract_with_verify() {
        let cli = Cli::try_parse_from(["pramaan", "extract", "cert.txt", "--verify"]).unwrap();
        if let Command::Extract(args) = cli.command {
            assert!(args.verify);
        } else {
            panic!("wrong command");
        }
    }

    #[test]
    fn parse_info() {
        let cli = Cli::try_parse_from(["pramaan", "info"]).unwrap();
        assert!(matches!(cli.command, Command::Info(_)));
    }

    #[test]
    fn config_defaults_to_pramaan_toml() {
        let cli = Cli::try_parse_from(["pramaan", "info"]).unwrap();
        assert_eq!(cli.config, PathBuf::from("pramaan.toml"));
    }

    #[test]
    fn parse_json_format() {
        let cli = Cli::try_parse_from(["pramaan", "--format", "json", "info"]).unwrap();
        assert!(matches!(cli.format, OutputFormat::Json));
    }

    #[test]
    fn parse_verbose() {
        let cli = Cli::try_parse_from(["pramaan", "--verbose", "info"]).unwrap();
        assert!(cli.verbose);
    }
}
