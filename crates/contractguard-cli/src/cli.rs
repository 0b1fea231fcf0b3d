//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Default server address
pub const DEFAULT_SERVER: &str = "http://localhost:8080";

/// Default upload limit, matching the server's
pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 16 * 1024 * 1024;

/// ContractGuard CLI - Spot risky clauses before you sign.
#[derive(Debug, Parser)]
#[command(name = "contractguard")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Server URL
    #[arg(long, global = true, env = "CONTRACTGUARD_SERVER", default_value = DEFAULT_SERVER)]
    pub server: String,

    /// Output format
    #[arg(short, long, value_enum, global = true, default_value = "text")]
    pub format: CliFormat,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Largest file accepted for upload, in bytes
    #[arg(long, global = true, default_value_t = DEFAULT_MAX_UPLOAD_BYTES)]
    pub max_upload_bytes: u64,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum CliFormat {
    /// Human-readable text (default)
    Text,
    /// Raw JSON from the server
    Json,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Analyze a contract file or text
    Analyze(AnalyzeArgs),

    /// Compare an original contract with a revision
    Compare(CompareArgs),

    /// Draft a counter-proposal from a saved analysis
    CounterProposal(CounterProposalArgs),

    /// Show community statistics
    Stats,

    /// List bundled sample contracts, or show one
    Samples(SamplesArgs),
}

/// Arguments for the analyze command.
#[derive(Debug, Parser)]
pub struct AnalyzeArgs {
    /// Contract file (PDF, DOCX or TXT)
    #[arg(required_unless_present = "text", conflicts_with = "text")]
    pub file: Option<PathBuf>,

    /// Contract text instead of a file
    #[arg(long)]
    pub text: Option<String>,

    /// Contract type hint (rental, employment, nda, ...)
    #[arg(short = 't', long = "type")]
    pub contract_type: Option<String>,

    /// Also write the plain-text report to this path
    #[arg(long)]
    pub save_report: Option<PathBuf>,
}

/// Arguments for the compare command.
#[derive(Debug, Parser)]
pub struct CompareArgs {
    /// Original contract (text file)
    pub original: PathBuf,

    /// Revised contract (text file)
    pub revised: PathBuf,

    /// Your side of the contract
    #[arg(short, long, default_value = "tenant")]
    pub side: String,
}

/// Arguments for the counter-proposal command.
#[derive(Debug, Parser)]
pub struct CounterProposalArgs {
    /// JSON file holding an analysis result (`analyze --format json` output)
    pub analysis: PathBuf,

    /// Your name, used to sign the email
    #[arg(long)]
    pub name: Option<String>,

    /// The other party's name
    #[arg(long)]
    pub other_party: Option<String>,

    /// Your role (tenant, employee, ...)
    #[arg(long)]
    pub role: Option<String>,

    /// Contract type override
    #[arg(short = 't', long = "type")]
    pub contract_type: Option<String>,
}

/// Arguments for the samples command.
#[derive(Debug, Parser)]
pub struct SamplesArgs {
    /// Sample id to show in full
    pub id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analyze_file() {
        let cli = Cli::parse_from(["contractguard", "analyze", "lease.pdf", "--type", "rental"]);
        match cli.command {
            Command::Analyze(args) => {
                assert_eq!(args.file, Some(PathBuf::from("lease.pdf")));
                assert_eq!(args.contract_type.as_deref(), Some("rental"));
            }
            _ => panic!("Expected Analyze command"),
        }
        assert_eq!(cli.max_upload_bytes, DEFAULT_MAX_UPLOAD_BYTES);
        assert_eq!(cli.format, CliFormat::Text);
    }

    #[test]
    fn test_analyze_needs_file_or_text() {
        assert!(Cli::try_parse_from(["contractguard", "analyze"]).is_err());
        assert!(Cli::try_parse_from(["contractguard", "analyze", "a.txt", "--text", "x"]).is_err());
    }

    #[test]
    fn test_compare_defaults() {
        let cli = Cli::parse_from(["contractguard", "compare", "old.txt", "new.txt"]);
        match cli.command {
            Command::Compare(args) => assert_eq!(args.side, "tenant"),
            _ => panic!("Expected Compare command"),
        }
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::parse_from([
            "contractguard",
            "stats",
            "--server",
            "http://example.test:9000",
            "--format",
            "json",
            "--no-color",
        ]);
        assert_eq!(cli.server, "http://example.test:9000");
        assert_eq!(cli.format, CliFormat::Json);
        assert!(cli.no_color);
    }
}
