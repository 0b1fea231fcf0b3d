//! Analyze command implementation.

use crate::cli::AnalyzeArgs;
use crate::client::ApiClient;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use crate::validate::{check_contract_text, check_upload};
use contractguard_report::analysis_report;
use std::fs;

/// Execute the analyze command.
///
/// Every local check runs before the request is built, so a bad file
/// never costs a round trip.
pub async fn execute_analyze(
    args: AnalyzeArgs,
    client: &ApiClient,
    formatter: &Formatter,
    max_upload_bytes: u64,
) -> Result<()> {
    let contract_type = args
        .contract_type
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty());

    let analysis = match (args.file, args.text) {
        (Some(path), _) => {
            let checked = check_upload(&path, max_upload_bytes)?;
            let bytes = fs::read(&path)?;
            eprintln!(
                "{}",
                formatter.info(&format!(
                    "Uploading {} ({} bytes, {})",
                    checked.filename, checked.size, checked.kind
                ))
            );
            client.analyze_file(&checked, bytes, contract_type).await?
        }
        (None, Some(text)) => {
            check_contract_text(&text)?;
            client.analyze_text(&text, contract_type).await?
        }
        (None, None) => {
            return Err(CliError::InvalidInput(
                "Provide a contract file or --text".to_string(),
            ))
        }
    };

    println!("{}", formatter.analysis(&analysis)?);

    if let Some(report_path) = args.save_report {
        fs::write(&report_path, analysis_report(&analysis))?;
        eprintln!(
            "{}",
            formatter.success(&format!("Report saved to {}", report_path.display()))
        );
    }

    Ok(())
}
