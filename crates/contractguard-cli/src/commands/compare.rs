//! Compare command implementation.

use crate::cli::CompareArgs;
use crate::client::ApiClient;
use crate::error::Result;
use crate::output::Formatter;
use crate::validate::read_contract_text;

/// Execute the compare command.
pub async fn execute_compare(
    args: CompareArgs,
    client: &ApiClient,
    formatter: &Formatter,
    max_upload_bytes: u64,
) -> Result<()> {
    let original = read_contract_text(&args.original, max_upload_bytes)?;
    let revised = read_contract_text(&args.revised, max_upload_bytes)?;

    let comparison = client.compare(&original, &revised, &args.side).await?;

    println!("{}", formatter.comparison(&comparison)?);

    Ok(())
}
