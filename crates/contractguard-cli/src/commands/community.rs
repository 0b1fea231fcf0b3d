//! Community statistics and sample contract commands.

use crate::cli::SamplesArgs;
use crate::client::ApiClient;
use crate::error::Result;
use crate::output::Formatter;

/// Execute the stats command.
pub async fn execute_stats(client: &ApiClient, formatter: &Formatter) -> Result<()> {
    let stats = client.community_stats().await?;
    println!("{}", formatter.stats(&stats)?);
    Ok(())
}

/// Execute the samples command.
pub async fn execute_samples(
    args: SamplesArgs,
    client: &ApiClient,
    formatter: &Formatter,
) -> Result<()> {
    match args.id {
        Some(id) => {
            let sample = client.sample(&id).await?;
            println!("{}", formatter.sample(&sample)?);
        }
        None => {
            let samples = client.samples().await?;
            println!("{}", formatter.samples(&samples)?);
        }
    }
    Ok(())
}
