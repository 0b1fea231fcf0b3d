//! ContractGuard CLI - Command-line client for contract analysis.

use clap::Parser;
use contractguard_cli::commands;
use contractguard_cli::{ApiClient, Cli, Command, Formatter};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let formatter = Formatter::new(cli.format, !cli.no_color);

    if let Err(e) = run(cli, &formatter).await {
        eprintln!("{}", formatter.error(&e.to_string()));
        std::process::exit(1);
    }
}

async fn run(cli: Cli, formatter: &Formatter) -> contractguard_cli::Result<()> {
    let client = ApiClient::new(&cli.server);

    match cli.command {
        Command::Analyze(args) => {
            commands::execute_analyze(args, &client, formatter, cli.max_upload_bytes).await?;
        }
        Command::Compare(args) => {
            commands::execute_compare(args, &client, formatter, cli.max_upload_bytes).await?;
        }
        Command::CounterProposal(args) => {
            commands::execute_counter_proposal(args, &client, formatter).await?;
        }
        Command::Stats => {
            commands::execute_stats(&client, formatter).await?;
        }
        Command::Samples(args) => {
            commands::execute_samples(args, &client, formatter).await?;
        }
    }

    Ok(())
}
