//! Counter-proposal command implementation.

use crate::cli::CounterProposalArgs;
use crate::client::ApiClient;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use contractguard_domain::UserInfo;
use serde_json::Value;
use std::fs;

/// Execute the counter-proposal command.
pub async fn execute_counter_proposal(
    args: CounterProposalArgs,
    client: &ApiClient,
    formatter: &Formatter,
) -> Result<()> {
    let contents = fs::read_to_string(&args.analysis)?;
    let analysis: Value = serde_json::from_str(&contents)?;
    if !analysis.is_object() {
        return Err(CliError::InvalidInput(
            "Analysis file must contain a JSON object".to_string(),
        ));
    }

    let user_info = user_info(&args);
    let proposal = client.counter_proposal(&analysis, &user_info).await?;

    println!("{}", formatter.counter_proposal(&proposal)?);

    Ok(())
}

/// Build user info from the flags, keeping defaults for anything unset
fn user_info(args: &CounterProposalArgs) -> UserInfo {
    let mut info = UserInfo::default();
    if let Some(name) = &args.name {
        info.user_name = name.clone();
    }
    if let Some(other) = &args.other_party {
        info.other_party_name = other.clone();
    }
    if let Some(role) = &args.role {
        info.user_role = role.clone();
    }
    info.contract_type = args.contract_type.clone();
    info
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_user_info_defaults() {
        let args = CounterProposalArgs {
            analysis: PathBuf::from("analysis.json"),
            name: Some("Jordan Lee".to_string()),
            other_party: None,
            role: None,
            contract_type: None,
        };
        let info = user_info(&args);
        assert_eq!(info.user_name, "Jordan Lee");
        assert_eq!(info.other_party_name, "Other Party");
        assert_eq!(info.user_role, "tenant");
    }
}
