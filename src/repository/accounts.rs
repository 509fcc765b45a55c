//! Account credential source

use tracing::warn;

use super::{lines, read_required};
use crate::error::{BotError, Result};
use crate::models::account::{Account, TaggedAccount};

/// Load the raw credential lines; an empty file is a startup error
pub fn load_credential_lines(path: &str) -> Result<Vec<String>> {
    let credential_lines = lines(&read_required(path)?);
    if credential_lines.is_empty() {
        return Err(BotError::InvalidConfig(format!("{} is empty", path)));
    }
    Ok(credential_lines)
}

/// Pair credential lines with their user agents and parse them
///
/// Line *i* of the user-agent file belongs to account line *i*; fewer
/// user-agent lines than account lines is a startup error. Credential lines
/// that fail to parse are skipped with a warning, keeping their original
/// index for the log tag.
pub fn pair_with_accounts(
    credential_lines: Vec<String>,
    user_agents: Vec<String>,
) -> Result<Vec<TaggedAccount>> {
    if user_agents.len() < credential_lines.len() {
        return Err(BotError::InvalidConfig(format!(
            "user agent file has {} lines for {} account lines",
            user_agents.len(),
            credential_lines.len()
        )));
    }

    let accounts = credential_lines
        .into_iter()
        .zip(user_agents)
        .enumerate()
        .filter_map(|(index, (line, user_agent))| match Account::parse(&line) {
            Ok(account) => Some(TaggedAccount {
                index,
                account,
                user_agent,
            }),
            Err(e) => {
                warn!(account = index + 1, error = %e, "Skipping unparsable credential line");
                None
            }
        })
        .collect();

    Ok(accounts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};

    fn encode(s: &str) -> String {
        utf8_percent_encode(s, NON_ALPHANUMERIC).to_string()
    }

    fn credential_line(id: i64) -> String {
        let user = format!(
            r#"{{"id":{},"allows_write_to_pm":true,"first_name":"Ada","last_name":"Lovelace","language_code":"en"}}"#,
            id
        );
        let inner = format!(
            "query_id=AAE&user={}&auth_date=1718000000&hash=deadbeef",
            encode(&user)
        );
        encode(&encode(&inner))
    }

    #[test]
    fn test_pairing_by_line_index() {
        let accounts = pair_with_accounts(
            vec![credential_line(1), credential_line(2)],
            vec!["ua-one".to_string(), "ua-two".to_string()],
        )
        .unwrap();

        assert_eq!(accounts.len(), 2);
        assert_eq!(accounts[0].account.user.id, 1);
        assert_eq!(accounts[0].user_agent, "ua-one");
        assert_eq!(accounts[1].account.user.id, 2);
        assert_eq!(accounts[1].user_agent, "ua-two");
    }

    #[test]
    fn test_too_few_user_agents_is_config_error() {
        let result = pair_with_accounts(
            vec![credential_line(1), credential_line(2)],
            vec!["ua-one".to_string()],
        );
        assert!(matches!(result, Err(BotError::InvalidConfig(_))));
    }

    #[test]
    fn test_extra_user_agents_are_ignored() {
        let accounts = pair_with_accounts(
            vec![credential_line(1)],
            vec!["ua-one".to_string(), "ua-two".to_string()],
        )
        .unwrap();
        assert_eq!(accounts.len(), 1);
    }

    #[test]
    fn test_unparsable_credential_line_is_skipped() {
        let accounts = pair_with_accounts(
            vec!["garbage".to_string(), credential_line(2)],
            vec!["ua-one".to_string(), "ua-two".to_string()],
        )
        .unwrap();

        assert_eq!(accounts.len(), 1);
        assert_eq!(accounts[0].index, 1);
        assert_eq!(accounts[0].user_agent, "ua-two");
        assert_eq!(accounts[0].tag(), "account 2");
    }
}
