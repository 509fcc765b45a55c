//! User-agent list source

use super::{lines, read_required};
use crate::error::{BotError, Result};

/// Load the user-agent lines; an empty file is a startup error
pub fn load_user_agents(path: &str) -> Result<Vec<String>> {
    let agent_lines = lines(&read_required(path)?);
    if agent_lines.is_empty() {
        return Err(BotError::InvalidConfig(format!("{} is empty", path)));
    }
    Ok(agent_lines)
}
