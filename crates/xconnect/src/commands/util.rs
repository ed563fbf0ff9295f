//! Shared helpers for command handlers.

use chrono::{DateTime, Utc};

use crate::error::CliError;

/// Prompt for confirmation, auto-approving if `--yes` was passed.
pub fn confirm(message: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    let confirmed = dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))?;
    Ok(confirmed)
}

/// "2026-03-01 09:15 UTC (3h 12m ago)", or "never".
pub fn describe_sync(at: Option<DateTime<Utc>>) -> String {
    let Some(at) = at else {
        return "never".into();
    };
    let stamp = at.format("%Y-%m-%d %H:%M UTC");
    match (Utc::now() - at).to_std() {
        Ok(age) => {
            // Minute precision is plenty for a sync age
            let age = std::time::Duration::from_secs(age.as_secs() / 60 * 60);
            if age.is_zero() {
                format!("{stamp} (just now)")
            } else {
                format!("{stamp} ({} ago)", humantime::format_duration(age))
            }
        }
        Err(_) => stamp.to_string(),
    }
}

/// `None` for blank strings, trimmed otherwise.
pub fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}
