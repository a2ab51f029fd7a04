//! Configuration validation logic.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

use crate::config::loader::Config;
use crate::error::{Error, Result};

/// Maximum account name length.
const MAX_ACCOUNT_LENGTH: usize = 15;

static ACCOUNT_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_]{1,15}$").unwrap());

static PROFILE_URL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https?://(?:www\.|mobile\.)?(?:x|twitter)\.com/([^/?#]+)").unwrap()
});

/// Validate the entire configuration.
pub fn validate_config(config: &Config) -> Result<()> {
    let account = config
        .target
        .account
        .as_deref()
        .ok_or_else(|| Error::MissingConfig("account".to_string()))?;
    validate_account(account)?;

    if let Some(since) = config.target.since.as_deref() {
        parse_since(since)?;
    }

    if config.options.max_consecutive_errors == 0 {
        return Err(Error::ConfigValidation {
            field: "max_consecutive_errors".to_string(),
            message: "Must be at least 1".to_string(),
        });
    }

    if config.network.user_agent.trim().is_empty() {
        return Err(Error::MissingConfig("user_agent".to_string()));
    }

    Ok(())
}

/// Validate an account name (without `@`).
pub fn validate_account(account: &str) -> Result<()> {
    if account.is_empty() {
        return Err(Error::MissingConfig("account".to_string()));
    }

    if account.len() > MAX_ACCOUNT_LENGTH {
        return Err(Error::ConfigValidation {
            field: "account".to_string(),
            message: format!(
                "Account '{}' is too long (maximum {} characters)",
                account, MAX_ACCOUNT_LENGTH
            ),
        });
    }

    if !ACCOUNT_PATTERN.is_match(account) {
        return Err(Error::ConfigValidation {
            field: "account".to_string(),
            message: format!(
                "Account '{}' contains invalid characters. Only letters, digits and underscores allowed.",
                account
            ),
        });
    }

    Ok(())
}

/// Extract an account name from `name`, `@name` or a profile URL.
pub fn parse_account(input: &str) -> Result<String> {
    let input = input.trim();

    if input.starts_with("http://") || input.starts_with("https://") {
        let account = PROFILE_URL_PATTERN
            .captures(input)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().to_string())
            .ok_or_else(|| Error::ConfigValidation {
                field: "account".to_string(),
                message: format!("Could not extract account from URL: {}", input),
            })?;
        validate_account(&account)?;
        return Ok(account);
    }

    let account = input.trim_start_matches('@').to_string();
    validate_account(&account)?;
    Ok(account)
}

/// Parse the `since` filter (YYYY-MM-DD).
pub fn parse_since(input: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").map_err(|_| Error::ConfigValidation {
        field: "since".to_string(),
        message: format!("Invalid date '{}'. Expected YYYY-MM-DD.", input),
    })
}
