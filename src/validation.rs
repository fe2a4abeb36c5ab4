use thiserror::Error;

use crate::models::Cursor;

#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(String),

    #[error("Invalid wallet address format: {0}")]
    InvalidWalletAddress(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Addresses are stored and compared lowercased, so checksummed and
/// lowercase spellings of one address hit the same rows.
pub fn normalize_address(address: &str) -> String {
    address.trim().to_ascii_lowercase()
}

/// An address must be 0x followed by 40 hex digits.
pub fn validate_wallet_address(address: &str) -> Result<(), ValidationError> {
    let trimmed = address.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::MissingParameter("wallet_address".to_string()));
    }

    let hex_part = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .ok_or_else(|| ValidationError::InvalidWalletAddress(address.to_string()))?;

    if hex_part.len() != 40 || !hex_part.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(ValidationError::InvalidWalletAddress(address.to_string()));
    }

    Ok(())
}

/// Parse and clamp a page limit to [1, max_limit], falling back to
/// default_limit when absent.
pub fn validate_limit(
    limit: Option<&str>,
    default_limit: i64,
    max_limit: i64,
) -> Result<i64, ValidationError> {
    let limit = match limit {
        None => return Ok(default_limit),
        Some(raw) => raw
            .parse::<i64>()
            .map_err(|_| ValidationError::InvalidParameter(format!("limit: {raw}")))?,
    };

    if limit < 1 {
        return Err(ValidationError::InvalidParameter(
            "limit must be at least 1".to_string(),
        ));
    }
    Ok(limit.min(max_limit))
}

/// Cursors travel as "{block_number}:{id}".
pub fn parse_cursor(raw: &str) -> Result<Cursor, ValidationError> {
    let (block, id) = raw
        .split_once(':')
        .ok_or_else(|| ValidationError::InvalidParameter(format!("cursor: {raw}")))?;

    let block_number = block
        .parse::<i64>()
        .map_err(|_| ValidationError::InvalidParameter(format!("cursor: {raw}")))?;
    let id = id
        .parse::<i64>()
        .map_err(|_| ValidationError::InvalidParameter(format!("cursor: {raw}")))?;

    if block_number < 0 || id < 0 {
        return Err(ValidationError::InvalidParameter(format!("cursor: {raw}")));
    }

    Ok(Cursor { block_number, id })
}

pub fn format_cursor(cursor: &Cursor) -> String {
    format!("{}:{}", cursor.block_number, cursor.id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_checksummed_and_lowercase_addresses() {
        assert!(validate_wallet_address("0xAb5801a7D398351b8bE11C439e05C5B3259aeC9B").is_ok());
        assert!(validate_wallet_address("0xab5801a7d398351b8be11c439e05c5b3259aec9b").is_ok());
    }

    #[test]
    fn rejects_malformed_addresses() {
        assert!(validate_wallet_address("").is_err());
        assert!(validate_wallet_address("ab5801a7d398351b8be11c439e05c5b3259aec9b").is_err());
        assert!(validate_wallet_address("0x1234").is_err());
        assert!(validate_wallet_address("0xZZ5801a7d398351b8be11c439e05c5b3259aec9b").is_err());
    }

    #[test]
    fn normalizes_to_lowercase() {
        assert_eq!(
            normalize_address(" 0xAb5801a7D398351b8bE11C439e05C5B3259aeC9B "),
            "0xab5801a7d398351b8be11c439e05c5b3259aec9b"
        );
    }

    #[test]
    fn limit_defaults_and_clamps() {
        assert_eq!(validate_limit(None, 50, 500).unwrap(), 50);
        assert_eq!(validate_limit(Some("10"), 50, 500).unwrap(), 10);
        assert_eq!(validate_limit(Some("9999"), 50, 500).unwrap(), 500);
        assert!(validate_limit(Some("0"), 50, 500).is_err());
        assert!(validate_limit(Some("abc"), 50, 500).is_err());
    }

    #[test]
    fn cursor_round_trips() {
        let cursor = parse_cursor("42:7").unwrap();
        assert_eq!(cursor, Cursor { block_number: 42, id: 7 });
        assert_eq!(format_cursor(&cursor), "42:7");
        assert!(parse_cursor("42").is_err());
        assert!(parse_cursor("-1:7").is_err());
        assert!(parse_cursor("a:b").is_err());
    }
}
