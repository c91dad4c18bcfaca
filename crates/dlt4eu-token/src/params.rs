use chrono::Duration;
use jsonwebtoken::Algorithm;

use crate::error::TokenError;

/// Parameters for issuing a new token.
#[derive(Debug, Clone)]
pub struct TokenParameters {
    /// Subject of the token.
    pub subject: String,
    /// Intended audience.
    pub audience: Vec<String>,
    /// Content type recorded in the token header (`cty`).
    pub content_type: Option<String>,
    /// Time until expiration, as a duration string (e.g. "720h").
    pub expiration: Option<String>,
    /// Time until the token becomes valid, as a duration string.
    pub not_before: Option<String>,
    /// Unique token identifier (`jti`).
    pub unique_identifier: Option<String>,
    /// Signing method. Must match the algorithm of the selected key.
    pub method: Algorithm,
    /// Arbitrary custom claims merged into the token payload.
    pub custom_claims: Option<serde_json::Map<String, serde_json::Value>>,
}

impl Default for TokenParameters {
    fn default() -> Self {
        Self {
            subject: String::new(),
            audience: Vec::new(),
            content_type: None,
            expiration: None,
            not_before: None,
            unique_identifier: None,
            method: Algorithm::EdDSA,
            custom_claims: None,
        }
    }
}

/// Parse a duration string of the form `<integer><unit>` where the unit is
/// one of `s`, `m`, `h`, or `d` (e.g. "30s", "5m", "720h", "2d").
pub fn parse_duration(value: &str) -> Result<Duration, TokenError> {
    let value = value.trim();
    if value.len() < 2 {
        return Err(TokenError::InvalidDuration(value.to_string()));
    }
    let (amount, unit) = value.split_at(value.len() - 1);
    let amount: i64 = amount
        .parse()
        .map_err(|_| TokenError::InvalidDuration(value.to_string()))?;
    if amount < 0 {
        return Err(TokenError::InvalidDuration(value.to_string()));
    }
    match unit {
        "s" => Ok(Duration::seconds(amount)),
        "m" => Ok(Duration::minutes(amount)),
        "h" => Ok(Duration::hours(amount)),
        "d" => Ok(Duration::days(amount)),
        _ => Err(TokenError::InvalidDuration(value.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_duration_units() {
        assert_eq!(parse_duration("30s").unwrap(), Duration::seconds(30));
        assert_eq!(parse_duration("5m").unwrap(), Duration::minutes(5));
        assert_eq!(parse_duration("720h").unwrap(), Duration::hours(720));
        assert_eq!(parse_duration("2d").unwrap(), Duration::days(2));
    }

    #[test]
    fn test_parse_duration_trims_whitespace() {
        assert_eq!(parse_duration(" 10m ").unwrap(), Duration::minutes(10));
    }

    #[test]
    fn test_parse_duration_rejects_garbage() {
        for bad in ["", "h", "10", "10x", "ten-h", "-5h", "1.5h"] {
            assert!(parse_duration(bad).is_err(), "accepted {:?}", bad);
        }
    }

    #[test]
    fn test_default_parameters_use_eddsa() {
        let params = TokenParameters::default();
        assert_eq!(params.method, Algorithm::EdDSA);
        assert!(params.custom_claims.is_none());
    }
}
