use serde::{Deserialize, Serialize};
use std::fmt;

/// Wrapper around a token response sent back from the Zoom token endpoint.
///
/// Every field is optional because the endpoint answers failed exchanges with the same status
/// and a different shape (`{"reason": "...", "error": "invalid_grant"}`).
#[derive(Debug, Deserialize)]
pub struct TokenRecord {
    pub access_token: Option<String>,
    pub token_type: Option<String>,
    pub refresh_token: Option<String>,
    pub expires_in: Option<u64>,
    pub scope: Option<String>,
    pub error: Option<String>,
    pub reason: Option<String>,
}

impl TokenRecord {
    /// Describe why this record carries no token, using whatever the provider sent.
    pub fn failure_reason(&self) -> String {
        match (&self.error, &self.reason) {
            (Some(error), Some(reason)) => format!("{}: {}", error, reason),
            (Some(error), None) => error.clone(),
            (None, Some(reason)) => reason.clone(),
            (None, None) => String::from("No token received"),
        }
    }
}

/// Opaque bearer token returned by a successful exchange.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(token: impl Into<String>) -> AccessToken {
        AccessToken(token.into())
    }

    /// The raw token, for the `Authorization` header.
    pub fn secret(&self) -> &str {
        &self.0
    }

    /// Get an abbreviated version of the token, safe to print.
    pub fn abbreviated(&self) -> String {
        let chars: Vec<char> = self.0.chars().collect();

        if chars.len() < 16 {
            return String::from("***");
        }

        let prefix: String = chars[..9].iter().collect();
        let suffix: String = chars[chars.len() - 4..].iter().collect();

        format!("{}..{}", prefix, suffix)
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AccessToken").field(&self.abbreviated()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::{AccessToken, TokenRecord};

    #[test]
    fn abbreviated_token_keeps_ends() {
        let token = AccessToken::new("12345678901234567890");

        assert_eq!(token.abbreviated(), "123456789..7890");
        assert_eq!(token.abbreviated().len(), 15);
    }

    #[test]
    fn short_token_is_fully_masked() {
        let token = AccessToken::new("short");

        assert_eq!(token.abbreviated(), "***");
    }

    #[test]
    fn debug_output_hides_secret() {
        let token = AccessToken::new("eyJhbGciOiJIUzUxMiJ9.secret-part.signature");
        let printed = format!("{:?}", token);

        assert!(!printed.contains("secret-part"));
        assert!(printed.starts_with("AccessToken("));
    }

    #[test]
    fn failure_reason_prefers_both_fields() {
        let record: TokenRecord =
            serde_json::from_str(r#"{"reason":"Invalid authorization code","error":"invalid_grant"}"#).unwrap();

        assert_eq!(record.access_token, None);
        assert_eq!(record.failure_reason(), "invalid_grant: Invalid authorization code");
    }

    #[test]
    fn failure_reason_without_details() {
        let record: TokenRecord = serde_json::from_str("{}").unwrap();

        assert_eq!(record.failure_reason(), "No token received");
    }
}
