use crate::client_error::ClientError;
use serde::Deserialize;

/// Query parameters Zoom appends to the redirect URI after the user answers the consent screen.
#[derive(Debug, Deserialize)]
struct RawCallback {
    code: Option<String>,
    state: Option<String>,
    error: Option<String>,
}

/// Outcome of the authorization redirect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallbackParams {
    /// The user granted access; `code` can be exchanged exactly once.
    Code { code: String, state: Option<String> },

    /// The user or the provider refused, e.g. `access_denied`.
    Denied { error: String },
}

impl CallbackParams {
    /// Parse a redirect query string such as `code=abc&state=xyz`. A leading `?` is accepted.
    pub fn from_query(query: &str) -> Result<CallbackParams, ClientError> {
        let query = query.strip_prefix('?').unwrap_or(query);
        let raw: RawCallback = serde_urlencoded::from_str(query)
            .map_err(|err| ClientError::InvalidCallback(err.to_string()))?;

        if let Some(error) = raw.error.filter(|error| !error.is_empty()) {
            return Ok(CallbackParams::Denied { error });
        }

        match raw.code.filter(|code| !code.is_empty()) {
            Some(code) => Ok(CallbackParams::Code { code, state: raw.state }),
            None => Err(ClientError::InvalidCallback(String::from("no authorization code"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::CallbackParams;
    use crate::ClientError;

    #[test]
    fn code_with_state() {
        let params = CallbackParams::from_query("?code=obBEe8ewaL&state=1234").unwrap();

        assert_eq!(
            params,
            CallbackParams::Code {
                code: String::from("obBEe8ewaL"),
                state: Some(String::from("1234")),
            }
        );
    }

    #[test]
    fn error_wins_over_code() {
        let params = CallbackParams::from_query("error=access_denied&code=ignored").unwrap();

        assert_eq!(params, CallbackParams::Denied { error: String::from("access_denied") });
    }

    #[test]
    fn empty_query_is_rejected() {
        assert!(matches!(CallbackParams::from_query(""), Err(ClientError::InvalidCallback(_))));
    }

    #[test]
    fn state_without_code_is_not_an_exchange_failure() {
        match CallbackParams::from_query("state=1234") {
            Err(ClientError::InvalidCallback(message)) => assert!(message.contains("no authorization code")),
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
