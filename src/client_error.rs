use std::fmt;
use thiserror::Error;

/// Which remote endpoint a transport failure happened on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    /// The OAuth token endpoint.
    Token,
    /// The archive files listing.
    Listing,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Token => write!(f, "token endpoint"),
            Endpoint::Listing => write!(f, "archive files listing"),
        }
    }
}

/// Various errors returned by the client.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The provider rejected the authorization code, or answered without an access token.
    ///
    /// Authorization codes are single-use, so this is never retryable with the same code.
    #[error("token exchange failed: {0}")]
    Exchange(String),

    /// The authorization redirect could not be read, or carried no code. No exchange was attempted.
    #[error("invalid callback: {0}")]
    InvalidCallback(String),

    /// A calendar date did not match `YYYY-MM-DD`.
    #[error("invalid date format: {input:?} (expected YYYY-MM-DD)")]
    InvalidDateFormat { input: String },

    /// The resolved range starts after it ends.
    #[error("invalid date range: {from} is after {to}")]
    InvalidDateRange { from: String, to: String },

    /// The listing endpoint returned a non-success status or a body that could not be parsed.
    #[error("upstream error ({status}): {message}")]
    Upstream { status: u16, message: String },

    /// Transport-level failure (connection, timeout, TLS) for either endpoint.
    #[error("network error on {endpoint}: {source}")]
    Network {
        endpoint: Endpoint,
        #[source]
        source: reqwest::Error,
    },

    /// Missing or invalid configuration.
    #[error("configuration error: {0}")]
    Config(String),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ClientError {
    /// Whether the caller may reasonably retry the whole operation.
    ///
    /// Only transport failures and 5xx responses from the listing endpoint qualify. Nothing
    /// from the token endpoint does: the request may have reached the provider before failing,
    /// and the authorization code is single-use.
    pub fn is_retryable(&self) -> bool {
        match self {
            ClientError::Network { endpoint, .. } => *endpoint == Endpoint::Listing,
            ClientError::Upstream { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

impl ClientError {
    /// Transport failure on `endpoint`, for use with `map_err`.
    pub(crate) fn network(endpoint: Endpoint) -> impl Fn(reqwest::Error) -> ClientError {
        move |source| ClientError::Network { endpoint, source }
    }
}

impl From<serde_urlencoded::ser::Error> for ClientError {
    fn from(err: serde_urlencoded::ser::Error) -> Self {
        ClientError::Config(err.to_string())
    }
}
