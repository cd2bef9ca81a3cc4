use crate::client_error::ClientError;
use std::env;
use std::fmt;

pub const CLIENT_ID_VAR: &str = "ZOOM_CLIENT_ID";
pub const CLIENT_SECRET_VAR: &str = "ZOOM_CLIENT_SECRET";
pub const REDIRECT_URI_VAR: &str = "ZOOM_REDIRECT_URI";

/// OAuth application credentials.
///
/// `redirect_uri` must match the URI registered for the app, and the one used when the
/// authorization code was issued.
#[derive(Clone)]
pub struct Credentials {
    client_id: String,
    client_secret: String,
    redirect_uri: String,
}

impl Credentials {
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        redirect_uri: impl Into<String>,
    ) -> Credentials {
        Credentials {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            redirect_uri: redirect_uri.into(),
        }
    }

    /// Read the credentials from `ZOOM_CLIENT_ID`, `ZOOM_CLIENT_SECRET` and `ZOOM_REDIRECT_URI`.
    pub fn from_env() -> Result<Credentials, ClientError> {
        Credentials::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Credentials, ClientError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &str| {
            lookup(name)
                .filter(|value| !value.trim().is_empty())
                .ok_or_else(|| ClientError::Config(format!("{} is not set", name)))
        };

        Ok(Credentials {
            client_id: required(CLIENT_ID_VAR)?,
            client_secret: required(CLIENT_SECRET_VAR)?,
            redirect_uri: required(REDIRECT_URI_VAR)?,
        })
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub fn client_secret(&self) -> &str {
        &self.client_secret
    }

    pub fn redirect_uri(&self) -> &str {
        &self.redirect_uri
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"***")
            .field("redirect_uri", &self.redirect_uri)
            .finish()
    }
}
