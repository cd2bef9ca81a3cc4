use crate::client_error::{ClientError, Endpoint};
use crate::credentials::Credentials;
use crate::date_range::DateRange;
use crate::response::{ArchiveFilesPage, RecordSet};
use crate::token_record::{AccessToken, TokenRecord};
use reqwest::blocking;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashSet;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Base URL of the Zoom OAuth server.
pub const OAUTH_BASE_URL: &str = "https://zoom.us";

/// Base URL of the Zoom REST API.
pub const API_BASE_URL: &str = "https://api.zoom.us/v2";

/// Number of meetings requested per page when the caller does not choose.
pub const DEFAULT_PAGE_SIZE: u32 = 300;

/// Default network timeout for API requests, in seconds.
const DEFAULT_TIMEOUT: u64 = 30;

/// Stateless client for the OAuth exchange and the archive files listing.
///
/// The client only holds configuration. Tokens and pagination cursors are passed in and
/// returned, so one client can serve any number of callers.
///
/// Credentials are only needed for the OAuth side; a client built with [`Client::for_listing`]
/// can collect archive files with an existing token.
#[derive(Debug, Clone)]
pub struct Client {
    credentials: Option<Credentials>,
    oauth_base: String,
    api_base: String,
    timeout: u64,
}

impl Client {
    /// Create a client talking to the production Zoom endpoints.
    pub fn new(credentials: Credentials) -> Client {
        Client {
            credentials: Some(credentials),
            oauth_base: String::from(OAUTH_BASE_URL),
            api_base: String::from(API_BASE_URL),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Create a client without OAuth credentials, able to list archive files only.
    pub fn for_listing() -> Client {
        Client {
            credentials: None,
            oauth_base: String::from(OAUTH_BASE_URL),
            api_base: String::from(API_BASE_URL),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Create a client with custom OAuth and API base URLs.
    pub fn with_endpoints(
        credentials: Credentials,
        oauth_base: impl Into<String>,
        api_base: impl Into<String>,
    ) -> Result<Client, ClientError> {
        let oauth_base = normalize_base(oauth_base.into())?;
        let api_base = normalize_base(api_base.into())?;

        Ok(Client {
            credentials: Some(credentials),
            oauth_base,
            api_base,
            timeout: DEFAULT_TIMEOUT,
        })
    }
}

impl Client {
    /// Get the timeout for API requests.
    pub fn timeout(&self) -> u64 {
        self.timeout
    }

    /// Set the timeout for API requests.
    pub fn set_timeout(&mut self, timeout: u64) {
        self.timeout = timeout;
    }

    pub fn credentials(&self) -> Option<&Credentials> {
        self.credentials.as_ref()
    }

    pub fn oauth_base(&self) -> &str {
        &self.oauth_base
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    fn http_client(&self, endpoint: Endpoint) -> Result<blocking::Client, ClientError> {
        blocking::Client::builder()
            .timeout(Duration::from_secs(self.timeout))
            .build()
            .map_err(ClientError::network(endpoint))
    }

    fn require_credentials(&self) -> Result<&Credentials, ClientError> {
        self.credentials
            .as_ref()
            .ok_or_else(|| ClientError::Config(String::from("OAuth credentials are not configured")))
    }
}

impl Client {
    /// Build the URL the user is sent to in order to grant access.
    pub fn authorization_url(&self, state: Option<&str>) -> Result<String, ClientError> {
        let credentials = self.require_credentials()?;
        let mut params = vec![
            ("client_id", credentials.client_id()),
            ("response_type", "code"),
            ("redirect_uri", credentials.redirect_uri()),
        ];

        if let Some(state) = state {
            params.push(("state", state));
        }

        Ok(format!(
            "{}/oauth/authorize?{}",
            self.oauth_base,
            serde_urlencoded::to_string(&params)?
        ))
    }

    /// Exchange an authorization code for an access token.
    ///
    /// Sends exactly one request. The code is spent whatever the outcome, so a failure here is
    /// never retried.
    #[tracing::instrument(skip_all)]
    pub fn exchange(&self, code: &str) -> Result<AccessToken, ClientError> {
        let credentials = self.require_credentials()?;
        let url = format!("{}/oauth/token", self.oauth_base);
        let client = self.http_client(Endpoint::Token)?;

        let response = client
            .post(url.as_str())
            .basic_auth(credentials.client_id(), Some(credentials.client_secret()))
            .form(&[
                ("grant_type", "authorization_code"),
                ("code", code),
                ("redirect_uri", credentials.redirect_uri()),
            ])
            .send()
            .map_err(ClientError::network(Endpoint::Token))?;

        let status = response.status();
        let raw_response = response.text().map_err(ClientError::network(Endpoint::Token))?;

        let record: TokenRecord = serde_json::from_str(&raw_response).map_err(|err| {
            ClientError::Exchange(format!("unreadable token response ({}): {}", status, err))
        })?;

        let token = match &record.access_token {
            Some(token) if status.is_success() && !token.is_empty() => AccessToken::new(token.as_str()),
            _ => {
                warn!(%status, "token endpoint did not issue an access token");
                return Err(ClientError::Exchange(record.failure_reason()));
            }
        };

        debug!(token = %token.abbreviated(), "authorization code exchanged");

        Ok(token)
    }

    /// Fetch every archive file record in `range`, merging all pages.
    pub fn collect(
        &self,
        token: &AccessToken,
        range: &DateRange,
        page_size: u32,
    ) -> Result<RecordSet<Value>, ClientError> {
        self.collect_as(token, range, page_size)
    }

    /// Same as [`Client::collect`], deserializing each meeting into `T`.
    ///
    /// Any failing page fails the whole collection; pages already fetched are dropped.
    #[tracing::instrument(skip_all, fields(from = %range.from(), to = %range.to(), page_size = page_size))]
    pub fn collect_as<T: DeserializeOwned>(
        &self,
        token: &AccessToken,
        range: &DateRange,
        page_size: u32,
    ) -> Result<RecordSet<T>, ClientError> {
        if page_size == 0 {
            return Err(ClientError::Config(String::from("page_size must be positive")));
        }

        let client = self.http_client(Endpoint::Listing)?;
        let url = format!("{}/archive_files", self.api_base);

        let mut meetings = Vec::new();
        let mut cursor: Option<String> = None;
        let mut sent_cursors: HashSet<String> = HashSet::new();
        let mut pages = 0usize;

        loop {
            let page: ArchiveFilesPage<T> =
                self.fetch_page(&client, &url, token, range, page_size, cursor.as_deref())?;
            pages += 1;

            let next = page.next_cursor().map(String::from);
            debug!(page = pages, records = page.meetings.len(), has_next = next.is_some(), "fetched archive files page");

            meetings.extend(page.meetings);

            match next {
                // a cursor already sent means the listing cycles
                Some(next) if !sent_cursors.insert(next.clone()) => {
                    return Err(ClientError::Upstream {
                        status: 200,
                        message: format!("next_page_token {:?} repeated", next),
                    });
                }
                Some(next) => cursor = Some(next),
                None => break,
            }
        }

        info!(pages, total_records = meetings.len(), "archive files collected");

        Ok(RecordSet::new(
            range.from().to_string(),
            range.to().to_string(),
            page_size,
            meetings,
        ))
    }

    fn fetch_page<T: DeserializeOwned>(
        &self,
        client: &blocking::Client,
        url: &str,
        token: &AccessToken,
        range: &DateRange,
        page_size: u32,
        cursor: Option<&str>,
    ) -> Result<ArchiveFilesPage<T>, ClientError> {
        let mut query = vec![
            ("page_size", page_size.to_string()),
            ("from", range.from().to_string()),
            ("to", range.to().to_string()),
        ];

        if let Some(cursor) = cursor {
            query.push(("next_page_token", cursor.to_string()));
        }

        let response = client
            .get(url)
            .bearer_auth(token.secret())
            .query(&query)
            .send()
            .map_err(ClientError::network(Endpoint::Listing))?;

        let status = response.status();
        let body = response.text().map_err(ClientError::network(Endpoint::Listing))?;

        if !status.is_success() {
            warn!(%status, "archive files listing rejected");
            return Err(ClientError::Upstream {
                status: status.as_u16(),
                message: body,
            });
        }

        serde_json::from_str(&body).map_err(|err| ClientError::Upstream {
            status: status.as_u16(),
            message: format!("malformed archive files page: {}", err),
        })
    }
}

fn normalize_base(base: String) -> Result<String, ClientError> {
    let trimmed = base.trim().trim_end_matches('/');

    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(ClientError::Config(format!("invalid base URL: {:?}", base)));
    }

    Ok(trimmed.to_string())
}
