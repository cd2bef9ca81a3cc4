use crate::client::Client;
use crate::client_error::ClientError;
use crate::date_range::DateRange;
use crate::response::RecordSet;
use crate::token_record::AccessToken;
use serde_json::Value;

/// Request-scoped authentication context.
///
/// Created by exchanging an authorization code and then handed to every listing call. Callers
/// keep it wherever their own session lives; nothing is stored process-wide.
#[derive(Debug, Clone)]
pub struct Session {
    access_token: AccessToken,
}

impl Session {
    /// Wrap a token obtained elsewhere.
    pub fn new(access_token: AccessToken) -> Session {
        Session { access_token }
    }

    /// Exchange `code` and start a session with the issued token.
    pub fn authenticate(client: &Client, code: &str) -> Result<Session, ClientError> {
        Ok(Session::new(client.exchange(code)?))
    }

    pub fn access_token(&self) -> &AccessToken {
        &self.access_token
    }

    /// List the archive files in `range` with this session's token.
    pub fn archive_files(
        &self,
        client: &Client,
        range: &DateRange,
        page_size: u32,
    ) -> Result<RecordSet<Value>, ClientError> {
        client.collect(&self.access_token, range, page_size)
    }
}

#[cfg(test)]
mod tests {
    use super::Session;
    use crate::{Client, Credentials, DateRange};
    use mockito::Matcher;

    #[test]
    fn authenticate_then_list() {
        let mut server = mockito::Server::new();
        let token_mock = server
            .mock("POST", "/oauth/token")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"access_token":"session-token","token_type":"bearer","expires_in":3599}"#)
            .expect(1)
            .create();
        let list_mock = server
            .mock("GET", "/v2/archive_files")
            .match_header("authorization", "Bearer session-token")
            .match_query(Matcher::UrlEncoded("page_size".into(), "300".into()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"meetings":[{"id":1}],"next_page_token":""}"#)
            .expect(1)
            .create();

        let creds = Credentials::new("id", "secret", "http://localhost:65010/zoom_callback");
        let client = Client::with_endpoints(creds, server.url(), format!("{}/v2", server.url())).unwrap();
        let range = DateRange::normalize(None, None).unwrap();

        let session = Session::authenticate(&client, "auth-code").unwrap();
        let records = session.archive_files(&client, &range, 300).unwrap();

        token_mock.assert();
        list_mock.assert();
        assert_eq!(session.access_token().secret(), "session-token");
        assert_eq!(records.total_records, 1);
    }

    #[test]
    fn failed_exchange_creates_no_session() {
        let mut server = mockito::Server::new();
        let token_mock = server
            .mock("POST", "/oauth/token")
            .with_status(200)
            .with_body(r#"{"error":"invalid_grant"}"#)
            .expect(1)
            .create();

        let creds = Credentials::new("id", "secret", "http://localhost");
        let client = Client::with_endpoints(creds, server.url(), server.url()).unwrap();

        assert!(Session::authenticate(&client, "used-code").is_err());
        token_mock.assert();
    }
}
