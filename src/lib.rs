//! # zoom-archive
//!
//! Library to list Zoom archive files: complete the OAuth authorization-code exchange, then walk
//! the cursor-paginated `archive_files` listing and merge every page into one record set.
//!
//! You can read more about the endpoints involved here:
//! [https://developers.zoom.us/docs/integrations/oauth/](https://developers.zoom.us/docs/integrations/oauth/)
//!
//! ### Example
//!
//! ```no_run
//! use zoom_archive::{Client, ClientError, Credentials, DateRange, DEFAULT_PAGE_SIZE};
//!
//! # fn main() -> Result<(), ClientError> {
//! let credentials = Credentials::new(
//!     "YOUR_CLIENT_ID",
//!     "YOUR_CLIENT_SECRET",
//!     "http://localhost:65010/zoom_callback",
//! );
//! let client = Client::new(credentials);
//!
//! // send the user here, then read `code` from the redirect
//! println!("{}", client.authorization_url(None)?);
//!
//! let token = client.exchange("CODE_FROM_CALLBACK")?;
//! let range = DateRange::normalize(Some("2024-01-05"), Some("2024-01-10"))?;
//! let records = client.collect(&token, &range, DEFAULT_PAGE_SIZE)?;
//!
//! println!("{} meetings", records.total_records);
//! # Ok(())
//! # }
//! ```

mod callback;
mod client;
mod client_error;
mod credentials;
mod date_range;
pub mod export;
pub mod response;
mod session;
mod token_record;

pub use callback::CallbackParams;
pub use client::{Client, API_BASE_URL, DEFAULT_PAGE_SIZE, OAUTH_BASE_URL};
pub use client_error::{ClientError, Endpoint};
pub use credentials::Credentials;
pub use date_range::{DateRange, DATE_FORMAT, DEFAULT_WINDOW_DAYS, ZULU_FORMAT};
pub use response::{ArchiveFile, ArchiveMeeting, RecordSet};
pub use session::Session;
pub use token_record::{AccessToken, TokenRecord};
