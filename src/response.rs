//! Various response objects returned from Zoom, and the merged result of a collection.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One page of the `archive_files` listing.
///
/// Zoom signals the last page with an empty `next_page_token`, but some responses leave the field
/// out altogether. Both cases deserialize to `None`, see [`ArchiveFilesPage::next_cursor`].
#[derive(Debug, Deserialize)]
pub struct ArchiveFilesPage<T> {
    #[serde(default = "Vec::new")]
    pub meetings: Vec<T>,

    #[serde(default)]
    pub next_page_token: Option<String>,
}

impl<T> ArchiveFilesPage<T> {
    /// The cursor for the following page, or `None` when this is the last one.
    pub fn next_cursor(&self) -> Option<&str> {
        self.next_page_token
            .as_deref()
            .filter(|token| !token.is_empty())
    }
}

/// Every meeting from every page of one collection, in the order the pages arrived.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordSet<T = Value> {
    pub from: String,
    pub to: String,
    pub page_size: u32,
    pub total_records: usize,
    pub meetings: Vec<T>,
}

impl<T> RecordSet<T> {
    pub fn new(from: String, to: String, page_size: u32, meetings: Vec<T>) -> RecordSet<T> {
        RecordSet {
            from,
            to,
            page_size,
            total_records: meetings.len(),
            meetings,
        }
    }
}

/// A meeting with archived files.
///
/// Only the commonly used fields are typed; anything else Zoom sends is kept in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArchiveMeeting {
    pub uuid: String,
    pub id: u64,

    #[serde(default)]
    pub topic: String,

    #[serde(default)]
    pub host_id: Option<String>,

    #[serde(default)]
    pub start_time: Option<String>,

    #[serde(default)]
    pub timezone: Option<String>,

    /// Meeting length in minutes.
    #[serde(default)]
    pub duration: Option<u64>,

    /// Total size of the archived files in bytes.
    #[serde(default)]
    pub total_size: Option<u64>,

    #[serde(default)]
    pub recording_count: Option<u32>,

    #[serde(default)]
    pub archive_files: Vec<ArchiveFile>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A single archived artifact (transcript, chat log, audio track...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArchiveFile {
    pub id: String,

    #[serde(default)]
    pub file_type: Option<String>,

    #[serde(default)]
    pub file_extension: Option<String>,

    #[serde(default)]
    pub file_size: Option<u64>,

    #[serde(default)]
    pub download_url: Option<String>,

    #[serde(default)]
    pub status: Option<String>,

    #[serde(default)]
    pub recording_type: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
