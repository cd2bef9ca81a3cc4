//! Writing a collected record set to disk.

use crate::client_error::ClientError;
use crate::response::RecordSet;
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::info;

/// Write `records` as pretty-printed JSON to `path`, replacing any existing file.
pub fn write_json<T: Serialize>(path: impl AsRef<Path>, records: &RecordSet<T>) -> Result<(), ClientError> {
    let path = path.as_ref();
    let mut writer = BufWriter::new(File::create(path)?);

    to_writer(&mut writer, records)?;
    writer.flush()?;

    info!(path = %path.display(), total_records = records.total_records, "record set written");

    Ok(())
}

/// Serialize `records` as pretty-printed JSON followed by a newline.
pub fn to_writer<T: Serialize, W: Write>(mut writer: W, records: &RecordSet<T>) -> Result<(), ClientError> {
    serde_json::to_writer_pretty(&mut writer, records)?;
    writeln!(writer)?;

    Ok(())
}
