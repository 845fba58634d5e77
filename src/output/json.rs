//! JSON record file reading and writing

use crate::record::UserAgentRecord;
use crate::{OutputError, OutputResult};
use std::path::Path;

/// Writes records to `path` as a pretty-printed JSON array
///
/// The records are serialized before the file is touched, so a
/// serialization failure leaves no file behind. An existing file is
/// truncated.
///
/// # Arguments
///
/// * `path` - Destination file
/// * `records` - Records in arrival order
///
/// # Returns
///
/// * `Ok(())` - File written
/// * `Err(OutputError)` - Serialization or IO failure
pub fn write_records(path: &Path, records: &[UserAgentRecord]) -> OutputResult<()> {
    let bytes = serde_json::to_vec_pretty(records)?;

    std::fs::write(path, bytes).map_err(|source| OutputError::Io {
        path: path.display().to_string(),
        source,
    })?;

    tracing::debug!("Wrote {} records to {}", records.len(), path.display());
    Ok(())
}

/// Reads a JSON array of records from `path`
///
/// A `null` document is treated as an empty array.
pub fn read_records(path: &Path) -> OutputResult<Vec<UserAgentRecord>> {
    let bytes = std::fs::read(path).map_err(|source| OutputError::Io {
        path: path.display().to_string(),
        source,
    })?;

    let records: Option<Vec<UserAgentRecord>> = serde_json::from_slice(&bytes)?;
    Ok(records.unwrap_or_default())
}
