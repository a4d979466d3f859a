use std::fs::{File, OpenOptions};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use fastrace::trace;
use recfile_types::Record;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Malformed store {}: {source}", .path.display())]
    MalformedStore {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Reads every record from `path`, creating an empty file if none exists.
///
/// An empty file, or one holding `null`, is an empty collection; `null`
/// entries inside the array are zero records. The handle is closed when this
/// returns, whether or not parsing succeeded.
#[trace]
pub fn load(path: &Path) -> Result<Vec<Record>, StoreError> {
    let bytes = {
        let mut file = open_or_create(path)?;
        let mut bytes = Vec::new();
        file.read_to_end(&mut bytes)?;
        bytes
    };

    if bytes.is_empty() {
        debug!(path = %path.display(), "store is empty");
        return Ok(Vec::new());
    }

    let parsed: Option<Vec<Option<Record>>> =
        serde_json::from_slice(&bytes).map_err(|source| StoreError::MalformedStore {
            path: path.to_path_buf(),
            source,
        })?;
    let records: Vec<Record> = parsed
        .unwrap_or_default()
        .into_iter()
        .map(Option::unwrap_or_default)
        .collect();
    debug!(path = %path.display(), count = records.len(), "loaded records");
    Ok(records)
}

/// Overwrites `path` with `records` as a compact JSON array.
///
/// Serialization happens before the file is truncated. There is no temp file
/// and rename, so a crash during the write can leave a partial file behind.
#[trace]
pub fn save(records: &[Record], path: &Path) -> Result<(), StoreError> {
    let bytes = serde_json::to_vec(records)?;

    let mut file = File::create(path)?;
    file.write_all(&bytes)?;
    // Write-back errors go through the Result, not lost on drop.
    file.sync_all()?;

    debug!(
        path = %path.display(),
        count = records.len(),
        bytes = bytes.len(),
        "saved records"
    );
    Ok(())
}

fn open_or_create(path: &Path) -> std::io::Result<File> {
    let mut options = OpenOptions::new();
    options.read(true).write(true).create(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o644);
    }
    options.open(path)
}
