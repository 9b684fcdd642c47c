use std::fs::{self, OpenOptions};
use std::io;
use std::path::Path;

use file_rotate::{
    ContentLimit, FileRotate,
    compression::Compression,
    suffix::AppendCount,
};

/// Size-rotated audit file for one component.
///
/// The active file rotates once it has grown past `max_bytes`, after a whole
/// write, so a log line never straddles two segments. Rotated segments are
/// `<name>.1` (newest) up to `<name>.<max_segments>`.
pub type AuditFile = FileRotate<AppendCount>;

/// Open the audit file at `path`, creating its directory.
///
/// `FileRotate` reports open failures only on first write, so the file is
/// opened once here to surface them to the caller.
pub fn open(path: &Path, max_bytes: u64, max_segments: usize) -> io::Result<AuditFile> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)?;

    let limit = usize::try_from(max_bytes).unwrap_or(usize::MAX);

    Ok(FileRotate::new(
        path,
        AppendCount::new(max_segments),
        ContentLimit::BytesSurpassed(limit),
        Compression::None,
        #[cfg(unix)]
        None,
    ))
}
