use std::path::Path;

use log::debug;
use walkdir::WalkDir;

/// Total size in bytes of the regular files under `path`.
///
/// A missing path is 0. Entries that cannot be read are skipped; the result
/// is a lower bound in that case. Symlinks are not followed.
pub fn directory_size(path: &Path) -> u64 {
    if !path.exists() {
        return 0;
    }

    let mut total = 0u64;
    for entry in WalkDir::new(path).follow_links(false) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                debug!("Skipping unreadable entry under {}: {e}", path.display());
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        match entry.metadata() {
            Ok(metadata) => total += metadata.len(),
            Err(e) => debug!("No size for {}: {e}", entry.path().display()),
        }
    }

    total
}
