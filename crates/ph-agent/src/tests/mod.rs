
use ph_config::Config;

use std::fs;
use std::path::Path;

use tempfile::TempDir;

/// Config rooted at a temp directory, with defaults everywhere else.
pub(crate) fn config_in(dir: &TempDir) -> Config {
    Config {
        config_dir: dir.path().to_path_buf(),
        ..Config::default()
    }
}

/// Write `bytes` zero bytes to `path`, creating parent directories.
pub(crate) fn write_bytes(path: &Path, bytes: usize) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, vec![0u8; bytes]).unwrap();
}
