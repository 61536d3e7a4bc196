use std::fs;
use std::path::Path;

use crate::error::DirectoryError;

pub const DOWNLOAD_DIR: &str = "Fetched_Images";

/// Creates `dir` and any missing parents. Succeeds if it already exists.
pub fn ensure_directory(dir: &Path) -> Result<(), DirectoryError> {
    fs::create_dir_all(dir).map_err(|source| DirectoryError {
        path: dir.to_path_buf(),
        source,
    })?;

    log::info!("Download directory ready: {:?}", dir);
    Ok(())
}
