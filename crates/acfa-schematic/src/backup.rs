//! Backup copies taken before a save file is overwritten.

use std::fs;
use std::path::{Path, PathBuf};

use crate::{Error, Result};

/// Pick the first unused backup name for `path`.
///
/// `<path>.bak` is tried first, then `<path>.bak1`, `<path>.bak2` and so on,
/// so earlier backups are never overwritten.
pub fn backup_path(path: &Path) -> PathBuf {
    let base = path.as_os_str().to_owned();

    let mut candidate = base.clone();
    candidate.push(".bak");
    let mut candidate = PathBuf::from(candidate);

    let mut index = 1u32;
    while candidate.exists() {
        let mut next = base.clone();
        next.push(format!(".bak{index}"));
        candidate = PathBuf::from(next);
        index += 1;
    }

    candidate
}

/// Copy `path` to a fresh backup file and return the backup's path.
pub fn create_backup<P: AsRef<Path>>(path: P) -> Result<PathBuf> {
    let path = path.as_ref();
    let target = backup_path(path);

    fs::copy(path, &target).map_err(|source| Error::Backup {
        path: path.to_path_buf(),
        source,
    })?;

    log::info!("Backup created: {}", target.display());
    Ok(target)
}
