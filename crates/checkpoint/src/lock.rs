//! Exclusive advisory lock guarding a checkpoint file

use fs2::FileExt;
use lawabbr_core::{Error, Result};
use std::fs::File;
use std::path::{Path, PathBuf};

/// RAII guard for the checkpoint lock
///
/// Releases the lock when dropped, including on early returns.
#[derive(Debug)]
pub(crate) struct LockGuard {
    file: File,
}

impl LockGuard {
    /// Acquire the lock without waiting; a held lock means another run is active
    pub(crate) fn acquire(lock_path: &Path, checkpoint_path: &Path) -> Result<Self> {
        let file = File::options()
            .create(true)
            .write(true)
            .truncate(false)
            .open(lock_path)?;

        match file.try_lock_exclusive() {
            Ok(()) => Ok(Self { file }),
            Err(_) => Err(Error::CheckpointLocked {
                path: checkpoint_path.to_path_buf(),
            }),
        }
    }
}

impl Drop for LockGuard {
    fn drop(&mut self) {
        if let Err(e) = fs2::FileExt::unlock(&self.file) {
            tracing::warn!("Failed to unlock checkpoint during drop: {e}");
        }
    }
}

/// Lock file path for a checkpoint: the checkpoint name with `.lock` appended
pub(crate) fn lock_path(checkpoint_path: &Path) -> PathBuf {
    let mut name = checkpoint_path.as_os_str().to_owned();
    name.push(".lock");
    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lock_path_appends_suffix() {
        assert_eq!(
            lock_path(Path::new("out/extracted_results_o1-mini_our.json")),
            PathBuf::from("out/extracted_results_o1-mini_our.json.lock")
        );
    }
}
