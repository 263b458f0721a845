//! JSON-file checkpoint of extraction results

use crate::lock::{lock_path, LockGuard};
use lawabbr_core::{Error, Result, ResultExt, ResultRecord};
use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Accumulated result records, persisted after every append
///
/// Records keep their insertion order and are looked up by id. The whole
/// array is rewritten on each append; this is O(n) per write, which is fine
/// for evaluation datasets of a few hundred excerpts.
pub struct CheckpointStore {
    path: PathBuf,
    records: Vec<ResultRecord>,
    index: HashMap<String, usize>,
    _lock: LockGuard,
}

impl CheckpointStore {
    /// Open the checkpoint at `path`, loading any records a previous run left
    ///
    /// Creates the parent directory if needed and takes an exclusive lock for
    /// the lifetime of the store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        ensure_parent_dir(&path)?;

        let lock = LockGuard::acquire(&lock_path(&path), &path)?;
        let records = load(&path)?;
        let index = build_index(&path, &records)?;

        if records.is_empty() {
            debug!("Starting new checkpoint at {}", path.display());
        } else {
            info!(
                "Resuming from {} with {} recorded results",
                path.display(),
                records.len()
            );
        }

        Ok(Self {
            path,
            records,
            index,
            _lock: lock,
        })
    }

    /// Add a record and rewrite the checkpoint file
    ///
    /// Fails with [`Error::DuplicateRecord`] if the id is already stored. If
    /// the write fails the record is not kept in memory either.
    pub fn append(&mut self, record: ResultRecord) -> Result<()> {
        if self.index.contains_key(&record.id) {
            return Err(Error::DuplicateRecord(record.id));
        }

        self.index.insert(record.id.clone(), self.records.len());
        self.records.push(record);

        if let Err(e) = write_records(&self.path, &self.records) {
            if let Some(record) = self.records.pop() {
                self.index.remove(&record.id);
            }
            return Err(e);
        }
        Ok(())
    }

    pub fn contains_id(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Record stored under `id`
    pub fn get(&self, id: &str) -> Option<&ResultRecord> {
        self.index.get(id).and_then(|&pos| self.records.get(pos))
    }

    /// All records in insertion order
    pub fn records(&self) -> &[ResultRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Read the records stored at `path`
///
/// A missing file is an empty checkpoint. A file that does not parse as an
/// array of result records is reported as [`Error::CorruptCheckpoint`].
pub fn load(path: &Path) -> Result<Vec<ResultRecord>> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let content = std::fs::read_to_string(path)
        .context(format!("Failed to read checkpoint {}", path.display()))?;
    serde_json::from_str(&content).map_err(|e| Error::corrupt_checkpoint(path, e.to_string()))
}

fn build_index(path: &Path, records: &[ResultRecord]) -> Result<HashMap<String, usize>> {
    let mut index = HashMap::with_capacity(records.len());
    for (pos, record) in records.iter().enumerate() {
        if index.insert(record.id.clone(), pos).is_some() {
            return Err(Error::corrupt_checkpoint(
                path,
                format!("duplicate record id '{}'", record.id),
            ));
        }
    }
    Ok(index)
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => std::fs::create_dir_all(dir)
            .context(format!("Failed to create output directory {}", dir.display())),
        _ => Ok(()),
    }
}

/// Write all records as a pretty-printed array, replacing the file atomically
fn write_records(path: &Path, records: &[ResultRecord]) -> Result<()> {
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };

    let mut tmp = tempfile::NamedTempFile::new_in(dir)
        .context(format!("Failed to create temporary file in {}", dir.display()))?;
    serde_json::to_writer_pretty(&mut tmp, records)?;
    tmp.flush()?;
    if let Some(permissions) = output_permissions(path) {
        tmp.as_file()
            .set_permissions(permissions)
            .context(format!("Failed to set permissions for {}", path.display()))?;
    }
    tmp.persist(path)
        .map_err(|e| Error::with_context(format!("Failed to write {}", path.display()), e.error))?;

    debug!("Saved {} records to {}", records.len(), path.display());
    Ok(())
}

/// Mode for the rewritten file: the current file's, else 0644 on Unix
fn output_permissions(path: &Path) -> Option<std::fs::Permissions> {
    match std::fs::metadata(path) {
        Ok(metadata) => Some(metadata.permissions()),
        Err(_) => default_permissions(),
    }
}

#[cfg(unix)]
fn default_permissions() -> Option<std::fs::Permissions> {
    use std::os::unix::fs::PermissionsExt;
    Some(std::fs::Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn default_permissions() -> Option<std::fs::Permissions> {
    None
}
