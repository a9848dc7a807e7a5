//! Directory-backed storage, one JSON file per key

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use fs2::FileExt;

use super::{validate_key, Storage, StorageError};

/// Stores each key as `<dir>/<key>.json`
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Default data directory (~/.questlog/data/)
    pub fn default_dir() -> PathBuf {
        crate::config::Config::global_config_dir().join("data")
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file holding `key`
    pub fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        validate_key(key)?;
        Ok(self.dir.join(format!("{key}.json")))
    }
}

#[async_trait]
impl Storage for FileStorage {
    async fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key)?;

        match tokio::fs::read_to_string(&path).await {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::io(path, e)),
        }
    }

    async fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        let value = value.to_string();

        tokio::task::spawn_blocking(move || write_atomic(&path, &value))
            .await
            .map_err(|e| StorageError::Unavailable(format!("write task failed: {e}")))?
    }
}

/// Write `content` to `path` under an exclusive lock, via temp file + rename
fn write_atomic(path: &Path, content: &str) -> Result<(), StorageError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| StorageError::io(parent, e))?;
    }

    // Lock file is separate from the data file so the rename does not drop it
    let lock_path = path.with_extension("json.lock");
    let lock_file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&lock_path)
        .map_err(|e| StorageError::io(&lock_path, e))?;

    lock_file
        .lock_exclusive()
        .map_err(|e| StorageError::io(&lock_path, e))?;

    let temp_path = path.with_extension("json.tmp");
    let mut temp_file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&temp_path)
        .map_err(|e| StorageError::io(&temp_path, e))?;

    temp_file
        .write_all(content.as_bytes())
        .map_err(|e| StorageError::io(&temp_path, e))?;
    temp_file
        .sync_all()
        .map_err(|e| StorageError::io(&temp_path, e))?;

    std::fs::rename(&temp_path, path).map_err(|e| StorageError::io(path, e))?;

    Ok(())
}
