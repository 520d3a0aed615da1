use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use async_trait::async_trait;
use log::{info, warn};

use rehearse_core::model::{ArchiveRecord, RecordId};

use crate::repository::{ArchiveRepository, StorageError, most_recent_first};

mod dto;

use dto::RecordDto;

/// Archive store backed by a single JSON document on disk.
///
/// The whole archive lives in one file holding an array of records, kept in
/// insertion order. Every mutation rewrites the file through a temp file and
/// an atomic rename. A malformed or absent file loads as an empty archive,
/// never as an error.
pub struct JsonArchive {
    path: PathBuf,
    records: Mutex<Vec<ArchiveRecord>>,
}

impl JsonArchive {
    /// Opens the archive at `path`, loading whatever records it holds.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Io` if the file exists but cannot be read.
    /// Unparseable content is treated as an empty archive.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        let records = load_records(&path)?;
        Ok(Self {
            path,
            records: Mutex::new(records),
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, records: &[ArchiveRecord]) -> Result<(), StorageError> {
        let dtos: Vec<RecordDto> = records.iter().map(RecordDto::from_record).collect();
        let body = serde_json::to_string_pretty(&dtos)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        write_atomic(&self.path, body.as_bytes())?;
        info!(
            "archive saved: {} record(s) -> {}",
            records.len(),
            self.path.display()
        );
        Ok(())
    }
}

fn load_records(path: &Path) -> Result<Vec<ArchiveRecord>, StorageError> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let content = fs::read_to_string(path).map_err(|e| StorageError::Io(e.to_string()))?;
    if content.trim().is_empty() {
        return Ok(Vec::new());
    }

    let dtos: Vec<RecordDto> = match serde_json::from_str(&content) {
        Ok(dtos) => dtos,
        Err(e) => {
            warn!("archive file {} is malformed ({e}); starting empty", path.display());
            return Ok(Vec::new());
        }
    };

    let mut records = Vec::with_capacity(dtos.len());
    for dto in dtos {
        match dto.into_record() {
            Ok(record) => records.push(record),
            Err(e) => warn!("skipping invalid archive record: {e}"),
        }
    }
    Ok(records)
}

fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), StorageError> {
    let io = |e: std::io::Error| StorageError::Io(e.to_string());

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(io)?;
    }

    let file_name = path
        .file_name()
        .ok_or_else(|| StorageError::Io("archive path has no file name".to_string()))?;
    let tmp_path = path.with_file_name(format!(".{}.tmp", file_name.to_string_lossy()));

    let mut tmp_file = File::create(&tmp_path).map_err(io)?;
    tmp_file.write_all(bytes).map_err(io)?;
    tmp_file.sync_all().map_err(io)?;
    drop(tmp_file);

    fs::rename(&tmp_path, path).map_err(io)
}

#[async_trait]
impl ArchiveRepository for JsonArchive {
    async fn list(&self) -> Result<Vec<ArchiveRecord>, StorageError> {
        let guard = self
            .records
            .lock()
            .map_err(|e| StorageError::Io(e.to_string()))?;
        Ok(most_recent_first(&guard))
    }

    async fn append(&self, record: &ArchiveRecord) -> Result<(), StorageError> {
        let mut guard = self
            .records
            .lock()
            .map_err(|e| StorageError::Io(e.to_string()))?;
        guard.push(record.clone());
        self.persist(&guard)
    }

    async fn remove(&self, id: RecordId) -> Result<(), StorageError> {
        let mut guard = self
            .records
            .lock()
            .map_err(|e| StorageError::Io(e.to_string()))?;
        let before = guard.len();
        guard.retain(|record| record.id() != id);
        if guard.len() == before {
            return Ok(());
        }
        self.persist(&guard)
    }
}
