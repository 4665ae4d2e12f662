//! Remembered annotator name
//!
//! The only state the tools persist: the name last used to submit a label,
//! stored under the fixed key `savedAnnotatorName` so the next labeling
//! session can prefill it.

use std::fs;
use std::io;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

/// Key the name is stored under
pub const ANNOTATOR_KEY: &str = "savedAnnotatorName";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error on {path}: {source}")]
    Io { path: PathBuf, source: io::Error },

    #[error("JSON error in {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct AnnotatorFile {
    #[serde(rename = "savedAnnotatorName", default, skip_serializing_if = "Option::is_none")]
    saved_annotator_name: Option<String>,
}

/// File-backed store for the remembered annotator name
#[derive(Debug, Clone)]
pub struct AnnotatorStore {
    file_path: PathBuf,
}

impl AnnotatorStore {
    pub fn with_path(path: PathBuf) -> Self {
        Self { file_path: path }
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    /// The remembered name, if any
    pub fn load(&self) -> Result<Option<String>, StorageError> {
        if !self.file_path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&self.file_path).map_err(|source| self.io(source))?;
        let file: AnnotatorFile =
            serde_json::from_str(&content).map_err(|source| StorageError::Json {
                path: self.file_path.clone(),
                source,
            })?;
        Ok(file.saved_annotator_name.filter(|name| !name.trim().is_empty()))
    }

    /// Remember `name` for the next session
    pub fn remember(&self, name: &str) -> Result<(), StorageError> {
        if let Some(parent) = self.file_path.parent() {
            fs::create_dir_all(parent).map_err(|source| self.io(source))?;
        }
        let file = AnnotatorFile {
            saved_annotator_name: Some(name.to_string()),
        };
        let content = serde_json::to_string_pretty(&file).map_err(|source| StorageError::Json {
            path: self.file_path.clone(),
            source,
        })?;
        fs::write(&self.file_path, content).map_err(|source| self.io(source))?;
        tracing::debug!(path = %self.file_path.display(), "remembered annotator name");
        Ok(())
    }

    /// Drop any remembered name
    pub fn forget(&self) -> Result<(), StorageError> {
        match fs::remove_file(&self.file_path) {
            Ok(()) => {
                tracing::debug!(path = %self.file_path.display(), "cleared annotator name");
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(self.io(source)),
        }
    }

    fn io(&self, source: io::Error) -> StorageError {
        StorageError::Io {
            path: self.file_path.clone(),
            source,
        }
    }
}
