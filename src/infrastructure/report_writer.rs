//! Output writer for rendered reports

use std::path::{Path, PathBuf};

use thiserror::Error;
use tokio::fs;
use tracing::info;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Failed to serialize report: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Failed to write {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Writes report files into one output directory, replacing existing files
#[derive(Debug, Clone)]
pub struct OutputWriter {
    directory: PathBuf,
}

impl OutputWriter {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Create the output directory and its parents
    pub async fn prepare(&self) -> Result<(), ReportError> {
        fs::create_dir_all(&self.directory)
            .await
            .map_err(|source| ReportError::Io {
                path: self.directory.clone(),
                source,
            })
    }

    /// Write `contents` to `file_name` inside the output directory
    pub async fn write(&self, file_name: &str, contents: &str) -> Result<PathBuf, ReportError> {
        let path = self.directory.join(file_name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|source| ReportError::Io {
                    path: parent.to_path_buf(),
                    source,
                })?;
        }

        fs::write(&path, contents)
            .await
            .map_err(|source| ReportError::Io {
                path: path.clone(),
                source,
            })?;

        info!("Wrote {} ({} bytes)", path.display(), contents.len());
        Ok(path)
    }
}
