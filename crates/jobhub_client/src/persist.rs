use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("preview directory unusable: {0}")]
    PreviewDir(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Creates the preview directory and its parents unless it already exists.
pub fn ensure_preview_dir(dir: &Path) -> Result<(), PersistError> {
    if dir.is_dir() {
        return Ok(());
    }
    if dir.exists() {
        return Err(PersistError::PreviewDir(format!(
            "{} is not a directory",
            dir.display()
        )));
    }
    fs::create_dir_all(dir)
        .map_err(|err| PersistError::PreviewDir(format!("{}: {err}", dir.display())))
}

/// Writes snapshot documents into a single preview directory.
pub struct PreviewWriter {
    dir: PathBuf,
}

impl PreviewWriter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Stages the document beside its target and renames it into place, so a
    /// browser already showing an older preview of the job never reads a partial file.
    pub fn write(&self, filename: &str, html: &str) -> Result<PathBuf, PersistError> {
        ensure_preview_dir(&self.dir)?;
        let target = self.dir.join(filename);
        let mut staged = tempfile::Builder::new()
            .prefix(".preview-")
            .suffix(".tmp")
            .tempfile_in(&self.dir)?;
        staged.write_all(html.as_bytes())?;
        staged
            .persist(&target)
            .map_err(|err| PersistError::Io(err.error))?;
        Ok(target)
    }
}
