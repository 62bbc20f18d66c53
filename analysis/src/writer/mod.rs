//! Artifact output: chart SVG files and the summary JSON.
//!
//! Output locations are given to [`ArtifactWriter`] at construction; nothing
//! else in the crate touches output paths. Each write is independent, so a
//! failure leaves earlier artifacts in place.

use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{WriteError, WriteResult};

/// Default chart directory, relative to the working directory.
pub const DEFAULT_IMAGE_DIR: &str = "out/images/analytics";

/// Default summary file, relative to the working directory.
pub const DEFAULT_SUMMARY_PATH: &str = "out/data/catalogue_insights.json";

/// Writes pipeline artifacts to fixed locations.
#[derive(Debug, Clone)]
pub struct ArtifactWriter {
    image_dir: PathBuf,
    summary_path: PathBuf,
}

impl ArtifactWriter {
    pub fn new(image_dir: impl Into<PathBuf>, summary_path: impl Into<PathBuf>) -> Self {
        Self {
            image_dir: image_dir.into(),
            summary_path: summary_path.into(),
        }
    }

    pub fn image_dir(&self) -> &Path {
        &self.image_dir
    }

    pub fn summary_path(&self) -> &Path {
        &self.summary_path
    }

    /// Write one chart as `<image_dir>/<file_name>`.
    pub fn write_chart(&self, file_name: &str, markup: &str) -> WriteResult<PathBuf> {
        let path = self.image_dir.join(file_name);
        write_file(&path, markup)?;
        Ok(path)
    }

    /// Write the summary as pretty-printed JSON.
    pub fn write_summary<T: Serialize>(&self, summary: &T) -> WriteResult<PathBuf> {
        let json = serde_json::to_string_pretty(summary)?;
        write_file(&self.summary_path, &json)?;
        Ok(self.summary_path.clone())
    }
}

impl Default for ArtifactWriter {
    fn default() -> Self {
        Self::new(DEFAULT_IMAGE_DIR, DEFAULT_SUMMARY_PATH)
    }
}

/// Write `content` to `path`, creating parent directories.
pub fn write_file(path: &Path, content: &str) -> WriteResult<()> {
    let io_err = |source: std::io::Error| WriteError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_err)?;
    }
    fs::write(path, content).map_err(io_err)
}
