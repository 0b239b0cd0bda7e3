//! Artifact output
//!
//! Each artifact is written in two passes: the raw rendering goes to disk
//! first, is read back, finished (post-processed for source files) and
//! written again. A file whose write fails part-way is removed.

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::generator::Artifact;
use crate::error::Result;

/// Writes artifacts below one output folder
#[derive(Debug, Clone)]
pub struct ArtifactWriter {
    output_folder: PathBuf,
    dry_run: bool,
}

impl ArtifactWriter {
    pub fn new(output_folder: impl Into<PathBuf>, dry_run: bool) -> Self {
        Self {
            output_folder: output_folder.into(),
            dry_run,
        }
    }

    pub fn output_folder(&self) -> &Path {
        &self.output_folder
    }

    /// Write one artifact and return its path.
    ///
    /// In dry-run mode nothing touches the filesystem; the final content is
    /// logged and the would-be path returned.
    pub fn write(&self, artifact: &Artifact) -> Result<PathBuf> {
        let path = self.output_folder.join(&artifact.file_name);

        if self.dry_run {
            let content = artifact.content();
            info!("[dry run] would write {} ({} bytes)", path.display(), content.len());
            debug!("{}", content);
            return Ok(path);
        }

        fs::create_dir_all(&self.output_folder)?;
        let guard = RemoveOnDrop::new(&path);

        let mut file = File::create(&path)?;
        file.write_all(artifact.raw.as_bytes())?;
        file.flush()?;
        drop(file);

        let mut written = String::new();
        File::open(&path)?.read_to_string(&mut written)?;
        let content = artifact.finish(&written);

        let mut file = File::create(&path)?;
        file.write_all(content.as_bytes())?;
        file.flush()?;

        guard.disarm();
        debug!("Wrote {}", path.display());
        Ok(path)
    }
}

/// Removes a partially written file unless disarmed
struct RemoveOnDrop<'a> {
    path: &'a Path,
    armed: bool,
}

impl<'a> RemoveOnDrop<'a> {
    fn new(path: &'a Path) -> Self {
        Self { path, armed: true }
    }

    fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for RemoveOnDrop<'_> {
    fn drop(&mut self) {
        if self.armed {
            debug!("Removing incomplete {}", self.path.display());
            let _ = fs::remove_file(self.path);
        }
    }
}
