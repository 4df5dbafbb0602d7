//! Scratch directory holding an unpacked archive for the length of one
//! extraction call.

use std::fs::File;
use std::io::{Read, Seek};
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use zip::result::ZipError;
use zip::ZipArchive;

use crate::error::Result;

const WORKSPACE_PREFIX: &str = "pptx-";
const UNPACK_LIMIT_EXCEEDED: &str = "archive expands beyond the unpack limit";

/// A uniquely named directory under a configurable root.
///
/// The directory is removed when the workspace is closed or dropped, so every
/// exit path of the owning extraction (including `?` returns and panics)
/// cleans up after itself.
#[derive(Debug)]
pub struct TempWorkspace {
    dir: TempDir,
}

impl TempWorkspace {
    pub fn create(root: &Path) -> Result<Self> {
        std::fs::create_dir_all(root)?;
        let dir = tempfile::Builder::new()
            .prefix(WORKSPACE_PREFIX)
            .tempdir_in(root)?;

        tracing::debug!("Created workspace {}", dir.path().display());
        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn join(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.dir.path().join(relative)
    }

    /// Unpacks a zip archive into the workspace, writing at most `max_bytes`
    /// of file content.
    ///
    /// Only directories and regular files are materialised. Symlink entries
    /// and entries whose names escape the workspace are skipped.
    pub fn unpack<R: Read + Seek>(&self, reader: R, max_bytes: u64) -> Result<()> {
        let mut archive = ZipArchive::new(reader)?;
        let mut written = 0u64;

        for index in 0..archive.len() {
            let mut entry = archive.by_index(index)?;

            if entry.is_symlink() {
                tracing::warn!("Skipping symlink entry {}", entry.name());
                continue;
            }

            let Some(relative) = entry.enclosed_name() else {
                tracing::warn!("Skipping entry with unsafe path {}", entry.name());
                continue;
            };
            let target = self.join(relative);

            if entry.is_dir() {
                std::fs::create_dir_all(&target)?;
                continue;
            }

            if written.saturating_add(entry.size()) > max_bytes {
                return Err(ZipError::UnsupportedArchive(UNPACK_LIMIT_EXCEEDED).into());
            }

            if let Some(parent) = target.parent() {
                std::fs::create_dir_all(parent)?;
            }

            // The declared size is not trusted; the copy itself is bounded too.
            let remaining = max_bytes - written;
            let mut out = File::create(&target)?;
            let copied = std::io::copy(&mut (&mut entry).take(remaining + 1), &mut out)?;
            if copied > remaining {
                return Err(ZipError::UnsupportedArchive(UNPACK_LIMIT_EXCEEDED).into());
            }
            written += copied;
        }

        Ok(())
    }

    /// Removes the directory now, logging instead of failing if removal does
    /// not succeed.
    pub fn close(self) {
        let path = self.dir.path().to_path_buf();
        if let Err(e) = self.dir.close() {
            tracing::warn!("Failed to remove workspace {}: {}", path.display(), e);
        }
    }
}
