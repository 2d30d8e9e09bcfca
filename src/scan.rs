//! Book directory scanning and manifest generation.
//!
//! Lists the page images of a book directory into a [`Manifest`]. This is a
//! one-shot offline step: run it after adding or renaming pages, then deploy
//! the directory together with the generated `book.json`.
//!
//! ## Directory Structure
//!
//! ```text
//! public/book/                 # Book directory
//! ├── book.json                # Generated manifest (overwritten on every run)
//! ├── cover.jpg
//! ├── page1.jpg
//! ├── page2.png
//! ├── page10.webp              # Sorts after page2, not after page1
//! ├── notes.txt                # Not an image, ignored
//! ├── .DS_Store                # Hidden, ignored
//! └── extras/                  # Subdirectories are ignored
//! ```
//!
//! ## Rules
//!
//! - Only regular files with a `jpg`, `jpeg`, `png` or `webp` extension are
//!   pages. Extensions match case-insensitively (`PAGE1.JPG` is a page).
//! - Pages are ordered with [`natural_cmp`](crate::naming::natural_cmp).
//! - A missing or unreadable directory is an error; there is no partial
//!   manifest.

use crate::naming;
use crate::types::{Manifest, ManifestError};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("cannot read book directory {0}: {1}")]
    ReadDir(PathBuf, #[source] std::io::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("manifest error: {0}")]
    Manifest(#[from] ManifestError),
}

pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp"];

/// Scan a book directory into a manifest without writing anything.
pub fn scan(dir: &Path) -> Result<Manifest, ScanError> {
    let entries = fs::read_dir(dir).map_err(|e| ScanError::ReadDir(dir.to_path_buf(), e))?;

    let mut pages = Vec::new();
    for entry in entries {
        let path = entry?.path();
        let Some(name) = path.file_name().map(|n| n.to_string_lossy().to_string()) else {
            continue;
        };
        if name.starts_with('.') {
            continue;
        }
        if !is_image(&path) {
            log::debug!("skipping non-image entry {}", path.display());
            continue;
        }
        pages.push(name);
    }

    naming::sort_natural(&mut pages);
    log::debug!("scanned {} pages in {}", pages.len(), dir.display());
    Ok(Manifest { pages })
}

/// Scan `dir` and write the manifest to `output`, replacing any existing file.
pub fn build_manifest(dir: &Path, output: &Path) -> Result<Manifest, ScanError> {
    let manifest = scan(dir)?;
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    manifest.write(output)?;
    log::info!("wrote {} ({} pages)", output.display(), manifest.len());
    Ok(manifest)
}

/// Whether `path` is a regular file with a page image extension.
pub fn is_image(path: &Path) -> bool {
    if !path.is_file() {
        return false;
    }
    has_image_extension(path)
}

fn has_image_extension(path: &Path) -> bool {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    IMAGE_EXTENSIONS.contains(&ext.as_str())
}
