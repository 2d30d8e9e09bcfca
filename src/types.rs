//! Shared types passed between the manifest builder, the viewer and the
//! HTML generator.
//!
//! The [`Manifest`] is the only thing persisted: it is written once by
//! [`crate::scan`] and read back by everything else.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// The ordered list of page image filenames for one book.
///
/// Serialized as `{ "pages": ["a.jpg", "b.png", ...] }`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    pub pages: Vec<String>,
}

impl Manifest {
    /// Read a manifest from a JSON file.
    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Write the manifest as pretty-printed JSON, replacing any existing file.
    pub fn write(&self, path: &Path) -> Result<(), ManifestError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Resolve every filename against `base_url` into page descriptors.
    ///
    /// `base_url` is used verbatim as a prefix, so it should end with `/`
    /// unless it is empty.
    pub fn page_descriptors(&self, base_url: &str) -> Vec<PageDescriptor> {
        self.pages
            .iter()
            .map(|name| PageDescriptor::new(format!("{base_url}{name}")))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

/// One page of a book as the viewer sees it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageDescriptor {
    image_url: String,
}

impl PageDescriptor {
    pub fn new(image_url: impl Into<String>) -> Self {
        Self {
            image_url: image_url.into(),
        }
    }

    pub fn image_url(&self) -> &str {
        &self.image_url
    }
}
