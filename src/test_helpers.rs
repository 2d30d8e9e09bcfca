//! Shared test utilities for the flipbook test suite.
//!
//! ```text
//! use crate::test_helpers::*;
//!
//! let tmp = book_dir_with(&["page2.jpg", "page1.jpg"]);
//! let manifest = scan(tmp.path()).unwrap();
//!
//! let mut viewer = viewer_with_pages(3);
//! viewer.handle(InputEvent::NextButton, 0);
//! assert_eq!(viewer.sound().plays, 1);
//! ```

use tempfile::TempDir;

use crate::types::Manifest;
use crate::viewer::{FlipSound, Viewer};

// =========================================================================
// Fixture setup
// =========================================================================

/// Create a temp book directory containing empty files with the given names.
pub fn book_dir_with(names: &[&str]) -> TempDir {
    let tmp = TempDir::new().unwrap();
    for name in names {
        std::fs::write(tmp.path().join(name), b"").unwrap();
    }
    tmp
}

/// A manifest of `count` pages named `page1.jpg ..= page{count}.jpg`.
pub fn manifest_with_pages(count: usize) -> Manifest {
    Manifest {
        pages: (1..=count).map(|i| format!("page{i}.jpg")).collect(),
    }
}

/// A viewer over [`manifest_with_pages`] with base URL `book/`.
pub fn viewer_with_pages(count: usize) -> Viewer<RecordingSound> {
    Viewer::from_manifest(&manifest_with_pages(count), "book/", RecordingSound::default())
}

// =========================================================================
// Sound double
// =========================================================================

/// Counts how often the flip cue was (re)started.
#[derive(Debug, Default)]
pub struct RecordingSound {
    pub plays: usize,
}

impl FlipSound for RecordingSound {
    fn restart(&mut self) {
        self.plays += 1;
    }
}
