//! # Flipbook
//!
//! A page-turn image viewer. A directory of page images becomes a book:
//! filenames are listed into a JSON manifest, and a viewer flips through the
//! pages with drag gestures, buttons, the keyboard, or a typed page number.
//!
//! # Architecture
//!
//! ```text
//! public/book/*.jpg  ──scan──▶  book.json  ──▶  Viewer ──▶ frame (PageView per page)
//!                                                  │
//!                                             Navigator (state machine)
//! ```
//!
//! The viewer core is headless. [`navigation::Navigator`] holds all state and
//! takes time as an argument, [`render`] derives each page's transform from
//! that state as a pure function, and [`viewer::Viewer`] only translates
//! input events and triggers the flip cue. Any rendering surface can sit on
//! top; [`generate`] is the one shipped here, producing a static HTML book.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`scan`] | Lists a book directory into a [`types::Manifest`] |
//! | [`naming`] | Numeric-aware filename ordering (`page2` before `page10`) |
//! | [`navigation`] | Page, page-input and drag-gesture state machine |
//! | [`render`] | Pure derivation of rotation, visibility, z-order per page |
//! | [`viewer`] | Input binding, flip sound, manifest loading |
//! | [`generate`] | Static HTML flipbook rendered with Maud |
//! | [`simulate`] | Replays scripted input events against a viewer |
//! | [`config`] | `flipbook.toml` loading, merging and validation |
//! | [`types`] | Manifest and page descriptor types |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Explicit Time
//!
//! Drag velocity depends on the time between samples. Rather than reading a
//! clock, every drag operation takes `now_ms`, so a gesture replays
//! identically in tests and in [`simulate`].
//!
//! ## Outcomes Instead of Callbacks
//!
//! Navigation operations return an [`navigation::Outcome`]. The viewer plays
//! the flip cue when it sees `Flipped`; the state machine itself has no side
//! effects.
//!
//! ## Missing Assets Degrade
//!
//! An unreadable manifest gives an empty viewer and a missing sound file
//! gives silence. Only the offline manifest builder treats a missing
//! directory as fatal.

pub mod config;
pub mod generate;
pub mod naming;
pub mod navigation;
pub mod output;
pub mod render;
pub mod scan;
pub mod simulate;
pub mod types;
pub mod viewer;

#[cfg(test)]
pub(crate) mod test_helpers;
