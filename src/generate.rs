//! Static HTML flipbook generation.
//!
//! Renders the viewer once per page and writes a script-free site: every
//! page of the book becomes its own HTML file showing the viewer frame at
//! that page, and the previous/next controls are plain links.
//!
//! ## Output Structure
//!
//! ```text
//! dist/
//! ├── index.html          # Viewer on page 1
//! ├── page-1.html
//! ├── page-2.html
//! ├── ...
//! ├── flip.mp3            # Sound cue (copied when present)
//! └── book/               # Page images (copied from the book directory)
//!     ├── page1.jpg
//!     └── ...
//! ```
//!
//! The image directory inside `dist/` follows `book.base_url`. Absolute base
//! URLs (`https://…`, `/cdn/…`) are left alone and no images are copied.
//!
//! ## HTML Generation
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating.
//! Every interpolated value (image URLs included) is escaped.

use crate::config::ViewerConfig;
use crate::render::PageView;
use crate::types::Manifest;
use crate::viewer::{FlipSound, SilentSound, Viewer};
use maud::{DOCTYPE, Markup, html};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

const CSS: &str = include_str!("../static/viewer.css");

/// What [`generate`] wrote, for CLI reporting.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerateSummary {
    pub output_dir: PathBuf,
    /// Per-page HTML files, index.html excluded.
    pub pages_written: usize,
    pub images_copied: usize,
    pub sound_copied: bool,
}

/// Write the static flipbook for `manifest` into `output_dir`.
///
/// `book_dir` is where the page images live; its parent is treated as the
/// site root when looking for the sound cue.
pub fn generate(
    manifest: &Manifest,
    config: &ViewerConfig,
    book_dir: &Path,
    output_dir: &Path,
) -> Result<GenerateSummary, GenerateError> {
    fs::create_dir_all(output_dir)?;

    let mut viewer = Viewer::from_manifest(manifest, &config.book.base_url, SilentSound);
    let total = viewer.page_count();

    let index_html = render_viewer(&viewer, config, PageLinks::for_page(0, total));
    fs::write(output_dir.join("index.html"), index_html.into_string())?;

    for index in 0..total {
        viewer.go_to_page(index);
        let html = render_viewer(&viewer, config, PageLinks::for_page(index, total));
        fs::write(output_dir.join(page_filename(index)), html.into_string())?;
    }
    log::info!("generated {} page files in {}", total, output_dir.display());

    let images_copied = match local_image_dir(&config.book.base_url) {
        Some(rel) => copy_images(manifest, book_dir, &output_dir.join(rel))?,
        None => 0,
    };

    let sound_copied = config.sound.enabled && copy_sound(config, book_dir, output_dir)?;

    Ok(GenerateSummary {
        output_dir: output_dir.to_path_buf(),
        pages_written: total,
        images_copied,
        sound_copied,
    })
}

/// Filename of the static page showing page `index` (0-based).
pub fn page_filename(index: usize) -> String {
    format!("page-{}.html", index + 1)
}

/// Directory, relative to the output root, that `base_url` points into.
/// `None` for absolute URLs, which are not ours to populate.
fn local_image_dir(base_url: &str) -> Option<&str> {
    if base_url.contains("://") || base_url.starts_with('/') {
        return None;
    }
    Some(base_url.trim_end_matches('/'))
}

fn copy_images(manifest: &Manifest, book_dir: &Path, dest: &Path) -> std::io::Result<usize> {
    fs::create_dir_all(dest)?;
    let mut copied = 0;
    for name in &manifest.pages {
        let src = book_dir.join(name);
        if !src.is_file() {
            log::warn!("page image {} listed in manifest but missing", src.display());
            continue;
        }
        fs::copy(&src, dest.join(name))?;
        copied += 1;
    }
    Ok(copied)
}

fn copy_sound(config: &ViewerConfig, book_dir: &Path, output_dir: &Path) -> std::io::Result<bool> {
    let site_root = book_dir.parent().unwrap_or(Path::new("."));
    let src = site_root.join(&config.sound.path);
    if !src.is_file() {
        log::warn!("flip sound {} not found, skipping", src.display());
        return Ok(false);
    }
    let dest = output_dir.join(&config.sound.path);
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::copy(&src, &dest)?;
    Ok(true)
}

// ============================================================================
// HTML Components
// ============================================================================

/// Targets of the previous/next controls for one static page.
#[derive(Debug, Clone, PartialEq)]
pub struct PageLinks {
    pub prev: Option<String>,
    pub next: Option<String>,
}

impl PageLinks {
    pub fn for_page(index: usize, total: usize) -> Self {
        Self {
            prev: index.checked_sub(1).map(page_filename),
            next: (index + 1 < total).then(|| page_filename(index + 1)),
        }
    }
}

/// Renders the base HTML document structure
fn base_document(title: &str, config: &ViewerConfig, content: Markup) -> Markup {
    let book_size = format!(
        ":root {{ --book-width: {}px; --book-height: {}px; }}",
        config.layout.width, config.layout.height
    );
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                style { (book_size) "\n" (CSS) }
            }
            body {
                (content)
            }
        }
    }
}

/// Renders one stacked page with its derived transform and lighting.
fn render_page(view: &PageView, image_url: &str, easing: &str) -> Markup {
    let gloss = format!(
        "background: radial-gradient(circle at 50% 0%, rgba(255,255,255,{}) 0%, transparent 60%);",
        view.gloss_alpha
    );
    let shade = format!(
        "background: linear-gradient(to top, rgba(0,0,0,{}) 0%, transparent 60%);",
        view.shade_alpha
    );
    html! {
        div.page data-index=(view.index) style=(view.style(easing)) {
            div.page-face.page-front {
                img src=(image_url) alt="" draggable="false" loading=[(!view.visible).then_some("lazy")];
            }
            div.page-face.page-back {}
            div.page-hinge {}
            div.page-light style=(gloss) {}
            div.page-light style=(shade) {}
        }
    }
}

/// Renders the prev/next controls and the page number box.
fn render_controls(page_input: &str, total: usize, links: &PageLinks) -> Markup {
    html! {
        nav.controls {
            @if let Some(prev) = &links.prev {
                a.prev href=(prev) aria-label="Previous page" { "‹ Prev" }
            } @else {
                span.prev.disabled { "‹ Prev" }
            }
            label.page-number {
                "Page "
                input type="number" min="1" max=(total) value=(page_input) readonly;
                " / " (total)
            }
            @if let Some(next) = &links.next {
                a.next href=(next) aria-label="Next page" { "Next ›" }
            } @else {
                span.next.disabled { "Next ›" }
            }
        }
    }
}

/// Renders the viewer's current frame as a full HTML document.
pub fn render_viewer<S: FlipSound>(
    viewer: &Viewer<S>,
    config: &ViewerConfig,
    links: PageLinks,
) -> Markup {
    let frame = viewer.frame();
    let total = viewer.page_count();
    let title = if total == 0 {
        "Flipbook".to_string()
    } else {
        format!("Flipbook - page {} of {}", viewer.state().current_page_index + 1, total)
    };
    let sound_volume = config.sound.volume.to_string();

    let content = html! {
        main.flipbook {
            div.book {
                @for (view, page) in frame.iter().zip(viewer.pages()) {
                    (render_page(view, page.image_url(), &config.layout.easing))
                }
            }
            (render_controls(viewer.page_input_display(), total, &links))
            @if config.sound.enabled {
                audio id="flip-sound" src=(config.sound.path) preload="auto" data-volume=(sound_volume) {}
            }
        }
    };

    base_document(&title, config, content)
}

// ============================================================================
// Tests
// ============================================================================
