//! CLI output formatting for every command.
//!
//! # Information-First Display
//!
//! Pages are shown by positional index and filename, with paths as
//! secondary context on indented lines.
//!
//! # Output Format
//!
//! ## Manifest
//!
//! ```text
//! Pages
//!     001 cover.jpg
//!     002 page1.jpg
//!     003 page2.jpg
//!
//! book.json generated with 3 pages
//!     Path: public/book/book.json
//! ```
//!
//! ## Generate
//!
//! ```text
//! Viewer → index.html
//!     001 cover.jpg → page-1.html
//!     002 page1.jpg → page-2.html
//!
//! Generated 2 pages, copied 2 images, sound copied
//! ```
//!
//! ## Simulate
//!
//! ```text
//! 1: down 100 0            page 1/5  input 1  dragging
//! 3: up                    page 2/5  input 2  flip 1 → 2
//! 4: bogus                 skipped: unknown command 'bogus'
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout.

use crate::generate::{GenerateSummary, page_filename};
use crate::navigation::Outcome;
use crate::simulate::Step;
use crate::types::Manifest;
use std::path::Path;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

fn plural(n: usize, word: &str) -> String {
    if n == 1 {
        format!("{n} {word}")
    } else {
        format!("{n} {word}s")
    }
}

/// Indented page listing shared by manifest and check output.
fn page_lines(manifest: &Manifest) -> Vec<String> {
    let mut lines = vec!["Pages".to_string()];
    if manifest.is_empty() {
        lines.push("    (none)".to_string());
    }
    for (i, name) in manifest.pages.iter().enumerate() {
        lines.push(format!("    {} {}", format_index(i + 1), name));
    }
    lines
}

// ============================================================================
// Manifest
// ============================================================================

/// Format the result of writing a manifest.
pub fn format_manifest_output(manifest: &Manifest, output: &Path) -> Vec<String> {
    let mut lines = page_lines(manifest);
    let file_name = output
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| output.display().to_string());
    lines.push(String::new());
    lines.push(format!(
        "{} generated with {}",
        file_name,
        plural(manifest.len(), "page")
    ));
    lines.push(format!("    Path: {}", output.display()));
    lines
}

pub fn print_manifest_output(manifest: &Manifest, output: &Path) {
    for line in format_manifest_output(manifest, output) {
        println!("{}", line);
    }
}

// ============================================================================
// Check
// ============================================================================

/// Format a dry-run scan, flagging drift against the manifest on disk.
pub fn format_check_output(scanned: &Manifest, on_disk: Option<&Manifest>) -> Vec<String> {
    let mut lines = page_lines(scanned);
    lines.push(String::new());
    match on_disk {
        None => lines.push("Manifest: missing (run `flipbook manifest`)".to_string()),
        Some(existing) if existing == scanned => lines.push("Manifest: up to date".to_string()),
        Some(existing) => {
            lines.push("Manifest: stale (run `flipbook manifest`)".to_string());
            for name in scanned.pages.iter().filter(|p| !existing.pages.contains(p)) {
                lines.push(format!("    + {}", name));
            }
            for name in existing.pages.iter().filter(|p| !scanned.pages.contains(p)) {
                lines.push(format!("    - {}", name));
            }
        }
    }
    lines
}

pub fn print_check_output(scanned: &Manifest, on_disk: Option<&Manifest>) {
    for line in format_check_output(scanned, on_disk) {
        println!("{}", line);
    }
}

// ============================================================================
// Generate
// ============================================================================

/// Format generate output showing the HTML file written for each page.
pub fn format_generate_output(manifest: &Manifest, summary: &GenerateSummary) -> Vec<String> {
    let mut lines = vec!["Viewer \u{2192} index.html".to_string()];
    for (i, name) in manifest.pages.iter().enumerate() {
        lines.push(format!(
            "    {} {} \u{2192} {}",
            format_index(i + 1),
            name,
            page_filename(i)
        ));
    }
    lines.push(String::new());
    lines.push(format!(
        "Generated {}, copied {}, {}",
        plural(summary.pages_written, "page"),
        plural(summary.images_copied, "image"),
        if summary.sound_copied {
            "sound copied"
        } else {
            "no sound"
        }
    ));
    lines
}

pub fn print_generate_output(manifest: &Manifest, summary: &GenerateSummary) {
    for line in format_generate_output(manifest, summary) {
        println!("{}", line);
    }
    println!("==> Site written to {}", summary.output_dir.display());
}

// ============================================================================
// Simulate
// ============================================================================

/// Format one replayed step as a single line.
pub fn format_step(step: &Step, page_count: usize) -> String {
    match step {
        Step::Applied {
            line,
            command,
            outcome,
            page,
            page_input,
            dragging,
        } => {
            let prefix = format!("{:<24}", format!("{}: {}", line, command));
            let page = match page {
                Some(p) => format!("page {}/{}", p, page_count),
                None => "no pages".to_string(),
            };
            let mut out = format!("{}  {}  input {}", prefix, page, page_input);
            if *dragging {
                out.push_str("  dragging");
            }
            if let Outcome::Flipped { from, to } = outcome {
                out.push_str(&format!("  flip {} \u{2192} {}", from + 1, to + 1));
            }
            out
        }
        Step::Skipped { line, error } => {
            format!("{:<24}  skipped: {}", format!("{}:", line), error)
        }
    }
}

pub fn print_steps(steps: &[Step], page_count: usize) {
    for step in steps {
        println!("{}", format_step(step, page_count));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulate::ParseError;
    use std::path::PathBuf;

    fn manifest(pages: &[&str]) -> Manifest {
        Manifest {
            pages: pages.iter().map(|p| p.to_string()).collect(),
        }
    }

    #[test]
    fn format_index_padding() {
        assert_eq!(format_index(1), "001");
        assert_eq!(format_index(42), "042");
        assert_eq!(format_index(1000), "1000");
    }

    #[test]
    fn plural_forms() {
        assert_eq!(plural(1, "page"), "1 page");
        assert_eq!(plural(0, "page"), "0 pages");
        assert_eq!(plural(3, "image"), "3 images");
    }

    #[test]
    fn manifest_output_lists_pages_and_count() {
        let lines = format_manifest_output(
            &manifest(&["a.jpg", "b.png"]),
            Path::new("public/book/book.json"),
        );
        assert_eq!(lines[0], "Pages");
        assert_eq!(lines[1], "    001 a.jpg");
        assert_eq!(lines[2], "    002 b.png");
        assert!(lines.contains(&"book.json generated with 2 pages".to_string()));
        assert!(lines.contains(&"    Path: public/book/book.json".to_string()));
    }

    #[test]
    fn manifest_output_empty_book() {
        let lines = format_manifest_output(&Manifest::default(), Path::new("book.json"));
        assert_eq!(lines[1], "    (none)");
        assert!(lines.contains(&"book.json generated with 0 pages".to_string()));
    }

    #[test]
    fn check_output_missing_manifest() {
        let lines = format_check_output(&manifest(&["a.jpg"]), None);
        assert!(lines.last().unwrap().starts_with("Manifest: missing"));
    }

    #[test]
    fn check_output_up_to_date() {
        let m = manifest(&["a.jpg"]);
        let lines = format_check_output(&m, Some(&m));
        assert_eq!(lines.last().unwrap(), "Manifest: up to date");
    }

    #[test]
    fn check_output_lists_drift() {
        let scanned = manifest(&["a.jpg", "new.jpg"]);
        let existing = manifest(&["a.jpg", "old.jpg"]);
        let lines = format_check_output(&scanned, Some(&existing));
        assert!(lines.iter().any(|l| l.starts_with("Manifest: stale")));
        assert!(lines.contains(&"    + new.jpg".to_string()));
        assert!(lines.contains(&"    - old.jpg".to_string()));
    }

    #[test]
    fn check_output_order_change_is_stale() {
        let scanned = manifest(&["a.jpg", "b.jpg"]);
        let existing = manifest(&["b.jpg", "a.jpg"]);
        let lines = format_check_output(&scanned, Some(&existing));
        assert!(lines.iter().any(|l| l.starts_with("Manifest: stale")));
    }

    #[test]
    fn generate_output_maps_pages_to_files() {
        let summary = GenerateSummary {
            output_dir: PathBuf::from("dist"),
            pages_written: 2,
            images_copied: 1,
            sound_copied: false,
        };
        let lines = format_generate_output(&manifest(&["a.jpg", "b.jpg"]), &summary);
        assert_eq!(lines[0], "Viewer \u{2192} index.html");
        assert_eq!(lines[1], "    001 a.jpg \u{2192} page-1.html");
        assert_eq!(lines[2], "    002 b.jpg \u{2192} page-2.html");
        assert_eq!(
            lines.last().unwrap(),
            "Generated 2 pages, copied 1 image, no sound"
        );
    }

    #[test]
    fn step_with_flip() {
        let step = Step::Applied {
            line: 3,
            command: "up".into(),
            outcome: Outcome::Flipped { from: 0, to: 1 },
            page: Some(2),
            page_input: "2".into(),
            dragging: false,
        };
        let line = format_step(&step, 5);
        assert!(line.starts_with("3: up"));
        assert!(line.contains("page 2/5"));
        assert!(line.contains("input 2"));
        assert!(line.ends_with("flip 1 \u{2192} 2"));
    }

    #[test]
    fn step_while_dragging() {
        let step = Step::Applied {
            line: 1,
            command: "down 100 0".into(),
            outcome: Outcome::Unchanged,
            page: Some(1),
            page_input: "1".into(),
            dragging: true,
        };
        assert!(format_step(&step, 5).ends_with("dragging"));
    }

    #[test]
    fn step_on_empty_book() {
        let step = Step::Applied {
            line: 1,
            command: "next".into(),
            outcome: Outcome::Unchanged,
            page: None,
            page_input: "1".into(),
            dragging: false,
        };
        assert!(format_step(&step, 0).contains("no pages"));
    }

    #[test]
    fn skipped_step() {
        let step = Step::Skipped {
            line: 4,
            error: ParseError::UnknownCommand("bogus".into()),
        };
        let line = format_step(&step, 5);
        assert!(line.starts_with("4:"));
        assert!(line.ends_with("skipped: unknown command 'bogus'"));
    }
}
