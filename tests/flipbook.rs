//! End-to-end checks through the public API: build a book directory, write
//! its manifest, load it into a viewer and drive it like a user would.

use flipbook::config::ViewerConfig;
use flipbook::generate;
use flipbook::navigation::{Navigator, Outcome};
use flipbook::scan;
use flipbook::types::Manifest;
use flipbook::viewer::{FlipSound, InputEvent, Key, Viewer};
use std::fs;
use tempfile::TempDir;

#[derive(Default)]
struct CountingSound(usize);

impl FlipSound for CountingSound {
    fn restart(&mut self) {
        self.0 += 1;
    }
}

fn book(names: &[&str]) -> TempDir {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path().join("book");
    fs::create_dir(&dir).unwrap();
    for name in names {
        fs::write(dir.join(name), b"").unwrap();
    }
    tmp
}

#[test]
fn manifest_orders_pages_naturally() {
    let site = book(&["b.png", "a.jpg", "page10.png", "page2.png", "notes.txt"]);
    let dir = site.path().join("book");
    let manifest = scan::build_manifest(&dir, &dir.join("book.json")).unwrap();

    assert_eq!(
        manifest.pages,
        vec!["a.jpg", "b.png", "page2.png", "page10.png"]
    );
    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(dir.join("book.json")).unwrap()).unwrap();
    assert_eq!(json["pages"][3], "page10.png");
}

#[test]
fn manifest_orders_punctuation_and_bare_names_first() {
    let site = book(&[
        "photo2.jpg",
        "photo.jpg",
        "photo1.jpg",
        "page-2.jpg",
        "page1.jpg",
    ]);
    let dir = site.path().join("book");
    let manifest = scan::build_manifest(&dir, &dir.join("book.json")).unwrap();

    assert_eq!(
        manifest.pages,
        vec![
            "page-2.jpg",
            "page1.jpg",
            "photo.jpg",
            "photo1.jpg",
            "photo2.jpg",
        ]
    );
}

#[test]
fn committing_the_shown_page_replays_the_cue() {
    let mut viewer = Viewer::from_manifest(
        &Manifest {
            pages: (1..=10).map(|i| format!("page{i}.jpg")).collect(),
        },
        "book/",
        CountingSound::default(),
    );
    viewer.handle(InputEvent::NextButton, 0);
    viewer.handle(InputEvent::InputChanged("2".into()), 10);
    assert!(viewer.handle(InputEvent::Key(Key::Enter), 20).flipped());
    assert_eq!(viewer.state().current_page_index, 1);
    assert_eq!(viewer.sound().0, 2);
}

#[test]
fn next_page_from_any_index() {
    let len = 10;
    for i in 0..len {
        let mut nav = Navigator::new(len);
        nav.go_to_page(i);
        nav.next_page();
        assert_eq!(nav.current_page(), (i + 1).min(len - 1));
    }
}

#[test]
fn boundaries_are_noops() {
    let mut nav = Navigator::new(4);
    assert_eq!(nav.prev_page(), Outcome::Unchanged);
    nav.go_to_page(3);
    assert_eq!(nav.next_page(), Outcome::Unchanged);
    assert_eq!(nav.current_page(), 3);
}

#[test]
fn page_number_entry() {
    let mut nav = Navigator::new(10);
    nav.jump_to_input("5");
    assert_eq!(nav.current_page(), 4);
    nav.jump_to_input("0");
    assert_eq!(nav.current_page(), 0);
    nav.go_to_page(6);
    nav.jump_to_input("abc");
    assert_eq!(nav.current_page(), 6);
}

#[test]
fn drag_gestures() {
    let mut nav = Navigator::new(5);
    nav.start_drag(100.0, 0);
    nav.drag_to(30.0, 20);
    nav.end_drag();
    assert_eq!(nav.current_page(), 1);

    nav.start_drag(100.0, 100);
    nav.drag_to(150.0, 120);
    nav.end_drag();
    assert_eq!(nav.current_page(), 1);
    assert_eq!(nav.state().drag_offset, 0.0);
}

#[test]
fn viewer_session_from_disk() {
    let site = book(&["page1.jpg", "page2.jpg", "page3.jpg"]);
    let dir = site.path().join("book");
    let manifest_path = dir.join("book.json");
    scan::build_manifest(&dir, &manifest_path).unwrap();

    let mut viewer = Viewer::load(&manifest_path, "book/", CountingSound::default());
    assert_eq!(viewer.page_count(), 3);

    viewer.handle(InputEvent::PointerDown { y: 200.0 }, 0);
    viewer.handle(InputEvent::PointerMove { y: 100.0 }, 30);
    assert!(viewer.frame()[0].rotation_deg > 0.0);
    viewer.handle(InputEvent::PointerUp, 40);

    viewer.handle(InputEvent::InputChanged("3".into()), 50);
    viewer.handle(InputEvent::Key(Key::Enter), 60);
    assert_eq!(viewer.current_page().unwrap().image_url(), "book/page3.jpg");
    assert_eq!(viewer.sound().0, 2);
}

#[test]
fn generate_static_book() {
    let site = book(&["page1.jpg", "page2.jpg"]);
    let dir = site.path().join("book");
    let manifest = scan::build_manifest(&dir, &dir.join("book.json")).unwrap();
    let out = site.path().join("dist");

    let summary = generate::generate(&manifest, &ViewerConfig::default(), &dir, &out).unwrap();
    assert_eq!(summary.pages_written, 2);
    assert!(out.join("book/page2.jpg").exists());

    let index = fs::read_to_string(out.join("index.html")).unwrap();
    assert!(index.contains("book/page1.jpg"));
    assert!(index.contains(r#"href="page-2.html""#));
}

#[test]
fn unreadable_manifest_gives_empty_viewer() {
    let site = TempDir::new().unwrap();
    let path = site.path().join("book.json");
    fs::write(&path, "not json").unwrap();
    let mut viewer = Viewer::load(&path, "book/", CountingSound::default());
    assert_eq!(viewer.page_count(), 0);
    assert_eq!(viewer.handle(InputEvent::NextButton, 0), Outcome::Unchanged);
    assert!(Manifest::load(&path).is_err());
}
