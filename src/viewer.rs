//! Viewer shell: binds input events to the navigation state machine.
//!
//! A [`Viewer`] owns everything one rendered book needs: the page list, one
//! [`Navigator`], and the flip-sound handle. All three are acquired when the
//! viewer is built and dropped with it, so two viewers never share state.
//!
//! Input arrives as [`InputEvent`]s from whatever surface hosts the viewer
//! (a browser binding, a terminal, a replayed script). [`Viewer::handle`]
//! translates each one into a navigation operation and plays the cue whenever
//! a page was navigated to. After any event, [`Viewer::frame`] gives the
//! up-to-date visual description.

use crate::navigation::{NavigationState, Navigator, Outcome};
use crate::render::{self, PageView};
use crate::types::{Manifest, PageDescriptor};
use std::path::{Path, PathBuf};

/// A page-flip audio cue.
pub trait FlipSound {
    /// Rewind to the start and play. Called once per committed flip, so a
    /// flip arriving mid-cue restarts it.
    fn restart(&mut self);
}

/// No cue at all.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentSound;

impl FlipSound for SilentSound {
    fn restart(&mut self) {}
}

/// A cue that failed to load degrades to silence.
impl<S: FlipSound> FlipSound for Option<S> {
    fn restart(&mut self) {
        if let Some(sound) = self {
            sound.restart();
        }
    }
}

/// Handle to a sound asset on disk.
///
/// Decoding and output are left to the host, which rewinds and plays the
/// asset on every [`FlipSound::restart`]; this tracks how often that happened.
#[derive(Debug, Clone)]
pub struct SoundCue {
    path: PathBuf,
    volume: f64,
    plays: usize,
}

impl SoundCue {
    /// Open the cue at `path`. Returns `None` (and logs) when the asset is
    /// missing, so callers can store the result directly as an
    /// `Option<SoundCue>` sound.
    pub fn load(path: &Path, volume: f64) -> Option<Self> {
        if !path.is_file() {
            log::warn!("flip sound {} not found, flips will be silent", path.display());
            return None;
        }
        Some(Self {
            path: path.to_path_buf(),
            volume: volume.clamp(0.0, 1.0),
            plays: 0,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn volume(&self) -> f64 {
        self.volume
    }

    pub fn plays(&self) -> usize {
        self.plays
    }
}

impl FlipSound for SoundCue {
    fn restart(&mut self) {
        self.plays += 1;
        log::debug!("play {} (volume {})", self.path.display(), self.volume);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    PageUp,
    PageDown,
    Home,
    End,
}

impl Key {
    /// Parse a DOM-style key name (`"ArrowLeft"`, `"Enter"`, ...).
    pub fn from_name(name: &str) -> Option<Self> {
        let key = match name {
            "Enter" => Key::Enter,
            "ArrowUp" => Key::ArrowUp,
            "ArrowDown" => Key::ArrowDown,
            "ArrowLeft" => Key::ArrowLeft,
            "ArrowRight" => Key::ArrowRight,
            "PageUp" => Key::PageUp,
            "PageDown" => Key::PageDown,
            "Home" => Key::Home,
            "End" => Key::End,
            _ => return None,
        };
        Some(key)
    }
}

/// Everything the viewer reacts to. Positions are on the drag axis.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    PointerDown { y: f64 },
    PointerMove { y: f64 },
    PointerUp,
    /// The pointer left the book while pressed; treated as a release.
    PointerLeave,
    TouchStart { y: f64 },
    TouchMove { y: f64 },
    TouchEnd,
    NextButton,
    PrevButton,
    Key(Key),
    /// The page box text changed (one keystroke, paste, ...).
    InputChanged(String),
}

pub struct Viewer<S: FlipSound = SilentSound> {
    pages: Vec<PageDescriptor>,
    nav: Navigator,
    sound: S,
}

impl<S: FlipSound> Viewer<S> {
    pub fn new(pages: Vec<PageDescriptor>, sound: S) -> Self {
        let nav = Navigator::new(pages.len());
        Self { pages, nav, sound }
    }

    pub fn from_manifest(manifest: &Manifest, base_url: &str, sound: S) -> Self {
        Self::new(manifest.page_descriptors(base_url), sound)
    }

    /// A viewer with nothing to show, used when the manifest is unavailable.
    pub fn empty(sound: S) -> Self {
        Self::new(Vec::new(), sound)
    }

    /// Load the manifest at `path`. A missing or malformed manifest yields an
    /// empty viewer instead of an error.
    pub fn load(path: &Path, base_url: &str, sound: S) -> Self {
        match Manifest::load(path) {
            Ok(manifest) => Self::from_manifest(&manifest, base_url, sound),
            Err(e) => {
                log::warn!("could not load manifest {}: {e}", path.display());
                Self::empty(sound)
            }
        }
    }

    pub fn pages(&self) -> &[PageDescriptor] {
        &self.pages
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn state(&self) -> &NavigationState {
        self.nav.state()
    }

    pub fn navigator(&self) -> &Navigator {
        &self.nav
    }

    pub fn sound(&self) -> &S {
        &self.sound
    }

    pub fn current_page(&self) -> Option<&PageDescriptor> {
        self.pages.get(self.nav.current_page())
    }

    /// Text shown in the page box.
    pub fn page_input_display(&self) -> &str {
        &self.nav.state().page_input_value
    }

    /// Apply one input event. `now_ms` timestamps drag samples.
    pub fn handle(&mut self, event: InputEvent, now_ms: u64) -> Outcome {
        let outcome = match event {
            InputEvent::PointerDown { y } | InputEvent::TouchStart { y } => {
                self.nav.start_drag(y, now_ms);
                Outcome::Unchanged
            }
            InputEvent::PointerMove { y } | InputEvent::TouchMove { y } => {
                self.nav.drag_to(y, now_ms);
                Outcome::Unchanged
            }
            InputEvent::PointerUp | InputEvent::PointerLeave | InputEvent::TouchEnd => {
                self.nav.end_drag()
            }
            InputEvent::NextButton => self.nav.next_page(),
            InputEvent::PrevButton => self.nav.prev_page(),
            InputEvent::Key(key) => self.handle_key(key),
            InputEvent::InputChanged(text) => {
                self.nav.set_page_input(text);
                Outcome::Unchanged
            }
        };
        if outcome.flipped() {
            self.sound.restart();
        }
        outcome
    }

    /// Jump straight to page `index` (0-based), playing the cue on a flip.
    pub fn go_to_page(&mut self, index: usize) -> Outcome {
        let outcome = self.nav.go_to_page(index);
        if outcome.flipped() {
            self.sound.restart();
        }
        outcome
    }

    fn handle_key(&mut self, key: Key) -> Outcome {
        match key {
            Key::Enter => self.nav.commit_page_input(),
            Key::ArrowDown | Key::ArrowRight | Key::PageDown => self.nav.next_page(),
            Key::ArrowUp | Key::ArrowLeft | Key::PageUp => self.nav.prev_page(),
            Key::Home => self.nav.first_page(),
            Key::End => self.nav.last_page(),
        }
    }

    /// Derived visual state of every page.
    pub fn frame(&self) -> Vec<PageView> {
        render::frame(self.nav.state(), self.pages.len())
    }
}
