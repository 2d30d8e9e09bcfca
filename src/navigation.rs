//! Page navigation state machine.
//!
//! [`Navigator`] owns the [`NavigationState`] of one viewer: the current
//! page, the page-number input box, and the drag gesture in progress. Every
//! mutating operation returns an [`Outcome`] telling the caller whether a
//! page was navigated to, which is the signal to play the flip cue.
//!
//! Time never comes from a clock inside this module. Drag operations take
//! `now_ms` from the caller, which keeps every transition deterministic and
//! lets tests replay gestures exactly.
//!
//! ## Invariants
//!
//! - `current_page_index < page_count` whenever `page_count > 0`, else `0`.
//! - `flip_speed` stays within [`MIN_FLIP_SPEED`]..=[`MAX_FLIP_SPEED`].
//! - `drag_offset` is `0.0` whenever `is_dragging` is false.
//!
//! ## Drag Gestures
//!
//! Positions are on the drag axis (vertical for this viewer), so dragging
//! *up* produces a positive offset and turns to the next page:
//!
//! ```text
//! start_drag(100)  → origin = 100
//! drag_to(30)      → drag_offset = 100 - 30 = 70
//! end_drag()       → 70 > 60, advance one page
//! ```

/// Offset (in drag units) a gesture must exceed to commit a flip.
pub const FLIP_THRESHOLD: f64 = 60.0;
pub const MIN_FLIP_SPEED: f64 = 0.4;
pub const MAX_FLIP_SPEED: f64 = 1.0;
pub const INITIAL_FLIP_SPEED: f64 = 0.6;

/// Result of a navigation operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// A page was navigated to; the flip cue should play. `from` and `to`
    /// are equal when the page already shown is selected again.
    Flipped { from: usize, to: usize },
    Unchanged,
}

impl Outcome {
    pub fn flipped(&self) -> bool {
        matches!(self, Outcome::Flipped { .. })
    }
}

/// Observable navigation state, as consumed by [`crate::render`].
#[derive(Debug, Clone, PartialEq)]
pub struct NavigationState {
    pub current_page_index: usize,
    /// Raw text of the page-number box. Mirrors `current_page_index + 1`
    /// except while the user is typing an uncommitted value.
    pub page_input_value: String,
    pub drag_offset: f64,
    pub is_dragging: bool,
    /// Flip animation duration in seconds.
    pub flip_speed: f64,
}

impl Default for NavigationState {
    fn default() -> Self {
        Self {
            current_page_index: 0,
            page_input_value: "1".to_string(),
            drag_offset: 0.0,
            is_dragging: false,
            flip_speed: INITIAL_FLIP_SPEED,
        }
    }
}

/// Origin and last velocity sample of an active drag.
#[derive(Debug, Clone, Copy)]
struct DragTrack {
    origin: f64,
    last_sample_ms: u64,
}

#[derive(Debug, Clone)]
pub struct Navigator {
    page_count: usize,
    state: NavigationState,
    drag: Option<DragTrack>,
}

impl Navigator {
    /// A fresh navigator on page 0 of a book with `page_count` pages.
    pub fn new(page_count: usize) -> Self {
        Self {
            page_count,
            state: NavigationState::default(),
            drag: None,
        }
    }

    pub fn state(&self) -> &NavigationState {
        &self.state
    }

    pub fn page_count(&self) -> usize {
        self.page_count
    }

    pub fn current_page(&self) -> usize {
        self.state.current_page_index
    }

    pub fn is_first_page(&self) -> bool {
        self.state.current_page_index == 0
    }

    pub fn is_last_page(&self) -> bool {
        self.state.current_page_index + 1 >= self.page_count
    }

    // ---------------------------------------------------------------------
    // Direct navigation
    // ---------------------------------------------------------------------

    /// Go to `index` (0-based). Out-of-range indices leave the state
    /// untouched; selecting the page already shown still counts as a flip.
    pub fn go_to_page(&mut self, index: usize) -> Outcome {
        if index >= self.page_count {
            return Outcome::Unchanged;
        }
        let from = self.state.current_page_index;
        self.state.current_page_index = index;
        self.sync_input();
        log::debug!("flip {} -> {} of {}", from, index, self.page_count);
        Outcome::Flipped { from, to: index }
    }

    pub fn next_page(&mut self) -> Outcome {
        match self.state.current_page_index.checked_add(1) {
            Some(next) => self.go_to_page(next),
            None => Outcome::Unchanged,
        }
    }

    pub fn prev_page(&mut self) -> Outcome {
        match self.state.current_page_index.checked_sub(1) {
            Some(prev) => self.go_to_page(prev),
            None => Outcome::Unchanged,
        }
    }

    pub fn first_page(&mut self) -> Outcome {
        self.go_to_page(0)
    }

    pub fn last_page(&mut self) -> Outcome {
        match self.page_count.checked_sub(1) {
            Some(last) => self.go_to_page(last),
            None => Outcome::Unchanged,
        }
    }

    // ---------------------------------------------------------------------
    // Page-number input
    // ---------------------------------------------------------------------

    /// Record a keystroke-level edit of the page box. No validation happens
    /// until [`commit_page_input`](Self::commit_page_input).
    pub fn set_page_input(&mut self, text: impl Into<String>) {
        self.state.page_input_value = text.into();
    }

    /// Commit whatever is currently typed in the page box.
    pub fn commit_page_input(&mut self) -> Outcome {
        let text = self.state.page_input_value.clone();
        self.jump_to_input(&text)
    }

    /// Jump to the 1-based page number written in `text`.
    ///
    /// Unparseable text reverts the input box to the current page. Numbers
    /// outside `1..=page_count` are clamped to the nearest page.
    pub fn jump_to_input(&mut self, text: &str) -> Outcome {
        let Some(number) = parse_page_number(text) else {
            log::debug!("page input {text:?} is not a number, reverting");
            self.sync_input();
            return Outcome::Unchanged;
        };
        if self.page_count == 0 {
            self.sync_input();
            return Outcome::Unchanged;
        }
        let clamped = number.clamp(1, self.page_count as i64) as usize;
        let outcome = self.go_to_page(clamped - 1);
        // Clamped jumps still normalize what the box shows.
        self.sync_input();
        outcome
    }

    fn sync_input(&mut self) {
        self.state.page_input_value = (self.state.current_page_index + 1).to_string();
    }

    // ---------------------------------------------------------------------
    // Drag gestures
    // ---------------------------------------------------------------------

    /// Begin a gesture at `position`. Restarts any gesture already running.
    pub fn start_drag(&mut self, position: f64, now_ms: u64) {
        self.drag = Some(DragTrack {
            origin: position,
            last_sample_ms: now_ms,
        });
        self.state.is_dragging = true;
        self.state.drag_offset = 0.0;
    }

    /// Follow the pointer to `position`. Ignored when no gesture is active.
    pub fn drag_to(&mut self, position: f64, now_ms: u64) {
        let Some(track) = self.drag.as_mut() else {
            return;
        };
        let diff = track.origin - position;
        let elapsed = now_ms.saturating_sub(track.last_sample_ms) as f64;
        let velocity = diff.abs() / (elapsed + 1.0);
        track.last_sample_ms = now_ms;

        self.state.flip_speed = velocity.clamp(MIN_FLIP_SPEED, MAX_FLIP_SPEED);
        self.state.drag_offset = diff;
        log::trace!(
            "drag offset={diff:.1} velocity={velocity:.3} flip_speed={:.2}",
            self.state.flip_speed
        );
    }

    /// Release the gesture, flipping if the offset passed the threshold.
    pub fn end_drag(&mut self) -> Outcome {
        if self.drag.take().is_none() {
            return Outcome::Unchanged;
        }
        self.state.is_dragging = false;
        let offset = self.state.drag_offset;
        self.state.drag_offset = 0.0;

        if offset > FLIP_THRESHOLD && !self.is_last_page() {
            self.next_page()
        } else if offset < -FLIP_THRESHOLD && !self.is_first_page() {
            self.prev_page()
        } else {
            Outcome::Unchanged
        }
    }
}

/// Parse a page number the way a browser's `parseInt(text, 10)` does:
/// leading whitespace, an optional sign, then at least one decimal digit.
/// Anything after the digits is ignored. Values too large for `i64`
/// saturate, which the caller clamps anyway.
pub fn parse_page_number(text: &str) -> Option<i64> {
    let s = text.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return None;
    }
    let value = rest[..digits_len]
        .bytes()
        .fold(0i64, |acc, d| acc.saturating_mul(10).saturating_add((d - b'0') as i64));
    Some(if negative { -value } else { value })
}
