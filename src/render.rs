//! Per-page visual derivation.
//!
//! Turns a [`NavigationState`] into one [`PageView`] per page. Nothing here
//! is stored: the viewer re-derives the whole frame after every event, and
//! the HTML generator derives it once per static page.
//!
//! Pages are stacked like a pad hinged at the top edge. Pages before the
//! current one are flipped over (180°), the current page follows the finger
//! while a drag is running, and later pages lie flat underneath:
//!
//! ```text
//! index:      0      1      2      3      4      5
//! current=2:  below  below  CUR    above  above  above
//! visible:    no     yes    yes    yes    no     no
//! rotation:   180    180    0..180 0      0      0
//! ```
//!
//! Only the current page and its two neighbours are visible; everything else
//! is transparent and ignores pointer events.

use crate::navigation::NavigationState;

/// Degrees of rotation per unit of drag offset.
pub const ROTATION_PER_UNIT: f64 = 0.8;
pub const FLIPPED_ROTATION: f64 = 180.0;
/// Duration of the opacity fade that follows a flip, in seconds.
pub const FADE_SECS: f64 = 0.2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Below,
    Current,
    Above,
}

/// How a page animates towards its derived rotation and opacity.
#[derive(Debug, Clone, PartialEq)]
pub enum Transition {
    /// Follow the pointer immediately (active drag).
    Immediate,
    Animated {
        duration_secs: f64,
        /// Opacity fades after the flip finishes.
        fade_delay_secs: f64,
    },
}

/// Renderable description of one page.
#[derive(Debug, Clone, PartialEq)]
pub struct PageView {
    pub index: usize,
    pub placement: Placement,
    pub rotation_deg: f64,
    pub visible: bool,
    pub z_index: usize,
    pub opacity: f64,
    pub transition: Transition,
    /// Alpha of the highlight near the hinge while turning.
    pub gloss_alpha: f64,
    /// Alpha of the shadow on the far edge while turning.
    pub shade_alpha: f64,
}

impl PageView {
    pub fn interactive(&self) -> bool {
        self.visible
    }

    /// Inline CSS declarations for this page's container element.
    pub fn style(&self, easing: &str) -> String {
        let transition = match &self.transition {
            Transition::Immediate => "none".to_string(),
            Transition::Animated {
                duration_secs,
                fade_delay_secs,
            } => format!(
                "transform {duration_secs}s {easing}, opacity {FADE_SECS}s ease {fade_delay_secs}s"
            ),
        };
        format!(
            "transform: rotateX({}deg); transform-style: preserve-3d; z-index: {}; opacity: {}; transition: {}; pointer-events: {};",
            self.rotation_deg,
            self.z_index,
            self.opacity,
            transition,
            if self.interactive() { "auto" } else { "none" },
        )
    }
}

/// Derive the view of page `index` in a book of `page_count` pages.
pub fn page_view(state: &NavigationState, index: usize, page_count: usize) -> PageView {
    let current = state.current_page_index;
    let placement = match index.cmp(&current) {
        std::cmp::Ordering::Less => Placement::Below,
        std::cmp::Ordering::Equal => Placement::Current,
        std::cmp::Ordering::Greater => Placement::Above,
    };

    let rotation_deg = match placement {
        Placement::Below => FLIPPED_ROTATION,
        Placement::Current if state.is_dragging => {
            (state.drag_offset * ROTATION_PER_UNIT).clamp(0.0, FLIPPED_ROTATION)
        }
        _ => 0.0,
    };

    let visible = index.abs_diff(current) <= 1;

    let transition = if state.is_dragging {
        Transition::Immediate
    } else {
        Transition::Animated {
            duration_secs: state.flip_speed,
            fade_delay_secs: state.flip_speed,
        }
    };

    PageView {
        index,
        placement,
        rotation_deg,
        visible,
        z_index: if visible { page_count - index } else { 0 },
        opacity: if visible { 1.0 } else { 0.0 },
        transition,
        gloss_alpha: rotation_deg.abs() / 500.0,
        shade_alpha: rotation_deg.abs() / 250.0,
    }
}

/// Derive the full frame: one view per page, in page order.
pub fn frame(state: &NavigationState, page_count: usize) -> Vec<PageView> {
    (0..page_count)
        .map(|i| page_view(state, i, page_count))
        .collect()
}
