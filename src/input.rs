use glam::Vec2;
use instant::Instant;
use std::time::Duration;

/// Last known pointer position in normalized device coordinates plus the
/// time of the last movement. One per instance; never shared statically.
#[derive(Clone, Copy, Debug)]
pub struct PointerState {
    pub ndc: Vec2,
    last_move: Instant,
}

impl PointerState {
    pub fn new() -> Self {
        Self {
            ndc: Vec2::ZERO,
            last_move: Instant::now(),
        }
    }

    /// Record a pointer movement. Every event updates the timestamp; no
    /// debouncing.
    pub fn note_move(&mut self, ndc: Vec2) {
        self.ndc = ndc;
        self.last_move = Instant::now();
    }

    pub fn idle_longer_than(&self, ms: u64) -> bool {
        self.last_move.elapsed() > Duration::from_millis(ms)
    }
}

impl Default for PointerState {
    fn default() -> Self {
        Self::new()
    }
}

/// Map container-relative CSS pixel coordinates to NDC: x left-to-right
/// maps to -1..1, y top-to-bottom maps to 1..-1 (right-handed screen to
/// world convention). A zero-sized rect yields the center rather than NaN.
#[inline]
pub fn pointer_ndc(x_css: f32, y_css: f32, rect_w: f32, rect_h: f32) -> Vec2 {
    if rect_w > 0.0 && rect_h > 0.0 {
        Vec2::new((x_css / rect_w) * 2.0 - 1.0, -((y_css / rect_h) * 2.0 - 1.0))
    } else {
        Vec2::ZERO
    }
}
