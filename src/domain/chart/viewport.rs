use crate::domain::logging::LogComponent;
use crate::log_debug;
use std::ops::Range;

/// Smallest number of snapshots a window may show.
pub const MIN_WINDOW_LENGTH: usize = 3;

/// Visible sub-window of the snapshot series.
///
/// Holds `0 <= window_position <= len - window_length` whenever the series is
/// longer than the window. Out-of-range navigation is ignored, never clamped;
/// zoom requests are clamped.
#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    window_length: usize,
    window_position: usize,
    auto_scroll: bool,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(40)
    }
}

impl Viewport {
    pub fn new(window_length: usize) -> Self {
        Self {
            window_length: window_length.max(MIN_WINDOW_LENGTH),
            window_position: 0,
            auto_scroll: true,
        }
    }

    pub fn window_length(&self) -> usize {
        self.window_length
    }

    pub fn window_position(&self) -> usize {
        self.window_position
    }

    pub fn auto_scroll(&self) -> bool {
        self.auto_scroll
    }

    /// Largest valid position for a series of `len` snapshots.
    pub fn max_position(&self, len: usize) -> usize {
        len.saturating_sub(self.window_length)
    }

    /// Position the window re-anchors to when following the tail.
    pub fn tail_position(&self, len: usize) -> usize {
        len.saturating_sub(self.window_length + 1)
    }

    /// Half-open index range of the visible window, truncated to `len`.
    pub fn visible_range(&self, len: usize) -> Range<usize> {
        let start = self.window_position.min(len);
        let end = (self.window_position + self.window_length).min(len);
        start..end
    }

    /// Move the window to `position`. Returns `true` when the position changed;
    /// a repeat of the current position or anything outside
    /// `[0, len - window_length]` is a no-op.
    pub fn move_to(&mut self, position: i64, len: usize) -> bool {
        let Ok(target) = usize::try_from(position) else {
            log_debug!(
                LogComponent::Domain("Viewport"),
                "ignored move to negative position {}",
                position
            );
            return false;
        };
        if target == self.window_position || target > self.max_position(len) {
            log_debug!(
                LogComponent::Domain("Viewport"),
                "ignored move to {} (current {}, max {})",
                target,
                self.window_position,
                self.max_position(len)
            );
            return false;
        }
        self.window_position = target;
        self.refresh_auto_scroll(len);
        true
    }

    /// Re-anchor to the tail. Idempotent for an unchanged series.
    pub fn follow_tail(&mut self, len: usize) -> bool {
        let target = self.tail_position(len) as i64;
        self.move_to(target, len)
    }

    /// Start over for a replaced series: position 0, following the tail.
    pub fn reset(&mut self) {
        self.window_position = 0;
        self.auto_scroll = true;
    }

    /// Clamp `requested` to `[3, len - 1]` and keep the right edge anchored.
    /// Returns `true` when the length or position changed. Ignored when the
    /// series is too short to admit any length (`len < 4`).
    pub fn set_zoom_level(&mut self, requested: i64, len: usize) -> bool {
        if len <= MIN_WINDOW_LENGTH {
            log_debug!(
                LogComponent::Domain("Viewport"),
                "ignored zoom {} on a series of {}",
                requested,
                len
            );
            return false;
        }
        let upper = (len - 1) as i64;
        let new_length = requested.clamp(MIN_WINDOW_LENGTH as i64, upper) as usize;
        self.apply_length(new_length, len)
    }

    /// Wheel towards the user: one snapshot fewer, never below 3.
    pub fn zoom_in(&mut self, len: usize) -> bool {
        let target = self.window_length.saturating_sub(1).max(MIN_WINDOW_LENGTH);
        self.set_zoom_level(target as i64, len)
    }

    /// Wheel away from the user: one snapshot more, never beyond `len - 1`.
    pub fn zoom_out(&mut self, len: usize) -> bool {
        self.set_zoom_level(self.window_length as i64 + 1, len)
    }

    fn apply_length(&mut self, new_length: usize, len: usize) -> bool {
        let old_length = self.window_length;
        let shifted = self.window_position as i64 + old_length as i64 - new_length as i64;
        let max_position = len.saturating_sub(new_length) as i64;
        let new_position = shifted.clamp(0, max_position) as usize;

        if new_length == old_length && new_position == self.window_position {
            return false;
        }

        self.window_length = new_length;
        self.window_position = new_position;
        self.refresh_auto_scroll(len);
        log_debug!(
            LogComponent::Domain("Viewport"),
            "zoom {} -> {} at position {}",
            old_length,
            new_length,
            new_position
        );
        true
    }

    /// Landing on the last full window turns auto-scroll on; nothing turns it off.
    fn refresh_auto_scroll(&mut self, len: usize) {
        if self.window_position == self.max_position(len) {
            self.auto_scroll = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_and_out_of_range_moves_are_ignored() {
        let mut viewport = Viewport::new(40);
        assert!(!viewport.move_to(-1, 50));
        assert!(!viewport.move_to(11, 50));
        assert!(viewport.move_to(10, 50));
        assert!(!viewport.move_to(10, 50));
        assert_eq!(viewport.window_position(), 10);
    }

    #[test]
    fn auto_scroll_is_set_at_the_last_full_window_and_never_cleared() {
        let mut viewport = Viewport::new(40);
        viewport.auto_scroll = false;
        viewport.move_to(9, 50);
        assert!(!viewport.auto_scroll());
        viewport.move_to(10, 50);
        assert!(viewport.auto_scroll());
        viewport.move_to(2, 50);
        assert!(viewport.auto_scroll());
    }

    #[test]
    fn zoom_is_ignored_on_tiny_series() {
        let mut viewport = Viewport::new(40);
        assert!(!viewport.set_zoom_level(10, 3));
        assert_eq!(viewport.window_length(), 40);
    }

    #[test]
    fn wheel_steps_respect_bounds() {
        let mut viewport = Viewport::new(3);
        assert!(!viewport.zoom_in(50));
        assert_eq!(viewport.window_length(), 3);

        let mut viewport = Viewport::new(49);
        assert!(!viewport.zoom_out(50));
        assert_eq!(viewport.window_length(), 49);
    }

    #[test]
    fn visible_range_is_truncated() {
        let viewport = Viewport::new(40);
        assert_eq!(viewport.visible_range(10), 0..10);
    }
}
