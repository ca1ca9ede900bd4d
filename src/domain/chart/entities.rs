use super::animation::AnimationEngine;
use super::interaction::{InteractionController, ViewportCommand};
use super::options::{ChartLayout, ChartOptions};
use super::scales::{ScaleEngine, Scales};
use super::value_objects::Dimensions;
use super::viewport::{MIN_WINDOW_LENGTH, Viewport};
use crate::domain::logging::LogComponent;
use crate::domain::market_data::{Snapshot, SnapshotSeries};
use crate::{log_debug, log_warn};

/// Owned state of one heatmap chart. Every operation here is pure state
/// mutation; drawing happens elsewhere against a borrowed surface.
#[derive(Debug, Clone)]
pub struct ChartState {
    pub options: ChartOptions,
    pub dimensions: Dimensions,
    pub series: SnapshotSeries,
    pub viewport: Viewport,
    pub scales: ScaleEngine,
    pub animation: AnimationEngine,
    pub interaction: InteractionController,
}

impl ChartState {
    pub fn new(options: ChartOptions, dimensions: Dimensions) -> Self {
        Self {
            viewport: Viewport::new(options.window_length),
            animation: AnimationEngine::new(options.bid_ask_transition_duration),
            options,
            dimensions,
            series: SnapshotSeries::new(),
            scales: ScaleEngine::new(),
            interaction: InteractionController::new(),
        }
    }

    pub fn layout(&self) -> ChartLayout {
        self.options.layout(self.dimensions)
    }

    pub fn visible_window(&self) -> &[Snapshot] {
        let range = self.viewport.visible_range(self.series.len());
        self.series.window(range.start, range.len())
    }

    /// Replace the series and re-anchor to its tail. Returns `false` (and
    /// leaves everything untouched) for empty input.
    pub fn set_data(&mut self, snapshots: Vec<Snapshot>) -> bool {
        if !self.series.replace(snapshots) {
            log_debug!(LogComponent::Domain("ChartState"), "ignored empty data set");
            return false;
        }
        self.viewport.reset();
        self.viewport.follow_tail(self.series.len());
        true
    }

    /// Append one snapshot and re-anchor to the tail, including after a pan.
    /// Returns whether the visible window changed.
    pub fn add_data(&mut self, snapshot: Snapshot) -> bool {
        let before = self.viewport.visible_range(self.series.len());
        self.series.push(snapshot);
        let len = self.series.len();

        let moved = self.viewport.follow_tail(len);
        moved || self.viewport.visible_range(len) != before
    }

    pub fn move_data_window(&mut self, position: i64) -> bool {
        self.viewport.move_to(position, self.series.len())
    }

    pub fn set_zoom_level(&mut self, seconds: i64) -> bool {
        self.viewport.set_zoom_level(seconds, self.series.len())
    }

    pub fn apply(&mut self, command: ViewportCommand) -> bool {
        let len = self.series.len();
        match command {
            ViewportCommand::Shift { delta } => {
                let target = self.viewport.window_position() as i64 + delta;
                self.viewport.move_to(target, len)
            }
            ViewportCommand::ZoomIn => self.viewport.zoom_in(len),
            ViewportCommand::ZoomOut => self.viewport.zoom_out(len),
        }
    }

    pub fn set_dimensions(&mut self, dimensions: Dimensions) {
        self.dimensions = dimensions;
    }

    /// Swap options; window length and animation duration follow the new values.
    pub fn set_options(&mut self, options: ChartOptions) {
        if options.window_length != self.options.window_length {
            let len = self.series.len();
            if len > MIN_WINDOW_LENGTH {
                self.viewport.set_zoom_level(options.window_length as i64, len);
            } else {
                self.viewport = Viewport::new(options.window_length);
            }
        }
        self.animation.set_duration(options.bid_ask_transition_duration);
        self.options = options;
    }

    /// Recompute scales for the current window. `None` when the plot has no
    /// area or nothing is visible; the engine keeps its previous scales but
    /// they no longer match the layout, so callers skip drawing.
    pub fn recompute_scales(&mut self) -> Option<&Scales> {
        let layout = self.layout();
        let range = self.viewport.visible_range(self.series.len());
        let window = self.series.window(range.start, range.len());
        if self.scales.recompute(
            window,
            layout.plot_width(),
            layout.plot_height(),
            self.options.bid_ask_width,
        ) {
            return self.scales.current();
        }
        if !window.is_empty() {
            log_warn!(
                LogComponent::Domain("ChartState"),
                "plot area {}x{} too small, skipping render",
                layout.plot_width(),
                layout.plot_height()
            );
        }
        None
    }
}
