use crate::{
    application::use_cases::RenderPipeline,
    domain::{
        chart::{ChartOptions, ChartState, Dimensions},
        logging::LogComponent,
        market_data::{Snapshot, SnapshotValidator},
    },
    infrastructure::rendering::Surface,
};
use crate::{log_debug, log_error, log_warn};

/// Outcome of one animation frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameStatus {
    /// Keep scheduling frames.
    Running,
    /// The transition reached its target on this frame.
    Finished,
    /// Superseded, cancelled, or no surface bound; stop without drawing.
    Stopped,
}

/// Application service owning one heatmap: its state and, while attached,
/// the surface it draws on.
///
/// Operations that change what is visible redraw synchronously and return
/// the generation of the bar transition they started, which the caller
/// drives with [`HeatmapChart::tick_animation`].
pub struct HeatmapChart<S: Surface> {
    state: ChartState,
    surface: Option<S>,
}

impl<S: Surface> HeatmapChart<S> {
    pub fn new(options: ChartOptions) -> Self {
        Self {
            state: ChartState::new(options, Dimensions::default()),
            surface: None,
        }
    }

    pub fn state(&self) -> &ChartState {
        &self.state
    }

    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    pub fn surface_mut(&mut self) -> Option<&mut S> {
        self.surface.as_mut()
    }

    pub fn is_attached(&self) -> bool {
        self.surface.is_some()
    }

    /// Bind a surface, start reacting to input and draw.
    pub fn attach(&mut self, surface: S) -> Option<u64> {
        self.state
            .set_dimensions(Dimensions::new(surface.width(), surface.height()));
        self.surface = Some(surface);
        self.state.interaction.attach();
        log_debug!(
            LogComponent::Application("HeatmapChart"),
            "attached {}x{} surface",
            self.state.dimensions.width,
            self.state.dimensions.height
        );
        self.render()
    }

    /// Unbind the surface, stop the animation and ignore further input.
    pub fn detach(&mut self) -> Option<S> {
        self.state.interaction.detach();
        self.state.animation.cancel();
        self.surface.take()
    }

    /// Replace the whole series. Invalid snapshots are dropped; an empty
    /// result leaves the chart untouched.
    pub fn set_data(&mut self, snapshots: Vec<Snapshot>) -> Option<u64> {
        let total = snapshots.len();
        let valid: Vec<Snapshot> = snapshots
            .into_iter()
            .filter(|snapshot| match SnapshotValidator::validate(snapshot) {
                Ok(()) => true,
                Err(e) => {
                    log_warn!(LogComponent::Application("HeatmapChart"), "dropping snapshot: {}", e);
                    false
                }
            })
            .collect();

        if valid.len() != total {
            log_warn!(
                LogComponent::Application("HeatmapChart"),
                "kept {} of {} snapshots",
                valid.len(),
                total
            );
        }

        if !self.state.set_data(valid) {
            return None;
        }
        self.render()
    }

    pub fn add_data(&mut self, snapshot: Snapshot) -> Option<u64> {
        if let Err(e) = SnapshotValidator::validate(&snapshot) {
            log_warn!(LogComponent::Application("HeatmapChart"), "ignored snapshot: {}", e);
            return None;
        }
        if self.state.add_data(snapshot) {
            self.render()
        } else {
            None
        }
    }

    pub fn set_zoom_level(&mut self, seconds: i64) -> Option<u64> {
        if self.state.set_zoom_level(seconds) {
            self.render()
        } else {
            None
        }
    }

    pub fn move_data_window(&mut self, position: i64) -> Option<u64> {
        if self.state.move_data_window(position) {
            self.render()
        } else {
            None
        }
    }

    /// New host size; redraws when a surface is bound.
    pub fn set_dimensions(&mut self, dimensions: Dimensions) -> Option<u64> {
        self.state.set_dimensions(dimensions);
        self.render()
    }

    pub fn set_options(&mut self, options: ChartOptions) -> Option<u64> {
        self.state.set_options(options);
        self.render()
    }

    pub fn pointer_down(&mut self, x: f64) {
        self.state.interaction.pointer_down(x);
    }

    pub fn pointer_move(&mut self, x: f64) -> Option<u64> {
        let bandwidth = self.state.scales.current()?.x.bandwidth();
        let command = self.state.interaction.pointer_move(x, bandwidth)?;
        if self.state.apply(command) {
            self.render()
        } else {
            None
        }
    }

    pub fn pointer_up(&mut self) {
        self.state.interaction.pointer_up();
    }

    pub fn pointer_leave(&mut self) {
        self.state.interaction.pointer_leave();
    }

    pub fn wheel(&mut self, delta_y: f64) -> Option<u64> {
        let command = self.state.interaction.wheel(delta_y)?;
        if self.state.apply(command) {
            self.render()
        } else {
            None
        }
    }

    /// Full redraw of every region. No-op without a surface.
    pub fn render(&mut self) -> Option<u64> {
        let surface = self.surface.as_mut()?;
        match RenderPipeline::render(&mut self.state, surface) {
            Ok(generation) => generation,
            Err(e) => {
                log_error!(LogComponent::Application("HeatmapChart"), "render failed: {}", e);
                None
            }
        }
    }

    /// Advance the bar transition `generation` to `elapsed_ms` and repaint
    /// the bar panel.
    pub fn tick_animation(&mut self, generation: u64, elapsed_ms: f64) -> FrameStatus {
        let Some(surface) = self.surface.as_mut() else {
            self.state.animation.cancel();
            return FrameStatus::Stopped;
        };
        let Some(frame) = self.state.animation.tick(generation, elapsed_ms) else {
            return FrameStatus::Stopped;
        };

        if let Err(e) = RenderPipeline::draw_bar_panel(surface, &self.state.options, &frame) {
            log_error!(LogComponent::Application("HeatmapChart"), "bar panel failed: {}", e);
            self.state.animation.cancel();
            return FrameStatus::Stopped;
        }

        if frame.is_final() {
            FrameStatus::Finished
        } else {
            FrameStatus::Running
        }
    }
}
