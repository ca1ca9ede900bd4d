//! Pointer and wheel handling expressed as viewport commands.

/// What the chart should do in response to an input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewportCommand {
    /// Move the window by `delta` snapshots (negative moves towards older data).
    Shift { delta: i64 },
    ZoomIn,
    ZoomOut,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragState {
    Idle,
    Dragging { anchor_x: f64 },
}

/// Drag and wheel state machine. Every handler is a no-op while detached.
#[derive(Debug, Clone)]
pub struct InteractionController {
    state: DragState,
    attached: bool,
}

impl Default for InteractionController {
    fn default() -> Self {
        Self::new()
    }
}

impl InteractionController {
    pub fn new() -> Self {
        Self {
            state: DragState::Idle,
            attached: false,
        }
    }

    pub fn attach(&mut self) {
        self.attached = true;
    }

    /// Stop reacting to input and forget any drag in progress.
    pub fn detach(&mut self) {
        self.attached = false;
        self.state = DragState::Idle;
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn pointer_down(&mut self, x: f64) {
        if self.attached {
            self.state = DragState::Dragging { anchor_x: x };
        }
    }

    /// Dragging right reveals older snapshots. The anchor resets only once a
    /// whole band has been crossed, so slow drags accumulate.
    pub fn pointer_move(&mut self, x: f64, bandwidth: f64) -> Option<ViewportCommand> {
        if !self.attached {
            return None;
        }
        let DragState::Dragging { anchor_x } = self.state else {
            return None;
        };
        if !(bandwidth > 0.0) {
            return None;
        }

        let delta_x = x - anchor_x;
        let count = (delta_x.abs() / bandwidth).floor() as i64;
        if count == 0 {
            return None;
        }

        self.state = DragState::Dragging { anchor_x: x };
        let direction = if delta_x >= 0.0 { -1 } else { 1 };
        Some(ViewportCommand::Shift {
            delta: direction * count,
        })
    }

    pub fn pointer_up(&mut self) {
        self.state = DragState::Idle;
    }

    pub fn pointer_leave(&mut self) {
        self.state = DragState::Idle;
    }

    pub fn wheel(&self, delta_y: f64) -> Option<ViewportCommand> {
        if !self.attached {
            return None;
        }
        if delta_y < 0.0 {
            Some(ViewportCommand::ZoomIn)
        } else if delta_y > 0.0 {
            Some(ViewportCommand::ZoomOut)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detached_controller_ignores_input() {
        let mut controller = InteractionController::new();
        controller.pointer_down(10.0);
        assert_eq!(controller.state(), DragState::Idle);
        assert_eq!(controller.wheel(-1.0), None);
    }

    #[test]
    fn sub_band_moves_keep_anchor() {
        let mut controller = InteractionController::new();
        controller.attach();
        controller.pointer_down(100.0);
        assert_eq!(controller.pointer_move(105.0, 10.0), None);
        assert_eq!(
            controller.pointer_move(112.0, 10.0),
            Some(ViewportCommand::Shift { delta: -1 })
        );
        assert_eq!(controller.state(), DragState::Dragging { anchor_x: 112.0 });
    }

    #[test]
    fn leave_ends_drag() {
        let mut controller = InteractionController::new();
        controller.attach();
        controller.pointer_down(0.0);
        controller.pointer_leave();
        assert_eq!(controller.pointer_move(100.0, 10.0), None);
    }
}
