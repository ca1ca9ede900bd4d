//! Cancellable animation frame loop.

use crate::domain::logging::LogComponent;
use crate::log_trace;
use futures::future::{AbortHandle, Abortable};
use gloo_timers::future::sleep;
use std::time::Duration;

/// Roughly one display refresh.
pub const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Milliseconds from a monotonic browser clock, falling back to `Date.now()`.
pub fn now_ms() -> f64 {
    web_sys::window()
        .and_then(|window| window.performance())
        .map(|performance| performance.now())
        .unwrap_or_else(js_sys::Date::now)
}

/// Owns at most one running frame loop. Starting a new loop aborts the
/// previous one before the new one is spawned.
#[derive(Default)]
pub struct FrameLoop {
    handle: Option<AbortHandle>,
}

impl FrameLoop {
    pub fn new() -> Self {
        Self::default()
    }

    /// `false` once the loop is cancelled or its callback returned `false`.
    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|handle| !handle.is_aborted())
    }

    /// Call `on_frame(elapsed_ms)` every frame until it returns `false` or
    /// the loop is cancelled.
    pub fn start<F>(&mut self, mut on_frame: F)
    where
        F: FnMut(f64) -> bool + 'static,
    {
        self.cancel();
        let (handle, registration) = AbortHandle::new_pair();
        let finished = handle.clone();
        self.handle = Some(handle);

        let frames = async move {
            let started = now_ms();
            loop {
                sleep(FRAME_INTERVAL).await;
                if !on_frame(now_ms() - started) {
                    break;
                }
            }
            // marks the handle done so is_running reports the natural end
            finished.abort();
        };

        wasm_bindgen_futures::spawn_local(async move {
            if Abortable::new(frames, registration).await.is_err() {
                log_trace!(LogComponent::Infrastructure("FrameLoop"), "frame loop aborted");
            }
        });
    }

    pub fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        self.cancel();
    }
}
