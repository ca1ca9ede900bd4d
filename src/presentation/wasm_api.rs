use crate::application::{FrameStatus, HeatmapChart};
use crate::domain::{
    chart::{ChartOptions, Dimensions},
    logging::LogComponent,
};
use crate::infrastructure::{
    ingest::{parse_snapshot, parse_snapshots},
    input::{PointerInput, PointerListeners},
    rendering::CanvasSurface,
    scheduling::FrameLoop,
};
use crate::{log_debug, log_warn};
use js_sys::{Array, JSON};
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use wasm_bindgen::prelude::*;
use web_sys::HtmlCanvasElement;

/// Everything bound to one canvas.
struct Binding {
    chart: HeatmapChart<CanvasSurface>,
    frame_loop: FrameLoop,
    listeners: Option<PointerListeners>,
}

/// Browser-facing heatmap. Thin bridge to [`HeatmapChart`]: decodes JS
/// values, owns the canvas listeners and drives the bar animation.
#[wasm_bindgen]
pub struct StockHeatmap {
    inner: Rc<RefCell<Binding>>,
}

#[wasm_bindgen]
impl StockHeatmap {
    /// `options` is a partial options object, or `undefined` for defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(options: JsValue) -> StockHeatmap {
        let binding = Binding {
            chart: HeatmapChart::new(decode_options(&options)),
            frame_loop: FrameLoop::new(),
            listeners: None,
        };
        StockHeatmap {
            inner: Rc::new(RefCell::new(binding)),
        }
    }

    /// Replace the whole series. Anything but a non-empty array is ignored.
    #[wasm_bindgen(js_name = setData)]
    pub fn set_data(&self, data: JsValue) {
        if !Array::is_array(&data) {
            log_debug!(LogComponent::Presentation("StockHeatmap"), "setData ignored: not an array");
            return;
        }
        let Some(json) = stringify(&data) else {
            return;
        };
        match parse_snapshots(&json) {
            Ok(snapshots) => {
                let generation = self.inner.borrow_mut().chart.set_data(snapshots);
                animate(&self.inner, generation);
            }
            Err(e) => {
                log_warn!(LogComponent::Presentation("StockHeatmap"), "setData ignored: {}", e);
            }
        }
    }

    /// Append one snapshot. Non-objects are ignored.
    #[wasm_bindgen(js_name = addData)]
    pub fn add_data(&self, data: JsValue) {
        if !data.is_object() || Array::is_array(&data) {
            log_debug!(LogComponent::Presentation("StockHeatmap"), "addData ignored: not an object");
            return;
        }
        let Some(json) = stringify(&data) else {
            return;
        };
        match parse_snapshot(&json) {
            Ok(snapshot) => {
                let generation = self.inner.borrow_mut().chart.add_data(snapshot);
                animate(&self.inner, generation);
            }
            Err(e) => {
                log_warn!(LogComponent::Presentation("StockHeatmap"), "addData ignored: {}", e);
            }
        }
    }

    /// Window length in seconds (one snapshot per second), clamped to `[3, len - 1]`.
    #[wasm_bindgen(js_name = setZoomLevel)]
    pub fn set_zoom_level(&self, seconds: f64) {
        if !seconds.is_finite() {
            return;
        }
        let generation = self.inner.borrow_mut().chart.set_zoom_level(seconds.trunc() as i64);
        animate(&self.inner, generation);
    }

    /// Move the window start. Out-of-range or fractional positions are ignored.
    #[wasm_bindgen(js_name = moveDataWindow)]
    pub fn move_data_window(&self, position: f64) {
        if !position.is_finite() || position.fract() != 0.0 {
            return;
        }
        let generation = self.inner.borrow_mut().chart.move_data_window(position as i64);
        animate(&self.inner, generation);
    }

    /// Bind to `canvas`, start listening for pointer input and draw.
    pub fn attach(&self, canvas: HtmlCanvasElement) -> Result<(), JsValue> {
        let surface =
            CanvasSurface::from_canvas(canvas.clone()).map_err(|e| JsValue::from_str(&e.to_string()))?;
        let listeners = listen(&canvas, Rc::downgrade(&self.inner));

        let generation = {
            let mut binding = self.inner.borrow_mut();
            binding.frame_loop.cancel();
            binding.listeners = Some(listeners);
            binding.chart.attach(surface)
        };
        animate(&self.inner, generation);
        Ok(())
    }

    /// Stop the animation, remove listeners and release the canvas.
    pub fn detach(&self) {
        let mut binding = self.inner.borrow_mut();
        binding.frame_loop.cancel();
        binding.listeners = None;
        binding.chart.detach();
    }

    /// Resize the canvas, rebind listeners and redraw.
    pub fn resize(&self, width: u32, height: u32) {
        let canvas = {
            let mut binding = self.inner.borrow_mut();
            binding.listeners = None;
            let Some(surface) = binding.chart.surface_mut() else {
                return;
            };
            surface.set_size(width, height);
            surface.canvas().clone()
        };

        let listeners = listen(&canvas, Rc::downgrade(&self.inner));
        let generation = {
            let mut binding = self.inner.borrow_mut();
            binding.listeners = Some(listeners);
            binding
                .chart
                .set_dimensions(Dimensions::new(width as f64, height as f64))
        };
        animate(&self.inner, generation);
    }

    /// Replace theme and layout options; invalid input falls back to defaults.
    #[wasm_bindgen(js_name = setOptions)]
    pub fn set_options(&self, options: JsValue) {
        let generation = self.inner.borrow_mut().chart.set_options(decode_options(&options));
        animate(&self.inner, generation);
    }

    #[wasm_bindgen(getter, js_name = windowLength)]
    pub fn window_length(&self) -> usize {
        self.inner.borrow().chart.state().viewport.window_length()
    }

    #[wasm_bindgen(getter, js_name = windowPosition)]
    pub fn window_position(&self) -> usize {
        self.inner.borrow().chart.state().viewport.window_position()
    }

    #[wasm_bindgen(getter)]
    pub fn len(&self) -> usize {
        self.inner.borrow().chart.state().series.len()
    }
}

fn stringify(value: &JsValue) -> Option<String> {
    match JSON::stringify(value) {
        Ok(json) => Some(String::from(json)),
        Err(e) => {
            log_warn!(LogComponent::Presentation("StockHeatmap"), "cannot serialise input: {:?}", e);
            None
        }
    }
}

fn decode_options(value: &JsValue) -> ChartOptions {
    if value.is_undefined() || value.is_null() {
        return ChartOptions::default();
    }
    let Some(json) = stringify(value) else {
        return ChartOptions::default();
    };
    ChartOptions::from_json(&json).unwrap_or_else(|e| {
        log_warn!(LogComponent::Presentation("StockHeatmap"), "{}; using defaults", e);
        ChartOptions::default()
    })
}

/// Drive bar transition `generation` until it finishes or is superseded.
fn animate(inner: &Rc<RefCell<Binding>>, generation: Option<u64>) {
    let Some(generation) = generation else {
        return;
    };
    let weak = Rc::downgrade(inner);
    inner.borrow_mut().frame_loop.start(move |elapsed_ms| {
        let Some(inner) = weak.upgrade() else {
            return false;
        };
        let Ok(mut binding) = inner.try_borrow_mut() else {
            return true;
        };
        binding.chart.tick_animation(generation, elapsed_ms) == FrameStatus::Running
    });
}

fn listen(canvas: &HtmlCanvasElement, weak: Weak<RefCell<Binding>>) -> PointerListeners {
    PointerListeners::attach(canvas, move |input| {
        let Some(inner) = weak.upgrade() else {
            return;
        };
        let generation = {
            let Ok(mut binding) = inner.try_borrow_mut() else {
                return;
            };
            let chart = &mut binding.chart;
            match input {
                PointerInput::Down { x } => {
                    chart.pointer_down(x);
                    None
                }
                PointerInput::Move { x } => chart.pointer_move(x),
                PointerInput::Up => {
                    chart.pointer_up();
                    None
                }
                PointerInput::Leave => {
                    chart.pointer_leave();
                    None
                }
                PointerInput::Wheel { delta_y } => chart.wheel(delta_y),
            }
        };
        animate(&inner, generation);
    })
}
