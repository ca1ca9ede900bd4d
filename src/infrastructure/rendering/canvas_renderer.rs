use super::{Font, Point, Surface, TextStyle};
use crate::domain::{
    chart::{Color, Rect},
    errors::{AppError, RenderingResult},
    logging::LogComponent,
};
use crate::log_warn;
use std::f64::consts::PI;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

/// Canvas 2D surface - Infrastructure implementation of [`Surface`]
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn from_canvas(canvas: HtmlCanvasElement) -> RenderingResult<Self> {
        let context = canvas
            .get_context("2d")
            .map_err(|e| AppError::RenderingError(format!("failed to get 2D context: {e:?}")))?
            .ok_or_else(|| AppError::RenderingError("canvas has no 2D context".to_string()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| AppError::RenderingError("failed to cast to 2D context".to_string()))?;

        Ok(Self { canvas, context })
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    /// Resize the backing store; the canvas clears itself as a side effect.
    pub fn set_size(&self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
    }

    fn stroke_path(&self, color: Color, line_width: f64) {
        self.context.set_line_width(line_width);
        self.context.set_stroke_style_str(&color.to_css());
        self.context.stroke();
    }
}

impl Surface for CanvasSurface {
    fn width(&self) -> f64 {
        self.canvas.width() as f64
    }

    fn height(&self) -> f64 {
        self.canvas.height() as f64
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.context.set_fill_style_str(&color.to_css());
        self.context
            .fill_rect(rect.x, rect.y, rect.width, rect.height);
    }

    fn fill_circle(&mut self, center: Point, radius: f64, color: Color) -> RenderingResult<()> {
        self.context.set_fill_style_str(&color.to_css());
        self.context.begin_path();
        self.context
            .arc(center.0, center.1, radius.max(0.0), 0.0, 2.0 * PI)
            .map_err(|e| AppError::RenderingError(format!("arc failed: {e:?}")))?;
        self.context.fill();
        Ok(())
    }

    fn stroke_polyline(&mut self, points: &[Point], color: Color, line_width: f64) {
        let Some((first, rest)) = points.split_first() else {
            return;
        };
        self.context.begin_path();
        self.context.move_to(first.0, first.1);
        for point in rest {
            self.context.line_to(point.0, point.1);
        }
        self.stroke_path(color, line_width);
    }

    fn stroke_segments(&mut self, segments: &[(Point, Point)], color: Color, line_width: f64) {
        if segments.is_empty() {
            return;
        }
        self.context.begin_path();
        for (from, to) in segments {
            self.context.move_to(from.0, from.1);
            self.context.line_to(to.0, to.1);
        }
        self.stroke_path(color, line_width);
    }

    fn fill_text(&mut self, text: &str, at: Point, style: &TextStyle) -> RenderingResult<()> {
        self.context.set_font(&style.font.to_css());
        self.context.set_text_align(style.align.as_ref());
        self.context.set_text_baseline(style.baseline.as_ref());
        self.context.set_fill_style_str(&style.color.to_css());

        let result = match style.max_width {
            Some(max_width) => self
                .context
                .fill_text_with_max_width(text, at.0, at.1, max_width),
            None => self.context.fill_text(text, at.0, at.1),
        };
        result.map_err(|e| AppError::RenderingError(format!("fill_text failed: {e:?}")))
    }

    fn measure_text(&mut self, text: &str, font: &Font) -> f64 {
        self.context.set_font(&font.to_css());
        match self.context.measure_text(text) {
            Ok(metrics) => metrics.width(),
            Err(e) => {
                log_warn!(
                    LogComponent::Infrastructure("CanvasSurface"),
                    "measure_text failed: {:?}",
                    e
                );
                0.0
            }
        }
    }
}
