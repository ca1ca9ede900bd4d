//! Drawing surfaces. The render pipeline only talks to [`Surface`], so the
//! same drawing code runs against a browser canvas or a recording stub.

pub mod canvas_renderer;
pub mod recording;

pub use canvas_renderer::CanvasSurface;
pub use recording::{DrawCommand, RecordingSurface};

use crate::domain::chart::{Color, Rect};
use crate::domain::errors::RenderingResult;
use strum::{AsRefStr, EnumIter};

/// Horizontal anchor of a text run, as understood by the 2D canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum TextAlign {
    Start,
    End,
    Left,
    Center,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum TextBaseline {
    Top,
    Middle,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Font {
    pub size_px: f64,
    pub bold: bool,
}

impl Default for Font {
    /// Canvas default: `10px sans-serif`.
    fn default() -> Self {
        Self {
            size_px: 10.0,
            bold: false,
        }
    }
}

impl Font {
    pub fn bold(size_px: f64) -> Self {
        Self {
            size_px,
            bold: true,
        }
    }

    pub fn to_css(&self) -> String {
        if self.bold {
            format!("bold {}px sans-serif", self.size_px)
        } else {
            format!("{}px sans-serif", self.size_px)
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    pub font: Font,
    pub color: Color,
    pub align: TextAlign,
    pub baseline: TextBaseline,
    pub max_width: Option<f64>,
}

impl TextStyle {
    pub fn new(color: Color, align: TextAlign, baseline: TextBaseline) -> Self {
        Self {
            font: Font::default(),
            color,
            align,
            baseline,
            max_width: None,
        }
    }

    pub fn with_font(self, font: Font) -> Self {
        Self { font, ..self }
    }

    pub fn with_max_width(self, max_width: f64) -> Self {
        Self {
            max_width: Some(max_width),
            ..self
        }
    }
}

pub type Point = (f64, f64);

/// Minimal 2D drawing target.
pub trait Surface {
    fn width(&self) -> f64;
    fn height(&self) -> f64;

    fn fill_rect(&mut self, rect: Rect, color: Color);

    fn fill_circle(&mut self, center: Point, radius: f64, color: Color) -> RenderingResult<()>;

    /// One open path through `points`.
    fn stroke_polyline(&mut self, points: &[Point], color: Color, line_width: f64);

    /// Disconnected segments stroked as a single path.
    fn stroke_segments(&mut self, segments: &[(Point, Point)], color: Color, line_width: f64);

    fn fill_text(&mut self, text: &str, at: Point, style: &TextStyle) -> RenderingResult<()>;

    fn measure_text(&mut self, text: &str, font: &Font) -> f64;
}
