use super::{Font, Point, Surface, TextStyle};
use crate::domain::chart::{Color, Rect};
use crate::domain::errors::RenderingResult;

/// Approximate glyph advance as a fraction of the font size.
const GLYPH_WIDTH_RATIO: f64 = 0.6;

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    FillRect { rect: Rect, color: Color },
    FillCircle { center: Point, radius: f64, color: Color },
    Polyline { points: Vec<Point>, color: Color, line_width: f64 },
    Segments { segments: Vec<(Point, Point)>, color: Color, line_width: f64 },
    Text { text: String, at: Point, style: TextStyle },
}

/// Surface that records every call instead of drawing. Text is measured
/// with a fixed-advance approximation.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    width: f64,
    height: f64,
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|command| match command {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn filled_rects(&self) -> Vec<(Rect, Color)> {
        self.commands
            .iter()
            .filter_map(|command| match command {
                DrawCommand::FillRect { rect, color } => Some((*rect, *color)),
                _ => None,
            })
            .collect()
    }

    pub fn circles(&self) -> Vec<(Point, f64)> {
        self.commands
            .iter()
            .filter_map(|command| match command {
                DrawCommand::FillCircle { center, radius, .. } => Some((*center, *radius)),
                _ => None,
            })
            .collect()
    }
}

impl Surface for RecordingSurface {
    fn width(&self) -> f64 {
        self.width
    }

    fn height(&self) -> f64 {
        self.height
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.commands.push(DrawCommand::FillRect { rect, color });
    }

    fn fill_circle(&mut self, center: Point, radius: f64, color: Color) -> RenderingResult<()> {
        self.commands.push(DrawCommand::FillCircle {
            center,
            radius,
            color,
        });
        Ok(())
    }

    fn stroke_polyline(&mut self, points: &[Point], color: Color, line_width: f64) {
        self.commands.push(DrawCommand::Polyline {
            points: points.to_vec(),
            color,
            line_width,
        });
    }

    fn stroke_segments(&mut self, segments: &[(Point, Point)], color: Color, line_width: f64) {
        self.commands.push(DrawCommand::Segments {
            segments: segments.to_vec(),
            color,
            line_width,
        });
    }

    fn fill_text(&mut self, text: &str, at: Point, style: &TextStyle) -> RenderingResult<()> {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            at,
            style: style.clone(),
        });
        Ok(())
    }

    fn measure_text(&mut self, text: &str, font: &Font) -> f64 {
        text.chars().count() as f64 * font.size_px * GLYPH_WIDTH_RATIO
    }
}
