use crate::domain::errors::{AppError, ConfigResult};
use serde::Deserialize;

/// Value Object - Color
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(try_from = "String")]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::new(r, g, b, 1.0)
    }

    pub fn from_hex(hex: u32) -> Self {
        let r = ((hex >> 16) & 0xFF) as f32 / 255.0;
        let g = ((hex >> 8) & 0xFF) as f32 / 255.0;
        let b = (hex & 0xFF) as f32 / 255.0;
        Self::rgb(r, g, b)
    }

    pub fn to_hex(&self) -> u32 {
        let r = (self.r * 255.0).round() as u32;
        let g = (self.g * 255.0).round() as u32;
        let b = (self.b * 255.0).round() as u32;
        (r << 16) | (g << 8) | b
    }

    /// Parse `#rrggbb` or `#rgb`.
    pub fn parse_css(value: &str) -> ConfigResult<Self> {
        let digits = value
            .trim()
            .strip_prefix('#')
            .ok_or_else(|| AppError::ConfigurationError(format!("color '{value}' must start with '#'")))?;

        let expanded = match digits.len() {
            6 => digits.to_string(),
            3 => digits.chars().flat_map(|c| [c, c]).collect(),
            _ => {
                return Err(AppError::ConfigurationError(format!(
                    "color '{value}' must have 3 or 6 hex digits"
                )));
            }
        };

        u32::from_str_radix(&expanded, 16)
            .map(Self::from_hex)
            .map_err(|_| AppError::ConfigurationError(format!("color '{value}' is not valid hex")))
    }

    pub fn with_alpha(&self, alpha: f32) -> Self {
        Self {
            a: alpha.clamp(0.0, 1.0),
            ..*self
        }
    }

    /// CSS form understood by the 2D canvas: `#rrggbb` when opaque, `rgba(..)` otherwise.
    pub fn to_css(&self) -> String {
        if self.a >= 1.0 {
            format!("#{:06x}", self.to_hex())
        } else {
            let hex = self.to_hex();
            format!(
                "rgba({}, {}, {}, {})",
                (hex >> 16) & 0xFF,
                (hex >> 8) & 0xFF,
                hex & 0xFF,
                self.a
            )
        }
    }

    pub const BLACK: Color = Color { r: 0.0, g: 0.0, b: 0.0, a: 1.0 };
    pub const WHITE: Color = Color { r: 1.0, g: 1.0, b: 1.0, a: 1.0 };
}

impl TryFrom<String> for Color {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse_css(&value)
    }
}

impl From<u32> for Color {
    fn from(hex: u32) -> Self {
        Self::from_hex(hex)
    }
}

/// Axis-aligned rectangle in surface pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// Pixel size of the drawing surface, as reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Dimensions {
    pub width: f64,
    pub height: f64,
}

impl Dimensions {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_long_and_short_hex() {
        assert_eq!(Color::parse_css("#388e3c").unwrap().to_hex(), 0x388e3c);
        assert_eq!(Color::parse_css("#fff").unwrap(), Color::WHITE);
    }

    #[test]
    fn rejects_named_colors() {
        assert!(Color::parse_css("red").is_err());
        assert!(Color::parse_css("#12345").is_err());
        assert!(Color::parse_css("#zzzzzz").is_err());
    }

    #[test]
    fn css_output_switches_to_rgba_when_translucent() {
        let buy = Color::from_hex(0x388e3c);
        assert_eq!(buy.to_css(), "#388e3c");
        assert_eq!(buy.with_alpha(0.5).to_css(), "rgba(56, 142, 60, 0.5)");
    }
}
