use serde::{Deserialize, Serialize};

use crate::core::BBox;
use crate::error::{ChartError, ChartResult};

/// RGBA color in normalized 0..=1 channel values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl Color {
    pub const TRANSPARENT: Self = Self::rgba(0.0, 0.0, 0.0, 0.0);
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);

    #[must_use]
    pub const fn rgba(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    #[must_use]
    pub const fn rgb(red: f64, green: f64, blue: f64) -> Self {
        Self::rgba(red, green, blue, 1.0)
    }

    /// Every channel must lie in `[0, 1]`.
    pub fn validate(self) -> ChartResult<()> {
        let channels = [self.red, self.green, self.blue, self.alpha];
        if channels.iter().all(|value| (0.0..=1.0).contains(value)) {
            Ok(())
        } else {
            Err(ChartError::InvalidData(format!(
                "color channels must be in [0, 1], got {channels:?}"
            )))
        }
    }
}

/// Fill for the canvas and plot backgrounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BackgroundStyle {
    #[serde(default = "default_background_fill")]
    pub fill: Color,
}

fn default_background_fill() -> Color {
    Color::TRANSPARENT
}

impl Default for BackgroundStyle {
    fn default() -> Self {
        Self {
            fill: default_background_fill(),
        }
    }
}

impl BackgroundStyle {
    #[must_use]
    pub const fn filled(fill: Color) -> Self {
        Self { fill }
    }
}

/// Draw command for one line segment in pixel space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinePrimitive {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub stroke_width: f64,
    pub color: Color,
}

impl LinePrimitive {
    #[must_use]
    pub const fn new(x1: f64, y1: f64, x2: f64, y2: f64, stroke_width: f64, color: Color) -> Self {
        Self {
            x1,
            y1,
            x2,
            y2,
            stroke_width,
            color,
        }
    }

    pub fn validate(self) -> ChartResult<()> {
        ensure_finite("line coordinates", &[self.x1, self.y1, self.x2, self.y2])?;
        ensure_positive("line stroke width", self.stroke_width)?;
        self.color.validate()
    }
}

/// Draw command for one filled rectangle in pixel space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectPrimitive {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub fill: Color,
}

impl RectPrimitive {
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64, fill: Color) -> Self {
        Self {
            x,
            y,
            width,
            height,
            fill,
        }
    }

    pub fn validate(self) -> ChartResult<()> {
        ensure_finite("rect origin", &[self.x, self.y])?;
        ensure_finite("rect size", &[self.width, self.height])?;
        if self.width < 0.0 || self.height < 0.0 {
            return Err(ChartError::InvalidData("rect size must be >= 0".to_owned()));
        }
        self.fill.validate()
    }
}

/// Horizontal text alignment relative to `TextPrimitive::x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextHAlign {
    Left,
    Center,
    Right,
}

/// Draw command for one label in pixel space; `y` is the top of the text box.
#[derive(Debug, Clone, PartialEq)]
pub struct TextPrimitive {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub font_size_px: f64,
    pub color: Color,
    pub h_align: TextHAlign,
}

impl TextPrimitive {
    #[must_use]
    pub fn new(
        text: impl Into<String>,
        x: f64,
        y: f64,
        font_size_px: f64,
        color: Color,
        h_align: TextHAlign,
    ) -> Self {
        Self {
            text: text.into(),
            x,
            y,
            font_size_px,
            color,
            h_align,
        }
    }

    pub fn validate(&self) -> ChartResult<()> {
        ensure_finite("text anchor", &[self.x, self.y])?;
        ensure_positive("font size", self.font_size_px)?;
        self.color.validate()
    }
}

fn ensure_finite(what: &str, values: &[f64]) -> ChartResult<()> {
    if values.iter().all(|value| value.is_finite()) {
        Ok(())
    } else {
        Err(ChartError::InvalidData(format!("{what} must be finite")))
    }
}

fn ensure_positive(what: &str, value: f64) -> ChartResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ChartError::InvalidData(format!("{what} must be finite and > 0")))
    }
}

/// Shape handed to the canvas collaborator.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Line(LinePrimitive),
    Rect(RectPrimitive),
    Text(TextPrimitive),
}

impl Shape {
    pub fn validate(&self) -> ChartResult<()> {
        match self {
            Self::Line(line) => line.validate(),
            Self::Rect(rect) => rect.validate(),
            Self::Text(text) => text.validate(),
        }
    }

    /// Geometric extent for shapes whose size does not depend on font metrics.
    ///
    /// Text returns `None`; its box comes from the canvas text measurer.
    #[must_use]
    pub fn geometric_bbox(&self) -> Option<BBox> {
        match self {
            Self::Line(line) => {
                let half = line.stroke_width / 2.0;
                Some(BBox::new(
                    line.x1.min(line.x2) - half,
                    line.y1.min(line.y2) - half,
                    line.x1.max(line.x2) + half,
                    line.y1.max(line.y2) + half,
                ))
            }
            Self::Rect(rect) => Some(BBox::from_origin_size(
                rect.x,
                rect.y,
                rect.width,
                rect.height,
            )),
            Self::Text(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Color, LinePrimitive, RectPrimitive, Shape};
    use crate::core::BBox;

    #[test]
    fn line_bbox_includes_half_stroke() {
        let shape = Shape::Line(LinePrimitive::new(0.0, 10.0, 20.0, 10.0, 2.0, Color::WHITE));
        assert_eq!(
            shape.geometric_bbox(),
            Some(BBox::new(-1.0, 9.0, 21.0, 11.0))
        );
    }

    #[test]
    fn rect_validation_rejects_negative_size() {
        let rect = RectPrimitive::new(0.0, 0.0, -1.0, 4.0, Color::WHITE);
        assert!(Shape::Rect(rect).validate().is_err());
        assert!(Color::rgba(1.2, 0.0, 0.0, 1.0).validate().is_err());
    }
}
