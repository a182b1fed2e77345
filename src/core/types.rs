use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Canvas surface size in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    pub fn validate(self) -> ChartResult<Self> {
        if !self.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: self.width,
                height: self.height,
            });
        }
        Ok(self)
    }
}

/// A point in canvas space (origin top-left, y grows downward).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn distance_squared(self, other: Self) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }
}

/// Axis-aligned bounding box in canvas coordinates.
///
/// `BBox::EMPTY` is the identity for [`BBox::union`]: its minimums are
/// `+inf` and its maximums `-inf`, so a group with no shapes contributes
/// nothing to a measurement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BBox {
    pub const EMPTY: Self = Self {
        min_x: f64::INFINITY,
        min_y: f64::INFINITY,
        max_x: f64::NEG_INFINITY,
        max_y: f64::NEG_INFINITY,
    };

    #[must_use]
    pub const fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    #[must_use]
    pub fn from_origin_size(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::new(x, y, x + width, y + height)
    }

    #[must_use]
    pub fn is_empty(self) -> bool {
        self.min_x > self.max_x || self.min_y > self.max_y
    }

    #[must_use]
    pub fn union(self, other: Self) -> Self {
        Self {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }

    #[must_use]
    pub fn width(self) -> f64 {
        if self.is_empty() {
            0.0
        } else {
            self.max_x - self.min_x
        }
    }

    #[must_use]
    pub fn height(self) -> f64 {
        if self.is_empty() {
            0.0
        } else {
            self.max_y - self.min_y
        }
    }
}

/// Padded rectangle holding chart content.
///
/// Stored as the bottom-left / top-right corner pair the coordinate system
/// maps onto; `bl.y >= tr.y` because canvas y grows downward.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContentRect {
    pub bl: Point,
    pub tr: Point,
}

impl ContentRect {
    #[must_use]
    pub fn from_edges(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            bl: Point::new(left, bottom),
            tr: Point::new(right, top),
        }
    }

    #[must_use]
    pub fn min_x(self) -> f64 {
        self.bl.x
    }

    #[must_use]
    pub fn max_x(self) -> f64 {
        self.tr.x
    }

    #[must_use]
    pub fn min_y(self) -> f64 {
        self.tr.y
    }

    #[must_use]
    pub fn max_y(self) -> f64 {
        self.bl.y
    }

    #[must_use]
    pub fn width(self) -> f64 {
        (self.tr.x - self.bl.x).max(0.0)
    }

    #[must_use]
    pub fn height(self) -> f64 {
        (self.bl.y - self.tr.y).max(0.0)
    }

    #[must_use]
    pub fn center_x(self) -> f64 {
        (self.bl.x + self.tr.x) / 2.0
    }

    #[must_use]
    pub fn contains(self, point: Point) -> bool {
        point.x >= self.min_x()
            && point.x <= self.max_x()
            && point.y >= self.min_y()
            && point.y <= self.max_y()
    }

    #[must_use]
    pub fn is_within(self, size: Size) -> bool {
        self.min_x() >= 0.0
            && self.min_y() >= 0.0
            && self.max_x() <= size.width
            && self.max_y() <= size.height
    }

    /// Sub-rectangle spanning the `start..end` fractions of this rectangle.
    ///
    /// Fractions are measured from the top-left corner and clamped to `0..=1`.
    #[must_use]
    pub fn subset(self, start: (f64, f64), end: (f64, f64)) -> Self {
        let clamp = |value: f64| {
            if value.is_finite() {
                value.clamp(0.0, 1.0)
            } else {
                0.0
            }
        };
        let (sx, sy) = (clamp(start.0), clamp(start.1));
        let (ex, ey) = (clamp(end.0).max(sx), clamp(end.1).max(sy));
        let width = self.width();
        let height = self.height();
        Self::from_edges(
            self.min_x() + width * sx,
            self.min_y() + height * sy,
            self.min_x() + width * ex,
            self.min_y() + height * ey,
        )
    }
}
