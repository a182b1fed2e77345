use serde::{Deserialize, Serialize};

use super::types::{ContentRect, Point};

/// Coordinate system configuration shared from the chart into its views.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CoordOptions {
    /// Swaps the x and y position channels.
    #[serde(default)]
    pub transposed: bool,
}

/// Cartesian coordinate system bound to a view's plot range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coord {
    range: ContentRect,
    transposed: bool,
}

impl Coord {
    #[must_use]
    pub fn new(range: ContentRect, options: CoordOptions) -> Self {
        Self {
            range,
            transposed: options.transposed,
        }
    }

    #[must_use]
    pub fn range(self) -> ContentRect {
        self.range
    }

    #[must_use]
    pub fn is_transposed(self) -> bool {
        self.transposed
    }

    /// Maps normalized `(x, y)` in `0..=1` onto canvas space.
    ///
    /// `y = 0` sits on the bottom edge of the range.
    #[must_use]
    pub fn convert(self, x: f64, y: f64) -> Point {
        let (x, y) = if self.transposed { (y, x) } else { (x, y) };
        Point::new(
            self.range.bl.x + (self.range.tr.x - self.range.bl.x) * x,
            self.range.bl.y + (self.range.tr.y - self.range.bl.y) * y,
        )
    }
}
