use crate::core::padding::{BOTTOM, LEFT, RIGHT, TOP};
use crate::core::{BBox, Padding, PaddingEdge, Size};

pub const DEFAULT_AUTO_PADDING_APPEND: f64 = 5.0;

/// Replaces auto padding edges with the measured decoration overflow.
///
/// One measurement informs one correction; there is no iteration here.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AutoPaddingResolver {
    append_margin: f64,
}

impl Default for AutoPaddingResolver {
    fn default() -> Self {
        Self::new(DEFAULT_AUTO_PADDING_APPEND)
    }
}

impl AutoPaddingResolver {
    #[must_use]
    pub fn new(append_margin: f64) -> Self {
        let append_margin = if append_margin.is_finite() {
            append_margin.max(0.0)
        } else {
            DEFAULT_AUTO_PADDING_APPEND
        };
        Self { append_margin }
    }

    #[must_use]
    pub fn append_margin(self) -> f64 {
        self.append_margin
    }

    /// How far the union of `front` and `back` spills past each canvas edge,
    /// floored at zero, in `[top, right, bottom, left]` order.
    #[must_use]
    pub fn overflow(front: BBox, back: BBox, size: Size) -> [f64; 4] {
        let union = front.union(back);
        if union.is_empty() {
            return [0.0; 4];
        }
        let mut outer = [0.0; 4];
        outer[TOP] = -union.min_y;
        outer[RIGHT] = union.max_x - size.width;
        outer[BOTTOM] = union.max_y - size.height;
        outer[LEFT] = -union.min_x;
        outer.map(|value| {
            if value.is_finite() {
                value.max(0.0)
            } else {
                0.0
            }
        })
    }

    /// Resolves every auto edge of `padding`; fixed edges pass through.
    #[must_use]
    pub fn resolve(self, padding: &Padding, front: BBox, back: BBox, size: Size) -> Padding {
        let outer = Self::overflow(front, back, size);
        let mut resolved = *padding;
        for (index, edge) in padding.edges().into_iter().enumerate() {
            if edge.is_auto() {
                resolved.set_edge(index, PaddingEdge::Fixed(outer[index] + self.append_margin));
            }
        }
        resolved
    }
}
