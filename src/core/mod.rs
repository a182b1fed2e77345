pub mod coord;
pub mod padding;
pub mod scale;
pub mod types;

pub use coord::{Coord, CoordOptions};
pub use padding::{Padding, PaddingEdge, PaddingKeyword};
pub use scale::{Scale, ScaleKind, ScaleOption, ScaleOptions, ScaleValue};
pub use types::{BBox, ContentRect, Point, Size};
