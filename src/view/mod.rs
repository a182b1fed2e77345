mod axis;
mod geometry;
mod point_geometry;
#[allow(clippy::module_inception)]
mod view;

pub use axis::AxesOptions;
pub use geometry::{
    AttributeRole, DataBucket, DrawContext, Filters, Geometry, MappedRecord, TooltipItem,
    ValueFilter,
};
pub use point_geometry::PointGeometry;
pub use view::{View, ViewConfig, ViewId, ViewOptions, ViewScope};
