mod layer_stack;
mod null_canvas;
mod primitives;
mod registration;

use serde::{Deserialize, Serialize};

pub use layer_stack::{LayerKind, LayerStack};
pub use null_canvas::{NullCanvas, NullHost};
pub use primitives::{
    BackgroundStyle, Color, LinePrimitive, RectPrimitive, Shape, TextHAlign, TextPrimitive,
};
pub use registration::{Mount, Registration};

use crate::core::{BBox, Size};
use crate::error::ChartResult;

/// Handle of a z-ordered group created on a canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GroupId(u32);

impl GroupId {
    #[must_use]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

/// Handle of one shape living inside a canvas group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ShapeId(u64);

impl ShapeId {
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// Wrapper element mounted into a host container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MountId(u32);

impl MountId {
    #[must_use]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }
}

/// Registration handle for a host-level resize listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SubscriptionId(u32);

impl SubscriptionId {
    #[must_use]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }
}

/// Surface creation request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CanvasSpec {
    pub size: Size,
    pub pixel_ratio: Option<f64>,
}

/// Raster export of the current surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageData {
    pub width: u32,
    pub height: u32,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

/// Scene-graph surface consumed by the chart.
///
/// Groups are created once with an explicit z-index; shapes are added to and
/// removed from groups by their owners. Implementations never reorder groups.
pub trait Canvas {
    fn size(&self) -> Size;
    fn add_group(&mut self, z_index: i32) -> ChartResult<GroupId>;
    fn add_shape(&mut self, group: GroupId, shape: Shape) -> ChartResult<ShapeId>;
    fn update_shape(&mut self, shape: ShapeId, replacement: Shape) -> ChartResult<()>;
    /// Returns `true` when the shape existed.
    fn remove_shape(&mut self, shape: ShapeId) -> bool;
    fn group_shapes(&self, group: GroupId) -> Vec<ShapeId>;
    fn shape_bbox(&self, shape: ShapeId) -> Option<BBox>;
    fn measure_text(&self, text: &str, font_size_px: f64) -> Size;
    fn change_size(&mut self, size: Size) -> ChartResult<()>;
    fn draw(&mut self) -> ChartResult<()>;
    fn snapshot(&self) -> ChartResult<ImageData>;
    fn destroy(&mut self);

    /// Union of every shape box in `group`; `BBox::EMPTY` for an empty group.
    fn group_bbox(&self, group: GroupId) -> BBox {
        self.group_shapes(group)
            .into_iter()
            .filter_map(|shape| self.shape_bbox(shape))
            .fold(BBox::EMPTY, BBox::union)
    }
}

/// Host environment owning containers, resize notifications and downloads.
///
/// Mounts and resize listeners come back as guards; the host entry is
/// released when the guard is released or dropped.
pub trait CanvasHost {
    type Canvas: Canvas;

    /// Resolves `container` and mounts a wrapper element into it.
    fn mount(&mut self, container: &str) -> ChartResult<Mount>;
    /// Current container width, `None` when the host cannot measure it.
    fn container_width(&self, mount: MountId) -> Option<f64>;
    fn create_canvas(&mut self, mount: MountId, spec: CanvasSpec) -> ChartResult<Self::Canvas>;
    fn set_visible(&mut self, mount: MountId, visible: bool);
    fn add_resize_listener(&mut self) -> Registration;
    fn offer_download(&mut self, file_name: &str, image: &ImageData) -> ChartResult<()>;
}
