use std::fmt;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::trace;

use crate::core::{ContentRect, Coord, CoordOptions, Point, ScaleOptions, ScaleValue};
use crate::error::ChartResult;
use crate::render::{Canvas, LayerStack, ShapeId};

use super::axis::{AxesOptions, draw_axes};
use super::geometry::{
    AttributeRole, DataBucket, DrawContext, Filters, Geometry, MappedRecord, TooltipItem,
};

/// Identity of a view inside one chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ViewId {
    Root,
    Child(u32),
}

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Root => f.write_str("chart"),
            Self::Child(index) => write!(f, "view{index}"),
        }
    }
}

/// Options a child view snapshots from the chart at creation.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ViewOptions {
    #[serde(default)]
    pub scales: ScaleOptions,
    #[serde(default)]
    pub coord: CoordOptions,
    #[serde(default)]
    pub axes: AxesOptions,
}

/// Child view creation request.
///
/// `start`/`end` are fractions of the chart content rect measured from its
/// top-left corner. Option overrides replace the snapshotted chart value for
/// that key.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewConfig {
    pub start: (f64, f64),
    pub end: (f64, f64),
    pub scales: Option<ScaleOptions>,
    pub coord: Option<CoordOptions>,
    pub axes: Option<AxesOptions>,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            start: (0.0, 0.0),
            end: (1.0, 1.0),
            scales: None,
            coord: None,
            axes: None,
        }
    }
}

impl ViewConfig {
    #[must_use]
    pub fn region(mut self, start: (f64, f64), end: (f64, f64)) -> Self {
        self.start = start;
        self.end = end;
        self
    }

    #[must_use]
    pub fn with_scales(mut self, scales: ScaleOptions) -> Self {
        self.scales = Some(scales);
        self
    }

    #[must_use]
    pub fn with_coord(mut self, coord: CoordOptions) -> Self {
        self.coord = Some(coord);
        self
    }

    #[must_use]
    pub fn with_axes(mut self, axes: AxesOptions) -> Self {
        self.axes = Some(axes);
        self
    }
}

/// Capability shared by the chart root and its child views.
///
/// Tooltip and legend aggregation only go through this trait, so the
/// orchestrator can walk its registry without views calling each other.
pub trait ViewScope {
    fn view_id(&self) -> ViewId;
    fn plot_range(&self) -> ContentRect;
    fn geometries(&self) -> &[Box<dyn Geometry>];
    fn get_filtered_values(&self, field: &str) -> Vec<ScaleValue>;

    #[must_use]
    fn contains_point(&self, point: Point) -> bool {
        self.plot_range().contains(point)
    }

    /// Nearest record of `bucket` across every geometry.
    fn find_point(&self, point: Point, bucket: &DataBucket) -> Option<MappedRecord> {
        self.geometries()
            .iter()
            .filter_map(|geometry| geometry.find_point(point, bucket))
            .min_by(|a, b| {
                a.point
                    .distance_squared(point)
                    .total_cmp(&b.point.distance_squared(point))
            })
    }

    /// Tooltip rows for `point`, geometry by geometry and bucket by bucket.
    fn get_tip_items(&self, point: Point) -> Vec<TooltipItem> {
        let mut items = Vec::new();
        for geometry in self.geometries() {
            for bucket in geometry.data_buckets() {
                if let Some(record) = geometry.find_point(point, bucket) {
                    items.extend(geometry.tip_items(&record));
                }
            }
        }
        items
    }
}

/// Data/coordinate scope drawing into the shared layer stack.
#[derive(Debug)]
pub struct View {
    id: ViewId,
    parent: Option<ViewId>,
    options: ViewOptions,
    start: (f64, f64),
    end: (f64, f64),
    plot_range: ContentRect,
    geometries: Vec<Box<dyn Geometry>>,
    filters: Filters,
    shapes: Vec<ShapeId>,
}

impl View {
    pub(crate) fn root(options: ViewOptions, plot_range: ContentRect) -> Self {
        Self {
            id: ViewId::Root,
            parent: None,
            options,
            start: (0.0, 0.0),
            end: (1.0, 1.0),
            plot_range,
            geometries: Vec::new(),
            filters: Filters::default(),
            shapes: Vec::new(),
        }
    }

    pub(crate) fn child(
        id: ViewId,
        parent: ViewId,
        options: ViewOptions,
        config: &ViewConfig,
        parent_range: ContentRect,
    ) -> Self {
        Self {
            id,
            parent: Some(parent),
            options,
            start: config.start,
            end: config.end,
            plot_range: parent_range.subset(config.start, config.end),
            geometries: Vec::new(),
            filters: Filters::default(),
            shapes: Vec::new(),
        }
    }

    #[must_use]
    pub fn id(&self) -> ViewId {
        self.id
    }

    #[must_use]
    pub fn parent(&self) -> Option<ViewId> {
        self.parent
    }

    #[must_use]
    pub fn options(&self) -> &ViewOptions {
        &self.options
    }

    /// Mutable options; geometries attached afterwards see the change.
    pub fn options_mut(&mut self) -> &mut ViewOptions {
        &mut self.options
    }

    /// Shapes this view currently owns in the layer stack.
    #[must_use]
    pub fn shapes(&self) -> &[ShapeId] {
        &self.shapes
    }

    pub fn attach_geometry(&mut self, mut geometry: impl Geometry + 'static) -> &mut Self {
        geometry.apply_scale_options(&self.options.scales);
        self.geometries.push(Box::new(geometry));
        self
    }

    /// Hides records whose `field` value fails `predicate`.
    pub fn filter(
        &mut self,
        field: impl Into<String>,
        predicate: impl Fn(&ScaleValue) -> bool + 'static,
    ) -> &mut Self {
        self.filters.insert(field, Box::new(predicate));
        self
    }

    pub fn remove_filter(&mut self, field: &str) -> bool {
        self.filters.remove(field)
    }

    pub(crate) fn update_plot_range(&mut self, parent_range: ContentRect) {
        self.plot_range = match self.id {
            ViewId::Root => parent_range,
            ViewId::Child(_) => parent_range.subset(self.start, self.end),
        };
    }

    /// Draws axes then every geometry; shapes are recorded as owned by this view.
    pub(crate) fn draw(&mut self, canvas: &mut dyn Canvas, layers: &LayerStack) -> ChartResult<()> {
        let coord = Coord::new(self.plot_range, self.options.coord);
        let mut owned = std::mem::take(&mut self.shapes);
        let result = (|| -> ChartResult<()> {
            let mut ctx = DrawContext::new(canvas, layers, coord, &self.filters, &mut owned);
            if let Some(first) = self.geometries.first() {
                draw_axes(
                    &mut ctx,
                    first.scale(AttributeRole::X),
                    first.scale(AttributeRole::Y),
                    &self.options.axes,
                )?;
            }
            for geometry in &mut self.geometries {
                geometry.draw(&mut ctx)?;
            }
            Ok(())
        })();
        self.shapes = owned;
        trace!(view = %self.id, shapes = self.shapes.len(), "view drawn");
        result
    }

    /// Removes drawn shapes and mapped data, keeping geometries attached.
    pub(crate) fn clear_inner(&mut self, canvas: &mut dyn Canvas) {
        for shape in self.shapes.drain(..) {
            canvas.remove_shape(shape);
        }
        for geometry in &mut self.geometries {
            geometry.clear();
        }
    }

    /// Drops geometries and filters too; the view stays registered.
    pub(crate) fn clear(&mut self, canvas: &mut dyn Canvas) {
        self.clear_inner(canvas);
        self.geometries.clear();
        self.filters.clear();
    }

    /// Detaches every owned shape and releases geometries and scales.
    pub(crate) fn destroy(mut self, canvas: &mut dyn Canvas) {
        self.clear(canvas);
        trace!(view = %self.id, "view destroyed");
    }
}

impl ViewScope for View {
    fn view_id(&self) -> ViewId {
        self.id
    }

    fn plot_range(&self) -> ContentRect {
        self.plot_range
    }

    fn geometries(&self) -> &[Box<dyn Geometry>] {
        &self.geometries
    }

    /// Domain of the first scale bound to `field`, minus filtered-out values.
    fn get_filtered_values(&self, field: &str) -> Vec<ScaleValue> {
        let scale = self.geometries.iter().find_map(|geometry| {
            [
                AttributeRole::X,
                AttributeRole::Y,
                AttributeRole::Color,
                AttributeRole::Shape,
                AttributeRole::Size,
                AttributeRole::Opacity,
            ]
            .into_iter()
            .filter_map(|role| geometry.scale(role))
            .find(|scale| scale.field() == Some(field))
        });
        let Some(scale) = scale else {
            return Vec::new();
        };
        let values: SmallVec<[ScaleValue; 16]> = scale
            .domain_values()
            .into_iter()
            .filter(|value| self.filters.accepts(field, value))
            .collect();
        values.into_vec()
    }
}
