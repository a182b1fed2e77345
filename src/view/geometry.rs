use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::{Coord, Point, Scale, ScaleOptions, ScaleValue, Size};
use crate::error::ChartResult;
use crate::render::{Canvas, Color, LayerKind, LayerStack, Shape, ShapeId};

/// Visual channel a scale is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AttributeRole {
    X,
    Y,
    Color,
    Shape,
    Size,
    Opacity,
}

impl AttributeRole {
    /// Roles that may produce a legend, in discovery order.
    pub const LEGEND_ROLES: [Self; 4] = [Self::Color, Self::Shape, Self::Size, Self::Opacity];
}

/// One data record after position mapping.
#[derive(Debug, Clone, PartialEq)]
pub struct MappedRecord {
    pub point: Point,
    pub origin: serde_json::Map<String, serde_json::Value>,
}

impl MappedRecord {
    #[must_use]
    pub fn value(&self, field: &str) -> Option<ScaleValue> {
        self.origin.get(field).and_then(ScaleValue::from_json)
    }
}

/// Records of one group (series) drawn by a geometry.
pub type DataBucket = Vec<MappedRecord>;

/// One row of tooltip content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TooltipItem {
    pub title: String,
    pub name: String,
    pub value: String,
    pub color: Option<Color>,
    pub point: Point,
}

/// Predicate deciding whether a domain value is currently visible.
pub type ValueFilter = Box<dyn Fn(&ScaleValue) -> bool>;

/// Per-field data filters owned by a view.
#[derive(Default)]
pub struct Filters {
    by_field: IndexMap<String, ValueFilter>,
}

impl fmt::Debug for Filters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.by_field.keys()).finish()
    }
}

impl Filters {
    pub fn insert(&mut self, field: impl Into<String>, filter: ValueFilter) {
        self.by_field.insert(field.into(), filter);
    }

    pub fn remove(&mut self, field: &str) -> bool {
        self.by_field.shift_remove(field).is_some()
    }

    pub fn clear(&mut self) {
        self.by_field.clear();
    }

    #[must_use]
    pub fn accepts(&self, field: &str, value: &ScaleValue) -> bool {
        self.by_field.get(field).is_none_or(|filter| filter(value))
    }
}

/// Drawing access handed to a geometry for one pass.
///
/// Every shape added through the context is recorded as owned by the view
/// being drawn, so destroying the view removes exactly those shapes.
pub struct DrawContext<'a> {
    canvas: &'a mut dyn Canvas,
    layers: &'a LayerStack,
    coord: Coord,
    filters: &'a Filters,
    owned: &'a mut Vec<ShapeId>,
}

impl<'a> DrawContext<'a> {
    pub(crate) fn new(
        canvas: &'a mut dyn Canvas,
        layers: &'a LayerStack,
        coord: Coord,
        filters: &'a Filters,
        owned: &'a mut Vec<ShapeId>,
    ) -> Self {
        Self {
            canvas,
            layers,
            coord,
            filters,
            owned,
        }
    }

    #[must_use]
    pub fn coord(&self) -> Coord {
        self.coord
    }

    #[must_use]
    pub fn is_visible(&self, field: &str, value: &ScaleValue) -> bool {
        self.filters.accepts(field, value)
    }

    #[must_use]
    pub fn measure_text(&self, text: &str, font_size_px: f64) -> Size {
        self.canvas.measure_text(text, font_size_px)
    }

    pub fn add_shape(&mut self, layer: LayerKind, shape: Shape) -> ChartResult<ShapeId> {
        let id = self.canvas.add_shape(self.layers.group(layer), shape)?;
        self.owned.push(id);
        Ok(id)
    }
}

/// Geometry (mark) collaborator attached to a view.
pub trait Geometry: fmt::Debug {
    fn kind(&self) -> &str;

    /// Scale bound to `role`, if the geometry maps that channel.
    fn scale(&self, role: AttributeRole) -> Option<&Scale>;

    /// Visual color the `role` attribute assigns to `value`, used for legend markers.
    fn attribute_color(&self, _role: AttributeRole, _value: &ScaleValue) -> Option<Color> {
        None
    }

    fn apply_scale_options(&mut self, options: &ScaleOptions);

    fn draw(&mut self, ctx: &mut DrawContext<'_>) -> ChartResult<()>;

    /// Mapped data from the last draw, one bucket per group.
    fn data_buckets(&self) -> &[DataBucket];

    /// Nearest record of `bucket` to `point`, `None` when nothing is close enough.
    fn find_point(&self, point: Point, bucket: &DataBucket) -> Option<MappedRecord>;

    fn tip_items(&self, record: &MappedRecord) -> Vec<TooltipItem>;

    /// Drops mapped data from the last draw.
    fn clear(&mut self);
}

#[cfg(test)]
mod tests {
    use super::Filters;
    use crate::core::ScaleValue;

    #[test]
    fn filters_accept_unfiltered_fields() {
        let mut filters = Filters::default();
        assert!(filters.accepts("genre", &"a".into()));

        filters.insert("genre", Box::new(|value: &ScaleValue| *value != ScaleValue::from("a")));
        assert!(!filters.accepts("genre", &"a".into()));
        assert!(filters.accepts("genre", &"b".into()));
        assert!(filters.remove("genre"));
        assert!(filters.accepts("genre", &"a".into()));
    }
}
