use indexmap::IndexMap;
use serde_json::{Map, Value};

use crate::core::{Point, Scale, ScaleKind, ScaleOptions, ScaleValue};
use crate::error::{ChartError, ChartResult};
use crate::render::{Color, LayerKind, RectPrimitive, Shape};

use super::geometry::{AttributeRole, DataBucket, DrawContext, Geometry, MappedRecord, TooltipItem};

const DEFAULT_RADIUS: f64 = 4.0;
const DEFAULT_SNAP_RADIUS: f64 = 20.0;

const PALETTE: [(u8, u8, u8); 8] = [
    (0x18, 0x90, 0xFF),
    (0x2F, 0xC2, 0x5B),
    (0xFA, 0xCC, 0x14),
    (0x22, 0x32, 0x73),
    (0x85, 0x43, 0xE0),
    (0x13, 0xC2, 0xC2),
    (0x34, 0x36, 0xC7),
    (0xF0, 0x48, 0x64),
];

fn palette_color(index: usize) -> Color {
    let (r, g, b) = PALETTE[index % PALETTE.len()];
    Color::rgb(
        f64::from(r) / 255.0,
        f64::from(g) / 255.0,
        f64::from(b) / 255.0,
    )
}

/// Scatter mark: one square marker per record, optionally grouped by color.
#[derive(Debug, Clone)]
pub struct PointGeometry {
    x: Scale,
    y: Scale,
    color: Option<Scale>,
    records: Vec<Map<String, Value>>,
    radius: f64,
    snap_radius: f64,
    buckets: Vec<DataBucket>,
}

impl PointGeometry {
    #[must_use]
    pub fn new(x: Scale, y: Scale) -> Self {
        Self {
            x,
            y,
            color: None,
            records: Vec::new(),
            radius: DEFAULT_RADIUS,
            snap_radius: DEFAULT_SNAP_RADIUS,
            buckets: Vec::new(),
        }
    }

    #[must_use]
    pub fn color(mut self, scale: Scale) -> Self {
        self.color = Some(scale);
        self.infer_domains();
        self
    }

    #[must_use]
    pub fn data(mut self, records: Vec<Map<String, Value>>) -> Self {
        self.records = records;
        self.infer_domains();
        self
    }

    /// Loads records from JSON values; every value must be an object.
    pub fn with_json_records(self, records: Vec<Value>) -> ChartResult<Self> {
        let records = records
            .into_iter()
            .enumerate()
            .map(|(index, record)| match record {
                Value::Object(map) => Ok(map),
                other => Err(ChartError::InvalidData(format!(
                    "record {index} must be an object, got `{other}`"
                ))),
            })
            .collect::<ChartResult<Vec<_>>>()?;
        Ok(self.data(records))
    }

    #[must_use]
    pub fn with_radius(mut self, radius: f64) -> Self {
        if radius.is_finite() && radius > 0.0 {
            self.radius = radius;
        }
        self
    }

    /// Maximum pointer distance at which a record still counts as hit.
    #[must_use]
    pub fn with_snap_radius(mut self, snap_radius: f64) -> Self {
        if snap_radius.is_finite() && snap_radius >= 0.0 {
            self.snap_radius = snap_radius;
        }
        self
    }

    #[must_use]
    pub fn records(&self) -> &[Map<String, Value>] {
        &self.records
    }

    // Category scales without explicit values take their domain from the data.
    fn infer_domains(&mut self) {
        let records = &self.records;
        for scale in [Some(&mut self.x), Some(&mut self.y), self.color.as_mut()]
            .into_iter()
            .flatten()
        {
            if scale.kind != ScaleKind::Category || !scale.values.is_empty() {
                continue;
            }
            let Some(field) = scale.field.clone() else {
                continue;
            };
            for record in records {
                if let Some(value) = record.get(&field).and_then(ScaleValue::from_json) {
                    if !scale.values.contains(&value) {
                        scale.values.push(value);
                    }
                }
            }
        }
    }

    fn color_of(&self, value: Option<&ScaleValue>) -> Color {
        let index = match (&self.color, value) {
            (Some(scale), Some(value)) => scale
                .values
                .iter()
                .position(|candidate| candidate == value)
                .unwrap_or_default(),
            _ => 0,
        };
        palette_color(index)
    }

    fn visible(ctx: &DrawContext<'_>, scale: &Scale, record: &Map<String, Value>) -> bool {
        let Some(field) = scale.field() else {
            return true;
        };
        match record.get(field).and_then(ScaleValue::from_json) {
            Some(value) => ctx.is_visible(field, &value),
            None => true,
        }
    }
}

impl Geometry for PointGeometry {
    fn kind(&self) -> &str {
        "point"
    }

    fn scale(&self, role: AttributeRole) -> Option<&Scale> {
        match role {
            AttributeRole::X => Some(&self.x),
            AttributeRole::Y => Some(&self.y),
            AttributeRole::Color => self.color.as_ref(),
            AttributeRole::Shape | AttributeRole::Size | AttributeRole::Opacity => None,
        }
    }

    fn attribute_color(&self, role: AttributeRole, value: &ScaleValue) -> Option<Color> {
        match role {
            AttributeRole::Color => Some(self.color_of(Some(value))),
            _ => None,
        }
    }

    fn apply_scale_options(&mut self, options: &ScaleOptions) {
        self.x.apply_option(options);
        self.y.apply_option(options);
        if let Some(color) = self.color.as_mut() {
            color.apply_option(options);
        }
        self.infer_domains();
    }

    fn draw(&mut self, ctx: &mut DrawContext<'_>) -> ChartResult<()> {
        self.buckets.clear();
        let color_field = self
            .color
            .as_ref()
            .and_then(Scale::field)
            .map(str::to_owned);
        let mut grouped: IndexMap<Option<ScaleValue>, DataBucket> = IndexMap::new();

        for record in &self.records {
            let shared: &DrawContext<'_> = ctx;
            let scales = [Some(&self.x), Some(&self.y), self.color.as_ref()];
            if !scales
                .into_iter()
                .flatten()
                .all(|scale| Self::visible(shared, scale, record))
            {
                continue;
            }
            let value_of = |scale: &Scale| {
                scale
                    .field()
                    .and_then(|field| record.get(field))
                    .and_then(ScaleValue::from_json)
            };
            let (Some(x), Some(y)) = (value_of(&self.x), value_of(&self.y)) else {
                continue;
            };
            let (Some(nx), Some(ny)) = (self.x.normalize(&x), self.y.normalize(&y)) else {
                continue;
            };
            let point = ctx.coord().convert(nx, ny);
            if !point.x.is_finite() || !point.y.is_finite() {
                continue;
            }
            let group = color_field
                .as_deref()
                .and_then(|field| record.get(field))
                .and_then(ScaleValue::from_json);
            let fill = self.color_of(group.as_ref());
            ctx.add_shape(
                LayerKind::Middle,
                Shape::Rect(RectPrimitive::new(
                    point.x - self.radius,
                    point.y - self.radius,
                    self.radius * 2.0,
                    self.radius * 2.0,
                    fill,
                )),
            )?;
            grouped.entry(group).or_default().push(MappedRecord {
                point,
                origin: record.clone(),
            });
        }

        self.buckets = grouped.into_values().collect();
        Ok(())
    }

    fn data_buckets(&self) -> &[DataBucket] {
        &self.buckets
    }

    fn find_point(&self, point: Point, bucket: &DataBucket) -> Option<MappedRecord> {
        let limit = self.snap_radius * self.snap_radius;
        bucket
            .iter()
            .map(|record| (record.point.distance_squared(point), record))
            .filter(|(distance, _)| *distance <= limit)
            .min_by(|a, b| a.0.total_cmp(&b.0))
            .map(|(_, record)| record.clone())
    }

    fn tip_items(&self, record: &MappedRecord) -> Vec<TooltipItem> {
        let text = |scale: &Scale| {
            scale
                .field()
                .and_then(|field| record.value(field))
                .map(|value| value.to_string())
                .unwrap_or_default()
        };
        let group = self
            .color
            .as_ref()
            .and_then(Scale::field)
            .and_then(|field| record.value(field));
        let name = match &group {
            Some(value) => value.to_string(),
            None => self.y.title().to_owned(),
        };
        vec![TooltipItem {
            title: text(&self.x),
            name,
            value: text(&self.y),
            color: Some(self.color_of(group.as_ref())),
            point: record.point,
        }]
    }

    fn clear(&mut self) {
        self.buckets.clear();
    }
}
