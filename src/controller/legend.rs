use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::core::{ContentRect, Scale, ScaleKind, ScaleValue};
use crate::error::ChartResult;
use crate::render::{
    Canvas, Color, LayerKind, LayerStack, RectPrimitive, Shape, ShapeId, TextHAlign, TextPrimitive,
};
use crate::view::{AttributeRole, Geometry};

const MARKER_SIZE: f64 = 8.0;
const MARKER_GAP: f64 = 4.0;
const FALLBACK_MARKER_COLOR: Color = Color::rgba(0.0, 0.0, 0.0, 0.45);
const LABEL_COLOR: Color = Color::rgba(0.0, 0.0, 0.0, 0.65);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LegendPosition {
    Top,
    Right,
    #[default]
    Bottom,
    Left,
}

impl LegendPosition {
    const ALL: [Self; 4] = [Self::Top, Self::Right, Self::Bottom, Self::Left];

    fn is_horizontal(self) -> bool {
        matches!(self, Self::Top | Self::Bottom)
    }
}

/// One legend row: marker color, label and whether the value is currently shown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegendItem {
    pub label: String,
    pub color: Color,
    #[serde(default = "default_checked")]
    pub checked: bool,
}

fn default_checked() -> bool {
    true
}

/// Caller-supplied legend replacing scale discovery.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CustomLegend {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub items: Vec<LegendItem>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FieldLegendOptions {
    #[serde(default)]
    pub hidden: bool,
    #[serde(default)]
    pub position: Option<LegendPosition>,
    #[serde(default)]
    pub title: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegendOptions {
    #[serde(default)]
    pub position: LegendPosition,
    /// Distance between the plot range and the first legend box.
    #[serde(default = "default_offset")]
    pub offset: f64,
    #[serde(default = "default_item_gap")]
    pub item_gap: f64,
    #[serde(default = "default_font_size")]
    pub font_size: f64,
    #[serde(default = "default_show_title")]
    pub show_title: bool,
    #[serde(default)]
    pub custom: Option<CustomLegend>,
    #[serde(default)]
    pub fields: IndexMap<String, FieldLegendOptions>,
}

fn default_offset() -> f64 {
    30.0
}

fn default_item_gap() -> f64 {
    16.0
}

fn default_font_size() -> f64 {
    12.0
}

fn default_show_title() -> bool {
    true
}

impl Default for LegendOptions {
    fn default() -> Self {
        Self {
            position: LegendPosition::default(),
            offset: default_offset(),
            item_gap: default_item_gap(),
            font_size: default_font_size(),
            show_title: default_show_title(),
            custom: None,
            fields: IndexMap::new(),
        }
    }
}

/// Equivalence class of a scale for legend purposes.
///
/// Values are kept sorted, so two scales listing the same domain in a
/// different order map to the same key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LegendKey {
    kind: ScaleKind,
    field: String,
    values: SmallVec<[ScaleValue; 8]>,
}

impl LegendKey {
    /// `None` for scales that can never produce a legend.
    #[must_use]
    pub fn for_scale(scale: &Scale) -> Option<Self> {
        if !scale.is_legend_eligible() {
            return None;
        }
        let mut values: SmallVec<[ScaleValue; 8]> = scale.domain_values().into_iter().collect();
        values.sort();
        Some(Self {
            kind: scale.kind,
            field: scale.field()?.to_owned(),
            values,
        })
    }
}

/// A registered legend and the shapes of its last alignment.
#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    key: Option<LegendKey>,
    title: Option<String>,
    position: LegendPosition,
    items: Vec<LegendItem>,
    shapes: Vec<ShapeId>,
}

impl LegendEntry {
    #[must_use]
    pub fn field(&self) -> Option<&str> {
        self.key.as_ref().map(|key| key.field.as_str())
    }

    #[must_use]
    pub fn is_custom(&self) -> bool {
        self.key.is_none()
    }

    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    #[must_use]
    pub fn position(&self) -> LegendPosition {
        self.position
    }

    #[must_use]
    pub fn items(&self) -> &[LegendItem] {
        &self.items
    }
}

/// Legend lifecycle for one chart: registration, de-duplication and layout.
#[derive(Debug, Clone, PartialEq)]
pub struct LegendController {
    options: LegendOptions,
    plot_range: ContentRect,
    legends: Vec<LegendEntry>,
}

impl LegendController {
    #[must_use]
    pub fn new(options: LegendOptions, plot_range: ContentRect) -> Self {
        Self {
            options,
            plot_range,
            legends: Vec::new(),
        }
    }

    #[must_use]
    pub fn options(&self) -> &LegendOptions {
        &self.options
    }

    pub fn set_options(&mut self, options: LegendOptions) {
        self.options = options;
    }

    #[must_use]
    pub fn plot_range(&self) -> ContentRect {
        self.plot_range
    }

    pub fn set_plot_range(&mut self, plot_range: ContentRect) {
        self.plot_range = plot_range;
    }

    #[must_use]
    pub fn legends(&self) -> &[LegendEntry] {
        &self.legends
    }

    #[must_use]
    pub fn legend_count(&self) -> usize {
        self.legends.len()
    }

    /// Registers a legend for `scale`; returns `false` when it was skipped.
    ///
    /// Scales without a field, identity scales, hidden fields and scales
    /// equivalent to an already registered one are skipped silently.
    pub fn add_legend(
        &mut self,
        scale: &Scale,
        role: AttributeRole,
        geometry: &dyn Geometry,
        filtered_values: &[ScaleValue],
    ) -> bool {
        let Some(key) = LegendKey::for_scale(scale) else {
            trace!(kind = ?scale.kind, "scale is not legend eligible");
            return false;
        };
        let field_options = self
            .options
            .fields
            .get(&key.field)
            .cloned()
            .unwrap_or_default();
        if field_options.hidden {
            trace!(field = %key.field, "legend hidden for field");
            return false;
        }
        if self.legends.iter().any(|legend| legend.key.as_ref() == Some(&key)) {
            debug!(field = %key.field, "equivalent legend already registered");
            return false;
        }

        let items = scale
            .domain_values()
            .into_iter()
            .map(|value| LegendItem {
                label: value.to_string(),
                color: geometry
                    .attribute_color(role, &value)
                    .unwrap_or(FALLBACK_MARKER_COLOR),
                checked: filtered_values.contains(&value),
            })
            .collect();
        let title = field_options
            .title
            .or_else(|| Some(scale.title().to_owned()));
        self.legends.push(LegendEntry {
            key: Some(key),
            title,
            position: field_options.position.unwrap_or(self.options.position),
            items,
            shapes: Vec::new(),
        });
        true
    }

    /// Registers the caller-supplied legend, if any.
    pub fn add_custom_legend(&mut self) -> bool {
        let Some(custom) = self.options.custom.clone() else {
            return false;
        };
        self.legends.push(LegendEntry {
            key: None,
            title: custom.title,
            position: self.options.position,
            items: custom.items,
            shapes: Vec::new(),
        });
        true
    }

    /// Positions every registered legend around the plot range.
    ///
    /// Legends sharing a side are stacked away from the plot, so boxes never
    /// overlap each other. Shapes go to the front layer.
    pub fn align_legends(
        &mut self,
        canvas: &mut dyn Canvas,
        layers: &LayerStack,
    ) -> ChartResult<()> {
        self.remove_shapes(canvas);
        let group = layers.group(LayerKind::Front);
        let options = &self.options;
        let range = self.plot_range;
        let font = options.font_size;
        let row_height = font.max(MARKER_SIZE);

        for position in LegendPosition::ALL {
            let mut cursor = options.offset;
            for legend in self.legends.iter_mut().filter(|l| l.position == position) {
                let flow = legend_flow(legend, options, canvas);
                if flow.is_empty() {
                    continue;
                }

                let gaps = options.item_gap * (flow.len() - 1) as f64;
                let (width, height) = if position.is_horizontal() {
                    (flow.iter().map(|entry| entry.advance).sum::<f64>() + gaps, row_height)
                } else {
                    let width = flow.iter().map(|entry| entry.advance).fold(0.0, f64::max);
                    (width, row_height * flow.len() as f64 + gaps)
                };
                let center_x = range.center_x() - width / 2.0;
                let (mut x, mut y) = match position {
                    LegendPosition::Bottom => (center_x, range.max_y() + cursor),
                    LegendPosition::Top => (center_x, range.min_y() - cursor - height),
                    LegendPosition::Right => (range.max_x() + cursor, range.min_y()),
                    LegendPosition::Left => (range.min_x() - cursor - width, range.min_y()),
                };
                let extent = if position.is_horizontal() {
                    height
                } else {
                    width
                };
                cursor += options.item_gap + extent;

                for entry in flow {
                    let text_x = match entry.marker {
                        Some(color) => {
                            let marker_y = y + (row_height - MARKER_SIZE) / 2.0;
                            let marker =
                                RectPrimitive::new(x, marker_y, MARKER_SIZE, MARKER_SIZE, color);
                            let shape = canvas.add_shape(group, Shape::Rect(marker))?;
                            legend.shapes.push(shape);
                            x + MARKER_SIZE + MARKER_GAP
                        }
                        None => x,
                    };
                    legend.shapes.push(canvas.add_shape(
                        group,
                        Shape::Text(TextPrimitive::new(
                            entry.label,
                            text_x,
                            y + (row_height - font) / 2.0,
                            font,
                            LABEL_COLOR,
                            TextHAlign::Left,
                        )),
                    )?);
                    if position.is_horizontal() {
                        x += entry.advance + options.item_gap;
                    } else {
                        y += row_height + options.item_gap;
                    }
                }
            }
        }
        trace!(legends = self.legends.len(), "legends aligned");
        Ok(())
    }

    /// Removes drawn legends; the controller stays usable.
    pub fn clear(&mut self, canvas: &mut dyn Canvas) {
        self.remove_shapes(canvas);
        self.legends.clear();
    }

    fn remove_shapes(&mut self, canvas: &mut dyn Canvas) {
        for legend in &mut self.legends {
            for shape in legend.shapes.drain(..) {
                canvas.remove_shape(shape);
            }
        }
    }
}

struct FlowEntry {
    marker: Option<Color>,
    label: String,
    advance: f64,
}

/// Title (when shown) followed by one marker and label per item.
fn legend_flow(
    legend: &LegendEntry,
    options: &LegendOptions,
    canvas: &dyn Canvas,
) -> Vec<FlowEntry> {
    let font = options.font_size;
    let title = legend.title.as_deref().filter(|_| options.show_title);
    let mut flow: Vec<FlowEntry> = title
        .map(|title| FlowEntry {
            marker: None,
            label: title.to_owned(),
            advance: canvas.measure_text(title, font).width,
        })
        .into_iter()
        .collect();
    flow.extend(legend.items.iter().map(|item| FlowEntry {
        marker: Some(item.color),
        label: item.label.clone(),
        advance: MARKER_SIZE + MARKER_GAP + canvas.measure_text(&item.label, font).width,
    }));
    flow
}
