use serde::{Deserialize, Serialize};

use crate::core::{Coord, Point, Scale};
use crate::error::ChartResult;
use crate::render::{Color, LayerKind, LinePrimitive, Shape, TextHAlign, TextPrimitive};

use super::geometry::DrawContext;

/// Axis guide options shared from the chart into its views.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxesOptions {
    #[serde(default = "default_visible")]
    pub visible: bool,
    /// Gap between the axis line and its tick labels.
    #[serde(default = "default_label_offset")]
    pub label_offset: f64,
    #[serde(default = "default_font_size")]
    pub font_size: f64,
    #[serde(default = "default_axis_color")]
    pub color: Color,
}

fn default_visible() -> bool {
    true
}

fn default_label_offset() -> f64 {
    8.0
}

fn default_font_size() -> f64 {
    12.0
}

fn default_axis_color() -> Color {
    Color::rgba(0.0, 0.0, 0.0, 0.65)
}

impl Default for AxesOptions {
    fn default() -> Self {
        Self {
            visible: default_visible(),
            label_offset: default_label_offset(),
            font_size: default_font_size(),
            color: default_axis_color(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AxisEdge {
    Bottom,
    Left,
}

/// Draws the x/y guides of a view into the back layer.
///
/// Labels sit outside the plot range, which is what pushes auto padding on
/// the left and bottom edges.
pub(super) fn draw_axes(
    ctx: &mut DrawContext<'_>,
    x: Option<&Scale>,
    y: Option<&Scale>,
    options: &AxesOptions,
) -> ChartResult<()> {
    if !options.visible {
        return Ok(());
    }
    let transposed = ctx.coord().is_transposed();
    let (x_edge, y_edge) = if transposed {
        (AxisEdge::Left, AxisEdge::Bottom)
    } else {
        (AxisEdge::Bottom, AxisEdge::Left)
    };
    if let Some(scale) = x {
        draw_axis(ctx, scale, x_edge, options, |coord, t| coord.convert(t, 0.0))?;
    }
    if let Some(scale) = y {
        draw_axis(ctx, scale, y_edge, options, |coord, t| coord.convert(0.0, t))?;
    }
    Ok(())
}

fn draw_axis(
    ctx: &mut DrawContext<'_>,
    scale: &Scale,
    edge: AxisEdge,
    options: &AxesOptions,
    project: impl Fn(Coord, f64) -> Point,
) -> ChartResult<()> {
    let range = ctx.coord().range();
    let line = match edge {
        AxisEdge::Bottom => LinePrimitive::new(
            range.min_x(),
            range.max_y(),
            range.max_x(),
            range.max_y(),
            1.0,
            options.color,
        ),
        AxisEdge::Left => LinePrimitive::new(
            range.min_x(),
            range.min_y(),
            range.min_x(),
            range.max_y(),
            1.0,
            options.color,
        ),
    };
    ctx.add_shape(LayerKind::Back, Shape::Line(line))?;

    for tick in scale.ticks() {
        let Some(t) = scale.normalize(&tick) else {
            continue;
        };
        let anchor = project(ctx.coord(), t);
        let label = match edge {
            AxisEdge::Bottom => TextPrimitive::new(
                tick.to_string(),
                anchor.x,
                anchor.y + options.label_offset,
                options.font_size,
                options.color,
                TextHAlign::Center,
            ),
            AxisEdge::Left => TextPrimitive::new(
                tick.to_string(),
                anchor.x - options.label_offset,
                anchor.y - options.font_size / 2.0,
                options.font_size,
                options.color,
                TextHAlign::Right,
            ),
        };
        ctx.add_shape(LayerKind::Back, Shape::Text(label))?;
    }
    Ok(())
}
