use crate::core::{ContentRect, Padding, Size};
use crate::error::ChartResult;
use crate::render::{BackgroundStyle, Canvas, GroupId, RectPrimitive, Shape, ShapeId};

const BACKDROP_Z_INDEX: i32 = 0;

/// Padded plot area plus the two background shapes behind every layer.
///
/// `set_padding` only records the new value; `repaint` recomputes the content
/// rectangle and moves the backgrounds, so callers can batch updates.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotRegion {
    padding: Padding,
    background: BackgroundStyle,
    plot_background: BackgroundStyle,
    content_rect: ContentRect,
    backdrop: GroupId,
    background_shape: ShapeId,
    plot_background_shape: ShapeId,
}

impl PlotRegion {
    pub fn create(
        canvas: &mut dyn Canvas,
        padding: Padding,
        background: BackgroundStyle,
        plot_background: BackgroundStyle,
    ) -> ChartResult<Self> {
        let size = canvas.size();
        let content_rect = Self::compute_content_rect(&padding, size);
        let backdrop = canvas.add_group(BACKDROP_Z_INDEX)?;
        let background_shape =
            canvas.add_shape(backdrop, background_shape(background, size))?;
        let plot_background_shape =
            canvas.add_shape(backdrop, plot_background_shape(plot_background, content_rect))?;

        Ok(Self {
            padding,
            background,
            plot_background,
            content_rect,
            backdrop,
            background_shape,
            plot_background_shape,
        })
    }

    /// Content rectangle for `padding` on a surface of `size`.
    ///
    /// Unresolved auto edges count as zero and the result is clamped so it
    /// never leaves the canvas, even when padding exceeds the surface.
    #[must_use]
    pub fn compute_content_rect(padding: &Padding, size: Size) -> ContentRect {
        let [top, right, bottom, left] = padding.lengths();
        let width = size.width.max(0.0);
        let height = size.height.max(0.0);
        let min_x = left.min(width);
        let max_x = (width - right).clamp(min_x, width);
        let min_y = top.min(height);
        let max_y = (height - bottom).clamp(min_y, height);
        ContentRect::from_edges(min_x, min_y, max_x, max_y)
    }

    #[must_use]
    pub fn padding(&self) -> Padding {
        self.padding
    }

    pub fn set_padding(&mut self, padding: Padding) {
        self.padding = padding;
    }

    #[must_use]
    pub fn content_rect(&self) -> ContentRect {
        self.content_rect
    }

    #[must_use]
    pub fn backdrop(&self) -> GroupId {
        self.backdrop
    }

    pub fn repaint(&mut self, canvas: &mut dyn Canvas) -> ChartResult<()> {
        let size = canvas.size();
        self.content_rect = Self::compute_content_rect(&self.padding, size);
        canvas.update_shape(
            self.background_shape,
            background_shape(self.background, size),
        )?;
        canvas.update_shape(
            self.plot_background_shape,
            plot_background_shape(self.plot_background, self.content_rect),
        )
    }
}

fn background_shape(style: BackgroundStyle, size: Size) -> Shape {
    Shape::Rect(RectPrimitive::new(
        0.0,
        0.0,
        size.width,
        size.height,
        style.fill,
    ))
}

fn plot_background_shape(style: BackgroundStyle, rect: ContentRect) -> Shape {
    Shape::Rect(RectPrimitive::new(
        rect.min_x(),
        rect.min_y(),
        rect.width(),
        rect.height(),
        style.fill,
    ))
}
