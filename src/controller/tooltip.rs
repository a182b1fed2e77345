use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::{ContentRect, Point};
use crate::view::{TooltipItem, ViewScope};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TooltipOptions {
    /// Reports items from every geometry near the point, not just the nearest.
    #[serde(default = "default_shared")]
    pub shared: bool,
    /// Optional cap on the distance between the pointer and a reported item.
    #[serde(default)]
    pub snap_radius: Option<f64>,
}

fn default_shared() -> bool {
    true
}

impl Default for TooltipOptions {
    fn default() -> Self {
        Self {
            shared: default_shared(),
            snap_radius: None,
        }
    }
}

/// Tooltip currently on display.
#[derive(Debug, Clone, PartialEq)]
pub struct TooltipState {
    pub point: Point,
    pub items: Vec<TooltipItem>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TooltipController {
    options: TooltipOptions,
    plot_range: ContentRect,
    armed: bool,
    shown: Option<TooltipState>,
}

impl TooltipController {
    #[must_use]
    pub fn new(options: TooltipOptions, plot_range: ContentRect) -> Self {
        Self {
            options,
            plot_range,
            armed: false,
            shown: None,
        }
    }

    #[must_use]
    pub fn options(&self) -> TooltipOptions {
        self.options
    }

    pub fn set_options(&mut self, options: TooltipOptions) {
        self.options = options;
    }

    pub fn set_plot_range(&mut self, plot_range: ContentRect) {
        self.plot_range = plot_range;
    }

    #[must_use]
    pub fn plot_range(&self) -> ContentRect {
        self.plot_range
    }

    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.armed
    }

    #[must_use]
    pub fn shown(&self) -> Option<&TooltipState> {
        self.shown.as_ref()
    }

    /// Arms hit-testing for the current render pass.
    pub fn render_tooltip(&mut self) {
        self.armed = true;
    }

    /// Tooltip rows for `point` across `views`, without showing anything.
    #[must_use]
    pub fn collect_items(&self, point: Point, views: &[&dyn ViewScope]) -> Vec<TooltipItem> {
        let mut items: Vec<TooltipItem> = views
            .iter()
            .flat_map(|view| view.get_tip_items(point))
            .collect();
        if let Some(radius) = self.options.snap_radius {
            let limit = radius * radius;
            items.retain(|item| item.point.distance_squared(point) <= limit);
        }
        if !self.options.shared {
            let nearest = items
                .iter()
                .map(|item| item.point)
                .min_by(|a, b| a.distance_squared(point).total_cmp(&b.distance_squared(point)));
            if let Some(nearest) = nearest {
                items.retain(|item| item.point == nearest);
            }
        }
        items
    }

    /// Shows the tooltip for `point`; returns `true` when something is shown.
    ///
    /// An empty view set, an unarmed controller or a point with no nearby
    /// data leave nothing on display.
    pub fn show_tooltip(&mut self, point: Point, views: &[&dyn ViewScope]) -> bool {
        if !self.armed || views.is_empty() {
            return false;
        }
        let items = self.collect_items(point, views);
        if items.is_empty() {
            self.hide_tooltip();
            return false;
        }
        trace!(x = point.x, y = point.y, items = items.len(), "tooltip shown");
        self.shown = Some(TooltipState { point, items });
        true
    }

    pub fn hide_tooltip(&mut self) {
        self.shown = None;
    }

    /// Resets display and arming; options are kept.
    pub fn clear(&mut self) {
        self.shown = None;
        self.armed = false;
    }
}
