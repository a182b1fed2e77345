use crate::controller::{FieldLegendOptions, TooltipState};
use crate::core::Point;
use crate::render::CanvasHost;
use crate::view::TooltipItem;

use super::view_registry::scopes_at;
use super::{Chart, LegendSetting, TooltipSetting};

impl<H: CanvasHost> Chart<H> {
    /// Updates legend options; they apply from the next render.
    pub fn legend(&mut self, setting: LegendSetting) -> &mut Self {
        let legend = &mut self.config.options.legend;
        match setting {
            LegendSetting::Hide => *legend = None,
            LegendSetting::Show(mut options) => {
                // Per-field settings made earlier survive unless overridden.
                if let Some(previous) = legend.take() {
                    let incoming = std::mem::replace(&mut options.fields, previous.fields);
                    options.fields.extend(incoming);
                }
                *legend = Some(options);
            }
            LegendSetting::Field { field, config } => {
                let config = config.unwrap_or(FieldLegendOptions {
                    hidden: true,
                    ..FieldLegendOptions::default()
                });
                legend
                    .get_or_insert_with(Default::default)
                    .fields
                    .insert(field, config);
            }
        }
        self
    }

    pub fn tooltip(&mut self, setting: TooltipSetting) -> &mut Self {
        match setting {
            TooltipSetting::Hide => {
                self.config.options.tooltip = None;
                self.tooltip.clear();
            }
            TooltipSetting::Show(options) => self.config.options.tooltip = Some(options),
        }
        self
    }

    /// Shows the tooltip for a canvas point; `false` when nothing is near.
    pub fn show_tooltip(&mut self, point: Point) -> bool {
        if self.config.options.tooltip.is_none() {
            return false;
        }
        let scopes = scopes_at(&self.root, &self.views, point);
        self.tooltip.show_tooltip(point, &scopes)
    }

    pub fn hide_tooltip(&mut self) {
        self.tooltip.hide_tooltip();
    }

    #[must_use]
    pub fn shown_tooltip(&self) -> Option<&TooltipState> {
        self.tooltip.shown()
    }

    /// Tooltip rows for `point`; empty when no geometry is near.
    #[must_use]
    pub fn get_tooltip_items(&self, point: Point) -> Vec<TooltipItem> {
        let scopes = scopes_at(&self.root, &self.views, point);
        self.tooltip.collect_items(point, &scopes)
    }
}
