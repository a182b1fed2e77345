//! Overlay coordinators driven by the chart once per render pass.

mod legend;
mod tooltip;

pub use legend::{
    CustomLegend, FieldLegendOptions, LegendController, LegendEntry, LegendItem, LegendKey,
    LegendOptions, LegendPosition,
};
pub use tooltip::{TooltipController, TooltipOptions, TooltipState};
