mod chart;
mod chart_config;
mod chart_init;
mod export;
mod lifecycle;
mod plugin_dispatch;
mod plugin_registry;
mod render_coordinator;
mod resize_debounce;
mod size_controller;
mod tooltip_api;
mod view_registry;

pub use chart::{Chart, ChartState};
pub use chart_config::{ChartConfig, ChartOptions, LegendSetting, TooltipSetting};
pub use resize_debounce::ResizeDebouncer;
