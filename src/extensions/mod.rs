//! Optional hooks that observe the chart without touching its internals.

mod plugins;

pub use plugins::{ChartEvent, ChartPlugin, PluginContext};
