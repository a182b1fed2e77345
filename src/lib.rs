//! chart-stage: orchestration and auto-layout core for chart surfaces.
//!
//! The crate owns the plot region, the three drawing layers, the view
//! hierarchy and the legend/tooltip coordinators. Canvas and DOM concerns are
//! reached through the [`render::CanvasHost`] and [`render::Canvas`] traits;
//! marks plug in through [`view::Geometry`].

pub mod api;
pub mod controller;
pub mod core;
pub mod error;
pub mod extensions;
pub mod plot;
pub mod render;
pub mod telemetry;
pub mod view;

pub use api::{Chart, ChartConfig, ChartOptions, ChartState, LegendSetting, TooltipSetting};
pub use error::{ChartError, ChartResult};
