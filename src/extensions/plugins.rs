use serde::{Deserialize, Serialize};

use crate::core::{ContentRect, Size};
use crate::view::ViewId;

/// Read-only state snapshot passed to plugin hooks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PluginContext {
    pub size: Size,
    /// Content rect of the last layout; `None` before the plot exists.
    pub content_rect: Option<ContentRect>,
    pub view_count: usize,
    pub rendered: bool,
}

/// Lifecycle events exposed to plugins.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ChartEvent {
    BeforeInit,
    AfterInit,
    BeforeClear,
    AfterClear,
    AfterChangeSize { width: f64, height: f64 },
    AddView { view: ViewId },
    BeforeDestroy,
    AfterDestroy,
    Rendered,
}

/// Extension hook interface for bounded custom logic.
///
/// Plugins observe events and read chart context without mutating chart
/// internals directly.
pub trait ChartPlugin {
    fn id(&self) -> &str;
    fn on_event(&mut self, event: ChartEvent, context: PluginContext);
}
