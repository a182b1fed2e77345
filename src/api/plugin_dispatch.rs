use crate::extensions::{ChartEvent, ChartPlugin, PluginContext};
use crate::render::CanvasHost;

use super::Chart;

pub(super) fn notify_plugins(
    plugins: &mut [Box<dyn ChartPlugin>],
    event: ChartEvent,
    context: PluginContext,
) {
    for plugin in plugins {
        plugin.on_event(event, context);
    }
}

impl<H: CanvasHost> Chart<H> {
    pub(super) fn plugin_context(&self) -> PluginContext {
        PluginContext {
            size: self.size(),
            content_rect: Some(self.plot.content_rect()),
            view_count: self.views.len(),
            rendered: self.rendered,
        }
    }

    pub(super) fn emit_plugin_event(&mut self, event: ChartEvent) {
        let context = self.plugin_context();
        notify_plugins(&mut self.plugins, event, context);
    }
}
