use tracing::debug;

use crate::error::ChartResult;
use crate::extensions::ChartEvent;
use crate::render::{Canvas, CanvasHost};

use super::Chart;
use super::plugin_dispatch::notify_plugins;
use super::render_coordinator::RenderCoordinator;

impl<H: CanvasHost> Chart<H> {
    /// Destroys every child view (oldest first), empties the root scope and
    /// puts the configured padding back on the plot.
    ///
    /// Controllers are cleared, not dropped. Clearing an empty chart is a no-op
    /// apart from the events.
    pub fn clear(&mut self) -> ChartResult<()> {
        self.emit_plugin_event(ChartEvent::BeforeClear);
        for view in self.views.drain(..) {
            view.destroy(&mut self.canvas);
        }
        self.next_view = 0;
        self.root.clear(&mut self.canvas);
        if !self.keep_legend {
            self.legends.clear(&mut self.canvas);
        }
        self.tooltip.clear();
        RenderCoordinator::reset_plot(self)?;
        self.canvas.draw()?;
        debug!("chart cleared");
        self.emit_plugin_event(ChartEvent::AfterClear);
        Ok(())
    }

    /// Tears the chart down and hands the host back.
    ///
    /// Views go before the canvas they draw into; the resize subscription and
    /// the mounted wrapper are released last.
    pub fn destroy(mut self) -> H {
        self.emit_plugin_event(ChartEvent::BeforeDestroy);
        self.resize.cancel();
        for view in self.views.drain(..) {
            view.destroy(&mut self.canvas);
        }
        self.root.clear(&mut self.canvas);
        self.legends.clear(&mut self.canvas);
        self.tooltip.clear();
        self.canvas.destroy();
        if let Some(subscription) = self.resize_subscription.take() {
            subscription.release();
        }
        let context = self.plugin_context();
        let Self {
            host,
            mount,
            mut plugins,
            ..
        } = self;
        mount.unmount();
        notify_plugins(&mut plugins, ChartEvent::AfterDestroy, context);
        debug!("chart destroyed");
        host
    }
}
