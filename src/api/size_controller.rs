use std::time::Instant;

use tracing::{debug, trace};

use crate::core::Size;
use crate::error::ChartResult;
use crate::extensions::ChartEvent;
use crate::render::{Canvas, CanvasHost};

use super::Chart;
use super::render_coordinator::RenderCoordinator;

impl<H: CanvasHost> Chart<H> {
    /// Resizes the surface and repaints without re-resolving auto padding.
    pub fn change_size(&mut self, width: f64, height: f64) -> ChartResult<()> {
        let size = Size::new(width, height).validate()?;
        self.canvas.change_size(size)?;
        self.config.width = size.width;
        self.config.height = size.height;
        self.plot.repaint(&mut self.canvas)?;

        self.keep_padding = true;
        let repainted = RenderCoordinator::repaint(self);
        self.keep_padding = false;
        repainted?;

        debug!(width, height, "chart resized");
        self.emit_plugin_event(ChartEvent::AfterChangeSize { width, height });
        Ok(())
    }

    pub fn change_width(&mut self, width: f64) -> ChartResult<()> {
        self.change_size(width, self.config.height)
    }

    pub fn change_height(&mut self, height: f64) -> ChartResult<()> {
        self.change_size(self.config.width, height)
    }

    /// Adopts the container width when it is known, non-zero and different.
    ///
    /// Returns `true` when the chart was resized.
    pub fn force_fit(&mut self) -> ChartResult<bool> {
        let Some(width) = self.host.container_width(self.mount.id()) else {
            return Ok(false);
        };
        if !width.is_finite() || width <= 0.0 || width == self.config.width {
            return Ok(false);
        }
        self.change_size(width, self.config.height)?;
        Ok(true)
    }

    /// Records a window resize; the force-fit runs once the burst settles.
    ///
    /// Ignored unless the chart was configured with `force_fit`.
    pub fn handle_window_resize(&mut self, now: Instant) {
        if !self.config.force_fit {
            return;
        }
        self.resize.schedule(now);
        trace!("window resize scheduled");
    }

    /// Runs the pending force-fit when its deadline has passed.
    ///
    /// Returns `true` when the chart was resized.
    pub fn poll_resize(&mut self, now: Instant) -> ChartResult<bool> {
        if !self.resize.take_due(now) {
            return Ok(false);
        }
        debug!("debounced force fit");
        self.force_fit()
    }

    #[must_use]
    pub fn has_pending_resize(&self) -> bool {
        self.resize.is_pending()
    }

    pub fn change_visible(&mut self, visible: bool) {
        self.host.set_visible(self.mount.id(), visible);
        self.visible = visible;
    }
}
