use crate::controller::{LegendController, TooltipController};
use crate::core::{ContentRect, Padding, Size};
use crate::extensions::ChartPlugin;
use crate::plot::PlotRegion;
use crate::render::{CanvasHost, LayerStack, Mount, MountId, Registration};
use crate::view::View;

use super::{ChartConfig, resize_debounce::ResizeDebouncer};

/// Where the chart is in its render cycle.
///
/// There is no destroyed state: `Chart::destroy` consumes the chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartState {
    Initialized,
    Rendering,
    Idle,
}

/// Main orchestration facade consumed by host applications.
///
/// `Chart` owns the canvas, the plot region and layer stack, the root view
/// with its registry of child views, and the legend and tooltip controllers.
///
/// Dropping a chart without [`Chart::destroy`] still unmounts its wrapper and
/// drops its resize listener from the host.
pub struct Chart<H: CanvasHost> {
    pub(super) resize_subscription: Option<Registration>,
    pub(super) mount: Mount,
    pub(super) canvas: H::Canvas,
    pub(super) config: ChartConfig,
    pub(super) layers: LayerStack,
    pub(super) plot: PlotRegion,
    pub(super) root: View,
    pub(super) views: Vec<View>,
    pub(super) next_view: u32,
    pub(super) legends: LegendController,
    pub(super) tooltip: TooltipController,
    pub(super) state: ChartState,
    pub(super) keep_padding: bool,
    pub(super) keep_legend: bool,
    pub(super) rendered: bool,
    pub(super) visible: bool,
    pub(super) resize: ResizeDebouncer,
    pub(super) plugins: Vec<Box<dyn ChartPlugin>>,
    // Outlives the registrations above it.
    pub(super) host: H,
}

impl<H: CanvasHost> Chart<H> {
    #[must_use]
    pub fn state(&self) -> ChartState {
        self.state
    }

    #[must_use]
    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    #[must_use]
    pub fn size(&self) -> Size {
        self.config.size()
    }

    /// Padding currently applied to the plot, auto edges resolved after a render.
    #[must_use]
    pub fn padding(&self) -> Padding {
        self.plot.padding()
    }

    #[must_use]
    pub fn content_rect(&self) -> ContentRect {
        self.plot.content_rect()
    }

    #[must_use]
    pub fn is_rendered(&self) -> bool {
        self.rendered
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    #[must_use]
    pub fn layers(&self) -> &LayerStack {
        &self.layers
    }

    #[must_use]
    pub fn legends(&self) -> &LegendController {
        &self.legends
    }

    #[must_use]
    pub fn tooltip_controller(&self) -> &TooltipController {
        &self.tooltip
    }

    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    #[must_use]
    pub fn mount(&self) -> MountId {
        self.mount.id()
    }

    #[must_use]
    pub fn canvas(&self) -> &H::Canvas {
        &self.canvas
    }

    /// Keeps registered legend entries across clear and draw passes.
    ///
    /// Pinned legends are still re-positioned against each laid-out rect.
    pub fn set_keep_legend(&mut self, keep: bool) {
        self.keep_legend = keep;
    }

    #[must_use]
    pub fn keep_legend(&self) -> bool {
        self.keep_legend
    }
}
