use std::time::Duration;

use tracing::{debug, warn};

use crate::controller::{LegendController, TooltipController};
use crate::error::ChartResult;
use crate::extensions::{ChartEvent, ChartPlugin, PluginContext};
use crate::plot::PlotRegion;
use crate::render::{Canvas, CanvasHost, CanvasSpec, LayerStack};
use crate::view::View;

use super::plugin_dispatch::notify_plugins;
use super::plugin_registry::validate_plugin_id;
use super::{Chart, ChartConfig, ChartState, resize_debounce::ResizeDebouncer};

impl<H: CanvasHost> Chart<H> {
    /// Mounts into the configured container and builds the layer stack.
    pub fn new(host: H, config: ChartConfig) -> ChartResult<Self> {
        Self::with_plugins(host, config, Vec::new())
    }

    /// Like [`Chart::new`], with plugins that also observe the init events.
    ///
    /// Configuration errors are raised before anything is mounted; a canvas
    /// failure unmounts the wrapper again, so no partial chart is left behind.
    pub fn with_plugins(
        mut host: H,
        mut config: ChartConfig,
        plugins: Vec<Box<dyn ChartPlugin>>,
    ) -> ChartResult<Self> {
        config.validate()?;
        let container = config.resolve_container()?.to_owned();
        let mut registered: Vec<Box<dyn ChartPlugin>> = Vec::with_capacity(plugins.len());
        for plugin in plugins {
            validate_plugin_id(&registered, plugin.as_ref())?;
            registered.push(plugin);
        }
        notify_plugins(
            &mut registered,
            ChartEvent::BeforeInit,
            PluginContext {
                size: config.size(),
                content_rect: None,
                view_count: 0,
                rendered: false,
            },
        );

        let mount = host.mount(&container)?;
        if config.force_fit {
            match host
                .container_width(mount.id())
                .filter(|width| width.is_finite() && *width > 0.0)
            {
                Some(width) => config.width = width,
                None => warn!(
                    container = %container,
                    width = config.width,
                    "force_fit requested but container width is unknown"
                ),
            }
        }

        let spec = CanvasSpec {
            size: config.size(),
            pixel_ratio: config.pixel_ratio,
        };
        let mut canvas = match host.create_canvas(mount.id(), spec) {
            Ok(canvas) => canvas,
            Err(err) => {
                mount.unmount();
                return Err(err);
            }
        };
        let (plot, layers) = match build_surface(&mut canvas, &config) {
            Ok(parts) => parts,
            Err(err) => {
                canvas.destroy();
                mount.unmount();
                return Err(err);
            }
        };

        let content_rect = plot.content_rect();
        let root = View::root(config.options.view_options(), content_rect);
        let legends = LegendController::new(
            config.options.legend.clone().unwrap_or_default(),
            content_rect,
        );
        let tooltip =
            TooltipController::new(config.options.tooltip.unwrap_or_default(), content_rect);
        let resize_subscription = config.force_fit.then(|| host.add_resize_listener());
        let resize = ResizeDebouncer::new(Duration::from_millis(config.resize_debounce_ms));
        debug!(
            container = %container,
            width = config.width,
            height = config.height,
            force_fit = config.force_fit,
            "chart initialized"
        );

        let mut chart = Self {
            host,
            mount,
            canvas,
            config,
            layers,
            plot,
            root,
            views: Vec::new(),
            next_view: 0,
            legends,
            tooltip,
            state: ChartState::Initialized,
            keep_padding: false,
            keep_legend: false,
            rendered: false,
            visible: true,
            resize,
            resize_subscription,
            plugins: registered,
        };
        chart.emit_plugin_event(ChartEvent::AfterInit);
        Ok(chart)
    }
}

// The backdrop group goes first so it sits under the three layers.
fn build_surface(
    canvas: &mut dyn Canvas,
    config: &ChartConfig,
) -> ChartResult<(PlotRegion, LayerStack)> {
    let plot = PlotRegion::create(
        canvas,
        config.padding,
        config.background,
        config.plot_background,
    )?;
    let layers = LayerStack::create(canvas)?;
    Ok((plot, layers))
}
