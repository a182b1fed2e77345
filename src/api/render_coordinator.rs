use tracing::{debug, trace};

use crate::core::{ContentRect, Padding};
use crate::error::ChartResult;
use crate::extensions::ChartEvent;
use crate::plot::{AutoPaddingResolver, PlotRegion};
use crate::render::{Canvas, CanvasHost, LayerKind};
use crate::view::{AttributeRole, ViewScope};

use super::{Chart, ChartState};

/// Render state machine of the chart.
///
/// One `render` call runs up to two named phases in a fixed order: the
/// provisional measurement draw (only with unpinned auto padding), then the
/// final draw against the corrected plot. Neither phase re-enters `render`.
pub(super) struct RenderCoordinator;

impl RenderCoordinator {
    pub(super) fn render<H: CanvasHost>(chart: &mut Chart<H>) -> ChartResult<()> {
        chart.state = ChartState::Rendering;
        let result = Self::run_phases(chart);
        chart.state = ChartState::Idle;
        result?;
        chart.rendered = true;
        chart.emit_plugin_event(ChartEvent::Rendered);
        Ok(())
    }

    pub(super) fn repaint<H: CanvasHost>(chart: &mut Chart<H>) -> ChartResult<()> {
        if !chart.keep_padding {
            chart.plot.repaint(&mut chart.canvas)?;
        }
        let rect = chart.plot.content_rect();
        Self::draw_components(chart, rect)?;
        Self::render_tooltips(chart);
        chart.canvas.draw()
    }

    fn run_phases<H: CanvasHost>(chart: &mut Chart<H>) -> ChartResult<()> {
        if !chart.keep_padding && chart.config.padding.has_auto() {
            let resolved = Self::measure_phase(chart)?;
            Self::apply_resolved_padding(chart, resolved)?;
        }
        Self::final_phase(chart)
    }

    /// Draws every component against the configured padding (auto edges as
    /// zero) and resolves the auto edges from the measured decorations.
    ///
    /// Measuring against the configured padding rather than the last resolved
    /// one keeps repeated renders on the same fixed point.
    fn measure_phase<H: CanvasHost>(chart: &mut Chart<H>) -> ChartResult<Padding> {
        let baseline = chart.config.padding;
        let size = chart.canvas.size();
        let provisional = PlotRegion::compute_content_rect(&baseline, size);
        Self::draw_components(chart, provisional)?;

        let front = chart.canvas.group_bbox(chart.layers.group(LayerKind::Front));
        let back = chart.canvas.group_bbox(chart.layers.group(LayerKind::Back));
        let resolved = AutoPaddingResolver::new(chart.config.auto_padding_append)
            .resolve(&baseline, front, back, size);
        trace!(
            front = ?front,
            back = ?back,
            resolved = ?resolved.lengths(),
            "auto padding measured"
        );
        Ok(resolved)
    }

    /// Applies `resolved` unless it matches the plot padding within tolerance.
    fn apply_resolved_padding<H: CanvasHost>(
        chart: &mut Chart<H>,
        resolved: Padding,
    ) -> ChartResult<bool> {
        let current = chart.plot.padding();
        if resolved.approx_eq(&current, chart.config.padding_tolerance) {
            trace!("resolved padding unchanged, skipping plot repaint");
            return Ok(false);
        }
        chart.plot.set_padding(resolved);
        chart.plot.repaint(&mut chart.canvas)?;
        debug!(
            from = ?current.lengths(),
            to = ?resolved.lengths(),
            "plot padding corrected"
        );
        Ok(true)
    }

    fn final_phase<H: CanvasHost>(chart: &mut Chart<H>) -> ChartResult<()> {
        let rect = chart.plot.content_rect();
        Self::draw_components(chart, rect)?;
        Self::render_tooltips(chart);
        chart.canvas.draw()
    }

    /// Redraws the root, every child view and the legends inside `rect`.
    pub(super) fn draw_components<H: CanvasHost>(
        chart: &mut Chart<H>,
        rect: ContentRect,
    ) -> ChartResult<()> {
        Self::clear_drawn(chart);
        chart.root.update_plot_range(rect);
        for view in &mut chart.views {
            view.update_plot_range(rect);
        }
        chart.root.draw(&mut chart.canvas, &chart.layers)?;
        for view in &mut chart.views {
            view.draw(&mut chart.canvas, &chart.layers)?;
        }
        if chart.keep_legend {
            // Pinned entries are kept but still follow the rect being laid out.
            chart.legends.set_plot_range(rect);
            chart.legends.align_legends(&mut chart.canvas, &chart.layers)
        } else {
            Self::render_legends(chart, rect)
        }
    }

    fn render_legends<H: CanvasHost>(chart: &mut Chart<H>, rect: ContentRect) -> ChartResult<()> {
        let Some(options) = chart.config.options.legend.clone() else {
            return Ok(());
        };
        let has_custom = options.custom.is_some();
        chart.legends.set_options(options);
        chart.legends.set_plot_range(rect);
        if has_custom {
            chart.legends.add_custom_legend();
        } else {
            for view in std::iter::once(&chart.root).chain(chart.views.iter()) {
                for geometry in view.geometries() {
                    for role in AttributeRole::LEGEND_ROLES {
                        let Some(scale) = geometry.scale(role) else {
                            continue;
                        };
                        let filtered = scale
                            .field()
                            .map(|field| view.get_filtered_values(field))
                            .unwrap_or_default();
                        chart
                            .legends
                            .add_legend(scale, role, &**geometry, &filtered);
                    }
                }
            }
        }
        chart.legends.align_legends(&mut chart.canvas, &chart.layers)
    }

    fn render_tooltips<H: CanvasHost>(chart: &mut Chart<H>) {
        match chart.config.options.tooltip {
            Some(options) => {
                chart.tooltip.set_options(options);
                chart.tooltip.set_plot_range(chart.plot.content_rect());
                chart.tooltip.render_tooltip();
            }
            None => chart.tooltip.clear(),
        }
    }

    /// Removes drawn shapes of every view, plus legends unless pinned.
    pub(super) fn clear_drawn<H: CanvasHost>(chart: &mut Chart<H>) {
        chart.root.clear_inner(&mut chart.canvas);
        for view in &mut chart.views {
            view.clear_inner(&mut chart.canvas);
        }
        if !chart.keep_legend {
            chart.legends.clear(&mut chart.canvas);
        }
    }

    /// Puts the configured, unresolved padding back on the plot.
    pub(super) fn reset_plot<H: CanvasHost>(chart: &mut Chart<H>) -> ChartResult<()> {
        chart.plot.set_padding(chart.config.padding);
        chart.plot.repaint(&mut chart.canvas)
    }
}

impl<H: CanvasHost> Chart<H> {
    /// Lays out and draws everything, resolving auto padding first.
    pub fn render(&mut self) -> ChartResult<()> {
        RenderCoordinator::render(self)
    }

    /// Redraws with the plot's current padding; no auto-padding measurement.
    pub fn repaint(&mut self) -> ChartResult<()> {
        RenderCoordinator::repaint(self)
    }
}
