use tracing::debug;

use crate::core::Point;
use crate::error::{ChartError, ChartResult};
use crate::extensions::ChartEvent;
use crate::render::CanvasHost;
use crate::view::{Geometry, View, ViewConfig, ViewId, ViewScope};

use super::Chart;

/// Root scope first, then every child whose plot range contains `point`.
pub(super) fn scopes_at<'a>(
    root: &'a View,
    views: &'a [View],
    point: Point,
) -> Vec<&'a dyn ViewScope> {
    let mut scopes: Vec<&dyn ViewScope> = Vec::with_capacity(views.len() + 1);
    if root.contains_point(point) {
        scopes.push(root);
    }
    scopes.extend(
        views
            .iter()
            .filter(|view| view.contains_point(point))
            .map(|view| view as &dyn ViewScope),
    );
    scopes
}

impl<H: CanvasHost> Chart<H> {
    /// Creates a child view.
    ///
    /// The chart's current `scales`, `coord` and `axes` options are copied
    /// into the view; later changes on the chart do not reach it.
    pub fn view(&mut self, config: ViewConfig) -> &mut View {
        let id = ViewId::Child(self.next_view);
        self.next_view += 1;

        let mut options = self.root.options().clone();
        if let Some(scales) = config.scales.clone() {
            options.scales = scales;
        }
        if let Some(coord) = config.coord {
            options.coord = coord;
        }
        if let Some(axes) = config.axes {
            options.axes = axes;
        }
        let view = View::child(id, ViewId::Root, options, &config, self.plot.content_rect());
        let index = self.views.len();
        self.views.push(view);
        debug!(view = %id, "view added");
        self.emit_plugin_event(ChartEvent::AddView { view: id });
        &mut self.views[index]
    }

    /// Destroys a child view and its shapes; siblings are untouched.
    pub fn remove_view(&mut self, id: ViewId) -> ChartResult<()> {
        let Some(position) = self.views.iter().position(|view| view.id() == id) else {
            return Err(ChartError::UnknownView(id));
        };
        let view = self.views.remove(position);
        view.destroy(&mut self.canvas);
        debug!(view = %id, "view removed");
        Ok(())
    }

    /// The chart's own scope, holding geometries attached directly to the chart.
    #[must_use]
    pub fn root_view(&self) -> &View {
        &self.root
    }

    pub fn root_view_mut(&mut self) -> &mut View {
        &mut self.root
    }

    #[must_use]
    pub fn views(&self) -> &[View] {
        &self.views
    }

    #[must_use]
    pub fn get_view(&self, id: ViewId) -> Option<&View> {
        match id {
            ViewId::Root => Some(&self.root),
            ViewId::Child(_) => self.views.iter().find(|view| view.id() == id),
        }
    }

    pub fn get_view_mut(&mut self, id: ViewId) -> Option<&mut View> {
        match id {
            ViewId::Root => Some(&mut self.root),
            ViewId::Child(_) => self.views.iter_mut().find(|view| view.id() == id),
        }
    }

    /// Root geometries followed by each child's, in registry order.
    #[must_use]
    pub fn get_all_geometries(&self) -> Vec<&dyn Geometry> {
        std::iter::once(&self.root)
            .chain(self.views.iter())
            .flat_map(|view| view.geometries().iter().map(|geometry| &**geometry))
            .collect()
    }

    /// Scopes consulted for tooltips at `point`, in registry order.
    #[must_use]
    pub fn views_by_point(&self, point: Point) -> Vec<&dyn ViewScope> {
        scopes_at(&self.root, &self.views, point)
    }
}
