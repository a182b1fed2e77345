use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::Rc;

use indexmap::IndexMap;

use crate::core::{BBox, Size};
use crate::error::{ChartError, ChartResult};

use super::{
    Canvas, CanvasHost, CanvasSpec, GroupId, ImageData, Mount, MountId, Registration, Shape,
    ShapeId, SubscriptionId, TextHAlign,
};

const GLYPH_WIDTH_RATIO: f64 = 0.6;

/// Headless canvas used by tests and server-side layout.
///
/// Shapes are kept in memory; text is measured with a fixed glyph-width ratio
/// so bounding boxes are deterministic across runs.
#[derive(Debug)]
pub struct NullCanvas {
    size: Size,
    pixel_ratio: f64,
    groups: Vec<(GroupId, i32)>,
    shapes: IndexMap<ShapeId, (GroupId, Shape)>,
    next_shape: u64,
    draw_count: usize,
    destroyed: bool,
}

impl NullCanvas {
    #[must_use]
    pub fn new(size: Size, pixel_ratio: Option<f64>) -> Self {
        Self {
            size,
            pixel_ratio: pixel_ratio
                .filter(|ratio| ratio.is_finite() && *ratio > 0.0)
                .unwrap_or(1.0),
            groups: Vec::new(),
            shapes: IndexMap::new(),
            next_shape: 0,
            draw_count: 0,
            destroyed: false,
        }
    }

    #[must_use]
    pub fn pixel_ratio(&self) -> f64 {
        self.pixel_ratio
    }

    #[must_use]
    pub fn draw_count(&self) -> usize {
        self.draw_count
    }

    #[must_use]
    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    #[must_use]
    pub fn shape_count(&self) -> usize {
        self.shapes.len()
    }

    #[must_use]
    pub fn group_z_index(&self, group: GroupId) -> Option<i32> {
        self.groups
            .iter()
            .find(|(id, _)| *id == group)
            .map(|(_, z)| *z)
    }

    #[must_use]
    pub fn shape(&self, shape: ShapeId) -> Option<&Shape> {
        self.shapes.get(&shape).map(|(_, shape)| shape)
    }

    fn ensure_live(&self) -> ChartResult<()> {
        if self.destroyed {
            return Err(ChartError::Canvas("canvas has been destroyed".to_owned()));
        }
        Ok(())
    }
}

impl Canvas for NullCanvas {
    fn size(&self) -> Size {
        self.size
    }

    fn add_group(&mut self, z_index: i32) -> ChartResult<GroupId> {
        self.ensure_live()?;
        let id = GroupId::new(self.groups.len() as u32);
        self.groups.push((id, z_index));
        Ok(id)
    }

    fn add_shape(&mut self, group: GroupId, shape: Shape) -> ChartResult<ShapeId> {
        self.ensure_live()?;
        if self.group_z_index(group).is_none() {
            return Err(ChartError::Canvas(format!(
                "group {} does not exist",
                group.raw()
            )));
        }
        shape.validate()?;
        let id = ShapeId::new(self.next_shape);
        self.next_shape += 1;
        self.shapes.insert(id, (group, shape));
        Ok(id)
    }

    fn update_shape(&mut self, shape: ShapeId, replacement: Shape) -> ChartResult<()> {
        self.ensure_live()?;
        replacement.validate()?;
        let Some(entry) = self.shapes.get_mut(&shape) else {
            return Err(ChartError::Canvas(format!(
                "shape {} does not exist",
                shape.raw()
            )));
        };
        entry.1 = replacement;
        Ok(())
    }

    fn remove_shape(&mut self, shape: ShapeId) -> bool {
        self.shapes.shift_remove(&shape).is_some()
    }

    fn group_shapes(&self, group: GroupId) -> Vec<ShapeId> {
        self.shapes
            .iter()
            .filter(|(_, (owner, _))| *owner == group)
            .map(|(id, _)| *id)
            .collect()
    }

    fn shape_bbox(&self, shape: ShapeId) -> Option<BBox> {
        let (_, shape) = self.shapes.get(&shape)?;
        if let Some(bbox) = shape.geometric_bbox() {
            return Some(bbox);
        }
        let Shape::Text(text) = shape else {
            return None;
        };
        let extent = self.measure_text(&text.text, text.font_size_px);
        let left = match text.h_align {
            TextHAlign::Left => text.x,
            TextHAlign::Center => text.x - extent.width / 2.0,
            TextHAlign::Right => text.x - extent.width,
        };
        Some(BBox::from_origin_size(
            left,
            text.y,
            extent.width,
            extent.height,
        ))
    }

    fn measure_text(&self, text: &str, font_size_px: f64) -> Size {
        Size::new(
            text.chars().count() as f64 * font_size_px * GLYPH_WIDTH_RATIO,
            font_size_px,
        )
    }

    fn change_size(&mut self, size: Size) -> ChartResult<()> {
        self.ensure_live()?;
        self.size = size.validate()?;
        Ok(())
    }

    fn draw(&mut self) -> ChartResult<()> {
        self.ensure_live()?;
        self.draw_count += 1;
        Ok(())
    }

    fn snapshot(&self) -> ChartResult<ImageData> {
        self.ensure_live()?;
        // Display list in paint order stands in for raster bytes.
        let mut ordered: Vec<_> = self.shapes.values().collect();
        ordered.sort_by_key(|(group, _)| self.group_z_index(*group).unwrap_or_default());
        let mut bytes = Vec::new();
        for (group, shape) in ordered {
            let line = format!("{}:{shape:?}\n", group.raw());
            bytes.extend_from_slice(line.as_bytes());
        }
        Ok(ImageData {
            width: (self.size.width * self.pixel_ratio).round() as u32,
            height: (self.size.height * self.pixel_ratio).round() as u32,
            mime_type: "text/x-display-list".to_owned(),
            bytes,
        })
    }

    fn destroy(&mut self) {
        self.shapes.clear();
        self.groups.clear();
        self.destroyed = true;
    }
}

/// Headless host resolving containers from an in-memory registry.
///
/// Clones share one registry, so a clone kept by the caller observes what a
/// chart owning the other handle mounts and releases.
#[derive(Debug, Default, Clone)]
pub struct NullHost {
    state: Rc<RefCell<HostState>>,
}

#[derive(Debug, Default)]
struct HostState {
    containers: IndexMap<String, f64>,
    mounts: IndexMap<MountId, (String, bool)>,
    next_mount: u32,
    listeners: BTreeSet<SubscriptionId>,
    next_listener: u32,
    downloads: Vec<(String, usize)>,
}

impl NullHost {
    /// Host exposing one container named `name` with the given width.
    #[must_use]
    pub fn with_container(name: impl Into<String>, width: f64) -> Self {
        let host = Self::default();
        host.set_container_width(name, width);
        host
    }

    pub fn set_container_width(&self, name: impl Into<String>, width: f64) {
        self.state.borrow_mut().containers.insert(name.into(), width);
    }

    #[must_use]
    pub fn mounted_count(&self) -> usize {
        self.state.borrow().mounts.len()
    }

    #[must_use]
    pub fn is_visible(&self, mount: MountId) -> Option<bool> {
        self.state
            .borrow()
            .mounts
            .get(&mount)
            .map(|(_, visible)| *visible)
    }

    #[must_use]
    pub fn active_resize_listeners(&self) -> usize {
        self.state.borrow().listeners.len()
    }

    /// Offered downloads as `(file name, byte length)`.
    #[must_use]
    pub fn downloads(&self) -> Vec<(String, usize)> {
        self.state.borrow().downloads.clone()
    }

    fn release_with(&self, release: impl FnOnce(&mut HostState) + 'static) -> Registration {
        let state = Rc::downgrade(&self.state);
        Registration::new(move || {
            if let Some(state) = state.upgrade() {
                release(&mut *state.borrow_mut());
            }
        })
    }
}

impl CanvasHost for NullHost {
    type Canvas = NullCanvas;

    fn mount(&mut self, container: &str) -> ChartResult<Mount> {
        let id = {
            let mut state = self.state.borrow_mut();
            if !state.containers.contains_key(container) {
                return Err(ChartError::ContainerNotFound(container.to_owned()));
            }
            let id = MountId::new(state.next_mount);
            state.next_mount += 1;
            state.mounts.insert(id, (container.to_owned(), true));
            id
        };
        let registration = self.release_with(move |state| {
            state.mounts.shift_remove(&id);
        });
        Ok(Mount::new(id, registration))
    }

    fn container_width(&self, mount: MountId) -> Option<f64> {
        let state = self.state.borrow();
        let (container, _) = state.mounts.get(&mount)?;
        state.containers.get(container).copied()
    }

    fn create_canvas(&mut self, mount: MountId, spec: CanvasSpec) -> ChartResult<NullCanvas> {
        if !self.state.borrow().mounts.contains_key(&mount) {
            return Err(ChartError::Canvas("wrapper element is not mounted".to_owned()));
        }
        Ok(NullCanvas::new(spec.size.validate()?, spec.pixel_ratio))
    }

    fn set_visible(&mut self, mount: MountId, visible: bool) {
        if let Some(entry) = self.state.borrow_mut().mounts.get_mut(&mount) {
            entry.1 = visible;
        }
    }

    fn add_resize_listener(&mut self) -> Registration {
        let id = {
            let mut state = self.state.borrow_mut();
            let id = SubscriptionId::new(state.next_listener);
            state.next_listener += 1;
            state.listeners.insert(id);
            id
        };
        self.release_with(move |state| {
            state.listeners.remove(&id);
        })
    }

    fn offer_download(&mut self, file_name: &str, image: &ImageData) -> ChartResult<()> {
        self.state
            .borrow_mut()
            .downloads
            .push((file_name.to_owned(), image.bytes.len()));
        Ok(())
    }
}
