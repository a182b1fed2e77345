use serde::{Deserialize, Serialize};

use crate::error::ChartResult;

use super::{Canvas, GroupId};

/// Drawing layers shared by the chart and all of its views.
///
/// Axes and guides draw into `Back`, geometry marks into `Middle`, legends
/// into `Front`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LayerKind {
    Back,
    Middle,
    Front,
}

impl LayerKind {
    pub const ORDERED: [Self; 3] = [Self::Back, Self::Middle, Self::Front];

    /// Canvas z-index; the plot backdrop sits below at zero.
    #[must_use]
    pub const fn z_index(self) -> i32 {
        match self {
            Self::Back => 1,
            Self::Middle => 2,
            Self::Front => 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerStack {
    back: GroupId,
    middle: GroupId,
    front: GroupId,
}

impl LayerStack {
    /// Creates the three groups once, in z-order.
    pub fn create(canvas: &mut dyn Canvas) -> ChartResult<Self> {
        Ok(Self {
            back: canvas.add_group(LayerKind::Back.z_index())?,
            middle: canvas.add_group(LayerKind::Middle.z_index())?,
            front: canvas.add_group(LayerKind::Front.z_index())?,
        })
    }

    #[must_use]
    pub fn group(&self, kind: LayerKind) -> GroupId {
        match kind {
            LayerKind::Back => self.back,
            LayerKind::Middle => self.middle,
            LayerKind::Front => self.front,
        }
    }

    #[must_use]
    pub fn groups(&self) -> [(LayerKind, GroupId); 3] {
        LayerKind::ORDERED.map(|kind| (kind, self.group(kind)))
    }
}
