use bytemuck::{Pod, Zeroable};
use glam::Vec3;

use crate::BoundingBox;

const INV_3: f32 = 1.0 / 3.0;

/// A triangle in world space.
///
/// Triangles are never filtered: a NaN or zero-area triangle yields a
/// degenerate bounding box that simply propagates through the build.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct Triangle {
    pub v0: Vec3,
    pub v1: Vec3,
    pub v2: Vec3,
}

impl Triangle {
    pub fn new(v0: Vec3, v1: Vec3, v2: Vec3) -> Self {
        Self { v0, v1, v2 }
    }

    pub fn vertices(&self) -> [Vec3; 3] {
        [self.v0, self.v1, self.v2]
    }

    pub fn center(&self) -> Vec3 {
        (self.v0 + self.v1 + self.v2) * INV_3
    }

    pub fn min(&self) -> Vec3 {
        self.v0.min(self.v1).min(self.v2)
    }

    pub fn max(&self) -> Vec3 {
        self.v0.max(self.v1).max(self.v2)
    }

    pub fn bounds(&self) -> BoundingBox {
        BoundingBox::new(self.min(), self.max())
    }

    /// Applies `vertex * scale + translate` to every vertex.
    pub(crate) fn transformed(&self, scale: Vec3, translate: Vec3) -> Self {
        let [v0, v1, v2] = self.vertices().map(|v| v * scale + translate);

        Self { v0, v1, v2 }
    }
}
