use std::ops::Range;

use bytemuck::{Pod, Zeroable};
use glam::{Vec3, Vec4, Vec4Swizzles};

use crate::BoundingBox;

/// A single node of the flattened hierarchy.
///
/// Nodes are laid out so that the whole array can be uploaded to the GPU as
/// is: both corners are `Vec4`s whose `w` component is unused, followed by
/// four 32-bit words.
///
/// A node is either a leaf, owning `count` triangles starting at `index`, or
/// an internal node with `count == 0` whose children live at `child_ind` and
/// `child_ind + 1`.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct BvhNode {
    pub min_corner: Vec4,
    pub max_corner: Vec4,
    pub index: u32,
    pub count: u32,
    pub child_ind: u32,
    pub padding: u32,
}

impl BvhNode {
    /// Creates an empty node owning `index..index + count`.
    pub fn new(index: u32, count: u32) -> Self {
        Self::from_bounds(index, count, BoundingBox::default())
    }

    pub fn from_corners(min: Vec3, max: Vec3) -> Self {
        Self::from_bounds(0, 0, BoundingBox::new(min, max))
    }

    pub fn from_bounds(index: u32, count: u32, bounds: BoundingBox) -> Self {
        Self {
            min_corner: bounds.min().extend(0.0),
            max_corner: bounds.max().extend(0.0),
            index,
            count,
            child_ind: 0,
            padding: 0,
        }
    }

    pub fn with_child_ind(mut self, child_ind: u32) -> Self {
        self.child_ind = child_ind;
        self
    }

    pub fn bounds(&self) -> BoundingBox {
        BoundingBox::new(self.min_corner.xyz(), self.max_corner.xyz())
    }

    pub fn is_leaf(&self) -> bool {
        self.child_ind == 0
    }

    /// Range of triangles owned directly by this node.
    pub fn triangles(&self) -> Range<usize> {
        let start = self.index as usize;

        start..(start + self.count as usize)
    }
}

impl Default for BvhNode {
    fn default() -> Self {
        Self::new(0, 0)
    }
}

#[cfg(test)]
mod tests {
    use glam::vec3;

    use super::*;

    #[test]
    fn layout() {
        assert_eq!(48, std::mem::size_of::<BvhNode>());
    }

    #[test]
    fn new() {
        let target = BvhNode::new(4, 2);

        assert_eq!(4, target.index);
        assert_eq!(2, target.count);
        assert_eq!(0, target.child_ind);
        assert_eq!(0, target.padding);
        assert!(!target.bounds().is_set());
        assert_eq!(4..6, target.triangles());
    }

    #[test]
    fn corners() {
        let target =
            BvhNode::from_corners(vec3(1.0, 2.0, 3.0), vec3(4.0, 5.0, 6.0))
                .with_child_ind(7);

        assert_eq!(0.0, target.min_corner.w);
        assert_eq!(0.0, target.max_corner.w);
        assert_eq!(vec3(1.0, 2.0, 3.0), target.bounds().min());
        assert_eq!(vec3(4.0, 5.0, 6.0), target.bounds().max());
        assert_eq!(7, target.child_ind);
        assert!(!target.is_leaf());
    }

    #[test]
    fn bytes() {
        let target = [BvhNode::new(1, 2).with_child_ind(3)];
        let bytes: &[u32] = bytemuck::cast_slice(&target);

        assert_eq!(&[1, 2, 3, 0], &bytes[8..]);
    }
}
