//! Surface-area-heuristic cost model.

use crate::{Axis, BoundingBox, BvhNode, Triangle};

/// Estimates the cost of intersecting `triangle_count` triangles enclosed by
/// `bounds`.
pub fn box_cost(bounds: &BoundingBox, triangle_count: u32) -> f32 {
    if triangle_count == 0 {
        return 0.0;
    }

    bounds.half_area() * (triangle_count as f32)
}

/// Estimates the cost of splitting `node` by a plane at `split_at` along
/// `split_by`, without touching the triangles.
pub fn axis_cost(
    node: &BvhNode,
    split_by: Axis,
    split_at: f32,
    triangles: &[Triangle],
) -> f32 {
    let mut left = 0;
    let mut left_bb = BoundingBox::default();
    let mut right = 0;
    let mut right_bb = BoundingBox::default();

    for triangle in &triangles[node.triangles()] {
        let (side, side_bb) = if triangle.center()[split_by] < split_at {
            (&mut left, &mut left_bb)
        } else {
            (&mut right, &mut right_bb)
        };

        *side += 1;
        *side_bb += triangle;
    }

    box_cost(&left_bb, left) + box_cost(&right_bb, right)
}
