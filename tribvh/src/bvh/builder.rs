//! Binned-SAH builder.
//!
//! Special thanks to:
//! - https://jacco.ompf2.com/2022/04/13/how-to-build-a-bvh-part-1-basics/,
//! - https://github.com/svenstaro/bvh.

use super::splitter::{self, SplittingPlane};
use crate::bvh::cost;
use crate::{BoundingBox, BuildParams, BvhNode, Triangle};

/// Splits the root node (`nodes[0]`) recursively, appending children to
/// `nodes` and reordering `triangles` so that every node owns a contiguous
/// range of them.
///
/// Nodes are visited depth-first, first child before second, so the layout
/// of `nodes` is the same as if the builder recursed into each child in turn.
pub fn run(
    nodes: &mut Vec<BvhNode>,
    triangles: &mut [Triangle],
    params: &BuildParams,
) {
    if nodes.is_empty() {
        return;
    }

    let mut stack = vec![(0, 0)];

    while let Some((node_id, depth)) = stack.pop() {
        if let Some((left_id, right_id)) =
            balance(nodes, triangles, params, node_id, depth)
        {
            stack.push((right_id, depth + 1));
            stack.push((left_id, depth + 1));
        }
    }
}

fn balance(
    nodes: &mut Vec<BvhNode>,
    triangles: &mut [Triangle],
    params: &BuildParams,
    node_id: usize,
    depth: u32,
) -> Option<(usize, usize)> {
    if depth >= params.max_depth {
        return None;
    }

    let node = nodes[node_id];
    let plane = splitter::find_splitting_plane(&node, triangles, params)?;

    if plane.split_cost >= cost::box_cost(&node.bounds(), node.count) {
        return None;
    }

    split(nodes, triangles, node_id, plane)
}

/// Partitions the node's triangles in place: those in front of the plane are
/// compacted to the beginning of its range, the rest end up after them.
///
/// Returns `None` (leaving the node untouched, apart from the triangles'
/// order) if either side would end up empty.
fn split(
    nodes: &mut Vec<BvhNode>,
    triangles: &mut [Triangle],
    node_id: usize,
    plane: SplittingPlane,
) -> Option<(usize, usize)> {
    let node = nodes[node_id];
    let triangles = &mut triangles[node.triangles()];

    let mut pivot = 0;
    let mut left_bb = BoundingBox::default();
    let mut right_bb = BoundingBox::default();

    for idx in 0..triangles.len() {
        let triangle = triangles[idx];

        if triangle.center()[plane.split_by] < plane.split_at {
            left_bb += &triangle;
            triangles.swap(idx, pivot);
            pivot += 1;
        } else {
            right_bb += &triangle;
        }
    }

    let left_count = pivot as u32;
    let right_count = node.count - left_count;

    if left_count == 0 || right_count == 0 {
        return None;
    }

    let left_id = nodes.len();

    nodes.push(BvhNode::from_bounds(node.index, left_count, left_bb));

    nodes.push(BvhNode::from_bounds(
        node.index + left_count,
        right_count,
        right_bb,
    ));

    let node = &mut nodes[node_id];

    node.child_ind = left_id as u32;
    node.count = 0;

    Some((left_id, left_id + 1))
}
