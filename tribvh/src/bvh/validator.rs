use std::ops::Range;

use crate::{BoundingBox, BvhNode, Triangle};

/// First structural problem found in a hierarchy.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("node {node}: child index {child_ind} is out of bounds")]
    ChildOutOfBounds { node: usize, child_ind: u32 },

    #[error("node {node}: child index {child_ind} doesn't follow its parent")]
    ChildBeforeParent { node: usize, child_ind: u32 },

    #[error("node {node}: is reachable from more than one parent")]
    SharedNode { node: usize },

    #[error("node {node}: owns {count} triangles, but also has children")]
    AmbiguousNode { node: usize, count: u32 },

    #[error("node {node}: leaf doesn't own any triangles")]
    EmptyLeaf { node: usize },

    #[error(
        "node {node}: triangles {}..{} lie outside of the buffer (len = {len})",
        .range.start,
        .range.end
    )]
    TrianglesOutOfBounds {
        node: usize,
        range: Range<usize>,
        len: usize,
    },

    #[error("node {node}: children don't partition the node's triangles")]
    BrokenPartition { node: usize },

    #[error(
        "hierarchy covers triangles {}..{}, but the buffer has {len}",
        .range.start,
        .range.end
    )]
    IncompleteCoverage { range: Range<usize>, len: usize },

    #[error("node {node}: bounds don't tightly fit what the node owns")]
    LooseBounds { node: usize },
}

/// Checks that `nodes` form a well-formed hierarchy over `triangles`.
///
/// Besides the links and triangle ranges, every node's box must be exactly
/// the union of what it owns: its triangles for a leaf, its children's boxes
/// otherwise.
///
/// An empty node array is valid, and so is a single empty root over an
/// empty triangle buffer.
pub fn validate(
    nodes: &[BvhNode],
    triangles: &[Triangle],
) -> Result<(), ValidationError> {
    if nodes.is_empty() {
        return Ok(());
    }

    let reachable = walk(nodes)?;
    let mut ranges: Vec<Option<Range<usize>>> = vec![None; nodes.len()];

    // Children always come after their parents, so going backwards
    // guarantees both children are resolved before the parent is
    for node_id in (0..nodes.len()).rev() {
        if !reachable[node_id] {
            continue;
        }

        let node = nodes[node_id];

        let range = if node.is_leaf() {
            check_leaf(node_id, &node, triangles)?
        } else {
            let child_id = node.child_ind as usize;

            let (Some(left), Some(right)) =
                (ranges[child_id].clone(), ranges[child_id + 1].clone())
            else {
                unreachable!("children are reachable whenever parent is");
            };

            if left.start != node.index as usize || left.end != right.start {
                return Err(ValidationError::BrokenPartition { node: node_id });
            }

            let children =
                nodes[child_id].bounds() + nodes[child_id + 1].bounds();

            if node.bounds() != children {
                return Err(ValidationError::LooseBounds { node: node_id });
            }

            left.start..right.end
        };

        ranges[node_id] = Some(range);
    }

    match ranges[0].clone() {
        Some(range) if range == (0..triangles.len()) => Ok(()),
        Some(range) => Err(ValidationError::IncompleteCoverage {
            range,
            len: triangles.len(),
        }),
        None => unreachable!("root is always reachable"),
    }
}

/// Marks nodes reachable from the root, checking the links along the way.
fn walk(nodes: &[BvhNode]) -> Result<Vec<bool>, ValidationError> {
    let mut reachable = vec![false; nodes.len()];
    let mut stack = vec![0];

    reachable[0] = true;

    while let Some(node_id) = stack.pop() {
        let node = nodes[node_id];

        if node.is_leaf() {
            continue;
        }

        if node.count > 0 {
            return Err(ValidationError::AmbiguousNode {
                node: node_id,
                count: node.count,
            });
        }

        let child_id = node.child_ind as usize;

        if child_id + 1 >= nodes.len() {
            return Err(ValidationError::ChildOutOfBounds {
                node: node_id,
                child_ind: node.child_ind,
            });
        }

        if child_id <= node_id {
            return Err(ValidationError::ChildBeforeParent {
                node: node_id,
                child_ind: node.child_ind,
            });
        }

        for child_id in [child_id, child_id + 1] {
            if reachable[child_id] {
                return Err(ValidationError::SharedNode { node: child_id });
            }

            reachable[child_id] = true;
            stack.push(child_id);
        }
    }

    Ok(reachable)
}

fn check_leaf(
    node_id: usize,
    node: &BvhNode,
    triangles: &[Triangle],
) -> Result<Range<usize>, ValidationError> {
    let range = node.triangles();

    if range.is_empty() && !(node_id == 0 && triangles.is_empty()) {
        return Err(ValidationError::EmptyLeaf { node: node_id });
    }

    if range.end > triangles.len() {
        return Err(ValidationError::TrianglesOutOfBounds {
            node: node_id,
            range,
            len: triangles.len(),
        });
    }

    let owned: BoundingBox = triangles[range.clone()].iter().collect();

    if node.bounds() != owned {
        return Err(ValidationError::LooseBounds { node: node_id });
    }

    Ok(range)
}
