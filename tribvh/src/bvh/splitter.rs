use crate::bvh::cost;
use crate::{Axis, BuildParams, BvhNode, Triangle};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SplittingPlane {
    pub split_by: Axis,
    pub split_at: f32,
    pub split_cost: f32,
}

/// Finds the cheapest plane among `params.split_samples` evenly spaced
/// candidates per axis.
///
/// Candidates are scanned X, Y, Z and, within each axis, from the node's
/// minimum corner upwards; the first strictly cheaper one wins, so equally
/// good planes resolve to the earliest. Returns `None` for nodes owning fewer
/// than two triangles, where there's nothing to split.
pub fn find_splitting_plane(
    node: &BvhNode,
    triangles: &[Triangle],
    params: &BuildParams,
) -> Option<SplittingPlane> {
    if node.count <= 1 {
        return None;
    }

    let bounds = node.bounds();
    let mut best: Option<SplittingPlane> = None;

    for split_by in Axis::all() {
        let min = bounds.min()[split_by];
        let max = bounds.max()[split_by];

        for sample in 0..params.split_samples {
            let t = (sample as f32) / (params.split_samples as f32);
            let split_at = min + t * (max - min);
            let split_cost =
                cost::axis_cost(node, split_by, split_at, triangles);

            let is_better = best.map_or(split_cost < f32::INFINITY, |best| {
                split_cost < best.split_cost
            });

            if is_better {
                best = Some(SplittingPlane {
                    split_by,
                    split_at,
                    split_cost,
                });
            }
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use glam::{vec3, Vec3};

    use super::*;

    fn triangle_at(center: Vec3) -> Triangle {
        Triangle::new(
            center + vec3(-0.5, -0.5, 0.0),
            center + vec3(0.5, -0.5, 0.0),
            center + vec3(0.0, 1.0, 0.0),
        )
    }

    fn node_over(triangles: &[Triangle]) -> BvhNode {
        let bounds = triangles.iter().collect();

        BvhNode::from_bounds(0, triangles.len() as u32, bounds)
    }

    #[test]
    fn nothing_to_split() {
        let triangles = [triangle_at(Vec3::ZERO)];
        let params = BuildParams::default();

        assert_eq!(None, find_splitting_plane(&node_over(&[]), &[], &params));

        assert_eq!(
            None,
            find_splitting_plane(&node_over(&triangles), &triangles, &params)
        );
    }

    #[test]
    fn no_samples() {
        let triangles = [triangle_at(Vec3::ZERO), triangle_at(Vec3::ONE)];
        let params = BuildParams::default().with_split_samples(0);

        assert_eq!(
            None,
            find_splitting_plane(&node_over(&triangles), &triangles, &params)
        );
    }

    #[test]
    fn picks_separating_axis() {
        let triangles = [
            triangle_at(vec3(0.0, 0.0, 0.0)),
            triangle_at(vec3(0.0, 0.0, 10.0)),
            triangle_at(vec3(0.0, 0.0, 20.0)),
            triangle_at(vec3(0.0, 0.0, 30.0)),
        ];

        let node = node_over(&triangles);
        let params = BuildParams::default();
        let plane = find_splitting_plane(&node, &triangles, &params).unwrap();

        assert_eq!(Axis::Z, plane.split_by);
        assert!(plane.split_at > 0.0 && plane.split_at <= 30.0);

        assert_eq!(
            plane.split_cost,
            cost::axis_cost(&node, plane.split_by, plane.split_at, &triangles)
        );
    }

    #[test]
    fn first_candidate_wins_ties() {
        // Both X and Y separate these at the same cost
        let triangles = [
            triangle_at(vec3(0.0, 0.0, 0.0)),
            triangle_at(vec3(10.0, 10.0, 0.0)),
        ];

        let node = node_over(&triangles);
        let params = BuildParams::default();
        let plane = find_splitting_plane(&node, &triangles, &params).unwrap();

        assert_eq!(Axis::X, plane.split_by);
    }
}
