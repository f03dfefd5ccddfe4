mod builder;
mod cost;
mod node;
mod params;
mod printer;
mod serializer;
mod splitter;
mod validator;

use std::path::Path;

pub use self::cost::*;
pub use self::node::*;
pub use self::params::*;
pub use self::printer::*;
pub use self::serializer::*;
pub use self::splitter::*;
pub use self::validator::*;
use crate::utils::metric;
use crate::{BoundingBox, Parsed, RecordKind, Result, Triangle};

/// A bounding-volume hierarchy together with the triangles it indexes.
///
/// `nodes[0]` is the root; children of an internal node live at `child_ind`
/// and `child_ind + 1`, and every leaf owns the `index..index + count` range
/// of `triangles`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Bvh {
    nodes: Vec<BvhNode>,
    triangles: Vec<Triangle>,
}

impl Bvh {
    /// Builds the hierarchy, reordering `triangles` so that each leaf owns a
    /// contiguous range of them.
    pub fn build(mut triangles: Vec<Triangle>, params: BuildParams) -> Self {
        log::info!(
            "Building BVH; triangles = {}, max-depth = {}, split-samples = {}",
            triangles.len(),
            params.max_depth,
            params.split_samples,
        );

        let _metric = metric("build");

        let root = {
            let bounds: BoundingBox = triangles.iter().collect();

            BvhNode::from_bounds(0, triangles.len() as u32, bounds)
        };

        let mut nodes = Vec::with_capacity(2 * triangles.len().max(1) - 1);

        nodes.push(root);
        builder::run(&mut nodes, &mut triangles, &params);

        log::info!("BVH built; nodes = {}", nodes.len());

        Self { nodes, triangles }
    }

    /// Assembles a hierarchy from already-built parts, as-is.
    pub fn from_parts(nodes: Vec<BvhNode>, triangles: Vec<Triangle>) -> Self {
        Self { nodes, triangles }
    }

    pub fn into_parts(self) -> (Vec<BvhNode>, Vec<Triangle>) {
        (self.nodes, self.triangles)
    }

    pub fn nodes(&self) -> &[BvhNode] {
        &self.nodes
    }

    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    pub fn root(&self) -> Option<&BvhNode> {
        self.nodes.first()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.triangles.is_empty()
    }

    /// Returns the node array in its GPU layout.
    pub fn nodes_as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.nodes)
    }

    /// Returns the triangle buffer in its GPU layout.
    pub fn triangles_as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.triangles)
    }

    /// Returns the depth of the deepest node (root = 0).
    ///
    /// Links that don't point forward are ignored, so this terminates on
    /// corrupted hierarchies as well.
    pub fn depth(&self) -> Option<usize> {
        if self.nodes.is_empty() {
            return None;
        }

        let mut max_depth = 0;
        let mut stack = vec![(0, 0)];

        while let Some((node_id, depth)) = stack.pop() {
            let node = self.nodes[node_id];

            max_depth = max_depth.max(depth);

            if node.is_leaf() {
                continue;
            }

            let child_id = node.child_ind as usize;

            if child_id > node_id && child_id + 1 < self.nodes.len() {
                stack.push((child_id, depth + 1));
                stack.push((child_id + 1, depth + 1));
            }
        }

        Some(max_depth)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validate(&self.nodes, &self.triangles)
    }

    /// Writes nodes and triangles into two existing files.
    ///
    /// Both paths are checked before anything gets written, so a missing
    /// file leaves both untouched.
    pub fn save(
        &self,
        nodes_path: impl AsRef<Path>,
        triangles_path: impl AsRef<Path>,
    ) -> Result<()> {
        let nodes_path = nodes_path.as_ref();
        let triangles_path = triangles_path.as_ref();

        for path in [nodes_path, triangles_path] {
            if let Err(err) = serializer::ensure_exists(path) {
                log::error!("Not saving BVH: {err}");
                return Err(err);
            }
        }

        log::info!(
            "Saving BVH; nodes = `{}`, triangles = `{}`",
            nodes_path.display(),
            triangles_path.display()
        );

        write_nodes(nodes_path, &self.nodes)?;
        write_triangles(triangles_path, &self.triangles)?;

        Ok(())
    }

    /// Reads a hierarchy back, failing if either file can't be read.
    ///
    /// Malformed lines are skipped and reported through
    /// [`Parsed::skipped`]; the hierarchy is not validated.
    pub fn try_load(
        nodes_path: impl AsRef<Path>,
        triangles_path: impl AsRef<Path>,
    ) -> Result<Parsed<Self>> {
        let nodes = read_nodes(nodes_path)?;
        let triangles = read_triangles(triangles_path)?;

        Ok(Self::merge(nodes, triangles))
    }

    /// Reads a hierarchy back, never failing: a file that can't be read
    /// contributes nothing but a diagnostic.
    pub fn load(
        nodes_path: impl AsRef<Path>,
        triangles_path: impl AsRef<Path>,
    ) -> Parsed<Self> {
        let nodes = serializer::read_or_default(
            nodes_path.as_ref(),
            RecordKind::Node,
            |path| read_nodes(path),
        );

        let triangles = serializer::read_or_default(
            triangles_path.as_ref(),
            RecordKind::Triangle,
            |path| read_triangles(path),
        );

        Self::merge(nodes, triangles)
    }

    fn merge(
        nodes: Parsed<Vec<BvhNode>>,
        triangles: Parsed<Vec<Triangle>>,
    ) -> Parsed<Self> {
        let mut skipped = nodes.skipped;

        skipped.extend(triangles.skipped);

        Parsed {
            value: Self::from_parts(nodes.value, triangles.value),
            skipped,
        }
    }
}
