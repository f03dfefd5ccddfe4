use std::fmt::Write;

use crate::BvhNode;

/// Renders a hierarchy as a Graphviz digraph, handy for eyeballing what the
/// builder came up with (`dot -Tsvg`).
pub struct BvhPrinter;

impl BvhPrinter {
    pub fn print(nodes: &[BvhNode]) -> String {
        let mut out = String::new();

        _ = writeln!(&mut out, "digraph {{");

        if !nodes.is_empty() {
            Self::process(&mut out, nodes);
        }

        _ = writeln!(&mut out, "}}");

        out
    }

    fn process(out: &mut String, nodes: &[BvhNode]) {
        let mut stack = vec![0];

        while let Some(id) = stack.pop() {
            let node = nodes[id];

            if node.is_leaf() {
                let triangles = node.triangles();

                _ = writeln!(
                    out,
                    "  n{} [label=\"leaf({}..{})\"]",
                    id, triangles.start, triangles.end
                );

                continue;
            }

            let bb = node.bounds();

            _ = writeln!(
                out,
                "  n{} [label=\"node({} : {})\"]",
                id,
                bb.min(),
                bb.max()
            );

            let left_id = node.child_ind as usize;

            for child_id in [left_id, left_id + 1] {
                // Corrupted links are printed, but not followed
                if child_id > id && child_id < nodes.len() {
                    stack.push(child_id);
                }

                _ = writeln!(out, "  n{} -> n{}", id, child_id);
            }
        }
    }
}
