//! Wavefront OBJ ingestion.
//!
//! Only positions (`v`) and faces (`f`) are taken into account; normals,
//! texture coordinates, groups, materials and everything else is ignored.
//! Malformed vertex and face lines are skipped rather than failing the whole
//! load, and reported through [`Parsed::skipped`].

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use glam::{vec3, Vec3};

use crate::bvh::ensure_exists;
use crate::utils::{lines, metric};
use crate::{Diagnostic, Error, Parsed, RecordKind, Result, Triangle};

#[derive(Clone, Debug, PartialEq)]
pub struct ObjLoader {
    scale: Vec3,
    translation: Vec3,
}

impl ObjLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the per-axis scale applied to every vertex (before translation);
    /// use [`Vec3::splat()`] for a uniform one.
    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_translation(mut self, translation: Vec3) -> Self {
        self.translation = translation;
        self
    }

    pub fn load(
        &self,
        path: impl AsRef<Path>,
    ) -> Result<Parsed<Vec<Triangle>>> {
        let path = path.as_ref();
        let _metric = metric("load_obj");

        ensure_exists(path)?;

        let file =
            File::open(path).map_err(|err| Error::unreadable(path, err))?;

        let mesh = self
            .parse(BufReader::new(file))
            .map_err(|err| Error::io(path, err))?;

        log::info!(
            "Loaded `{}`; triangles = {}, skipped = {}",
            path.display(),
            mesh.value.len(),
            mesh.skipped.len()
        );

        Ok(mesh)
    }

    pub fn parse(
        &self,
        reader: impl BufRead,
    ) -> io::Result<Parsed<Vec<Triangle>>> {
        let mut vertices = Vec::new();
        let mut mesh = Parsed::new(Vec::new());

        for line in lines(reader) {
            let (line_no, line) = line?;
            let mut tokens = line.split_whitespace();

            let outcome = match tokens.next() {
                Some("v") => parse_vertex(tokens)
                    .map(|vertex| vertices.push(vertex))
                    .map_err(|reason| (RecordKind::Vertex, reason)),

                Some("f") => parse_face(tokens, vertices.len())
                    .map(|face| {
                        for [a, b, c] in triangulate(&face) {
                            mesh.value.push(
                                Triangle::new(
                                    vertices[a],
                                    vertices[b],
                                    vertices[c],
                                )
                                .transformed(self.scale, self.translation),
                            );
                        }
                    })
                    .map_err(|reason| (RecordKind::Face, reason)),

                _ => Ok(()),
            };

            if let Err((record, reason)) = outcome {
                let diagnostic = Diagnostic::new(line_no, record, reason);

                log::warn!("{diagnostic}");
                mesh.skipped.push(diagnostic);
            }
        }

        Ok(mesh)
    }
}

impl Default for ObjLoader {
    fn default() -> Self {
        Self {
            scale: Vec3::ONE,
            translation: Vec3::ZERO,
        }
    }
}

fn parse_vertex<'a>(
    mut tokens: impl Iterator<Item = &'a str>,
) -> Result<Vec3, String> {
    let mut coord = || -> Result<f32, String> {
        let token = tokens.next().ok_or("expected 3 coordinates")?;

        token
            .parse()
            .map_err(|err| format!("invalid coordinate `{token}`: {err}"))
    };

    Ok(vec3(coord()?, coord()?, coord()?))
}

/// Parses a face into zero-based vertex indices.
///
/// Accepts `v`, `v/vt`, `v//vn` and `v/vt/vn` tokens; only `v` is used.
/// Indices are 1-based, anything non-positive or past `vertex_count` makes
/// the whole face invalid.
fn parse_face<'a>(
    tokens: impl Iterator<Item = &'a str>,
    vertex_count: usize,
) -> Result<Vec<usize>, String> {
    let face = tokens
        .map(|token| {
            let index = token.split('/').next().unwrap_or_default();

            let index: i64 = index
                .parse()
                .map_err(|_| format!("invalid vertex index `{token}`"))?;

            if index <= 0 || index as u64 > vertex_count as u64 {
                return Err(format!(
                    "vertex index {index} out of range 1..={vertex_count}"
                ));
            }

            Ok((index - 1) as usize)
        })
        .collect::<Result<Vec<_>, _>>()?;

    if face.len() < 3 {
        return Err(format!(
            "expected at least 3 vertices, got {}",
            face.len()
        ));
    }

    Ok(face)
}

/// Splits a polygon into a fan of triangles around its first vertex.
fn triangulate(face: &[usize]) -> impl Iterator<Item = [usize; 3]> + '_ {
    face[1..]
        .windows(2)
        .map(move |pair| [face[0], pair[0], pair[1]])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(input: &str) -> Parsed<Vec<Triangle>> {
        ObjLoader::new().parse(input.as_bytes()).unwrap()
    }

    #[test]
    fn triangles() {
        let target = parse(
            "\
# a comment
o thing
v 0 0 0
v 1 0 0
v 0 1 0 1.0
vn 0 0 1
vt 0.5 0.5
s off
usemtl stone
f 1 2 3
f 3/1 2/1/1 1//1
",
        );

        assert!(target.is_clean());

        assert_eq!(
            vec![
                Triangle::new(Vec3::ZERO, Vec3::X, Vec3::Y),
                Triangle::new(Vec3::Y, Vec3::X, Vec3::ZERO),
            ],
            target.value
        );
    }

    #[test]
    fn faces_reference_vertices_seen_so_far() {
        let target = parse(
            "\
v 0 0 0
v 1 0 0
f 1 2 3
v 0 1 0
f 1 2 3
",
        );

        assert_eq!(1, target.value.len());
        assert_eq!(1, target.skipped.len());
        assert_eq!(3, target.skipped[0].line);
        assert_eq!(RecordKind::Face, target.skipped[0].record);
    }

    #[test]
    fn zero_index_is_skipped() {
        let target = parse(
            "\
v 0 0 0
v 1 0 0
v 0 1 0
f 0 1 2
",
        );

        assert!(target.value.is_empty());
        assert_eq!(1, target.skipped.len());
        assert_eq!(4, target.skipped[0].line);
    }

    #[test]
    fn malformed_lines_are_skipped() {
        let target = parse(
            "\
v 0 0 0
v 1 0
v 1 zero 0
v 1 0 0
v 0 1 0
f 1 2
f 1 two 3
f -1 2 3
f 1 2 3
",
        );

        assert_eq!(1, target.value.len());

        let skipped: Vec<_> = target
            .skipped
            .iter()
            .map(|diag| (diag.line, diag.record))
            .collect();

        assert_eq!(
            vec![
                (2, RecordKind::Vertex),
                (3, RecordKind::Vertex),
                (6, RecordKind::Face),
                (7, RecordKind::Face),
                (8, RecordKind::Face),
            ],
            skipped
        );
    }

    #[test]
    fn polygons_are_fanned() {
        let target = parse(
            "\
v 0 0 0
v 1 0 0
v 1 1 0
v 0 1 0
f 1 2 3 4
",
        );

        assert_eq!(
            vec![
                Triangle::new(Vec3::ZERO, Vec3::X, vec3(1.0, 1.0, 0.0)),
                Triangle::new(Vec3::ZERO, vec3(1.0, 1.0, 0.0), Vec3::Y),
            ],
            target.value
        );
    }

    #[test]
    fn transform() {
        let target = ObjLoader::new()
            .with_scale(vec3(2.0, 3.0, 4.0))
            .with_translation(vec3(0.0, 0.0, -1.0))
            .parse("v 1 1 1\nv 0 0 0\nv 1 0 0\nf 1 2 3\n".as_bytes())
            .unwrap();

        assert_eq!(
            vec![Triangle::new(
                vec3(2.0, 3.0, 3.0),
                vec3(0.0, 0.0, -1.0),
                vec3(2.0, 0.0, -1.0),
            )],
            target.value
        );
    }
}
