//! Text format of the node and triangle files.
//!
//! Both files have one record per line, fields separated by `", "`:
//!
//! ```text
//! index, count, min.x, min.y, min.z, max.x, max.y, max.z, child_ind, padding
//! v0.x, v0.y, v0.z, v1.x, v1.y, v1.z, v2.x, v2.y, v2.z
//! ```
//!
//! Floats are written in their shortest round-trip form, so reading a file
//! back yields bit-identical values.

use std::fs::{File, OpenOptions};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use glam::{vec3, vec4, Vec3, Vec4};

use crate::utils::{lines, metric};
use crate::{BvhNode, Diagnostic, Error, Parsed, RecordKind, Result, Triangle};

pub fn write_nodes(path: impl AsRef<Path>, nodes: &[BvhNode]) -> Result<()> {
    let path = path.as_ref();
    let _metric = metric("write_nodes");

    write(path, |writer| format_nodes(writer, nodes))?;

    log::debug!("Wrote {} nodes to `{}`", nodes.len(), path.display());

    Ok(())
}

pub fn write_triangles(
    path: impl AsRef<Path>,
    triangles: &[Triangle],
) -> Result<()> {
    let path = path.as_ref();
    let _metric = metric("write_triangles");

    write(path, |writer| format_triangles(writer, triangles))?;

    log::debug!(
        "Wrote {} triangles to `{}`",
        triangles.len(),
        path.display()
    );

    Ok(())
}

pub fn read_nodes(path: impl AsRef<Path>) -> Result<Parsed<Vec<BvhNode>>> {
    let path = path.as_ref();
    let _metric = metric("read_nodes");
    let nodes = read(path, parse_nodes)?;

    log::debug!(
        "Read {} nodes from `{}`; skipped = {}",
        nodes.value.len(),
        path.display(),
        nodes.skipped.len()
    );

    Ok(nodes)
}

pub fn read_triangles(
    path: impl AsRef<Path>,
) -> Result<Parsed<Vec<Triangle>>> {
    let path = path.as_ref();
    let _metric = metric("read_triangles");
    let triangles = read(path, parse_triangles)?;

    log::debug!(
        "Read {} triangles from `{}`; skipped = {}",
        triangles.value.len(),
        path.display(),
        triangles.skipped.len()
    );

    Ok(triangles)
}

pub fn format_nodes(
    mut writer: impl Write,
    nodes: &[BvhNode],
) -> io::Result<()> {
    for node in nodes {
        writeln!(
            writer,
            "{}, {}, {}, {}, {}, {}, {}, {}, {}, {}",
            node.index,
            node.count,
            node.min_corner.x,
            node.min_corner.y,
            node.min_corner.z,
            node.max_corner.x,
            node.max_corner.y,
            node.max_corner.z,
            node.child_ind,
            node.padding,
        )?;
    }

    Ok(())
}

pub fn format_triangles(
    mut writer: impl Write,
    triangles: &[Triangle],
) -> io::Result<()> {
    for triangle in triangles {
        let [v0, v1, v2] = triangle.vertices();

        writeln!(
            writer,
            "{}, {}, {}, {}, {}, {}, {}, {}, {}",
            v0.x, v0.y, v0.z, v1.x, v1.y, v1.z, v2.x, v2.y, v2.z,
        )?;
    }

    Ok(())
}

pub fn parse_nodes(
    reader: impl BufRead,
) -> io::Result<Parsed<Vec<BvhNode>>> {
    parse(reader, RecordKind::Node, |fields| {
        if fields.len() != 10 {
            return Err(format!("expected 10 fields, got {}", fields.len()));
        }

        let corner = |x, y, z| -> Result<Vec4, String> {
            Ok(vec4(float(x)?, float(y)?, float(z)?, 0.0))
        };

        Ok(BvhNode {
            min_corner: corner(fields[2], fields[3], fields[4])?,
            max_corner: corner(fields[5], fields[6], fields[7])?,
            index: int(fields[0])?,
            count: int(fields[1])?,
            child_ind: int(fields[8])?,
            padding: int(fields[9])?,
        })
    })
}

pub fn parse_triangles(
    reader: impl BufRead,
) -> io::Result<Parsed<Vec<Triangle>>> {
    parse(reader, RecordKind::Triangle, |fields| {
        let &[x0, y0, z0, x1, y1, z1, x2, y2, z2] = fields else {
            return Err(format!("expected 9 fields, got {}", fields.len()));
        };

        let point = |x, y, z| -> Result<Vec3, String> {
            Ok(vec3(float(x)?, float(y)?, float(z)?))
        };

        Ok(Triangle::new(
            point(x0, y0, z0)?,
            point(x1, y1, z1)?,
            point(x2, y2, z2)?,
        ))
    })
}

/// Reads `path` leniently, turning a missing or unreadable file into an
/// empty result with a single whole-file diagnostic.
pub(crate) fn read_or_default<T>(
    path: &Path,
    record: RecordKind,
    read: impl FnOnce(&Path) -> Result<Parsed<T>>,
) -> Parsed<T>
where
    T: Default,
{
    read(path).unwrap_or_else(|err| {
        log::error!("{err}");

        Parsed {
            value: Default::default(),
            skipped: vec![Diagnostic::new(0, record, err)],
        }
    })
}

pub(crate) fn ensure_exists(path: &Path) -> Result<()> {
    if path.exists() {
        Ok(())
    } else {
        Err(Error::MissingResource { path: path.into() })
    }
}

fn write(
    path: &Path,
    f: impl FnOnce(&mut BufWriter<File>) -> io::Result<()>,
) -> Result<()> {
    ensure_exists(path)?;

    let file = OpenOptions::new()
        .write(true)
        .truncate(true)
        .open(path)
        .map_err(|err| Error::unreadable(path, err))?;

    let mut writer = BufWriter::new(file);

    f(&mut writer)
        .and_then(|_| writer.flush())
        .map_err(|err| Error::io(path, err))
}

fn read<T>(
    path: &Path,
    f: impl FnOnce(BufReader<File>) -> io::Result<Parsed<T>>,
) -> Result<Parsed<T>> {
    ensure_exists(path)?;

    let file = File::open(path).map_err(|err| Error::unreadable(path, err))?;

    f(BufReader::new(file)).map_err(|err| Error::io(path, err))
}

fn parse<T>(
    reader: impl BufRead,
    record: RecordKind,
    parse_fields: impl Fn(&[&str]) -> Result<T, String>,
) -> io::Result<Parsed<Vec<T>>> {
    let mut parsed = Parsed::new(Vec::new());

    for line in lines(reader) {
        let (line_no, line) = line?;

        if line.trim().is_empty() {
            continue;
        }

        let fields: Vec<_> = line.split(',').map(str::trim).collect();

        match parse_fields(&fields) {
            Ok(value) => {
                parsed.value.push(value);
            }

            Err(reason) => {
                let diagnostic = Diagnostic::new(line_no, record, reason);

                log::warn!("{diagnostic}");
                parsed.skipped.push(diagnostic);
            }
        }
    }

    Ok(parsed)
}

fn int(field: &str) -> Result<u32, String> {
    field
        .parse()
        .map_err(|err| format!("invalid integer `{field}`: {err}"))
}

fn float(field: &str) -> Result<f32, String> {
    field
        .parse()
        .map_err(|err| format!("invalid number `{field}`: {err}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(index: u32, count: u32, child_ind: u32, padding: u32) -> BvhNode {
        BvhNode {
            min_corner: vec4(-1.5, 0.1, 1e-7, 0.0),
            max_corner: vec4(3.25, 1e20, -0.0, 0.0),
            index,
            count,
            child_ind,
            padding,
        }
    }

    #[test]
    fn format_nodes_line() {
        let mut out = Vec::new();

        format_nodes(&mut out, &[node(0, 2, 1, 0)]).unwrap();

        assert_eq!(
            "0, 2, -1.5, 0.1, 0.0000001, 3.25, 100000000000000000000, -0, 1, 0\n",
            String::from_utf8(out).unwrap()
        );
    }

    #[test]
    fn nodes_roundtrip() {
        let nodes = vec![node(0, 0, 1, 0), node(0, 3, 0, 7), node(3, 1, 0, 0)];
        let mut out = Vec::new();

        format_nodes(&mut out, &nodes).unwrap();

        let target = parse_nodes(out.as_slice()).unwrap();

        assert!(target.is_clean());
        assert_eq!(nodes.len(), target.value.len());

        for (expected, actual) in nodes.iter().zip(&target.value) {
            assert_eq!(
                bytemuck::bytes_of(expected),
                bytemuck::bytes_of(actual)
            );
        }
    }

    #[test]
    fn parse_accepts_any_float_form() {
        let input = "1,2,1e0,2.0E+0,-.5,  3 , inf, 4.000, 0, 42\n";
        let target = parse_nodes(input.as_bytes()).unwrap();

        assert!(target.is_clean());

        let node = target.value[0];

        assert_eq!(1, node.index);
        assert_eq!(2, node.count);
        assert_eq!(vec4(1.0, 2.0, -0.5, 0.0), node.min_corner);
        assert_eq!(vec4(3.0, f32::INFINITY, 4.0, 0.0), node.max_corner);
        assert_eq!(0, node.child_ind);
        assert_eq!(42, node.padding);
    }

    #[test]
    fn parse_skips_malformed_lines() {
        let input = "\
0, 0, 0, 0, 0, 1, 1, 1, 1, 0

0, 1, 0, 0, 0, 1, 1, 1, 0
-1, 1, 0, 0, 0, 1, 1, 1, 0, 0
0, 1, 0, 0, zero, 1, 1, 1, 0, 0
0, 1, 0, 0, 0, 1, 1, 1, 0, 0
";

        let target = parse_nodes(input.as_bytes()).unwrap();

        assert_eq!(2, target.value.len());
        assert_eq!(Vec4::ZERO, target.value[1].min_corner);

        let lines: Vec<_> =
            target.skipped.iter().map(|diag| diag.line).collect();

        assert_eq!(vec![3, 4, 5], lines);
        assert!(target.skipped.iter().all(|d| d.record == RecordKind::Node));
    }

    #[test]
    fn triangles_roundtrip() {
        let triangles = vec![
            Triangle::new(
                vec3(0.1, 0.2, 0.3),
                vec3(-1.0, 1e-30, 7.0),
                vec3(123456.79, 0.0, -0.0),
            ),
            Triangle::default(),
        ];

        let mut out = Vec::new();

        format_triangles(&mut out, &triangles).unwrap();

        let target = parse_triangles(out.as_slice()).unwrap();

        assert!(target.is_clean());
        assert_eq!(
            bytemuck::cast_slice::<_, u8>(&triangles),
            bytemuck::cast_slice::<_, u8>(&target.value)
        );
    }

    #[test]
    fn parse_skips_malformed_triangles() {
        let input = "\
0, 0, 0, 1, 0, 0, 0, 1, 0
0, 0, 0, 1, 0, 0, 0, 1
0, 0, 0, 1, 0, 0, 0, 1, nope
";

        let target = parse_triangles(input.as_bytes()).unwrap();

        assert_eq!(1, target.value.len());
        assert_eq!(2, target.skipped.len());
        assert_eq!(2, target.skipped[0].line);
        assert_eq!(3, target.skipped[1].line);
    }
}
