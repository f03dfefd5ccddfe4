use std::path::PathBuf;

use glam::{vec3, Vec3};
use log::LevelFilter;
use tribvh::BuildParams;

pub const USAGE: &str = "\
usage: tribvh-bake <mesh.obj> <nodes.txt> <triangles.txt> [options]

Both output files must already exist; they get truncated and rewritten.

options:
    --scale S | X,Y,Z      scale applied to every vertex (default: 1)
    --translate X,Y,Z      translation applied after scaling (default: 0,0,0)
    --max-depth N          maximum depth of the hierarchy (default: 32)
    --samples N            candidate planes tested per axis (default: 5)
    -v, --verbose          print debug logs

RUST_LOG, when set, overrides the log level.";

#[derive(Clone, Debug, PartialEq)]
pub struct Args {
    pub mesh: PathBuf,
    pub nodes: PathBuf,
    pub triangles: PathBuf,
    pub scale: Vec3,
    pub translation: Vec3,
    pub params: BuildParams,
    pub log_level: LevelFilter,
}

impl Args {
    pub fn parse(
        args: impl IntoIterator<Item = String>,
    ) -> Result<Self, String> {
        let mut paths = Vec::new();
        let mut scale = Vec3::ONE;
        let mut translation = Vec3::ZERO;
        let mut params = BuildParams::default();
        let mut log_level = LevelFilter::Info;
        let mut args = args.into_iter();

        while let Some(arg) = args.next() {
            let mut value = || {
                args.next()
                    .ok_or_else(|| format!("missing value for `{arg}`"))
            };

            match arg.as_str() {
                "--scale" => {
                    scale = parse_vec(&value()?, true)?;
                }
                "--translate" => {
                    translation = parse_vec(&value()?, false)?;
                }
                "--max-depth" => {
                    params.max_depth = parse_int(&value()?)?;
                }
                "--samples" => {
                    params.split_samples = parse_int(&value()?)?;
                }
                "-v" | "--verbose" => {
                    log_level = LevelFilter::Debug;
                }
                flag if flag.starts_with('-') && flag.len() > 1 => {
                    return Err(format!("unknown option `{flag}`"));
                }
                _ => {
                    paths.push(PathBuf::from(&arg));
                }
            }
        }

        let [mesh, nodes, triangles]: [PathBuf; 3] =
            paths.try_into().map_err(|paths: Vec<_>| {
                format!("expected 3 paths, got {}", paths.len())
            })?;

        Ok(Self {
            mesh,
            nodes,
            triangles,
            scale,
            translation,
            params,
            log_level,
        })
    }
}

/// Parses `X,Y,Z` or, if `allow_splat` is set, a single `S` meaning `S,S,S`.
fn parse_vec(value: &str, allow_splat: bool) -> Result<Vec3, String> {
    let coords = value
        .split(',')
        .map(|coord| {
            coord
                .trim()
                .parse::<f32>()
                .map_err(|err| format!("invalid number `{coord}`: {err}"))
        })
        .collect::<Result<Vec<_>, _>>()?;

    match coords[..] {
        [s] if allow_splat => Ok(Vec3::splat(s)),
        [x, y, z] => Ok(vec3(x, y, z)),
        _ => Err(format!("invalid vector `{value}`")),
    }
}

fn parse_int(value: &str) -> Result<u32, String> {
    value
        .parse()
        .map_err(|err| format!("invalid number `{value}`: {err}"))
}
