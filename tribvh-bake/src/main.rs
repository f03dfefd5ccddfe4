mod args;

use std::env;
use std::error::Error;
use std::process::ExitCode;

use tribvh::{Bvh, ObjLoader};

use self::args::{Args, USAGE};

fn main() -> ExitCode {
    let args = match Args::parse(env::args().skip(1)) {
        Ok(args) => args,
        Err(err) => {
            eprintln!("error: {err}\n\n{USAGE}");
            return ExitCode::from(2);
        }
    };

    env_logger::Builder::new()
        .filter_level(args.log_level)
        .parse_default_env()
        .init();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let mesh = ObjLoader::new()
        .with_scale(args.scale)
        .with_translation(args.translation)
        .load(&args.mesh)?;

    if !mesh.is_clean() {
        log::warn!(
            "Skipped {} malformed line(s) in `{}`",
            mesh.skipped.len(),
            args.mesh.display()
        );
    }

    if mesh.value.is_empty() {
        log::warn!("`{}` contains no triangles", args.mesh.display());
    }

    let bvh = Bvh::build(mesh.value, args.params);

    bvh.save(&args.nodes, &args.triangles)?;

    log::info!(
        "Baked `{}`; nodes = {}, triangles = {}, depth = {}",
        args.mesh.display(),
        bvh.nodes().len(),
        bvh.triangles().len(),
        bvh.depth().unwrap_or_default(),
    );

    Ok(())
}
