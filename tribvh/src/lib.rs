//! Bounding-volume hierarchy builder for triangle meshes.
//!
//! The hierarchy is a flat array of [`BvhNode`]s linked by indices, built
//! over a triangle buffer that gets reordered in place so that every leaf
//! owns a contiguous range of triangles. Both arrays can be persisted to a
//! pair of text files and loaded back without rebuilding.
//!
//! ```no_run
//! use glam::Vec3;
//! use tribvh::{BuildParams, Bvh, ObjLoader};
//!
//! let mesh = ObjLoader::new()
//!     .with_scale(Vec3::splat(2.0))
//!     .load("bunny.obj")
//!     .unwrap();
//!
//! let bvh = Bvh::build(mesh.value, BuildParams::default());
//!
//! bvh.save("bunny.bvh", "bunny.tris").unwrap();
//! ```

mod axis;
mod bounding_box;
mod bvh;
mod diagnostic;
mod error;
mod obj;
mod triangle;
mod utils;

pub use self::axis::*;
pub use self::bounding_box::*;
pub use self::bvh::*;
pub use self::diagnostic::*;
pub use self::error::*;
pub use self::obj::*;
pub use self::triangle::*;
