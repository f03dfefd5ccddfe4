use std::io;
use std::path::PathBuf;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("file does not exist: {}", .path.display())]
    MissingResource { path: PathBuf },

    #[error("failed to open {}: {source}", .path.display())]
    UnreadableResource { path: PathBuf, source: io::Error },

    #[error("I/O failed on {}: {source}", .path.display())]
    Io { path: PathBuf, source: io::Error },
}

impl Error {
    pub(crate) fn unreadable(
        path: impl Into<PathBuf>,
        source: io::Error,
    ) -> Self {
        Self::UnreadableResource {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use super::*;

    #[test]
    fn display() {
        let target = Error::MissingResource {
            path: "meshes/bunny.bvh".into(),
        };

        assert_eq!("file does not exist: meshes/bunny.bvh", target.to_string());

        let target = Error::io(
            "bunny.tris",
            io::Error::new(io::ErrorKind::Other, "disk full"),
        );

        assert_eq!("I/O failed on bunny.tris: disk full", target.to_string());
        assert!(target.source().is_some());
    }
}
