use std::path::PathBuf;

use crate::model::BlockKind;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The grammar file could not be read.
    #[error("could not read grammar file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A block marker is absent, so the file is not in the expected shape.
    #[error("unsupported grammar format: {kind} block: could not find `{marker}`")]
    MissingMarker { kind: BlockKind, marker: &'static str },

    #[error("`{0}` can not be used as an enum variant")]
    InvalidTokenName(String),

    #[error("token `{0}` collides with the fallback variant")]
    FallbackCollision(String),

    #[error("rustfmt failed: {0}")]
    Rustfmt(String),

    #[error("could not write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
