//! Errors raised by the content layer.
//!
//! Absence is never an error here: missing documents and directories are
//! reported as `None` or an empty list. Only an environment that cannot be
//! read ends up in `ContentError`.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to list {path:?}: {source}")]
    List {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
}

pub type Result<T> = std::result::Result<T, ContentError>;
