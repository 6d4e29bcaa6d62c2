//! Library error type
//!
//! Rendering itself never fails on missing data; these variants cover the
//! infrastructure around it (files, config, templates).

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to access {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid query result in {path:?}: {source}")]
    Query {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid config {path:?}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("template error: {0}")]
    Template(#[from] tera::Error),

    #[error("no post with slug {0:?}")]
    PostNotFound(String),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
