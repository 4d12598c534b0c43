//! Error types for envbake-core.

use std::path::PathBuf;

use thiserror::Error;

/// Errors from resolving or preparing a solution layout.
#[derive(Debug, Error)]
pub enum LayoutError {
    /// Underlying I/O failure, annotated with the path being created or inspected.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Solution names become a single directory component.
    #[error("invalid solution name '{0}': must be non-empty and contain no path separators")]
    InvalidSolutionName(String),

    /// The source path has no final component to name the environment copies after.
    #[error("cannot derive a directory name from source path {path}")]
    NoBaseName { path: PathBuf },
}

/// Errors from loading `~/.envbake/config.yaml`.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// YAML parse error; includes file path and line context from serde_yaml.
    #[error("failed to parse config at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// `dirs::home_dir()` returned `None`.
    #[error("cannot determine home directory; set $HOME or equivalent")]
    HomeNotFound,
}

pub(crate) fn layout_io_err(path: impl Into<PathBuf>, source: std::io::Error) -> LayoutError {
    LayoutError::Io {
        path: path.into(),
        source,
    }
}
