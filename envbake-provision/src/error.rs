//! Error types for envbake-provision.

use std::path::PathBuf;

use thiserror::Error;

/// Everything that can stop one environment from getting its repository.
#[derive(Debug, Error)]
pub enum ProvisionError {
    #[error("GITHUB_TOKEN is required to create a repository, but it is not set")]
    MissingToken,

    /// The API answered with anything other than `201 Created`.
    #[error("failed to create repository '{name}', status code: {status}: {body}")]
    Status {
        name: String,
        status: u16,
        body: String,
    },

    /// Connection, TLS or DNS failure before a response arrived.
    #[error("request to {url} failed: {message}")]
    Transport { url: String, message: String },

    #[error("unexpected GitHub response: {0}")]
    Response(String),

    /// A `git` step exited non-zero.
    #[error("git {step} failed in {dir}: {stderr}")]
    Git {
        step: &'static str,
        dir: PathBuf,
        stderr: String,
    },

    /// `git` could not be started at all.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot derive a repository name from {path}")]
    NoRepoName { path: PathBuf },
}

pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> ProvisionError {
    ProvisionError::Io {
        path: path.into(),
        source,
    }
}
