//! Solution workspace layout.
//!
//! # Storage layout
//!
//! ```text
//! <solutions_root>/              (default: ~/Desktop/Solutions)
//!   <solution>/
//!     SANDBOX_<source>/
//!     DEV_<source>/
//!     STAGE_<source>/
//!     PREPROD_<source>/
//!     PROD_<source>/
//! ```
//!
//! Environment directories are not created here; the copier creates each one
//! as part of its own copy so a failure stays attributed to that environment.

use std::path::{Path, PathBuf};

use crate::error::{layout_io_err, LayoutError};
use crate::types::{Destination, EnvPrefix, SolutionName};

/// `<home>/Desktop/Solutions`. Pure, no I/O.
pub fn default_solutions_root_at(home: &Path) -> PathBuf {
    home.join("Desktop").join("Solutions")
}

/// Final path component of `source`, used as the suffix of every environment
/// directory name.
///
/// Paths without a final component (`.`, `..`, `foo/..`) are canonicalized
/// first so they name the directory they point at.
pub fn source_base_name(source: &Path) -> Result<String, LayoutError> {
    if let Some(name) = source.file_name() {
        return Ok(name.to_string_lossy().into_owned());
    }
    let resolved = source
        .canonicalize()
        .map_err(|e| layout_io_err(source, e))?;
    resolved
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or_else(|| LayoutError::NoBaseName {
            path: source.to_path_buf(),
        })
}

/// Where one solution's environment copies live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolutionLayout {
    pub solutions_root: PathBuf,
    pub solution: SolutionName,
}

impl SolutionLayout {
    pub fn new(solutions_root: impl Into<PathBuf>, solution: SolutionName) -> Self {
        Self {
            solutions_root: solutions_root.into(),
            solution,
        }
    }

    /// `<solutions_root>/<solution>`. Pure, no I/O.
    pub fn solution_dir(&self) -> PathBuf {
        self.solutions_root.join(self.solution.as_str())
    }

    /// One destination per [`EnvPrefix`], in scaffolding order.
    pub fn destinations(&self, source: &Path) -> Result<Vec<Destination>, LayoutError> {
        let base_name = source_base_name(source)?;
        let solution_dir = self.solution_dir();
        Ok(EnvPrefix::all()
            .iter()
            .map(|prefix| {
                let name = prefix.dir_name(&base_name);
                Destination {
                    prefix: *prefix,
                    path: solution_dir.join(&name),
                    name,
                }
            })
            .collect())
    }

    /// Create the solutions root and the solution directory if missing.
    ///
    /// Returns the solution directory. Existing directories are left as-is.
    pub fn prepare(&self) -> Result<PathBuf, LayoutError> {
        let solution_dir = self.solution_dir();
        if !solution_dir.is_dir() {
            std::fs::create_dir_all(&solution_dir).map_err(|e| layout_io_err(&solution_dir, e))?;
            tracing::debug!(path = %solution_dir.display(), "created solution directory");
        }
        Ok(solution_dir)
    }
}
