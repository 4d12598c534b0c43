//! Domain types: environment prefixes, solution names, resolved destinations.

use std::fmt;
use std::path::PathBuf;

use crate::error::LayoutError;

// ---------------------------------------------------------------------------
// Environment prefixes
// ---------------------------------------------------------------------------

/// One of the fixed deployment stages every solution is scaffolded for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnvPrefix {
    Sandbox,
    Dev,
    Stage,
    Preprod,
    Prod,
}

impl EnvPrefix {
    /// Every prefix, in scaffolding order.
    pub const ALL: [EnvPrefix; 5] = [
        EnvPrefix::Sandbox,
        EnvPrefix::Dev,
        EnvPrefix::Stage,
        EnvPrefix::Preprod,
        EnvPrefix::Prod,
    ];

    pub fn all() -> &'static [EnvPrefix] {
        &Self::ALL
    }

    /// Literal prefix prepended to the source directory's base name.
    pub fn as_str(self) -> &'static str {
        match self {
            EnvPrefix::Sandbox => "SANDBOX_",
            EnvPrefix::Dev => "DEV_",
            EnvPrefix::Stage => "STAGE_",
            EnvPrefix::Preprod => "PREPROD_",
            EnvPrefix::Prod => "PROD_",
        }
    }

    /// `<PREFIX><base_name>`, e.g. `SANDBOX_webapp`.
    pub fn dir_name(self, base_name: &str) -> String {
        format!("{}{base_name}", self.as_str())
    }
}

impl fmt::Display for EnvPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

/// Name of the outer solution directory that holds every environment copy.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SolutionName(String);

impl SolutionName {
    /// Validate a user-supplied solution name.
    ///
    /// The name is trimmed; it must be non-empty, must not be `.`/`..`, and
    /// must not contain `/` or `\`.
    pub fn parse(raw: &str) -> Result<Self, LayoutError> {
        let name = raw.trim();
        if name.is_empty()
            || name == "."
            || name == ".."
            || name.contains('/')
            || name.contains('\\')
        {
            return Err(LayoutError::InvalidSolutionName(raw.to_string()));
        }
        Ok(Self(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SolutionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

// ---------------------------------------------------------------------------
// Destinations
// ---------------------------------------------------------------------------

/// A resolved environment copy target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Destination {
    pub prefix: EnvPrefix,
    /// Directory name, e.g. `DEV_webapp`. Also used as the repository name.
    pub name: String,
    /// `<solution_dir>/<name>`; relative when the solutions root is relative.
    pub path: PathBuf,
}
