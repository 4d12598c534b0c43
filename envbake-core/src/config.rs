//! Configuration resolution.
//!
//! Precedence, highest first: CLI flag (applied by the caller), environment
//! variable, `~/.envbake/config.yaml`, built-in default.
//!
//! ```yaml
//! # ~/.envbake/config.yaml
//! solutions_root: ~/work/solutions
//! github:
//!   api_url: https://api.github.com
//!   private: true
//!   branch: master
//! ```
//!
//! # API pattern
//!
//! - `fn_at(home: &Path, …)` — explicit home and environment; used in tests
//! - `fn(…)` — derives home from `dirs::home_dir()` and reads the process env

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::layout::default_solutions_root_at;

pub const DEFAULT_API_URL: &str = "https://api.github.com";
pub const DEFAULT_BRANCH: &str = "master";

pub const ENV_SOLUTIONS_ROOT: &str = "ENVBAKE_SOLUTIONS_ROOT";
pub const ENV_GITHUB_TOKEN: &str = "GITHUB_TOKEN";
pub const ENV_GITHUB_API_URL: &str = "GITHUB_API_URL";

// ---------------------------------------------------------------------------
// File model
// ---------------------------------------------------------------------------

/// On-disk shape of `config.yaml`. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigFile {
    pub solutions_root: Option<PathBuf>,
    pub github: GithubConfigFile,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GithubConfigFile {
    pub api_url: Option<String>,
    pub private: Option<bool>,
    pub branch: Option<String>,
}

// ---------------------------------------------------------------------------
// Resolved settings
// ---------------------------------------------------------------------------

/// Fully resolved settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub solutions_root: PathBuf,
    pub github: GithubSettings,
}

/// Remote repository settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GithubSettings {
    pub api_url: String,
    /// Absent until a repository is actually requested; checked there.
    pub token: Option<String>,
    pub private: bool,
    pub branch: String,
}

impl Default for GithubSettings {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            token: None,
            private: true,
            branch: DEFAULT_BRANCH.to_string(),
        }
    }
}

/// `<home>/.envbake/config.yaml` — pure, no I/O.
pub fn config_path_at(home: &Path) -> PathBuf {
    home.join(".envbake").join("config.yaml")
}

/// Load the config file; a missing file yields the all-`None` default.
pub fn load_file_at(home: &Path) -> Result<ConfigFile, ConfigError> {
    let path = config_path_at(home);
    if !path.exists() {
        return Ok(ConfigFile::default());
    }
    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::Io {
        path: path.clone(),
        source: e,
    })?;
    if contents.trim().is_empty() {
        return Ok(ConfigFile::default());
    }
    serde_yaml::from_str(&contents).map_err(|e| ConfigError::Parse { path, source: e })
}

/// Resolve settings against `home`, reading variables through `env`.
///
/// Empty variable values count as unset.
pub fn resolve_at<F>(home: &Path, env: F) -> Result<Settings, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let file = load_file_at(home)?;
    let lookup = |key: &str| env(key).filter(|v| !v.trim().is_empty());

    let solutions_root = lookup(ENV_SOLUTIONS_ROOT)
        .map(PathBuf::from)
        .or(file.solutions_root)
        .map(|p| expand_home(&p, home))
        .unwrap_or_else(|| default_solutions_root_at(home));

    let defaults = GithubSettings::default();
    let github = GithubSettings {
        api_url: lookup(ENV_GITHUB_API_URL)
            .or(file.github.api_url)
            .unwrap_or(defaults.api_url),
        token: lookup(ENV_GITHUB_TOKEN),
        private: file.github.private.unwrap_or(defaults.private),
        branch: file.github.branch.unwrap_or(defaults.branch),
    };

    tracing::debug!(
        solutions_root = %solutions_root.display(),
        api_url = %github.api_url,
        "resolved settings"
    );
    Ok(Settings {
        solutions_root,
        github,
    })
}

/// `resolve_at` convenience wrapper over the real home directory and process env.
pub fn resolve() -> Result<Settings, ConfigError> {
    let home = dirs::home_dir().ok_or(ConfigError::HomeNotFound)?;
    resolve_at(&home, |key| std::env::var(key).ok())
}

fn expand_home(path: &Path, home: &Path) -> PathBuf {
    match path.strip_prefix("~") {
        Ok(rest) => home.join(rest),
        Err(_) => path.to_path_buf(),
    }
}
