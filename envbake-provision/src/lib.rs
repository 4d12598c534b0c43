//! # envbake-provision
//!
//! Remote repository setup for one environment directory: create the GitHub
//! repository, then init/add/commit/remote/push locally.
//!
//! Callers run this only after the copy join, once per destination they
//! choose. A failure here never touches recorded copy outcomes.

pub mod error;
pub mod git;
pub mod github;

use std::path::Path;

use envbake_core::GithubSettings;

pub use error::ProvisionError;
pub use github::{CreatedRepo, GitHubClient};

/// Result of provisioning one environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisionOutcome {
    pub repo_name: String,
    pub html_url: String,
    pub remote_url: String,
}

/// Sets up a remote repository for an environment directory.
pub trait Provisioner {
    fn provision(&self, env_dir: &Path) -> Result<ProvisionOutcome, ProvisionError>;
}

/// GitHub + local `git` provisioner.
pub struct GitHubProvisioner {
    client: GitHubClient,
    private: bool,
    branch: String,
}

impl GitHubProvisioner {
    pub fn new(settings: &GithubSettings) -> Self {
        Self {
            client: GitHubClient::from_settings(settings),
            private: settings.private,
            branch: settings.branch.clone(),
        }
    }
}

impl Provisioner for GitHubProvisioner {
    fn provision(&self, env_dir: &Path) -> Result<ProvisionOutcome, ProvisionError> {
        let repo_name = repo_name(env_dir)?;
        let repo = self.client.create_repo(&repo_name, self.private)?;

        let steps = git::first_push_steps(&repo_name, &repo.clone_url, &self.branch);
        git::run_steps(env_dir, &steps)?;
        tracing::info!(repo = %repo_name, remote = %repo.clone_url, "pushed environment");

        Ok(ProvisionOutcome {
            repo_name,
            html_url: repo.html_url,
            remote_url: repo.clone_url,
        })
    }
}

/// The environment directory's own name doubles as the repository name.
pub fn repo_name(env_dir: &Path) -> Result<String, ProvisionError> {
    env_dir
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| ProvisionError::NoRepoName {
            path: env_dir.to_path_buf(),
        })
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn repo_name_is_directory_name() {
        let name = repo_name(&PathBuf::from("/solutions/acme/STAGE_webapp")).unwrap();
        assert_eq!(name, "STAGE_webapp");
    }

    #[test]
    fn repo_name_requires_a_final_component() {
        let err = repo_name(Path::new("/")).unwrap_err();
        assert!(matches!(err, ProvisionError::NoRepoName { .. }), "got: {err}");
    }

    #[test]
    fn missing_token_leaves_directory_untouched() {
        let tmp = TempDir::new().unwrap();
        let env_dir = tmp.path().join("DEV_webapp");
        std::fs::create_dir_all(&env_dir).unwrap();

        let provisioner = GitHubProvisioner::new(&GithubSettings {
            api_url: "http://127.0.0.1:9".to_string(),
            ..GithubSettings::default()
        });
        let err = provisioner.provision(&env_dir).unwrap_err();

        assert!(matches!(err, ProvisionError::MissingToken), "got: {err}");
        assert!(!env_dir.join(".git").exists());
    }
}
