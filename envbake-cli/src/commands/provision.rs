//! `envbake provision <env-dir>`: repository setup for one existing environment.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;
use colored::Colorize;

use envbake_core::config;
use envbake_provision::{GitHubProvisioner, Provisioner};

#[derive(Args, Debug)]
pub struct ProvisionArgs {
    /// Environment directory, e.g. ~/Desktop/Solutions/acme/DEV_webapp.
    /// Its name becomes the repository name.
    pub env_dir: PathBuf,
}

impl ProvisionArgs {
    pub fn run(self) -> Result<()> {
        if !self.env_dir.is_dir() {
            bail!(
                "environment directory '{}' does not exist",
                self.env_dir.display()
            );
        }
        let settings = config::resolve().context("failed to load envbake configuration")?;

        let outcome = GitHubProvisioner::new(&settings.github)
            .provision(&self.env_dir)
            .with_context(|| format!("failed to provision '{}'", self.env_dir.display()))?;

        println!(
            "{} Created {} and pushed to {}",
            "✓".green(),
            outcome.html_url,
            outcome.remote_url
        );
        Ok(())
    }
}
