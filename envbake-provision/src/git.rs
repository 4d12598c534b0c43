//! Local `git` sequence for a freshly copied environment directory.

use std::path::Path;
use std::process::Command;

use crate::error::{io_err, ProvisionError};

/// One `git` invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitStep {
    pub label: &'static str,
    pub args: Vec<String>,
}

fn step<const N: usize>(label: &'static str, args: [&str; N]) -> GitStep {
    GitStep {
        label,
        args: args.iter().map(|a| a.to_string()).collect(),
    }
}

/// init → add → commit → remote add → push, in that order.
pub fn first_push_steps(env_dir_name: &str, remote_url: &str, branch: &str) -> Vec<GitStep> {
    let message = format!("first commit for {env_dir_name}");
    vec![
        step("init", ["init", "-b", branch]),
        step("add", ["add", "."]),
        step("commit", ["commit", "-m", message.as_str()]),
        step("remote add", ["remote", "add", "origin", remote_url]),
        step("push", ["push", "-u", "origin", branch]),
    ]
}

/// Run `steps` inside `dir`, stopping at the first non-zero exit.
pub fn run_steps(dir: &Path, steps: &[GitStep]) -> Result<(), ProvisionError> {
    for step in steps {
        let output = Command::new("git")
            .args(&step.args)
            .current_dir(dir)
            .output()
            .map_err(|e| io_err(dir, e))?;

        if !output.status.success() {
            return Err(ProvisionError::Git {
                step: step.label,
                dir: dir.to_path_buf(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        tracing::debug!(step = step.label, dir = %dir.display(), "git step succeeded");
    }
    Ok(())
}
