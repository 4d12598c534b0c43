//! `envbake bake`: copy a source directory into every environment of a
//! solution, report per environment, then offer repository setup.

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Args;
use colored::Colorize;
use tabled::{settings::Style, Table, Tabled};

use envbake_copy::{copy_to_many, CopyReport};
use envbake_core::{config, Destination, SolutionLayout, SolutionName};
use envbake_provision::{GitHubProvisioner, ProvisionError, ProvisionOutcome, Provisioner};

use crate::prompt::Prompter;
use crate::RepoMode;

/// Arguments for `envbake bake`.
#[derive(Args, Debug)]
pub struct BakeArgs {
    /// Directory to copy. Relative paths resolve against the current directory.
    /// Prompted for when omitted.
    pub source: Option<PathBuf>,

    /// Outer solution directory name. Prompted for when omitted.
    #[arg(long, short = 's')]
    pub solution: Option<String>,

    /// Directory that holds solutions. Overrides $ENVBAKE_SOLUTIONS_ROOT and
    /// the config file; defaults to ~/Desktop/Solutions.
    #[arg(long, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Repository setup after copying: ask | all | none.
    #[arg(long, value_name = "MODE", default_value_t = RepoMode::Ask)]
    pub repos: RepoMode,

    /// Print the planned environment directories without writing anything.
    #[arg(long)]
    pub dry_run: bool,
}

impl BakeArgs {
    pub fn run(self) -> Result<()> {
        let settings = config::resolve().context("failed to load envbake configuration")?;
        let mut prompter = Prompter::new(io::stdin().lock(), io::stdout());

        let source = match self.source {
            Some(path) => path,
            None => PathBuf::from(prompter.ask(
                "Enter the directory you wish to copy. If it's not in the current directory, use the absolute path: ",
            )?),
        };
        let solution = match self.solution {
            Some(name) => name,
            None => prompter.ask("Enter the solution name for your outer shell directory: ")?,
        };

        if !source.is_dir() {
            bail!(
                "the directory '{}' does not exist. Did you use the absolute path?",
                source.display()
            );
        }

        let solutions_root = self.root.unwrap_or(settings.solutions_root);
        let layout = SolutionLayout::new(solutions_root, SolutionName::parse(&solution)?);
        let destinations = layout
            .destinations(&source)
            .with_context(|| format!("cannot name environments after '{}'", source.display()))?;

        if self.dry_run {
            print_plan(&source, &destinations);
            return Ok(());
        }

        layout.prepare().with_context(|| {
            format!(
                "failed to create solution directory '{}'",
                layout.solution_dir().display()
            )
        })?;

        println!("Hang tight while your environment bakes in the oven for a bit...");
        for dest in &destinations {
            println!("Still cooking... setting up {}", dest.name);
        }

        let targets: Vec<&Path> = destinations.iter().map(|d| d.path.as_path()).collect();
        let reports = copy_to_many(&source, &targets);
        print_report(&destinations, &reports);

        let failed = reports.iter().filter(|r| !r.is_success()).count();
        if failed == 0 {
            println!("{}", "Environment setup completed successfully!".green());
        }

        let provisioner = GitHubProvisioner::new(&settings.github);
        provision_destinations(&destinations, &reports, self.repos, &mut prompter, &provisioner)?;

        if failed > 0 {
            bail!(
                "{failed} of {} environments failed to copy",
                destinations.len()
            );
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Repository setup
// ---------------------------------------------------------------------------

/// Environment name plus what provisioning it produced.
pub(crate) type ProvisionAttempt = (String, Result<ProvisionOutcome, ProvisionError>);

/// Offer repository setup for every successfully copied destination.
///
/// Runs strictly after the copy join. A provisioning failure is printed and
/// the loop moves on to the next environment.
pub(crate) fn provision_destinations<R: BufRead, W: Write>(
    destinations: &[Destination],
    reports: &[CopyReport],
    mode: RepoMode,
    prompter: &mut Prompter<R, W>,
    provisioner: &dyn Provisioner,
) -> Result<Vec<ProvisionAttempt>> {
    let mut attempts = Vec::new();
    if mode == RepoMode::None {
        return Ok(attempts);
    }

    for (dest, report) in destinations.iter().zip(reports) {
        if !report.is_success() {
            continue;
        }
        if mode == RepoMode::Ask {
            let question = format!(
                "Do you want to create a new GitHub repository for the '{}' environment? (y/n): ",
                dest.name
            );
            if !prompter.confirm(&question)? {
                continue;
            }
        }

        let outcome = provisioner.provision(&dest.path);
        match &outcome {
            Ok(done) => println!(
                "{} {} pushed to {}",
                "✓".green(),
                done.repo_name,
                done.html_url
            ),
            Err(err) => println!("{} {}: {err}", "✗".red(), dest.name),
        }
        attempts.push((dest.name.clone(), outcome));
    }
    Ok(attempts)
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

#[derive(Tabled)]
struct ReportRow {
    #[tabled(rename = "environment")]
    environment: String,
    #[tabled(rename = "status")]
    status: String,
    #[tabled(rename = "files")]
    files: String,
    #[tabled(rename = "bytes")]
    bytes: String,
    #[tabled(rename = "detail")]
    detail: String,
}

fn report_row(dest: &Destination, report: &CopyReport) -> ReportRow {
    match &report.outcome {
        Ok(stats) => ReportRow {
            environment: dest.name.clone(),
            status: "OK".to_string(),
            files: stats.files_copied.to_string(),
            bytes: stats.bytes_copied.to_string(),
            detail: if stats.skipped.is_empty() {
                "-".to_string()
            } else {
                format!("{} symlink/special entries skipped", stats.skipped.len())
            },
        },
        Err(err) => ReportRow {
            environment: dest.name.clone(),
            status: "FAILED".to_string(),
            files: "-".to_string(),
            bytes: "-".to_string(),
            detail: err.to_string(),
        },
    }
}

fn print_report(destinations: &[Destination], reports: &[CopyReport]) {
    let rows: Vec<ReportRow> = destinations
        .iter()
        .zip(reports)
        .map(|(dest, report)| report_row(dest, report))
        .collect();
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{table}");

    for (dest, report) in destinations.iter().zip(reports) {
        if let Some(err) = report.error() {
            println!(
                "{} failed to copy into '{}': {err}",
                "✗".red(),
                dest.path.display()
            );
        }
    }
}

fn print_plan(source: &Path, destinations: &[Destination]) {
    println!("[dry-run] would copy '{}' into:", source.display());
    for dest in destinations {
        println!("  ~  {}", dest.path.display());
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
