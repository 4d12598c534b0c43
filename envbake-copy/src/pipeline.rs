//! Fan-out copy entrypoint used by the CLI.

use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::error::{io_failure, CopyError};
use crate::fanout::fan_out;
use crate::tree::{copy_one, CopyStats};

/// Terminal outcome of one destination.
#[derive(Debug)]
pub struct CopyReport {
    pub destination: PathBuf,
    pub outcome: Result<CopyStats, CopyError>,
}

impl CopyReport {
    pub fn is_success(&self) -> bool {
        self.outcome.is_ok()
    }

    pub fn error(&self) -> Option<&CopyError> {
        self.outcome.as_ref().err()
    }
}

/// Copy `source` into every destination concurrently.
///
/// Returns one report per destination, in the order given, once every copy
/// has finished. One destination failing never affects the others. The
/// source is validated by each copy, so a missing source yields one
/// `SourceUnreadable` report per destination.
pub fn copy_to_many<P: AsRef<Path>>(source: &Path, destinations: &[P]) -> Vec<CopyReport> {
    copy_to_many_with(source, destinations, copy_one)
}

/// [`copy_to_many`] with the per-destination copy supplied by the caller.
pub(crate) fn copy_to_many_with<P, C>(source: &Path, destinations: &[P], copy: C) -> Vec<CopyReport>
where
    P: AsRef<Path>,
    C: Fn(&Path, &Path) -> Result<CopyStats, CopyError> + Sync,
{
    let started = Instant::now();

    let targets: Vec<&Path> = destinations.iter().map(AsRef::as_ref).collect();

    let joined = fan_out(targets, |dest| {
        let unit_started = Instant::now();
        let outcome = copy(source, dest);
        match &outcome {
            Ok(stats) => tracing::info!(
                destination = %dest.display(),
                files = stats.files_copied,
                bytes = stats.bytes_copied,
                elapsed_ms = unit_started.elapsed().as_millis() as u64,
                "copy finished"
            ),
            Err(err) => tracing::warn!(
                destination = %dest.display(),
                error = %err,
                "copy failed"
            ),
        }
        outcome
    });

    let reports: Vec<CopyReport> = destinations
        .iter()
        .zip(joined)
        .map(|(dest, joined)| {
            let destination = dest.as_ref().to_path_buf();
            let outcome = joined.unwrap_or_else(|_| {
                Err(io_failure(
                    &destination,
                    io::Error::other("copy worker panicked"),
                ))
            });
            CopyReport {
                destination,
                outcome,
            }
        })
        .collect();

    tracing::info!(
        destinations = reports.len(),
        failed = reports.iter().filter(|r| !r.is_success()).count(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "fan-out copy joined"
    );
    reports
}
