//! Single-destination tree copy.
//!
//! ## `copy_one` walk protocol
//!
//! 1. Check the source root is a readable directory.
//! 2. Refuse a destination that resolves inside the source, once before the
//!    walk and again after the destination root exists.
//! 3. Walk depth-first, parents before children, symlinks below the root not
//!    followed. A symlinked root is walked as the directory it points at.
//! 4. Directory → `create_dir_all`; newly created ones queue the source mode.
//! 5. Regular file → create/truncate and stream the bytes.
//! 6. Symlink or special file → skip, log, record the relative path.
//! 7. Apply queued directory modes deepest-first.
//!
//! The first error ends the walk. Whatever was written stays on disk.
//! Existing destination content is merged into, never cleared.

use std::fs::{self, File, Permissions};
use std::io;
use std::path::{Component, Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{dest_err, io_failure, source_err, CopyError};

/// Counters for one successful destination copy.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CopyStats {
    /// Directories that did not exist before this copy (destination root included).
    pub dirs_created: u64,
    pub files_copied: u64,
    pub bytes_copied: u64,
    /// Symlinks and special files left out, relative to the source root.
    pub skipped: Vec<PathBuf>,
}

/// Copy the tree rooted at `source` into `dest`.
///
/// `dest` and any missing ancestors are created.
pub fn copy_one(source: &Path, dest: &Path) -> Result<CopyStats, CopyError> {
    let meta = fs::metadata(source).map_err(|e| source_err(source, e))?;
    if !meta.is_dir() {
        return Err(source_err(
            source,
            io::Error::new(io::ErrorKind::InvalidInput, "source is not a directory"),
        ));
    }
    let planned = resolve_existing_prefix(dest).map_err(|e| dest_err(dest, e))?;
    ensure_outside_source(source, dest, &planned)?;

    let mut stats = CopyStats::default();
    let mut pending_modes: Vec<(PathBuf, Permissions)> = Vec::new();

    for entry in WalkDir::new(source).follow_links(false) {
        let entry = entry.map_err(|e| walk_err(e, source))?;
        let relative = entry
            .path()
            .strip_prefix(source)
            .map_err(|e| io_failure(entry.path(), io::Error::other(e)))?;
        let target = if relative.as_os_str().is_empty() {
            dest.to_path_buf()
        } else {
            dest.join(relative)
        };
        let file_type = entry.file_type();
        // The root may itself be a symlink to a directory; it is walked as one.
        let is_root = entry.depth() == 0;

        if is_root || file_type.is_dir() {
            if !target.is_dir() {
                fs::create_dir_all(&target).map_err(|e| dest_err(&target, e))?;
                let mode = if is_root {
                    meta.permissions()
                } else {
                    entry
                        .metadata()
                        .map_err(|e| walk_err(e, source))?
                        .permissions()
                };
                tracing::debug!(path = %target.display(), "created directory");
                pending_modes.push((target, mode));
                stats.dirs_created += 1;
            }
            if is_root {
                // Lexical `..` can disagree with the kernel once links are involved.
                let actual = dest.canonicalize().map_err(|e| dest_err(dest, e))?;
                ensure_outside_source(source, dest, &actual)?;
            }
        } else if file_type.is_file() {
            stats.bytes_copied += copy_file(entry.path(), &target)?;
            stats.files_copied += 1;
        } else {
            tracing::warn!(
                path = %entry.path().display(),
                "skipping symlink or special file"
            );
            stats.skipped.push(relative.to_path_buf());
        }
    }

    // Children are in place; read-only modes can no longer get in the way.
    for (path, mode) in pending_modes.into_iter().rev() {
        fs::set_permissions(&path, mode).map_err(|e| dest_err(&path, e))?;
    }

    Ok(stats)
}

fn copy_file(from: &Path, to: &Path) -> Result<u64, CopyError> {
    let mut reader = File::open(from).map_err(|e| source_err(from, e))?;
    let mut writer = File::create(to).map_err(|e| dest_err(to, e))?;
    let bytes = io::copy(&mut reader, &mut writer).map_err(|e| io_failure(to, e))?;
    tracing::debug!(path = %to.display(), bytes, "copied file");
    Ok(bytes)
}

fn walk_err(err: walkdir::Error, source: &Path) -> CopyError {
    let path = err.path().unwrap_or(source).to_path_buf();
    let message = err.to_string();
    let cause = err
        .into_io_error()
        .unwrap_or_else(|| io::Error::other(message));
    source_err(path, cause)
}

/// Copying into a subdirectory of the source would walk its own output.
fn ensure_outside_source(source: &Path, dest: &Path, dest_abs: &Path) -> Result<(), CopyError> {
    let source_abs = source.canonicalize().map_err(|e| source_err(source, e))?;
    if dest_abs.starts_with(&source_abs) {
        return Err(dest_err(
            dest,
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("destination lies inside source {}", source.display()),
            ),
        ));
    }
    Ok(())
}

/// Make `path` absolute and drop `.`/`..` lexically, then canonicalize the
/// longest existing ancestor and re-append the components that do not exist yet.
fn resolve_existing_prefix(path: &Path) -> io::Result<PathBuf> {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()?.join(path)
    };

    let mut normalized = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other),
        }
    }

    let mut existing = normalized.as_path();
    let mut tail = Vec::new();
    loop {
        if let Ok(resolved) = existing.canonicalize() {
            return Ok(tail.iter().rev().fold(resolved, |acc, part| acc.join(part)));
        }
        match (existing.file_name(), existing.parent()) {
            (Some(name), Some(parent)) => {
                tail.push(name.to_os_string());
                existing = parent;
            }
            _ => {
                return Err(io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("no existing ancestor of {}", path.display()),
                ))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::error::CopyErrorKind;

    fn write(path: &Path, content: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn sample_source(root: &Path) -> PathBuf {
        let source = root.join("webapp");
        write(&source.join("a.txt"), "hello");
        write(&source.join("b").join("c.txt"), "world");
        fs::create_dir_all(source.join("empty")).unwrap();
        source
    }

    #[test]
    fn copies_nested_tree() {
        let tmp = TempDir::new().unwrap();
        let source = sample_source(tmp.path());
        let dest = tmp.path().join("out").join("SANDBOX_webapp");

        let stats = copy_one(&source, &dest).expect("copy");

        assert_eq!(fs::read_to_string(dest.join("a.txt")).unwrap(), "hello");
        assert_eq!(fs::read_to_string(dest.join("b/c.txt")).unwrap(), "world");
        assert!(dest.join("empty").is_dir());
        assert_eq!(stats.files_copied, 2);
        assert_eq!(stats.bytes_copied, 10);
        assert_eq!(stats.dirs_created, 3, "root, b and empty");
        assert!(stats.skipped.is_empty());
    }

    #[test]
    fn merges_into_existing_destination() {
        let tmp = TempDir::new().unwrap();
        let source = sample_source(tmp.path());
        let dest = tmp.path().join("DEV_webapp");
        write(&dest.join("stale.txt"), "left over");
        write(&dest.join("a.txt"), "old content that is longer");

        let stats = copy_one(&source, &dest).expect("copy");

        assert_eq!(fs::read_to_string(dest.join("stale.txt")).unwrap(), "left over");
        assert_eq!(fs::read_to_string(dest.join("a.txt")).unwrap(), "hello");
        assert_eq!(stats.dirs_created, 2, "root already existed");
    }

    #[test]
    fn missing_source_is_source_unreadable() {
        let tmp = TempDir::new().unwrap();
        let source = tmp.path().join("nope");
        let dest = tmp.path().join("DEV_nope");

        let err = copy_one(&source, &dest).unwrap_err();
        assert_eq!(err.kind(), CopyErrorKind::SourceUnreadable);
        assert_eq!(err.path(), source.as_path());
        assert!(!dest.exists(), "nothing is created for a missing source");
    }

    #[test]
    fn file_source_is_source_unreadable() {
        let tmp = TempDir::new().unwrap();
        let source = tmp.path().join("plain.txt");
        write(&source, "x");

        let err = copy_one(&source, &tmp.path().join("out")).unwrap_err();
        assert_eq!(err.kind(), CopyErrorKind::SourceUnreadable);
    }

    #[test]
    fn destination_below_a_file_fails_to_create() {
        let tmp = TempDir::new().unwrap();
        let source = sample_source(tmp.path());
        let blocker = tmp.path().join("blocker");
        write(&blocker, "not a directory");

        let err = copy_one(&source, &blocker.join("PROD_webapp")).unwrap_err();
        assert_eq!(err.kind(), CopyErrorKind::DestinationWriteFailed);
    }

    #[test]
    fn destination_inside_source_is_rejected() {
        let tmp = TempDir::new().unwrap();
        let source = sample_source(tmp.path());
        let dest = source.join("nested").join("STAGE_webapp");

        let err = copy_one(&source, &dest).unwrap_err();
        assert_eq!(err.kind(), CopyErrorKind::DestinationWriteFailed);
        assert!(!source.join("nested").exists());
    }

    #[test]
    #[cfg(unix)]
    fn symlinks_are_skipped_and_recorded() {
        let tmp = TempDir::new().unwrap();
        let source = sample_source(tmp.path());
        std::os::unix::fs::symlink(source.join("a.txt"), source.join("link.txt")).unwrap();
        let dest = tmp.path().join("DEV_webapp");

        let stats = copy_one(&source, &dest).expect("copy");

        assert_eq!(stats.skipped, vec![PathBuf::from("link.txt")]);
        assert!(fs::symlink_metadata(dest.join("link.txt")).is_err());
        assert_eq!(stats.files_copied, 2);
    }

    #[test]
    #[cfg(unix)]
    fn read_only_directory_mode_applied_after_children() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = TempDir::new().unwrap();
        let source = sample_source(tmp.path());
        let locked = source.join("b");
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o555)).unwrap();
        let dest = tmp.path().join("PREPROD_webapp");

        let result = copy_one(&source, &dest);

        let dest_mode = fs::metadata(dest.join("b")).map(|m| m.permissions().mode() & 0o777);
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
        if dest.join("b").exists() {
            fs::set_permissions(dest.join("b"), fs::Permissions::from_mode(0o755)).unwrap();
        }

        result.expect("copy");
        assert_eq!(dest_mode.unwrap(), 0o555);
        assert_eq!(fs::read_to_string(dest.join("b/c.txt")).unwrap(), "world");
    }

    #[test]
    #[cfg(unix)]
    fn existing_directory_keeps_its_mode() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = TempDir::new().unwrap();
        let source = sample_source(tmp.path());
        fs::set_permissions(&source, fs::Permissions::from_mode(0o750)).unwrap();
        let dest = tmp.path().join("DEV_webapp");
        fs::create_dir_all(&dest).unwrap();
        fs::set_permissions(&dest, fs::Permissions::from_mode(0o700)).unwrap();

        copy_one(&source, &dest).expect("copy");

        let mode = fs::metadata(&dest).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o700);
    }

    #[test]
    fn parent_dir_spelling_of_source_is_rejected() {
        let tmp = TempDir::new().unwrap();
        let source = sample_source(tmp.path());

        let err = copy_one(&source, &source.join("ghost").join("..")).unwrap_err();

        assert_eq!(err.kind(), CopyErrorKind::DestinationWriteFailed);
        assert_eq!(fs::read_to_string(source.join("a.txt")).unwrap(), "hello");
        assert_eq!(fs::read_to_string(source.join("b/c.txt")).unwrap(), "world");
        assert!(!source.join("ghost").exists());
    }

    #[test]
    fn source_itself_as_destination_is_rejected() {
        let tmp = TempDir::new().unwrap();
        let source = sample_source(tmp.path());

        let err = copy_one(&source, &source.join(".")).unwrap_err();

        assert_eq!(err.kind(), CopyErrorKind::DestinationWriteFailed);
        assert_eq!(fs::read_to_string(source.join("a.txt")).unwrap(), "hello");
    }

    #[test]
    #[cfg(unix)]
    fn symlinked_source_root_is_copied() {
        let tmp = TempDir::new().unwrap();
        let real = sample_source(tmp.path());
        let link = tmp.path().join("linked");
        std::os::unix::fs::symlink(&real, &link).unwrap();
        let dest = tmp.path().join("DEV_webapp");

        let stats = copy_one(&link, &dest).expect("copy");

        assert_eq!(fs::read_to_string(dest.join("a.txt")).unwrap(), "hello");
        assert_eq!(fs::read_to_string(dest.join("b/c.txt")).unwrap(), "world");
        assert!(fs::symlink_metadata(&dest).unwrap().is_dir());
        assert!(stats.skipped.is_empty());
        assert_eq!(stats.files_copied, 2);
    }

    #[test]
    #[cfg(unix)]
    fn destination_reaching_source_through_symlink_is_rejected() {
        let tmp = TempDir::new().unwrap();
        let source = sample_source(tmp.path());
        let alias = tmp.path().join("alias");
        std::os::unix::fs::symlink(&source, &alias).unwrap();

        let err = copy_one(&source, &alias.join("b").join("..")).unwrap_err();
        assert_eq!(err.kind(), CopyErrorKind::DestinationWriteFailed);
        assert_eq!(fs::read_to_string(source.join("a.txt")).unwrap(), "hello");
    }

    #[test]
    #[cfg(unix)]
    fn parent_of_symlinked_subdir_is_checked_after_creation() {
        let tmp = TempDir::new().unwrap();
        let source = sample_source(tmp.path());
        // `inner/..` is `tmp` lexically but `source` for the kernel.
        let inner = tmp.path().join("inner");
        std::os::unix::fs::symlink(source.join("b"), &inner).unwrap();

        let err = copy_one(&source, &inner.join("..").join("fresh")).unwrap_err();

        assert_eq!(err.kind(), CopyErrorKind::DestinationWriteFailed);
        assert_eq!(fs::read_to_string(source.join("a.txt")).unwrap(), "hello");
        assert!(!source.join("fresh").join("a.txt").exists());
    }

    #[test]
    fn resolve_existing_prefix_normalizes_parent_components() {
        let tmp = TempDir::new().unwrap();
        let base = tmp.path().canonicalize().unwrap();
        let resolved =
            resolve_existing_prefix(&tmp.path().join("x").join("..").join(".").join("y")).unwrap();
        assert_eq!(resolved, base.join("y"));
    }

    #[test]
    fn resolve_existing_prefix_appends_missing_tail() {
        let tmp = TempDir::new().unwrap();
        let base = tmp.path().canonicalize().unwrap();
        let resolved = resolve_existing_prefix(&tmp.path().join("x").join("y")).unwrap();
        assert_eq!(resolved, base.join("x").join("y"));
    }
}
