use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, warn};
#[cfg(unix)]
use walkdir::WalkDir;

/// Create the host data directory and hand it to the service user.
///
/// Dokku runs plugin commands as root; the directory must end up owned by
/// the unprivileged user so that `dokku` itself can manage it later. A
/// missing user or a failed ownership change is reported but does not stop
/// provisioning, since the container writes through the bind mount as root
/// anyway.
pub fn ensure_data_dir(dir: &Path, owner: &str) -> Result<()> {
    if !dir.exists() {
        fs::create_dir_all(dir)
            .with_context(|| format!("could not create host directory {}", dir.display()))?;
        debug!(dir = %dir.display(), "created host data directory");
    }
    chown_recursive(dir, owner);
    Ok(())
}

/// Delete the host data directory. Missing directories are fine.
pub fn remove_data_dir(dir: &Path) -> Result<()> {
    if !dir.exists() {
        return Ok(());
    }
    fs::remove_dir_all(dir)
        .with_context(|| format!("could not delete host directory {}", dir.display()))
}

#[cfg(unix)]
fn chown_recursive(dir: &Path, owner: &str) {
    let Some((uid, gid)) = resolve_user(owner) else {
        warn!(owner, "user not found; leaving directory ownership unchanged");
        return;
    };
    if let Err(err) = chown_tree(dir, uid, gid) {
        warn!(owner, "could not change ownership of {}: {err}", dir.display());
    }
}

// The walker yields `dir` itself first, so the root is covered too.
#[cfg(unix)]
fn chown_tree(dir: &Path, uid: u32, gid: u32) -> std::io::Result<()> {
    for entry in WalkDir::new(dir) {
        let entry = entry?;
        std::os::unix::fs::chown(entry.path(), Some(uid), Some(gid))?;
    }
    Ok(())
}

#[cfg(unix)]
fn resolve_user(name: &str) -> Option<(u32, u32)> {
    let name = std::ffi::CString::new(name).ok()?;
    // SAFETY: getpwnam returns a pointer into static libc storage. The uid
    // and gid are copied out immediately and the pointer is not retained.
    unsafe {
        let passwd = libc::getpwnam(name.as_ptr());
        if passwd.is_null() {
            None
        } else {
            Some(((*passwd).pw_uid, (*passwd).pw_gid))
        }
    }
}

#[cfg(not(unix))]
fn chown_recursive(_dir: &Path, _owner: &str) {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creates_nested_directories() {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join("blog").join("arangodb");

        ensure_data_dir(&dir, "no-such-user-here").unwrap();

        assert!(dir.is_dir());
    }

    #[test]
    fn is_idempotent_for_an_existing_directory() {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join("data");

        ensure_data_dir(&dir, "no-such-user-here").unwrap();
        ensure_data_dir(&dir, "no-such-user-here").unwrap();

        assert!(dir.is_dir());
    }

    #[test]
    fn removal_is_silent_for_a_missing_directory() {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join("never-created");

        remove_data_dir(&dir).unwrap();
    }

    #[test]
    fn removal_deletes_contents_too() {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join("data");
        fs::create_dir_all(dir.join("journals")).unwrap();
        fs::write(dir.join("journals").join("0001.db"), b"x").unwrap();

        remove_data_dir(&dir).unwrap();

        assert!(!dir.exists());
    }

    // Re-asserting the caller's own uid and gid needs no privileges, so
    // the walk itself can be checked on any host.
    #[cfg(unix)]
    #[test]
    fn ownership_walk_reaches_nested_entries() {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join("data");
        fs::create_dir_all(dir.join("journals")).unwrap();
        fs::write(dir.join("journals").join("0001.db"), b"x").unwrap();

        let (uid, gid) = unsafe { (libc::getuid(), libc::getgid()) };

        chown_tree(&dir, uid, gid).unwrap();
    }
}
