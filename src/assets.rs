//! Asset resolution: locate the running executable and its sibling icons

use std::env;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::{debug, warn};

use crate::error::AssetError;
use crate::status::Status;

/// PATH lookup helper for bare executable names
#[cfg(windows)]
const LOOKUP_COMMAND: &str = "where";
#[cfg(not(windows))]
const LOOKUP_COMMAND: &str = "which";

/// Directory holding the running executable
pub fn exe_dir(argv0: Option<&OsStr>) -> Result<PathBuf, AssetError> {
    parent_dir(resolve_self(argv0), argv0)
}

/// Parent of a resolved executable; unresolved is fatal
fn parent_dir(exe: Option<PathBuf>, argv0: Option<&OsStr>) -> Result<PathBuf, AssetError> {
    let exe = exe.ok_or_else(|| AssetError::SelfPath {
        argv0: argv0
            .map(|a| a.to_string_lossy().into_owned())
            .unwrap_or_default(),
    })?;
    exe.parent()
        .map(Path::to_path_buf)
        .ok_or_else(|| AssetError::SelfPath {
            argv0: exe.display().to_string(),
        })
}

/// Resolve the executable path
/// current_exe → argv[0] as a path → PATH lookup via subprocess
pub fn resolve_self(argv0: Option<&OsStr>) -> Option<PathBuf> {
    match env::current_exe() {
        Ok(path) => return Some(path),
        Err(e) => debug!("current_exe failed: {e}"),
    }
    resolve_from_argv0(argv0?)
}

/// argv[0] with a separator → canonical path, bare name → PATH lookup
pub fn resolve_from_argv0(argv0: &OsStr) -> Option<PathBuf> {
    if argv0.is_empty() {
        return None;
    }
    if has_separator(argv0) {
        return Path::new(argv0).canonicalize().ok();
    }
    lookup_on_path(argv0)
}

fn has_separator(name: &OsStr) -> bool {
    Path::new(name).components().count() > 1
}

/// `which`-style lookup; first non-empty output line
pub fn lookup_on_path(name: &OsStr) -> Option<PathBuf> {
    let output = match Command::new(LOOKUP_COMMAND).arg(name).output() {
        Ok(output) => output,
        Err(e) => {
            warn!(command = LOOKUP_COMMAND, "PATH lookup failed: {e}");
            return None;
        }
    };
    if !output.status.success() {
        debug!(command = LOOKUP_COMMAND, status = ?output.status, "PATH lookup → ∅");
        return None;
    }
    first_path_line(&String::from_utf8_lossy(&output.stdout))
}

fn first_path_line(stdout: &str) -> Option<PathBuf> {
    stdout
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map(PathBuf::from)
}

/// Icon file for a status, if present next to the executable
pub fn icon_path(dir: &Path, status: Status) -> Result<PathBuf, AssetError> {
    let path = dir.join(status.icon_file());
    if path.is_file() {
        Ok(path)
    } else {
        Err(AssetError::IconMissing { path })
    }
}
