//! Locating the server executable.

use crate::{DriverError, DriverResult};

use std::path::{Path, PathBuf};

use tracing::debug;

/// Environment variable overriding the server binary location.
pub const SERVER_BINARY_ENV: &str = "DS_SERVER_BINARY";

/// File name of the fixture server binary.
pub const SERVER_BINARY_NAME: &str = "ds-server";

/// Find the server binary.
///
/// Search order:
/// 1. Explicitly configured path (or bare name looked up on `PATH`)
/// 2. `DS_SERVER_BINARY` environment variable
/// 3. Next to the current executable, or one level up (test binaries live in
///    `target/<profile>/deps`)
/// 4. System `PATH`
pub fn resolve_server_binary(configured: Option<&Path>) -> DriverResult<PathBuf> {
    if let Some(path) = configured {
        return resolve_executable(path);
    }

    if let Some(path) = std::env::var_os(SERVER_BINARY_ENV).filter(|v| !v.is_empty()) {
        debug!("Using server binary from {SERVER_BINARY_ENV}");
        return resolve_executable(Path::new(&path));
    }

    let file_name = format!("{SERVER_BINARY_NAME}{}", std::env::consts::EXE_SUFFIX);
    if let Ok(exe) = std::env::current_exe()
        && let Some(exe_dir) = exe.parent()
    {
        for dir in [Some(exe_dir), exe_dir.parent()].into_iter().flatten() {
            let candidate = dir.join(&file_name);
            if is_executable_file(&candidate) {
                debug!("Using server binary (sibling): {}", candidate.display());
                return Ok(candidate);
            }
        }
    }

    if let Some(found) = search_path(Path::new(&file_name)) {
        debug!("Using server binary (PATH): {}", found.display());
        return Ok(found);
    }

    Err(DriverError::launch(
        SERVER_BINARY_NAME,
        format!("server binary not found; set {SERVER_BINARY_ENV} or configure server.binary"),
    ))
}

/// Validate an executable reference.
///
/// Paths with a directory component must point at an executable file. A bare
/// name is looked up on `PATH`.
pub fn resolve_executable(path: &Path) -> DriverResult<PathBuf> {
    let is_bare_name = path.components().count() == 1 && !path.is_absolute();

    if is_bare_name {
        return search_path(path)
            .ok_or_else(|| DriverError::launch(path, "executable not found on PATH"));
    }

    if !path.exists() {
        return Err(DriverError::launch(path, "executable does not exist"));
    }
    if !path.is_file() {
        return Err(DriverError::launch(path, "executable path is not a file"));
    }
    if !is_executable_file(path) {
        return Err(DriverError::launch(path, "file is not executable"));
    }

    Ok(path.to_path_buf())
}

fn search_path(name: &Path) -> Option<PathBuf> {
    let paths = std::env::var_os("PATH")?;
    std::env::split_paths(&paths)
        .map(|dir| dir.join(name))
        .find(|candidate| is_executable_file(candidate))
}

#[cfg(unix)]
fn is_executable_file(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    path.metadata()
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable_file(path: &Path) -> bool {
    path.is_file()
}
