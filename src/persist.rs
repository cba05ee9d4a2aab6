//! Writes generated containers to disk.
//!
//! Both functions truncate an existing file and report the path on failure.
//! A write interrupted by the process dying leaves a possibly truncated file;
//! callers should regenerate rather than resume.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;

use crate::error::{CsrKitError, Result};

/// Writes `bytes` to `path`, creating or truncating it.
///
/// Use for the request. Permissions follow the process umask.
pub fn write(path: impl AsRef<Path>, bytes: &[u8]) -> Result<()> {
    let path = path.as_ref();
    let file = open(path, OpenOptions::new())?;
    write_all(path, file, bytes)
}

/// Writes private key bytes to `path`, creating or truncating it.
///
/// On Unix the file is restricted to its owner (`0600`), including when it
/// already existed with wider permissions.
pub fn write_private(path: impl AsRef<Path>, bytes: &[u8]) -> Result<()> {
    let path = path.as_ref();

    #[allow(unused_mut)]
    let mut options = OpenOptions::new();
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let file = open(path, options)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        file.set_permissions(std::fs::Permissions::from_mode(0o600))
            .map_err(|source| io_error(path, source))?;
    }

    write_all(path, file, bytes)
}

fn open(path: &Path, mut options: OpenOptions) -> Result<File> {
    options
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
        .map_err(|source| io_error(path, source))
}

fn write_all(path: &Path, mut file: File, bytes: &[u8]) -> Result<()> {
    file.write_all(bytes)
        .and_then(|()| file.flush())
        .map_err(|source| io_error(path, source))?;
    drop(file);

    tracing::info!(path = %path.display(), bytes = bytes.len(), "file written");
    Ok(())
}

fn io_error(path: &Path, source: std::io::Error) -> CsrKitError {
    CsrKitError::IoError {
        path: path.to_path_buf(),
        source,
    }
}
