//! Filesystem preflight checks and download writes.
//!
//! Preflight checks run before any network activity so that a bad local
//! path fails fast instead of wasting an upload round trip.

use std::io::ErrorKind;
use std::path::Path;

use tokio::fs;
use tracing::trace;

use crate::error::{Result, WdpError};

/// Verify that `path` exists and is readable.
pub(crate) async fn check_source(path: &Path) -> Result<()> {
    match fs::metadata(path).await {
        Ok(_) => {}
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(WdpError::SourceNotFound {
                path: path.to_path_buf(),
            });
        }
        Err(e) => return Err(e.into()),
    }
    // Readability probe; permission failures surface as the io error.
    fs::File::open(path).await?;
    Ok(())
}

/// Verify that `path` can be written: either it exists and is writable, or
/// its nearest existing ancestor is writable (missing parents are created
/// at download time).
pub(crate) async fn check_target(path: &Path) -> Result<()> {
    match fs::metadata(path).await {
        Ok(meta) => {
            if meta.permissions().readonly() {
                return Err(WdpError::TargetNotWritable {
                    path: path.to_path_buf(),
                });
            }
            Ok(())
        }
        Err(e) if e.kind() == ErrorKind::NotFound => {
            let mut ancestor = path.parent();
            while let Some(dir) = ancestor {
                // An empty parent means a bare relative filename.
                let probe = if dir.as_os_str().is_empty() {
                    Path::new(".")
                } else {
                    dir
                };
                match fs::metadata(probe).await {
                    Ok(meta) => {
                        if meta.permissions().readonly() {
                            return Err(WdpError::TargetNotWritable {
                                path: path.to_path_buf(),
                            });
                        }
                        return Ok(());
                    }
                    Err(e) if e.kind() == ErrorKind::NotFound => ancestor = dir.parent(),
                    Err(e) => return Err(e.into()),
                }
            }
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

/// Write a downloaded buffer, creating parent directories and overwriting
/// any existing file.
pub(crate) async fn write_bytes(path: &Path, data: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).await?;
        }
    }
    trace!(path = %path.display(), bytes = data.len(), "writing file");
    fs::write(path, data).await?;
    Ok(())
}
