//! Filesystem boundary: translate between a path on disk and the portable
//! [`FileMetadata`] record carried in an archive.
//!
//! Only permission bits and modification time cross this boundary —
//! ownership is left alone, unlike a general-purpose backup tool might do,
//! since nothing downstream needs it.

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;
use std::time::SystemTime;

use filetime::FileTime;

use crate::metadata::FileMetadata;
use crate::Error;

/// Collect the metadata record for a path about to be archived. Fails if
/// the path does not exist or is not a regular file.
pub fn gather(path: &Path, name_size: u64) -> Result<FileMetadata, Error> {
    if !path.exists() {
        return Err(Error::NoFile(path.to_path_buf()));
    }
    let meta = fs::symlink_metadata(path)
        .map_err(|e| Error::OpenFailure(path.to_path_buf(), e))?;
    if !meta.is_file() {
        return Err(Error::NotRegular(path.to_path_buf()));
    }
    let modified_ns = meta
        .modified()
        .ok()
        .and_then(|t| t.duration_since(SystemTime::UNIX_EPOCH).ok())
        .map(|d| d.as_nanos() as i64)
        .unwrap_or(0);
    Ok(FileMetadata {
        permissions: meta.permissions().mode(),
        modified_ns,
        size: meta.len(),
        name_size,
    })
}

/// Restore permissions and modification time onto a freshly extracted
/// file. Failures are logged and swallowed: a botched chmod/utime must
/// not unwind an otherwise-successful unpack.
pub fn restore(path: &Path, meta: &FileMetadata) {
    if let Err(e) = fs::set_permissions(path, fs::Permissions::from_mode(meta.permissions)) {
        log::warn!(
            "could not restore permissions on '{}': {e}",
            path.display()
        );
    }
    let secs = meta.modified_ns.div_euclid(1_000_000_000);
    let nanos = meta.modified_ns.rem_euclid(1_000_000_000) as u32;
    if let Err(e) = filetime::set_file_mtime(path, FileTime::from_unix_time(secs, nanos)) {
        log::warn!(
            "could not restore modification time on '{}': {e}",
            path.display()
        );
    }
}
