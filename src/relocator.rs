// File relocation: copy to `<name>.tmp` inside the destination, rename it
// into place, delete the source, then fix ownership. The final name only
// ever appears with complete content.

use crate::error::{Error, FsContext, Result};
use crate::ownership::{apply_ownership, resolve_ownership, OwnerNames};
use filetime::FileTime;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

pub const TEMP_SUFFIX: &str = ".tmp";

/// A single file move, valid for one invocation.
#[derive(Debug, Clone)]
pub struct MoveRequest {
    pub source: PathBuf,
    pub dest_dir: PathBuf,
}

impl MoveRequest {
    pub fn new(source: impl Into<PathBuf>, dest_dir: impl Into<PathBuf>) -> Self {
        MoveRequest {
            source: source.into(),
            dest_dir: dest_dir.into(),
        }
    }

    pub fn final_path(&self) -> Result<PathBuf> {
        let base_name = self.source.file_name().ok_or_else(|| {
            Error::Argument(format!("{} has no file name", self.source.display()))
        })?;
        Ok(self.dest_dir.join(base_name))
    }
}

/// `<final_path>.tmp`
pub fn temp_path_for(final_path: &Path) -> PathBuf {
    let mut tmp: OsString = final_path.as_os_str().to_owned();
    tmp.push(TEMP_SUFFIX);
    PathBuf::from(tmp)
}

/// Move `request.source` into `request.dest_dir` and return the final path.
///
/// Copy, rename and delete failures abort with `Error::Filesystem`; if this
/// returns an error the source must be assumed to still exist. Ownership
/// problems after the rename only produce warnings.
pub fn move_file(request: &MoveRequest, owners: &OwnerNames) -> Result<PathBuf> {
    let source = &request.source;
    let dest_dir = &request.dest_dir;

    fs::create_dir_all(dest_dir)
        .fs_context(|| format!("Failed to create {}", dest_dir.display()))?;

    let final_path = request.final_path()?;
    if is_same_file(source, &final_path) {
        tracing::info!("{} is already in {}", source.display(), dest_dir.display());
        return Ok(final_path);
    }
    let temp_path = temp_path_for(&final_path);

    tracing::info!(
        "Starting to copy {} to temporary file {} ...",
        source.display(),
        temp_path.display()
    );
    if let Err(e) = copy_with_metadata(source, &temp_path) {
        if let Err(cleanup) = fs::remove_file(&temp_path) {
            tracing::debug!("Could not remove {}: {}", temp_path.display(), cleanup);
        }
        return Err(e);
    }
    tracing::info!("Copy completed.");

    if final_path.exists() {
        tracing::warn!("{} already exists and will be replaced", final_path.display());
    }
    fs::rename(&temp_path, &final_path).fs_context(|| {
        format!(
            "Failed to rename {} to {}",
            temp_path.display(),
            final_path.display()
        )
    })?;
    tracing::info!("Rename successful: {} -> {}", temp_path.display(), final_path.display());

    fs::remove_file(source)
        .fs_context(|| format!("Failed to delete source file {}", source.display()))?;
    tracing::info!("Source file deleted: {}", source.display());

    fix_ownership(&final_path, dest_dir, owners);
    Ok(final_path)
}

/// Byte copy plus permissions (via `fs::copy`) and access/modification times.
fn copy_with_metadata(source: &Path, target: &Path) -> Result<()> {
    fs::copy(source, target).fs_context(|| {
        format!("Failed to copy {} to {}", source.display(), target.display())
    })?;

    let meta = fs::metadata(source)
        .fs_context(|| format!("Failed to stat {}", source.display()))?;
    let atime = FileTime::from_last_access_time(&meta);
    let mtime = FileTime::from_last_modification_time(&meta);
    if let Err(e) = filetime::set_file_times(target, atime, mtime) {
        tracing::warn!("Could not preserve timestamps on {}: {}", target.display(), e);
    }
    Ok(())
}

fn fix_ownership(final_path: &Path, dest_dir: &Path, owners: &OwnerNames) {
    let owner = match resolve_ownership(owners, dest_dir) {
        Ok(owner) => owner,
        Err(e) => {
            tracing::warn!("Leaving ownership of {} unchanged: {}", final_path.display(), e);
            return;
        }
    };
    match apply_ownership(final_path, owner) {
        Ok(()) => tracing::info!(
            "Changed {} owner and group to UID:{} GID:{}",
            final_path.display(),
            owner.uid,
            owner.gid
        ),
        Err(e) => tracing::warn!("{}", e),
    }
}

fn is_same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}
