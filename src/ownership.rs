use crate::error::{Error, FsContext, Result};
use std::path::Path;

/// Numeric owner to apply to a moved file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileOwnership {
    pub uid: u32,
    pub gid: u32,
}

/// Configured owner names. Only used when both are present.
#[derive(Debug, Clone, Default)]
pub struct OwnerNames {
    pub user: Option<String>,
    pub group: Option<String>,
}

impl OwnerNames {
    pub fn new(user: Option<String>, group: Option<String>) -> Self {
        OwnerNames { user, group }
    }
}

/// Pick the ownership for files placed in `dest_dir`: the configured names
/// when both resolve, otherwise whatever owns `dest_dir`.
pub fn resolve_ownership(names: &OwnerNames, dest_dir: &Path) -> Result<FileOwnership> {
    if let (Some(user), Some(group)) = (names.user.as_deref(), names.group.as_deref()) {
        match lookup_names(user, group) {
            Ok(owner) => {
                tracing::info!("Using provided user and group: {}:{}", user, group);
                return Ok(owner);
            }
            Err(e) => tracing::warn!("{}; using the destination directory's owner", e),
        }
    }

    let owner = directory_owner(dest_dir)?;
    tracing::info!(
        "Using destination directory's owner and group: UID={} GID={}",
        owner.uid,
        owner.gid
    );
    Ok(owner)
}

#[cfg(unix)]
fn lookup_names(user: &str, group: &str) -> Result<FileOwnership> {
    use nix::unistd::{Group, User};

    let uid = User::from_name(user)
        .map_err(|e| Error::OwnershipResolution(format!("user {user}: {e}")))?
        .ok_or_else(|| Error::OwnershipResolution(format!("no such user: {user}")))?
        .uid
        .as_raw();
    let gid = Group::from_name(group)
        .map_err(|e| Error::OwnershipResolution(format!("group {group}: {e}")))?
        .ok_or_else(|| Error::OwnershipResolution(format!("no such group: {group}")))?
        .gid
        .as_raw();
    Ok(FileOwnership { uid, gid })
}

#[cfg(not(unix))]
fn lookup_names(_user: &str, _group: &str) -> Result<FileOwnership> {
    Err(Error::OwnershipResolution(
        "owner names are only supported on unix".into(),
    ))
}

#[cfg(unix)]
pub fn directory_owner(dir: &Path) -> Result<FileOwnership> {
    use std::os::unix::fs::MetadataExt;

    let meta = std::fs::metadata(dir).fs_context(|| format!("Failed to stat {}", dir.display()))?;
    Ok(FileOwnership {
        uid: meta.uid(),
        gid: meta.gid(),
    })
}

#[cfg(not(unix))]
pub fn directory_owner(dir: &Path) -> Result<FileOwnership> {
    std::fs::metadata(dir).fs_context(|| format!("Failed to stat {}", dir.display()))?;
    Ok(FileOwnership { uid: 0, gid: 0 })
}

#[cfg(unix)]
pub fn apply_ownership(path: &Path, owner: FileOwnership) -> Result<()> {
    std::os::unix::fs::chown(path, Some(owner.uid), Some(owner.gid)).fs_context(|| {
        format!(
            "Failed to change owner of {} to {}:{}",
            path.display(),
            owner.uid,
            owner.gid
        )
    })
}

#[cfg(not(unix))]
pub fn apply_ownership(_path: &Path, _owner: FileOwnership) -> Result<()> {
    Ok(())
}
