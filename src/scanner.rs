use crate::error::{Error, Result};
use std::collections::BTreeMap;
use std::path::{Component, Path};
use walkdir::WalkDir;

pub const VIDEO_EXTENSIONS: &[&str] = &["mp4", "mkv", "avi", "mov", "flv", "wmv", "ts", "webm"];

/// Relative directory path ("" for the root, `/` separated) to the names of
/// its immediate subdirectories.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DirectoryStructure {
    dirs: BTreeMap<String, Vec<String>>,
}

impl DirectoryStructure {
    pub fn subdirectories(&self, rel_path: &str) -> Option<&[String]> {
        self.dirs.get(rel_path).map(Vec::as_slice)
    }

    /// Every relative path except the root.
    pub fn candidates(&self) -> Vec<String> {
        self.dirs.keys().filter(|k| !k.is_empty()).cloned().collect()
    }
}

/// Case-insensitive check against `VIDEO_EXTENSIONS`.
pub fn is_video_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| VIDEO_EXTENSIONS.iter().any(|v| ext.eq_ignore_ascii_case(v)))
        .unwrap_or(false)
}

/// Walk every directory below `root` (root included). Symlinked directories
/// are not followed. Unreadable subdirectories are skipped with a warning.
pub fn scan_directories(root: &Path) -> Result<DirectoryStructure> {
    let mut structure = DirectoryStructure::default();

    for result in WalkDir::new(root).sort_by_file_name() {
        let entry = match result {
            Ok(entry) => entry,
            Err(e) if e.depth() == 0 => {
                let context = format!("Failed to scan {}", root.display());
                return Err(match e.into_io_error() {
                    Some(io) => Error::fs(context, io),
                    None => Error::fs(context, std::io::Error::other("filesystem loop")),
                });
            }
            Err(e) => {
                tracing::warn!("Skipping during scan: {}", e);
                continue;
            }
        };

        if !entry.file_type().is_dir() {
            if entry.depth() == 0 {
                return Err(Error::fs(
                    format!("Failed to scan {}", root.display()),
                    std::io::Error::other("not a directory"),
                ));
            }
            continue;
        }

        let rel = match entry.path().strip_prefix(root) {
            Ok(rel) => rel,
            Err(_) => continue,
        };
        let key = relative_key(rel);
        structure.dirs.entry(key.clone()).or_default();

        if entry.depth() > 0 {
            let parent = rel.parent().map(relative_key).unwrap_or_default();
            let name = entry.file_name().to_string_lossy().into_owned();
            structure.dirs.entry(parent).or_default().push(name);
        }
    }

    tracing::debug!("Scanned {} directories under {}", structure.dirs.len(), root.display());
    Ok(structure)
}

fn relative_key(rel: &Path) -> String {
    rel.components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;
    use std::fs;

    #[test]
    fn video_extensions_match_case_insensitively() {
        for ext in VIDEO_EXTENSIONS {
            assert!(is_video_file(Path::new(&format!("clip.{ext}"))));
            assert!(is_video_file(Path::new(&format!("clip.{}", ext.to_uppercase()))));
        }
        assert!(is_video_file(Path::new("/drop/Some.Movie.2020.MkV")));
    }

    #[test]
    fn other_files_are_not_videos() {
        for name in ["document.txt", "movie.mp4.part", "archive.tar.gz", "mp4", "noext", ".mkv"] {
            assert!(!is_video_file(Path::new(name)), "{name}");
        }
    }

    #[test]
    fn candidates_cover_every_subdirectory_but_not_root() {
        let root = tempfile::tempdir().unwrap();
        fs::create_dir_all(root.path().join("A/B")).unwrap();
        fs::create_dir(root.path().join("C")).unwrap();
        fs::write(root.path().join("A/file.mkv"), b"x").unwrap();

        let structure = scan_directories(root.path()).unwrap();
        let got: BTreeSet<String> = structure.candidates().into_iter().collect();
        let want: BTreeSet<String> = ["A", "A/B", "C"].iter().map(|s| s.to_string()).collect();
        assert_eq!(got, want);

        assert_eq!(structure.subdirectories("").unwrap(), ["A", "C"]);
        assert_eq!(structure.subdirectories("A").unwrap(), ["B"]);
        assert!(structure.subdirectories("A/B").unwrap().is_empty());
    }

    #[test]
    fn empty_root_has_no_candidates() {
        let root = tempfile::tempdir().unwrap();
        let structure = scan_directories(root.path()).unwrap();
        assert_eq!(structure.subdirectories(""), Some(&[][..]));
        assert!(structure.candidates().is_empty());
    }

    #[test]
    fn missing_root_is_a_filesystem_error() {
        let root = tempfile::tempdir().unwrap();
        let err = scan_directories(&root.path().join("missing")).unwrap_err();
        assert!(matches!(err, Error::Filesystem { .. }));
    }
}
