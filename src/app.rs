// One invocation: validate, check the file type, scan the library, ask the
// oracle, and move the file if a valid existing destination came back.

use crate::api::Oracle;
use crate::config::Settings;
use crate::error::{Error, Result};
use crate::ownership::OwnerNames;
use crate::relocator::{move_file, MoveRequest};
use crate::scanner::{is_video_file, scan_directories};
use crate::selector::select_destination;
use std::path::{Path, PathBuf};

/// The validated inputs for one run.
#[derive(Debug, Clone)]
pub struct Invocation {
    pub file: PathBuf,
    pub target_folder: PathBuf,
}

impl Invocation {
    /// The positional target folder wins over `TARGET_FOLDER`.
    pub fn resolve(
        file: PathBuf,
        target_folder: Option<PathBuf>,
        settings: &Settings,
    ) -> Result<Self> {
        let target_folder = target_folder
            .or_else(|| settings.target_folder.clone())
            .ok_or_else(|| {
                Error::Argument(
                    "Target directory not specified. Please provide target directory parameter \
                     or configure TARGET_FOLDER in automove.conf"
                        .into(),
                )
            })?;
        Ok(Invocation {
            file,
            target_folder,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The file was not a recognised video and was left alone.
    Skipped,
    /// The model found no suitable destination; the file stays put.
    LeftInPlace,
    Moved(PathBuf),
}

pub fn run(invocation: &Invocation, settings: &Settings, oracle: &dyn Oracle) -> Result<Outcome> {
    let file = &invocation.file;
    if !file.exists() {
        return Err(Error::Argument(format!("{} not found", file.display())));
    }

    if !is_video_file(file) {
        tracing::info!("Skipping: {} is not a video file", file.display());
        return Ok(Outcome::Skipped);
    }

    let root = &invocation.target_folder;
    let structure = scan_directories(root)?;
    let candidates = structure.candidates();
    if let Some(top) = structure.subdirectories("") {
        tracing::debug!("Top-level folders under {}: {:?}", root.display(), top);
    }

    let file_name = file_name_of(file)?;
    let Some(subdir) = select_destination(oracle, &file_name, &candidates)? else {
        tracing::info!(
            "No suitable directory found for {}, keeping it in place",
            file.display()
        );
        return Ok(Outcome::LeftInPlace);
    };

    let dest_dir = root.join(&subdir);
    if !dest_dir.exists() {
        return Err(Error::DestinationMissing(dest_dir));
    }

    let owners = OwnerNames::new(settings.target_user.clone(), settings.target_group.clone());
    let final_path = move_file(&MoveRequest::new(file, dest_dir), &owners)?;
    Ok(Outcome::Moved(final_path))
}

fn file_name_of(file: &Path) -> Result<String> {
    file.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| Error::Argument(format!("{} has no file name", file.display())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positional_target_overrides_config() {
        let settings = Settings {
            target_folder: Some("/from/config".into()),
            ..Settings::default()
        };
        let inv = Invocation::resolve("a.mp4".into(), Some("/from/args".into()), &settings).unwrap();
        assert_eq!(inv.target_folder, PathBuf::from("/from/args"));

        let inv = Invocation::resolve("a.mp4".into(), None, &settings).unwrap();
        assert_eq!(inv.target_folder, PathBuf::from("/from/config"));
    }

    #[test]
    fn missing_target_everywhere_is_an_argument_error() {
        let err = Invocation::resolve("a.mp4".into(), None, &Settings::default()).unwrap_err();
        assert!(matches!(err, Error::Argument(_)));
    }
}
