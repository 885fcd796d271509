// Configuration: `automove.conf` is a dotenv style file. Values already
// present in the process environment win over the file.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const CONFIG_FILE_NAME: &str = "automove.conf";
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Everything the tool reads from `automove.conf` / the environment.
#[derive(Debug, Clone, Default)]
pub struct Settings {
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub target_folder: Option<PathBuf>,
    pub target_user: Option<String>,
    pub target_group: Option<String>,
    /// `None` means wait for the model as long as it takes.
    pub request_timeout: Option<Duration>,
}

impl Settings {
    /// Load the config file (if any) into the environment, then read the
    /// settings from the environment.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => {
                dotenvy::from_path(path)
                    .with_context(|| format!("Failed to load config file {}", path.display()))?;
                tracing::debug!("Loaded config from {}", path.display());
            }
            None => {
                if let Some(path) = default_config_locations().into_iter().find(|p| p.is_file()) {
                    dotenvy::from_path(&path)
                        .with_context(|| format!("Failed to load config file {}", path.display()))?;
                    tracing::debug!("Loaded config from {}", path.display());
                }
            }
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let request_timeout = match get("AUTOMOVE_REQUEST_TIMEOUT_SECS") {
            Some(raw) => {
                let secs: u64 = raw
                    .trim()
                    .parse()
                    .with_context(|| format!("AUTOMOVE_REQUEST_TIMEOUT_SECS is not a number: {raw}"))?;
                Some(Duration::from_secs(secs))
            }
            None => None,
        };

        Ok(Settings {
            api_key: get("OPENAI_API_KEY"),
            base_url: get("OPENAI_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.into()),
            model: get("OPENAI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.into()),
            target_folder: get("TARGET_FOLDER").map(PathBuf::from),
            target_user: get("TARGET_USER"),
            target_group: get("TARGET_GROUP"),
            request_timeout,
        })
    }
}

/// `automove.conf` next to the executable, then in the user config dir.
fn default_config_locations() -> Vec<PathBuf> {
    let mut locations = Vec::new();
    if let Some(dir) = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.canonicalize().ok())
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
    {
        locations.push(dir.join(CONFIG_FILE_NAME));
    }
    if let Some(dir) = dirs::config_dir() {
        locations.push(dir.join("automove").join(CONFIG_FILE_NAME));
    }
    locations
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let settings = Settings::from_lookup(lookup(&[])).unwrap();
        assert_eq!(settings.base_url, DEFAULT_BASE_URL);
        assert_eq!(settings.model, DEFAULT_MODEL);
        assert!(settings.api_key.is_none());
        assert!(settings.target_folder.is_none());
        assert!(settings.request_timeout.is_none());
    }

    #[test]
    fn empty_owner_names_count_as_unset() {
        let settings = Settings::from_lookup(lookup(&[
            ("TARGET_USER", ""),
            ("TARGET_GROUP", "media"),
            ("TARGET_FOLDER", "/srv/videos"),
            ("OPENAI_MODEL", "local-model"),
        ]))
        .unwrap();
        assert_eq!(settings.target_user, None);
        assert_eq!(settings.target_group.as_deref(), Some("media"));
        assert_eq!(settings.target_folder, Some(PathBuf::from("/srv/videos")));
        assert_eq!(settings.model, "local-model");
    }

    #[test]
    fn timeout_must_be_a_number() {
        let ok = Settings::from_lookup(lookup(&[("AUTOMOVE_REQUEST_TIMEOUT_SECS", "90")])).unwrap();
        assert_eq!(ok.request_timeout, Some(Duration::from_secs(90)));
        assert!(Settings::from_lookup(lookup(&[("AUTOMOVE_REQUEST_TIMEOUT_SECS", "soon")])).is_err());
    }

    #[test]
    fn explicit_missing_config_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Settings::load(Some(&dir.path().join("nope.conf"))).is_err());
    }
}
