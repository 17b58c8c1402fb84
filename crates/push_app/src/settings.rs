use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use push_core::{ConfigSource, PushConfig, DEFAULT_ENDPOINT};
use push_engine::SubmitSettings;
use push_logging::{push_info, push_warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_SETTINGS_FILENAME: &str = "baidu_push.ron";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("cannot read settings {path:?}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("cannot parse settings {path:?}: {reason}")]
    Parse { path: PathBuf, reason: String },
    #[error("cannot serialize settings: {0}")]
    Serialize(String),
    #[error("cannot write settings {path:?}: {source}")]
    Write { path: PathBuf, source: io::Error },
}

/// Everything the host would keep for this plugin, stored as RON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PushSettings {
    pub site: String,
    pub token: String,
    pub log_path: PathBuf,
    pub endpoint: String,
    pub accept_invalid_certs: bool,
    pub timeout_secs: u64,
}

impl Default for PushSettings {
    fn default() -> Self {
        let submit = SubmitSettings::default();
        Self {
            site: String::new(),
            token: String::new(),
            log_path: PathBuf::from("log.txt"),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            accept_invalid_certs: submit.accept_invalid_certs,
            timeout_secs: submit.request_timeout.as_secs(),
        }
    }
}

impl PushSettings {
    pub fn push_config(&self) -> PushConfig {
        PushConfig::new(self.site.clone(), self.token.clone())
    }

    pub fn submit_settings(&self) -> SubmitSettings {
        SubmitSettings {
            endpoint: self.endpoint.clone(),
            request_timeout: Duration::from_secs(self.timeout_secs),
            accept_invalid_certs: self.accept_invalid_certs,
            ..SubmitSettings::default()
        }
    }
}

/// A missing file means nothing has been configured yet.
pub fn load_settings(path: &Path) -> Result<PushSettings, SettingsError> {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            push_warn!("No settings at {:?}, using defaults", path);
            return Ok(PushSettings::default());
        }
        Err(source) => {
            return Err(SettingsError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    ron::from_str(&content).map_err(|err| SettingsError::Parse {
        path: path.to_path_buf(),
        reason: err.to_string(),
    })
}

pub fn save_settings(path: &Path, settings: &PushSettings) -> Result<(), SettingsError> {
    let pretty = ron::ser::PrettyConfig::new();
    let content = ron::ser::to_string_pretty(settings, pretty)
        .map_err(|err| SettingsError::Serialize(err.to_string()))?;
    fs::write(path, content).map_err(|source| SettingsError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    push_info!("Wrote settings to {:?}", path);
    Ok(())
}

/// Reads the settings file on every publish, so edits apply without restart.
/// An unreadable file yields empty values and the hook logs the incomplete
/// configuration.
pub struct SettingsFile {
    path: PathBuf,
}

impl SettingsFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ConfigSource for SettingsFile {
    fn config(&self) -> PushConfig {
        match load_settings(&self.path) {
            Ok(settings) => settings.push_config(),
            Err(err) => {
                push_warn!("{}", err);
                PushConfig::default()
            }
        }
    }
}

/// Keep enough of the token to recognise it.
pub fn mask_token(token: &str) -> String {
    let len = token.chars().count();
    if len <= 4 {
        return "*".repeat(len);
    }
    let visible: String = token.chars().take(4).collect();
    format!("{visible}***")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_yields_defaults() {
        let temp = TempDir::new().unwrap();
        let settings = load_settings(&temp.path().join("absent.ron")).unwrap();
        assert_eq!(settings, PushSettings::default());
        assert!(!settings.push_config().is_complete());
    }

    #[test]
    fn saved_settings_load_back() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(DEFAULT_SETTINGS_FILENAME);
        let settings = PushSettings {
            site: "https://www.example.com".to_string(),
            token: "abcdef".to_string(),
            timeout_secs: 3,
            ..PushSettings::default()
        };
        save_settings(&path, &settings).unwrap();
        assert_eq!(load_settings(&path).unwrap(), settings);
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(DEFAULT_SETTINGS_FILENAME);
        fs::write(&path, r#"(site: "https://www.example.com", token: "t0k3n")"#).unwrap();

        let settings = load_settings(&path).unwrap();
        assert_eq!(settings.site, "https://www.example.com");
        assert_eq!(settings.endpoint, DEFAULT_ENDPOINT);
        let submit = settings.submit_settings();
        assert_eq!(submit.request_timeout, Duration::from_secs(10));
        assert!(submit.accept_invalid_certs);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(DEFAULT_SETTINGS_FILENAME);
        fs::write(&path, "(site: ").unwrap();
        assert!(matches!(
            load_settings(&path),
            Err(SettingsError::Parse { .. })
        ));
    }

    #[test]
    fn settings_file_source_degrades_to_unset_values() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(DEFAULT_SETTINGS_FILENAME);
        fs::write(&path, "not ron at all").unwrap();
        assert_eq!(SettingsFile::new(&path).config(), PushConfig::default());

        fs::write(&path, r#"(site: "https://a.example", token: "t")"#).unwrap();
        assert_eq!(
            SettingsFile::new(&path).config(),
            PushConfig::new("https://a.example", "t")
        );
    }

    #[test]
    fn token_mask_hides_the_tail() {
        assert_eq!(mask_token("abcdefgh"), "abcd***");
        assert_eq!(mask_token("abc"), "***");
        assert_eq!(mask_token(""), "");
    }
}
