use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use serde::Deserialize;
use thiserror::Error;

pub const DEFAULT_SETTINGS_FILE: &str = "editor.toml";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse settings file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("invalid value for {key}: {value}")]
    InvalidEnv { key: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorSettings {
    pub graphql_url: String,
    pub api_token: Option<String>,
    pub request_timeout_secs: u64,
    /// How long the "saved" confirmation stays visible after a successful update.
    pub saved_affordance_ms: u64,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            graphql_url: "http://127.0.0.1:4000/graphql".into(),
            api_token: None,
            request_timeout_secs: 30,
            saved_affordance_ms: 2000,
        }
    }
}

impl EditorSettings {
    pub fn saved_affordance(&self) -> Duration {
        Duration::from_millis(self.saved_affordance_ms)
    }
}

#[derive(Debug, Default, Deserialize)]
struct SettingsFile {
    graphql_url: Option<String>,
    api_token: Option<String>,
    request_timeout_secs: Option<u64>,
    saved_affordance_ms: Option<u64>,
}

/// Defaults, then `editor.toml` (or `path`) when present, then environment.
pub fn load_settings(path: Option<&Path>) -> Result<EditorSettings, SettingsError> {
    let mut settings = EditorSettings::default();

    let path = path.unwrap_or_else(|| Path::new(DEFAULT_SETTINGS_FILE));
    if path.exists() {
        let raw = fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        apply_file(&mut settings, &raw).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
    }

    apply_env(&mut settings, |key| std::env::var(key).ok())?;
    Ok(settings)
}

fn apply_file(settings: &mut EditorSettings, raw: &str) -> Result<(), toml::de::Error> {
    let file: SettingsFile = toml::from_str(raw)?;
    if let Some(v) = file.graphql_url {
        settings.graphql_url = v;
    }
    if let Some(v) = file.api_token {
        settings.api_token = Some(v);
    }
    if let Some(v) = file.request_timeout_secs {
        settings.request_timeout_secs = v;
    }
    if let Some(v) = file.saved_affordance_ms {
        settings.saved_affordance_ms = v;
    }
    Ok(())
}

fn apply_env(
    settings: &mut EditorSettings,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<(), SettingsError> {
    if let Some(v) = lookup("EVENTS_GRAPHQL_URL") {
        settings.graphql_url = v;
    }
    if let Some(v) = lookup("APP__GRAPHQL_URL") {
        settings.graphql_url = v;
    }

    if let Some(v) = lookup("EVENTS_API_TOKEN") {
        settings.api_token = Some(v);
    }
    if let Some(v) = lookup("APP__API_TOKEN") {
        settings.api_token = Some(v);
    }

    if let Some(v) = lookup("APP__REQUEST_TIMEOUT_SECS") {
        settings.request_timeout_secs = parse_u64("APP__REQUEST_TIMEOUT_SECS", v)?;
    }
    if let Some(v) = lookup("APP__SAVED_AFFORDANCE_MS") {
        settings.saved_affordance_ms = parse_u64("APP__SAVED_AFFORDANCE_MS", v)?;
    }

    Ok(())
}

fn parse_u64(key: &'static str, value: String) -> Result<u64, SettingsError> {
    value
        .trim()
        .parse()
        .map_err(|_| SettingsError::InvalidEnv { key, value })
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
