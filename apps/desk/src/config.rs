use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{bail, Context};
use serde::Deserialize;
use url::Url;

pub const DEFAULT_CONFIG_FILE: &str = "desk.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub api_url: String,
    pub log_filter: String,
    pub show_context: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: "http://127.0.0.1:8000".into(),
            log_filter: "info".into(),
            show_context: false,
        }
    }
}

/// Defaults, then the config file, then environment overrides.
///
/// A missing `desk.toml` is fine; an explicitly requested file must exist.
pub fn load_settings(config_path: Option<&Path>) -> anyhow::Result<Settings> {
    let (path, required) = match config_path {
        Some(path) => (path.to_path_buf(), true),
        None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
    };

    let mut settings = match fs::read_to_string(&path) {
        Ok(raw) => toml::from_str::<Settings>(&raw)
            .with_context(|| format!("invalid config file '{}'", path.display()))?,
        Err(err) if !required && err.kind() == std::io::ErrorKind::NotFound => Settings::default(),
        Err(err) => {
            return Err(err).with_context(|| format!("failed to read '{}'", path.display()))
        }
    };

    apply_env(&mut settings, |key| std::env::var(key).ok());
    Ok(settings)
}

pub fn apply_env(settings: &mut Settings, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(v) = lookup("POLICY_DESK_API_URL") {
        settings.api_url = v;
    }
    if let Some(v) = lookup("APP__API_URL") {
        settings.api_url = v;
    }
    if let Some(v) = lookup("POLICY_DESK_LOG") {
        settings.log_filter = v;
    }
    if let Some(v) = lookup("POLICY_DESK_SHOW_CONTEXT") {
        if let Ok(parsed) = v.parse::<bool>() {
            settings.show_context = parsed;
        }
    }
}

/// Validates the backend base URL and strips any trailing slash.
pub fn normalize_api_url(raw: &str) -> anyhow::Result<String> {
    let raw = raw.trim();
    let parsed = Url::parse(raw).with_context(|| format!("invalid api url '{raw}'"))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        bail!("api url must be http or https, got '{}'", parsed.scheme());
    }
    if parsed.host_str().is_none() {
        bail!("api url '{raw}' has no host");
    }
    Ok(parsed.as_str().trim_end_matches('/').to_string())
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
