use std::{fs, io, path::Path, time::Duration};

use listing_core::{
    fetcher::normalize_base_url, grouping::GroupingMode, ClientBuildError, ListingSettings,
};
use serde::Deserialize;
use thiserror::Error;

pub const DEFAULT_CONFIG_FILE: &str = "listing.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config file '{path}': {reason}")]
    Parse { path: String, reason: String },
    #[error("environment variable {key}='{value}' is not a valid value")]
    InvalidEnv { key: &'static str, value: String },
    #[error(transparent)]
    BaseUrl(#[from] ClientBuildError),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub api_base_url: String,
    pub page_size: u32,
    pub snapshot_page_size: u32,
    pub featured_limit: usize,
    pub request_timeout_secs: u64,
    pub today_grouped: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:5000/api".into(),
            page_size: 15,
            snapshot_page_size: 10_000,
            featured_limit: 8,
            request_timeout_secs: 15,
            today_grouped: false,
        }
    }
}

impl Settings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }

    pub fn listing_settings(&self) -> ListingSettings {
        ListingSettings {
            page_size: self.page_size.max(1),
            snapshot_page_size: self.snapshot_page_size.max(1),
            featured_limit: self.featured_limit,
            today_grouping: if self.today_grouped {
                GroupingMode::ByDate
            } else {
                GroupingMode::Flat
            },
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    api_base_url: Option<String>,
    page_size: Option<u32>,
    snapshot_page_size: Option<u32>,
    featured_limit: Option<usize>,
    request_timeout_secs: Option<u64>,
    today_grouped: Option<bool>,
}

pub fn load_settings(path: &Path) -> Result<Settings, ConfigError> {
    load_settings_with(path, |key| std::env::var(key).ok())
}

/// Defaults, then the TOML file if it exists, then environment overrides.
pub fn load_settings_with<F>(path: &Path, env: F) -> Result<Settings, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut settings = Settings::default();

    match fs::read_to_string(path) {
        Ok(raw) => {
            let file_cfg: FileSettings =
                toml::from_str(&raw).map_err(|err| ConfigError::Parse {
                    path: path.display().to_string(),
                    reason: err.to_string(),
                })?;
            apply_file(&mut settings, file_cfg);
        }
        Err(err) if err.kind() == io::ErrorKind::NotFound => {}
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.display().to_string(),
                source,
            })
        }
    }

    if let Some(v) = env("LISTING_API_BASE_URL") {
        settings.api_base_url = v;
    }
    if let Some(v) = env("APP__API_BASE_URL") {
        settings.api_base_url = v;
    }
    if let Some(v) = parsed_env(&env, "APP__PAGE_SIZE")? {
        settings.page_size = v;
    }
    if let Some(v) = parsed_env(&env, "APP__SNAPSHOT_PAGE_SIZE")? {
        settings.snapshot_page_size = v;
    }
    if let Some(v) = parsed_env(&env, "APP__FEATURED_LIMIT")? {
        settings.featured_limit = v;
    }
    if let Some(v) = parsed_env(&env, "APP__REQUEST_TIMEOUT_SECS")? {
        settings.request_timeout_secs = v;
    }
    if let Some(v) = env("APP__TODAY_GROUPED") {
        settings.today_grouped = parse_flag("APP__TODAY_GROUPED", &v)?;
    }

    settings.api_base_url = normalize_base_url(&settings.api_base_url)?;
    Ok(settings)
}

fn apply_file(settings: &mut Settings, file_cfg: FileSettings) {
    if let Some(v) = file_cfg.api_base_url {
        settings.api_base_url = v;
    }
    if let Some(v) = file_cfg.page_size {
        settings.page_size = v;
    }
    if let Some(v) = file_cfg.snapshot_page_size {
        settings.snapshot_page_size = v;
    }
    if let Some(v) = file_cfg.featured_limit {
        settings.featured_limit = v;
    }
    if let Some(v) = file_cfg.request_timeout_secs {
        settings.request_timeout_secs = v;
    }
    if let Some(v) = file_cfg.today_grouped {
        settings.today_grouped = v;
    }
}

fn parsed_env<F, T>(env: &F, key: &'static str) -> Result<Option<T>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    let Some(value) = env(key) else {
        return Ok(None);
    };
    value
        .trim()
        .parse::<T>()
        .map(Some)
        .map_err(|_| ConfigError::InvalidEnv { key, value })
}

fn parse_flag(key: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidEnv {
            key,
            value: value.to_string(),
        }),
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
