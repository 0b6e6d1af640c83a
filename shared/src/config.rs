use serde::{Deserialize, Serialize};

pub const DEFAULT_REFRESH_INTERVAL_MS: u32 = 2000;
pub const DEFAULT_SNAPSHOT_URL: &str = "/api/server";
pub const DEFAULT_GLOBAL_VIEW_URL: &str = "/?global=true";

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid view config: {0}")]
    Parse(String),
}

/// Settings of the server list view.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ViewConfig {
    pub show_tag: bool,
    pub refresh_interval_ms: u32,
    pub snapshot_url: String,
    pub global_view_url: String,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            show_tag: false,
            refresh_interval_ms: DEFAULT_REFRESH_INTERVAL_MS,
            snapshot_url: DEFAULT_SNAPSHOT_URL.to_string(),
            global_view_url: DEFAULT_GLOBAL_VIEW_URL.to_string(),
        }
    }
}

// Lenient on-disk shape: the interval may be written as a number or a string,
// and anything unusable falls back to the default.
#[derive(Deserialize, Debug)]
struct ViewConfigFile {
    show_tag: Option<toml::Value>,
    refresh_interval_ms: Option<toml::Value>,
    snapshot_url: Option<String>,
    global_view_url: Option<String>,
}

impl ViewConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let file: ViewConfigFile =
            toml::from_str(content).map_err(|error| ConfigError::Parse(error.to_string()))?;

        let defaults = Self::default();
        Ok(Self {
            show_tag: file.show_tag.as_ref().is_some_and(show_tag_from_value),
            refresh_interval_ms: file
                .refresh_interval_ms
                .as_ref()
                .and_then(refresh_interval_from_value)
                .unwrap_or(defaults.refresh_interval_ms),
            snapshot_url: file
                .snapshot_url
                .filter(|url| !url.trim().is_empty())
                .unwrap_or(defaults.snapshot_url),
            global_view_url: file
                .global_view_url
                .filter(|url| !url.trim().is_empty())
                .unwrap_or(defaults.global_view_url),
        })
    }

    /// Applies `NEZHA_FETCH_INTERVAL` / `NEZHA_SHOW_TAG` style overrides.
    pub fn with_overrides(mut self, refresh_interval: Option<&str>, show_tag: Option<&str>) -> Self {
        if let Some(raw) = refresh_interval {
            self.refresh_interval_ms = parse_refresh_interval(Some(raw));
        }
        if let Some(raw) = show_tag {
            self.show_tag = parse_show_tag(Some(raw));
        }
        self
    }
}

/// Positive integer milliseconds, otherwise [`DEFAULT_REFRESH_INTERVAL_MS`].
pub fn parse_refresh_interval(raw: Option<&str>) -> u32 {
    raw.and_then(|raw| raw.trim().parse::<u32>().ok())
        .filter(|interval| *interval > 0)
        .unwrap_or(DEFAULT_REFRESH_INTERVAL_MS)
}

/// Only the exact string `"true"` enables the tag selector.
pub fn parse_show_tag(raw: Option<&str>) -> bool {
    raw == Some("true")
}

fn refresh_interval_from_value(value: &toml::Value) -> Option<u32> {
    match value {
        toml::Value::Integer(interval) => u32::try_from(*interval).ok().filter(|interval| *interval > 0),
        toml::Value::String(raw) => Some(parse_refresh_interval(Some(raw.as_str()))),
        _ => None,
    }
}

fn show_tag_from_value(value: &toml::Value) -> bool {
    match value {
        toml::Value::Boolean(show) => *show,
        toml::Value::String(raw) => parse_show_tag(Some(raw.as_str())),
        _ => false,
    }
}
