use serde::{Deserialize, Deserializer, Serialize};

use super::config::SearchConfig;
use super::search::NetworkProfile;

/// Persisted lab settings (`setting.json`). Missing keys, at any depth, fall back to the
/// lab defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub network: NetworkSettings,
    #[serde(
        default = "lab_search_config",
        deserialize_with = "deserialize_lab_search"
    )]
    pub search: SearchConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkSettings {
    pub latency_ms: u64,
    /// Percentage, `0..=100`.
    pub deviation_pct: u8,
}

impl Default for NetworkSettings {
    fn default() -> Self {
        Self {
            latency_ms: 50,
            deviation_pct: 20,
        }
    }
}

impl NetworkSettings {
    pub fn profile(&self) -> NetworkProfile {
        NetworkProfile {
            latency_ms: self.latency_ms,
            deviation: f64::from(self.deviation_pct.min(100)) / 100.0,
        }
    }
}

/// The lab starts throttle-only: no debounce, 20ms spacing, cache off, one char minimum.
pub fn lab_search_config() -> SearchConfig {
    SearchConfig {
        min_length: 1,
        delay_ms: 0,
        throttle_ms: 20,
        use_cache: false,
        ..SearchConfig::default()
    }
}

/// The `search` section as written by the user; absent fields keep the lab value.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SearchOverrides {
    min_length: Option<usize>,
    delay_ms: Option<u64>,
    throttle_ms: Option<u64>,
    use_cache: Option<bool>,
    prompt_text: Option<String>,
    search_text: Option<String>,
    empty_label: Option<String>,
}

impl SearchOverrides {
    fn apply(self, mut config: SearchConfig) -> SearchConfig {
        if let Some(v) = self.min_length {
            config.min_length = v;
        }
        if let Some(v) = self.delay_ms {
            config.delay_ms = v;
        }
        if let Some(v) = self.throttle_ms {
            config.throttle_ms = v;
        }
        if let Some(v) = self.use_cache {
            config.use_cache = v;
        }
        if let Some(v) = self.prompt_text {
            config.prompt_text = v;
        }
        if let Some(v) = self.search_text {
            config.search_text = v;
        }
        if let Some(v) = self.empty_label {
            config.empty_label = v;
        }
        config
    }
}

fn deserialize_lab_search<'de, D>(deserializer: D) -> Result<SearchConfig, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(SearchOverrides::deserialize(deserializer)?.apply(lab_search_config()))
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            network: NetworkSettings::default(),
            search: lab_search_config(),
        }
    }
}

#[derive(Debug)]
pub enum SettingsError {
    Io(std::io::Error),
    Parse(serde_json::Error),
}

impl std::fmt::Display for SettingsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SettingsError::Io(e) => write!(f, "IO error: {}", e),
            SettingsError::Parse(e) => write!(f, "Invalid settings: {}", e),
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SettingsError::Io(e) => Some(e),
            SettingsError::Parse(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for SettingsError {
    fn from(e: std::io::Error) -> Self {
        SettingsError::Io(e)
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(e: serde_json::Error) -> Self {
        SettingsError::Parse(e)
    }
}
