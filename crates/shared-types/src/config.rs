use serde::{Deserialize, Serialize};

/// Backend endpoint used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api";

/// Result window requested from the backend on every search.
pub const DEFAULT_ROWS: u32 = 100;

/// Search backend settings, the `[search]` table of `config.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_rows")]
    pub rows: u32,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            rows: default_rows(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_rows() -> u32 {
    DEFAULT_ROWS
}

/// Top-level config file structure matching `config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub search: ClientConfig,
}
