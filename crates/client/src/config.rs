use shared_types::{AppConfig, ClientConfig};
use std::sync::OnceLock;

static CONFIG: OnceLock<ClientConfig> = OnceLock::new();

/// Path to the config file, relative to the project root.
const CONFIG_PATH: &str = "config.toml";

/// Environment variable overriding `[search] base_url`.
pub const BASE_URL_VAR: &str = "SEARCH_API_URL";

/// Environment variable overriding `[search] rows`.
pub const ROWS_VAR: &str = "SEARCH_ROWS";

/// Load `.env`, read `config.toml`, apply environment overrides, and store
/// the result in the global `OnceLock`. Only the first call has effect.
///
/// A missing or unparseable file falls back to the built-in defaults.
pub fn load_config() -> &'static ClientConfig {
    CONFIG.get_or_init(|| {
        let _ = dotenvy::dotenv();

        let file = match std::fs::read_to_string(CONFIG_PATH) {
            Ok(contents) => Some(contents),
            Err(e) => {
                tracing::debug!(path = CONFIG_PATH, error = %e, "config file not found, using defaults");
                None
            }
        };

        let config = resolve_config(
            file.as_deref(),
            std::env::var(BASE_URL_VAR).ok(),
            std::env::var(ROWS_VAR).ok(),
        );
        tracing::info!(base_url = %config.base_url, rows = config.rows, "search client configured");
        config
    })
}

/// Get the loaded config. Returns defaults if `load_config()` hasn't been
/// called yet.
pub fn client_config() -> &'static ClientConfig {
    static DEFAULT: OnceLock<ClientConfig> = OnceLock::new();
    CONFIG
        .get()
        .unwrap_or_else(|| DEFAULT.get_or_init(ClientConfig::default))
}

/// Combine file contents and environment values into a config.
/// Environment values win over the file; blank or invalid values are ignored.
pub fn resolve_config(
    file: Option<&str>,
    env_base_url: Option<String>,
    env_rows: Option<String>,
) -> ClientConfig {
    let mut config = match file {
        Some(contents) => match toml::from_str::<AppConfig>(contents) {
            Ok(app) => app.search,
            Err(e) => {
                tracing::warn!(path = CONFIG_PATH, error = %e, "failed to parse config, using defaults");
                ClientConfig::default()
            }
        },
        None => ClientConfig::default(),
    };

    if let Some(url) = env_base_url.filter(|u| !u.trim().is_empty()) {
        config.base_url = url.trim().to_string();
    }

    if let Some(rows) = env_rows {
        match rows.trim().parse::<u32>() {
            Ok(n) if n > 0 => config.rows = n,
            _ => tracing::warn!(var = ROWS_VAR, value = %rows, "ignoring invalid row count"),
        }
    }

    config
}
