use std::{env, path::PathBuf, time::Duration};
use tracing::warn;

pub const DEFAULT_DATA_PATH: &str = "data/workouts.json";
pub const DEFAULT_CATALOG_HOST: &str = "exercisedb.p.rapidapi.com";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_SEARCH_DEBOUNCE_MS: u64 = 400;
const DEFAULT_NOTICE_TTL_MS: u64 = 2000;

#[derive(Debug, Clone)]
pub struct Config {
    pub data_path: PathBuf,
    pub port: u16,
    pub catalog: CatalogConfig,
    pub search_debounce: Duration,
    pub notice_ttl: Duration,
}

#[derive(Debug, Clone)]
pub struct CatalogConfig {
    pub base_url: String,
    pub host: String,
    pub api_key: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: format!("https://{DEFAULT_CATALOG_HOST}"),
            host: DEFAULT_CATALOG_HOST.to_string(),
            api_key: String::new(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            port: DEFAULT_PORT,
            catalog: CatalogConfig::default(),
            search_debounce: Duration::from_millis(DEFAULT_SEARCH_DEBOUNCE_MS),
            notice_ttl: Duration::from_millis(DEFAULT_NOTICE_TTL_MS),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let defaults = CatalogConfig::default();
        let catalog = CatalogConfig {
            base_url: env::var("CATALOG_BASE_URL").unwrap_or(defaults.base_url),
            host: env::var("CATALOG_HOST").unwrap_or(defaults.host),
            api_key: env::var("RAPIDAPI_KEY").unwrap_or_default(),
        };
        if catalog.api_key.is_empty() {
            warn!("RAPIDAPI_KEY is not set; catalog requests will likely be rejected");
        }

        Self {
            data_path: resolve_data_path(),
            port: parse_var("PORT").unwrap_or(DEFAULT_PORT),
            catalog,
            search_debounce: Duration::from_millis(
                parse_var("SEARCH_DEBOUNCE_MS").unwrap_or(DEFAULT_SEARCH_DEBOUNCE_MS),
            ),
            notice_ttl: Duration::from_millis(
                parse_var("NOTICE_TTL_MS").unwrap_or(DEFAULT_NOTICE_TTL_MS),
            ),
        }
    }
}

pub fn resolve_data_path() -> PathBuf {
    if let Ok(path) = env::var("APP_DATA_PATH") {
        return PathBuf::from(path);
    }

    PathBuf::from(DEFAULT_DATA_PATH)
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    let value = env::var(name).ok()?;
    match value.trim().parse() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            warn!("ignoring unparseable {name}={value:?}");
            None
        }
    }
}
