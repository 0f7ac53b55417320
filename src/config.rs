use crate::types::AppError;
use anyhow::Result;
use serde::Deserialize;
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub api: ApiConfig,
    pub cache: CacheConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the search backend, without a trailing slash
    pub url: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    pub dir: PathBuf,
    pub max_entries: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub dir: PathBuf,
    pub filter: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let cache_dir = lookup("CACHE_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(default_data_dir);

        let max_entries: usize = lookup("CACHE_MAX_ENTRIES")
            .unwrap_or_else(|| "10".to_string())
            .parse()?;
        if max_entries == 0 {
            return Err(AppError::Config("CACHE_MAX_ENTRIES must be at least 1".to_string()).into());
        }

        Ok(Self {
            api: ApiConfig {
                url: lookup("API_URL")
                    .unwrap_or_else(|| "http://localhost:8000".to_string())
                    .trim_end_matches('/')
                    .to_string(),
                timeout_secs: lookup("API_TIMEOUT_SECS")
                    .unwrap_or_else(|| "120".to_string())
                    .parse()?,
            },
            logging: LoggingConfig {
                dir: lookup("LOG_DIR")
                    .map(PathBuf::from)
                    .unwrap_or_else(|| cache_dir.join("logs")),
                filter: lookup("RUST_LOG").unwrap_or_else(|| "fact_scout=info".to_string()),
            },
            cache: CacheConfig {
                dir: cache_dir,
                max_entries,
            },
        })
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join("fact-scout"))
        .unwrap_or_else(|| PathBuf::from(".fact-scout"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup_from(&[("CACHE_DIR", "/tmp/fs-cache")])).unwrap();
        assert_eq!(config.api.url, "http://localhost:8000");
        assert_eq!(config.api.timeout_secs, 120);
        assert_eq!(config.cache.max_entries, 10);
        assert_eq!(config.cache.dir, PathBuf::from("/tmp/fs-cache"));
        assert_eq!(config.logging.dir, PathBuf::from("/tmp/fs-cache/logs"));
        assert_eq!(config.logging.filter, "fact_scout=info");
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("API_URL", "https://api.example.org/"),
            ("API_TIMEOUT_SECS", "5"),
            ("CACHE_MAX_ENTRIES", "25"),
            ("LOG_DIR", "/var/log/fact-scout"),
        ]))
        .unwrap();
        assert_eq!(config.api.url, "https://api.example.org");
        assert_eq!(config.api.timeout_secs, 5);
        assert_eq!(config.cache.max_entries, 25);
        assert_eq!(config.logging.dir, PathBuf::from("/var/log/fact-scout"));
    }

    #[test]
    fn test_malformed_numbers_rejected() {
        assert!(Config::from_lookup(lookup_from(&[("API_TIMEOUT_SECS", "soon")])).is_err());
        assert!(Config::from_lookup(lookup_from(&[("CACHE_MAX_ENTRIES", "0")])).is_err());
    }
}
