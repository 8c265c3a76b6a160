use std::path::PathBuf;

use directories::ProjectDirs;
use thiserror::Error;

const HOST_ENV: &str = "HOST";
const PORT_ENVS: [&str; 2] = ["BACKEND_PORT", "PORT"];
const DATABASE_URL_ENV: &str = "DATABASE_URL";
const ASSET_DIR_ENV: &str = "TASKS_ASSET_DIR";

const DEFAULT_HOST: &str = "127.0.0.1";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid port in {name}: {value:?}")]
    InvalidPort { name: &'static str, value: String },
    #[error("Could not determine a data directory for this platform")]
    NoDataDir,
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub host: String,
    /// `0` asks the OS for a free port.
    pub port: u16,
    pub database_url: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the config from an arbitrary variable lookup. Unset and blank
    /// values count as missing.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let host = lookup(HOST_ENV).unwrap_or_else(|| DEFAULT_HOST.to_string());

        let mut port = None;
        for name in PORT_ENVS {
            if let Some(raw) = lookup(name) {
                port = Some(parse_port(name, &raw)?);
                break;
            }
        }
        let port = port.unwrap_or_else(|| {
            tracing::info!("No PORT environment variable set, using port 0 for auto-assignment");
            0
        });

        let database_url = match lookup(DATABASE_URL_ENV) {
            Some(url) => url,
            None => default_database_url(lookup(ASSET_DIR_ENV).map(PathBuf::from))?,
        };

        Ok(Self {
            host,
            port,
            database_url,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_port(name: &'static str, raw: &str) -> Result<u16, ConfigError> {
    // remove any ANSI codes a wrapping script may have left in the value
    let cleaned = String::from_utf8_lossy(&strip_ansi_escapes::strip(raw.as_bytes())).into_owned();
    cleaned
        .trim()
        .parse::<u16>()
        .map_err(|_| ConfigError::InvalidPort {
            name,
            value: raw.to_string(),
        })
}

/// Directory holding the SQLite file when no `DATABASE_URL` is given.
pub fn asset_dir(override_dir: Option<PathBuf>) -> Result<PathBuf, ConfigError> {
    let path = match override_dir {
        Some(path) => path,
        None => ProjectDirs::from("dev", "tasks", "tasks-server")
            .ok_or(ConfigError::NoDataDir)?
            .data_dir()
            .to_path_buf(),
    };

    if !path.exists() {
        std::fs::create_dir_all(&path)?;
    }

    Ok(path)
}

fn default_database_url(override_dir: Option<PathBuf>) -> Result<String, ConfigError> {
    let dir = asset_dir(override_dir)?;
    Ok(format!(
        "sqlite://{}?mode=rwc",
        dir.join("db.sqlite").to_string_lossy()
    ))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| vars.get(name).cloned()
    }

    #[test]
    fn explicit_values_are_used() {
        let config = Config::from_lookup(lookup_from(&[
            ("HOST", "0.0.0.0"),
            ("PORT", "8080"),
            ("DATABASE_URL", "sqlite::memory:"),
        ]))
        .unwrap();

        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8080);
        assert_eq!(config.database_url, "sqlite::memory:");
        assert_eq!(config.bind_address(), "0.0.0.0:8080");
    }

    #[test]
    fn backend_port_wins_over_port() {
        let config = Config::from_lookup(lookup_from(&[
            ("BACKEND_PORT", "4000"),
            ("PORT", "5000"),
            ("DATABASE_URL", "sqlite::memory:"),
        ]))
        .unwrap();

        assert_eq!(config.port, 4000);
    }

    #[test]
    fn port_with_ansi_codes_is_cleaned() {
        let config = Config::from_lookup(lookup_from(&[
            ("PORT", "\u{1b}[32m3001\u{1b}[0m"),
            ("DATABASE_URL", "sqlite::memory:"),
        ]))
        .unwrap();

        assert_eq!(config.port, 3001);
    }

    #[test]
    fn invalid_port_is_rejected() {
        let err = Config::from_lookup(lookup_from(&[
            ("PORT", "eighty"),
            ("DATABASE_URL", "sqlite::memory:"),
        ]))
        .unwrap_err();

        assert!(matches!(err, ConfigError::InvalidPort { name: "PORT", .. }));
    }

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let config = Config::from_lookup(lookup_from(&[
            ("HOST", "  "),
            ("PORT", ""),
            ("DATABASE_URL", "sqlite::memory:"),
        ]))
        .unwrap();

        assert_eq!(config.host, DEFAULT_HOST);
        assert_eq!(config.port, 0);
    }

    #[test]
    fn database_url_defaults_to_sqlite_file_in_asset_dir() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("data");
        let nested_str = nested.to_string_lossy().into_owned();

        let config =
            Config::from_lookup(lookup_from(&[("TASKS_ASSET_DIR", nested_str.as_str())])).unwrap();

        assert!(nested.is_dir());
        assert!(config.database_url.starts_with("sqlite://"));
        assert!(config.database_url.ends_with("db.sqlite?mode=rwc"));
        assert!(config.database_url.contains(nested_str.as_str()));
    }
}
