//! Handles settings for the application.
//!
//! Sources, lowest priority first: built-in defaults, the optional
//! `settings.toml`, `THRIFTY__*` environment variables (e.g.
//! `THRIFTY__SERVER__PORT`) and finally the `SQLITE_DB_PATH` and `PORT`
//! variables.
use config::{Config, ConfigError, Environment, File, Source};
use serde::Deserialize;
use thiserror::Error;

const DEFAULT_CONFIG_PATH: &str = "settings";
const DEFAULT_PORT: i64 = 8080;
const DEFAULT_DATABASE: &str = "thrifty.sqlite";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("invalid PORT value: {0}")]
    InvalidPort(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum Database {
    Memory,
    Sqlite(String),
}

impl From<String> for Database {
    fn from(value: String) -> Self {
        if value == "memory" || value == ":memory:" {
            Database::Memory
        } else {
            Database::Sqlite(value)
        }
    }
}

impl Database {
    pub fn url(&self) -> String {
        match self {
            Database::Memory => String::from("sqlite::memory:"),
            Database::Sqlite(path) => format!("sqlite:{}?mode=rwc", path),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct App {
    pub level: String,
}

#[derive(Debug, Deserialize)]
pub struct Server {
    pub bind: String,
    pub port: u16,
    pub database: Database,
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub app: App,
    pub server: Server,
}

impl Settings {
    pub fn new(config_path: Option<&str>) -> Result<Self, SettingsError> {
        let file = File::with_name(config_path.unwrap_or(DEFAULT_CONFIG_PATH)).required(false);
        Self::build(
            file,
            std::env::var("SQLITE_DB_PATH").ok(),
            std::env::var("PORT").ok(),
        )
    }

    fn build<S>(file: S, sqlite_path: Option<String>, port: Option<String>) -> Result<Self, SettingsError>
    where
        S: Source + Send + Sync + 'static,
    {
        let port = parse_port(port.as_deref())?;
        let sqlite_path = sqlite_path.filter(|path| !path.is_empty());

        let settings: Settings = Config::builder()
            .set_default("app.level", "info")?
            .set_default("server.bind", "0.0.0.0")?
            .set_default("server.port", DEFAULT_PORT)?
            .set_default("server.database", DEFAULT_DATABASE)?
            .add_source(file)
            .add_source(Environment::with_prefix("THRIFTY").separator("__"))
            .set_override_option("server.database", sqlite_path)?
            .set_override_option("server.port", port)?
            .build()?
            .try_deserialize()?;

        if settings.server.port == 0 {
            return Err(SettingsError::InvalidPort(
                "PORT value out of range (1-65535)".to_string(),
            ));
        }
        Ok(settings)
    }
}

fn parse_port(raw: Option<&str>) -> Result<Option<i64>, SettingsError> {
    let Some(raw) = raw.map(str::trim).filter(|raw| !raw.is_empty()) else {
        return Ok(None);
    };
    let port: i64 = raw
        .parse()
        .map_err(|_| SettingsError::InvalidPort(raw.to_string()))?;
    if !(1..=65535).contains(&port) {
        return Err(SettingsError::InvalidPort(
            "PORT value out of range (1-65535)".to_string(),
        ));
    }
    Ok(Some(port))
}

#[cfg(test)]
mod tests {
    use config::FileFormat;

    use super::*;

    fn from_toml(toml: &str, sqlite_path: Option<&str>, port: Option<&str>) -> Result<Settings, SettingsError> {
        Settings::build(
            File::from_str(toml, FileFormat::Toml),
            sqlite_path.map(str::to_string),
            port.map(str::to_string),
        )
    }

    #[test]
    fn defaults() {
        let settings = from_toml("", None, None).unwrap();
        assert_eq!(settings.app.level, "info");
        assert_eq!(settings.server.port, 8080);
        assert_eq!(settings.server.database, Database::Sqlite("thrifty.sqlite".to_string()));
    }

    #[test]
    fn file_values() {
        let settings = from_toml(
            "[app]\nlevel = \"debug\"\n[server]\nport = 3000\ndatabase = \"memory\"\n",
            None,
            None,
        )
        .unwrap();
        assert_eq!(settings.app.level, "debug");
        assert_eq!(settings.server.port, 3000);
        assert_eq!(settings.server.database, Database::Memory);
    }

    #[test]
    fn legacy_variables_win() {
        let settings = from_toml(
            "[server]\nport = 3000\ndatabase = \"memory\"\n",
            Some("/data/thrifty.sqlite"),
            Some("9090"),
        )
        .unwrap();
        assert_eq!(settings.server.port, 9090);
        assert_eq!(
            settings.server.database,
            Database::Sqlite("/data/thrifty.sqlite".to_string())
        );
    }

    #[test]
    fn empty_legacy_variables_are_ignored() {
        let settings = from_toml("", Some(""), Some("")).unwrap();
        assert_eq!(settings.server.port, 8080);
        assert_eq!(settings.server.database, Database::Sqlite("thrifty.sqlite".to_string()));
    }

    #[test]
    fn invalid_ports() {
        assert!(matches!(from_toml("", None, Some("http")), Err(SettingsError::InvalidPort(_))));
        assert!(matches!(from_toml("", None, Some("0")), Err(SettingsError::InvalidPort(_))));
        assert!(matches!(from_toml("", None, Some("70000")), Err(SettingsError::InvalidPort(_))));
        assert!(from_toml("[server]\nport = 0\n", None, None).is_err());
    }

    #[test]
    fn database_urls() {
        assert_eq!(Database::Memory.url(), "sqlite::memory:");
        assert_eq!(
            Database::Sqlite("thrifty.sqlite".to_string()).url(),
            "sqlite:thrifty.sqlite?mode=rwc"
        );
    }
}
