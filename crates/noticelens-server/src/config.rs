use std::{env, fmt::Display, path::PathBuf, str::FromStr};

use log::{info, warn};

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PUBLIC_DIR: &str = "public";

/// Entry document served for every path without a matching asset.
pub const INDEX_FILE: &str = "index.html";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Asset root. Must contain [`INDEX_FILE`].
    pub public_dir: PathBuf,
    /// Mount the development `POST /register` and `POST /login` echo routes.
    pub echo_auth: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            public_dir: PathBuf::from(DEFAULT_PUBLIC_DIR),
            echo_auth: false,
        }
    }
}

impl ServerConfig {
    /// Defaults with `PORT` taken from the environment when set and valid.
    pub fn from_env() -> Self {
        Self {
            port: try_load("PORT", DEFAULT_PORT),
            ..Self::default()
        }
    }

    pub fn index_path(&self) -> PathBuf {
        self.public_dir.join(INDEX_FILE)
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn try_load<T: FromStr + Display>(key: &str, default: T) -> T
where
    T::Err: Display,
{
    parse_or(key, env::var(key).ok(), default)
}

fn parse_or<T: FromStr + Display>(key: &str, raw: Option<String>, default: T) -> T
where
    T::Err: Display,
{
    let Some(raw) = raw else {
        info!("{key} not set, using default: {default}");
        return default;
    };
    raw.trim().parse().unwrap_or_else(|e| {
        warn!("Invalid {key} value {raw:?}: {e}, using default: {default}");
        default
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.port, 3000);
        assert_eq!(config.host, "0.0.0.0");
        assert!(!config.echo_auth);
        assert_eq!(config.index_path(), PathBuf::from("public/index.html"));
        assert_eq!(config.bind_addr(), "0.0.0.0:3000");
    }

    #[test]
    fn test_try_load_missing_key_uses_default() {
        let port: u16 = try_load("NOTICELENS_TEST_UNSET_PORT_VAR", 4321);
        assert_eq!(port, 4321);
    }

    #[test]
    fn test_parse_or_reads_valid_port() {
        let port: u16 = parse_or("PORT", Some(" 8080 ".into()), DEFAULT_PORT);
        assert_eq!(port, 8080);
    }

    #[test]
    fn test_parse_or_invalid_falls_back() {
        let port: u16 = parse_or("PORT", Some("eighty".into()), DEFAULT_PORT);
        assert_eq!(port, DEFAULT_PORT);
        let port: u16 = parse_or("PORT", Some("70000".into()), DEFAULT_PORT);
        assert_eq!(port, DEFAULT_PORT);
    }
}
