//! services/portal/src/config.rs
//!
//! Defines the portal's configuration structure and loading logic.
//!
//! Configuration is loaded from environment variables at startup (a `.env`
//! file is honoured for local development). Command-line flags parsed by the
//! binary override the environment.

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use clap::Parser;
use tracing::Level;

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Holds all configuration loaded at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub bind_address: SocketAddr,
    /// JSON dataset the model is loaded (and reset) from.
    pub data_path: PathBuf,
    /// Directory holding the `jq`, `jqm` and `img` asset folders.
    pub static_root: PathBuf,
    /// Name shown in the page header for the implicit single user.
    pub student_name: String,
    pub log_level: Level,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// It will look for a `.env` file in the current directory for development,
    /// but this is skipped in test builds so tests stay hermetic.
    pub fn from_env() -> Result<Self, ConfigError> {
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bind_address_str =
            lookup("BIND_ADDRESS").unwrap_or_else(|| "127.0.0.1:8080".to_string());
        let bind_address = bind_address_str.parse::<SocketAddr>().map_err(|e| {
            ConfigError::InvalidValue("BIND_ADDRESS".to_string(), e.to_string())
        })?;

        let data_path = lookup("DATA_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("./mock_units.json"));
        let static_root = lookup("STATIC_ROOT")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("./static"));
        let student_name = lookup("STUDENT_NAME").unwrap_or_else(|| "Mock Student".to_string());

        let log_level_str = lookup("RUST_LOG").unwrap_or_else(|| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        Ok(Self {
            bind_address,
            data_path,
            static_root,
            student_name,
            log_level,
        })
    }

    /// Applies command-line overrides on top of the environment.
    pub fn with_overrides(mut self, cli: CliOverrides) -> Self {
        if let Some(host) = cli.host {
            self.bind_address.set_ip(host);
        }
        if let Some(port) = cli.port {
            self.bind_address.set_port(port);
        }
        if let Some(data) = cli.data {
            self.data_path = data;
        }
        if let Some(static_root) = cli.static_root {
            self.static_root = static_root;
        }
        self
    }
}

/// Run the mock attendance portal server.
#[derive(Parser, Debug, Default)]
#[command(name = "portal", version)]
pub struct CliOverrides {
    /// Address to bind (overrides the host part of BIND_ADDRESS).
    #[arg(long)]
    pub host: Option<IpAddr>,
    /// Port to bind (overrides the port part of BIND_ADDRESS).
    #[arg(long)]
    pub port: Option<u16>,
    /// Path to the mock JSON dataset.
    #[arg(long)]
    pub data: Option<PathBuf>,
    /// Directory with the static assets.
    #[arg(long)]
    pub static_root: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::net::Ipv4Addr;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.bind_address, "127.0.0.1:8080".parse::<SocketAddr>().unwrap());
        assert_eq!(config.data_path, PathBuf::from("./mock_units.json"));
        assert_eq!(config.static_root, PathBuf::from("./static"));
        assert_eq!(config.student_name, "Mock Student");
        assert_eq!(config.log_level, Level::INFO);
    }

    #[test]
    fn invalid_values_are_reported_by_name() {
        let err = Config::from_lookup(lookup(&[("BIND_ADDRESS", "nope")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(var, _) if var == "BIND_ADDRESS"));

        let err = Config::from_lookup(lookup(&[("RUST_LOG", "chatty")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(var, _) if var == "RUST_LOG"));
    }

    #[test]
    fn cli_flags_override_environment() {
        let config = Config::from_lookup(lookup(&[
            ("BIND_ADDRESS", "0.0.0.0:3000"),
            ("DATA_PATH", "/srv/env.json"),
        ]))
        .unwrap();
        let cli = CliOverrides::parse_from(["portal", "--port", "9000", "--data", "/tmp/cli.json"]);
        let config = config.with_overrides(cli);
        assert_eq!(config.bind_address.ip(), IpAddr::V4(Ipv4Addr::UNSPECIFIED));
        assert_eq!(config.bind_address.port(), 9000);
        assert_eq!(config.data_path, PathBuf::from("/tmp/cli.json"));
    }
}
