// Configuration loading and parsing (sideline.toml).

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },
}

// ---------------------------------------------------------------------------
// Config structs
// ---------------------------------------------------------------------------

/// Raw deserialization target for the whole sideline.toml file. Every
/// section is optional; missing sections fall back to defaults.
#[derive(Debug, Clone, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    engine: EngineSection,
    #[serde(default)]
    log: LogSection,
}

#[derive(Debug, Clone, Deserialize)]
struct EngineSection {
    #[serde(default = "default_port")]
    port: u16,
    #[serde(default = "default_reconnect_secs")]
    reconnect_secs: u64,
}

impl Default for EngineSection {
    fn default() -> Self {
        EngineSection {
            port: default_port(),
            reconnect_secs: default_reconnect_secs(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
struct LogSection {
    #[serde(default = "default_log_filter")]
    filter: String,
}

impl Default for LogSection {
    fn default() -> Self {
        LogSection {
            filter: default_log_filter(),
        }
    }
}

fn default_port() -> u16 {
    9326
}

fn default_reconnect_secs() -> u64 {
    3
}

fn default_log_filter() -> String {
    "sideline=info,warn".to_string()
}

/// The assembled runtime configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Port the console listens on for the engine's WebSocket connection.
    pub engine_port: u16,
    /// Delay between accept-loop restarts after a bind failure.
    pub reconnect_secs: u64,
    /// tracing-subscriber EnvFilter directive for the log file.
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            engine_port: default_port(),
            reconnect_secs: default_reconnect_secs(),
            log_filter: default_log_filter(),
        }
    }
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

/// Load configuration from the platform config directory
/// (e.g. `~/.config/sideline/sideline.toml`), falling back to defaults
/// when the file does not exist.
pub fn load_config() -> Result<Config, ConfigError> {
    match config_file_path() {
        Some(p) if p.exists() => load_from_path(&p),
        _ => Ok(Config::default()),
    }
}

/// Load and validate configuration from an explicit path.
pub fn load_from_path(path: &Path) -> Result<Config, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadError {
        path: path.to_path_buf(),
        source,
    })?;
    let file: ConfigFile = toml::from_str(&text).map_err(|source| ConfigError::ParseError {
        path: path.to_path_buf(),
        source,
    })?;
    assemble(file)
}

fn assemble(file: ConfigFile) -> Result<Config, ConfigError> {
    if file.engine.port == 0 {
        return Err(ConfigError::ValidationError {
            field: "engine.port".to_string(),
            message: "port must be nonzero".to_string(),
        });
    }
    if file.engine.reconnect_secs == 0 {
        return Err(ConfigError::ValidationError {
            field: "engine.reconnect_secs".to_string(),
            message: "reconnect delay must be at least 1 second".to_string(),
        });
    }
    Ok(Config {
        engine_port: file.engine.port,
        reconnect_secs: file.engine.reconnect_secs,
        log_filter: file.log.filter,
    })
}

fn config_file_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "sideline")
        .map(|dirs| dirs.config_dir().join("sideline.toml"))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_yields_defaults() {
        let file: ConfigFile = toml::from_str("").unwrap();
        let config = assemble(file).unwrap();
        assert_eq!(config.engine_port, 9326);
        assert_eq!(config.reconnect_secs, 3);
        assert_eq!(config.log_filter, "sideline=info,warn");
    }

    #[test]
    fn sections_override_defaults() {
        let text = r#"
            [engine]
            port = 4000
            reconnect_secs = 10

            [log]
            filter = "sideline=debug"
        "#;
        let file: ConfigFile = toml::from_str(text).unwrap();
        let config = assemble(file).unwrap();
        assert_eq!(config.engine_port, 4000);
        assert_eq!(config.reconnect_secs, 10);
        assert_eq!(config.log_filter, "sideline=debug");
    }

    #[test]
    fn partial_section_keeps_other_defaults() {
        let text = r#"
            [engine]
            port = 7001
        "#;
        let file: ConfigFile = toml::from_str(text).unwrap();
        let config = assemble(file).unwrap();
        assert_eq!(config.engine_port, 7001);
        assert_eq!(config.reconnect_secs, 3);
    }

    #[test]
    fn zero_port_rejected() {
        let text = r#"
            [engine]
            port = 0
        "#;
        let file: ConfigFile = toml::from_str(text).unwrap();
        let err = assemble(file).unwrap_err();
        assert!(
            matches!(err, ConfigError::ValidationError { ref field, .. } if field == "engine.port")
        );
    }

    #[test]
    fn malformed_toml_is_parse_error() {
        let dir = std::env::temp_dir().join("sideline-config-test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("bad.toml");
        std::fs::write(&path, "[engine\nport = 1").unwrap();
        let err = load_from_path(&path).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
    }
}
