//! Application Configuration - operator-tunable TOML values
//!
//! Every section implements `Default`, so an empty or missing file yields a
//! working setup: seeded placeholder data, the standard export sheet and a
//! local data directory.

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use super::defaults;

/// Environment variable pointing at a config file.
pub const CONFIG_ENV_VAR: &str = "DRILLBOOK_CONFIG";

/// Environment variable overriding `server.addr`.
pub const SERVER_ADDR_ENV_VAR: &str = "DRILLBOOK_SERVER_ADDR";

/// Config file looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "drillbook.toml";

// ============================================================================
// Top-Level Config
// ============================================================================

/// Root configuration for a drilling site deployment.
///
/// Load with `AppConfig::load()` which searches:
/// 1. `$DRILLBOOK_CONFIG` env var
/// 2. `./drillbook.toml`
/// 3. Built-in defaults
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Site identification
    #[serde(default)]
    pub site: SiteInfo,

    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Placeholder data generated on startup
    #[serde(default)]
    pub seed: SeedConfig,

    /// Spreadsheet export settings
    #[serde(default)]
    pub export: ExportConfig,

    /// On-disk locations
    #[serde(default)]
    pub storage: StorageConfig,
}

impl AppConfig {
    /// Load configuration using the standard search order, then apply
    /// environment overrides.
    pub fn load() -> Self {
        let mut config = Self::load_from_search_path();
        config.apply_env_overrides();
        config
    }

    fn load_from_search_path() -> Self {
        // 1. Check env var
        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            let p = PathBuf::from(&path);
            if p.exists() {
                match Self::load_from_file(&p) {
                    Ok(config) => {
                        info!(path = %p.display(), site = %config.site.name, "Loaded config from {CONFIG_ENV_VAR}");
                        return config;
                    }
                    Err(e) => {
                        warn!(path = %p.display(), error = %e, "Failed to load config from {CONFIG_ENV_VAR}, falling back");
                    }
                }
            } else {
                warn!(path = %path, "{CONFIG_ENV_VAR} points to non-existent file, falling back");
            }
        }

        // 2. Check ./drillbook.toml
        let local = PathBuf::from(LOCAL_CONFIG_FILE);
        if local.exists() {
            match Self::load_from_file(&local) {
                Ok(config) => {
                    info!(site = %config.site.name, "Loaded config from ./{LOCAL_CONFIG_FILE}");
                    return config;
                }
                Err(e) => {
                    warn!(error = %e, "Failed to load ./{LOCAL_CONFIG_FILE}, using defaults");
                }
            }
        }

        // 3. Defaults
        info!("No {LOCAL_CONFIG_FILE} found, using built-in defaults");
        Self::default()
    }

    /// Load from a specific TOML file path.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        Self::from_toml_str(&contents).map_err(|e| match e {
            ConfigError::Parse(_, inner) => ConfigError::Parse(path.to_path_buf(), inner),
            other => other,
        })
    }

    /// Parse and validate TOML text. Unknown keys are logged, never fatal.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        // Two-pass: check for unknown keys first (warnings only)
        for w in super::validation::validate_unknown_keys(contents) {
            warn!("{}", w);
        }

        let config: Self =
            toml::from_str(contents).map_err(|e| ConfigError::Parse(PathBuf::new(), e))?;
        config.validate()?;
        Ok(config)
    }

    /// `DRILLBOOK_SERVER_ADDR` replaces `server.addr` when set.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(addr) = std::env::var(SERVER_ADDR_ENV_VAR) {
            if addr.parse::<SocketAddr>().is_ok() {
                info!(addr = %addr, "Server address overridden by {SERVER_ADDR_ENV_VAR}");
                self.server.addr = addr;
            } else {
                warn!(addr = %addr, "Ignoring invalid {SERVER_ADDR_ENV_VAR}");
            }
        }
    }

    /// Serialize the current config to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(ConfigError::Serialize)
    }

    /// Write the config to `path`.
    pub fn save_to_file(&self, path: &Path) -> Result<(), ConfigError> {
        let contents = self.to_toml()?;
        std::fs::write(path, contents).map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        info!(path = %path.display(), "Config saved");
        Ok(())
    }

    /// Validate every section, collecting all errors.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let (errors, warnings) = super::validation::validate_ranges(self);
        for w in &warnings {
            warn!("{}", w);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    /// Parsed bind address.
    pub fn server_addr(&self) -> Result<SocketAddr, ConfigError> {
        self.server
            .addr
            .parse()
            .map_err(|_| {
                ConfigError::Validation(vec![format!(
                    "server.addr '{}' is not HOST:PORT",
                    self.server.addr
                )])
            })
    }

    /// Path of the sled preference database.
    pub fn preferences_db_path(&self) -> PathBuf {
        self.storage
            .data_dir
            .join(crate::store::preferences::DEFAULT_DB_FILE)
    }
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config I/O error ({}): {}", .0.display(), .1)]
    Io(PathBuf, std::io::Error),

    #[error("Config parse error ({}): {}", .0.display(), .1)]
    Parse(PathBuf, toml::de::Error),

    #[error("Config serialization error: {0}")]
    Serialize(toml::ser::Error),

    #[error("Config validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),
}

// ============================================================================
// Site Info
// ============================================================================

/// Identification metadata. Appears in logs and the health endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteInfo {
    #[serde(default = "default_site_name")]
    pub name: String,

    /// Drilling contractor / operator company
    #[serde(default)]
    pub operator_company: String,
}

fn default_site_name() -> String {
    "DEFAULT".to_string()
}

impl Default for SiteInfo {
    fn default() -> Self {
        Self {
            name: default_site_name(),
            operator_company: String::new(),
        }
    }
}

// ============================================================================
// Server
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// `HOST:PORT` to bind
    #[serde(default = "default_server_addr")]
    pub addr: String,
}

fn default_server_addr() -> String {
    defaults::DEFAULT_SERVER_ADDR.to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: default_server_addr(),
        }
    }
}

// ============================================================================
// Seed Data
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeedConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default = "default_records_per_kind")]
    pub records_per_kind: usize,

    /// Fixed RNG seed for reproducible data; random when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rng_seed: Option<u64>,
}

fn default_true() -> bool {
    true
}
fn default_records_per_kind() -> usize {
    defaults::SEED_RECORDS_PER_KIND
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            records_per_kind: default_records_per_kind(),
            rng_seed: None,
        }
    }
}

// ============================================================================
// Export
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportConfig {
    #[serde(default = "default_sheet_name")]
    pub sheet_name: String,

    #[serde(default = "default_file_prefix")]
    pub file_prefix: String,

    /// Date window used when a request gives no range
    #[serde(default = "default_window_days")]
    pub default_window_days: u32,
}

fn default_sheet_name() -> String {
    defaults::DEFAULT_SHEET_NAME.to_string()
}
fn default_file_prefix() -> String {
    defaults::DEFAULT_FILE_PREFIX.to_string()
}
fn default_window_days() -> u32 {
    defaults::DEFAULT_EXPORT_WINDOW_DAYS
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            sheet_name: default_sheet_name(),
            file_prefix: default_file_prefix(),
            default_window_days: default_window_days(),
        }
    }
}

// ============================================================================
// Storage
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from(defaults::DEFAULT_DATA_DIR)
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.seed.records_per_kind, 20);
        assert_eq!(config.export.sheet_name, "Drilling Report");
        assert_eq!(config.export.default_window_days, 30);
        assert!(config.server_addr().is_ok());
    }

    #[test]
    fn test_empty_toml_yields_defaults() {
        let config = AppConfig::from_toml_str("").unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_partial_section_keeps_other_defaults() {
        let config = AppConfig::from_toml_str(
            r#"
[site]
name = "Kalgoorlie North"

[seed]
records_per_kind = 5
rng_seed = 42
"#,
        )
        .unwrap();
        assert_eq!(config.site.name, "Kalgoorlie North");
        assert_eq!(config.seed.records_per_kind, 5);
        assert_eq!(config.seed.rng_seed, Some(42));
        assert!(config.seed.enabled);
        assert_eq!(config.export.file_prefix, "drilling-report");
    }

    #[test]
    fn test_toml_roundtrip() {
        let mut config = AppConfig::default();
        config.site.operator_company = "Deep Core Drilling".to_string();
        config.seed.rng_seed = Some(7);
        let text = config.to_toml().unwrap();
        assert_eq!(AppConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn test_invalid_values_collected() {
        let result = AppConfig::from_toml_str(
            r#"
[server]
addr = "not-an-address"

[export]
sheet_name = ""
default_window_days = 0
"#,
        );
        match result {
            Err(ConfigError::Validation(errors)) => assert_eq!(errors.len(), 3, "{errors:?}"),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("drillbook.toml");
        std::fs::write(&path, "[storage]\ndata_dir = \"/var/lib/drillbook\"\n").unwrap();

        let config = AppConfig::load_from_file(&path).unwrap();
        assert_eq!(config.storage.data_dir, PathBuf::from("/var/lib/drillbook"));
        assert_eq!(
            config.preferences_db_path(),
            PathBuf::from("/var/lib/drillbook/preferences.db")
        );
    }

    #[test]
    fn test_parse_error_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        std::fs::write(&path, "[seed\nenabled = ").unwrap();

        let err = AppConfig::load_from_file(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(ref p, _) if p == &path));
        assert!(err.to_string().contains("broken.toml"));
    }
}
