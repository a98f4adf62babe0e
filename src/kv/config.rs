//! Store configuration.

use serde::Deserialize;
#[cfg(feature = "config")]
use std::path::Path;
use thiserror::Error;

use super::schema::DEFAULT_TABLE;

/// How a [`KvStore`](super::KvStore) binds to its table.
///
/// Loadable from TOML (with the `config` feature):
///
/// ```toml
/// table = "settings"
/// create_table = true
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StoreConfig {
    /// Table holding the entries.
    pub table: String,
    /// Create the table when it is missing instead of failing.
    pub create_table: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            table: DEFAULT_TABLE.to_string(),
            create_table: false,
        }
    }
}

impl StoreConfig {
    /// Config for an existing table.
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            ..Self::default()
        }
    }

    /// Also create the table if it does not exist yet.
    pub fn create_table(mut self, create: bool) -> Self {
        self.create_table = create;
        self
    }

    /// Load configuration from a TOML file.
    #[cfg(feature = "config")]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(path.display().to_string(), e))?;
        Self::from_toml(&content)
    }

    /// Parse configuration from a TOML string.
    #[cfg(feature = "config")]
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations no table could satisfy.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.table.is_empty() {
            return Err(ConfigError::Invalid("table name must not be empty".to_string()));
        }
        Ok(())
    }
}

/// Configuration error.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// IO error reading config file.
    #[error("Failed to read config file '{0}': {1}")]
    Io(String, #[source] std::io::Error),

    /// TOML parse error.
    #[cfg(feature = "config")]
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Parsed, but unusable.
    #[error("Invalid config: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = StoreConfig::default();
        assert_eq!(config.table, "kv");
        assert!(!config.create_table);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = StoreConfig::new("settings").create_table(true);
        assert_eq!(config.table, "settings");
        assert!(config.create_table);
    }

    #[test]
    fn test_empty_table_rejected() {
        let err = StoreConfig::new("").validate().unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[cfg(feature = "config")]
    #[test]
    fn test_parse_config() {
        let toml = r#"
table = "settings"
create_table = true
"#;
        let config = StoreConfig::from_toml(toml).unwrap();
        assert_eq!(config, StoreConfig::new("settings").create_table(true));
    }

    #[cfg(feature = "config")]
    #[test]
    fn test_parse_partial_config() {
        let config = StoreConfig::from_toml("create_table = true").unwrap();
        assert_eq!(config.table, "kv");
        assert!(config.create_table);

        assert_eq!(StoreConfig::from_toml("").unwrap(), StoreConfig::default());
    }

    #[cfg(feature = "config")]
    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            StoreConfig::from_toml("tabel = \"x\"").unwrap_err(),
            ConfigError::Parse(_)
        ));
        assert!(matches!(
            StoreConfig::from_toml("table = \"\"").unwrap_err(),
            ConfigError::Invalid(_)
        ));
    }

    #[cfg(feature = "config")]
    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tinykv.toml");
        std::fs::write(&path, "table = \"cache\"\n").unwrap();
        assert_eq!(StoreConfig::from_file(&path).unwrap().table, "cache");

        let missing = StoreConfig::from_file(dir.path().join("nope.toml")).unwrap_err();
        assert!(matches!(missing, ConfigError::Io(..)));
    }
}
