use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Ingestion behaviour knobs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestConfig {
    /// Write each file's session inside one transaction that commits only
    /// after the archive is durable. When false, every write autocommits and
    /// a failure part-way leaves a partial, unarchived session behind.
    #[serde(default = "default_atomic_sessions")]
    pub atomic_sessions: bool,
}

fn default_atomic_sessions() -> bool {
    true
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            atomic_sessions: default_atomic_sessions(),
        }
    }
}

/// Run configuration. Built once by the caller and passed by reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    /// Directory whose subfolders are program log folders
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_root: Option<PathBuf>,

    /// Directory receiving `<folder>/<stem>.zip` archives
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub archive_root: Option<PathBuf>,

    /// SQLite database file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database: Option<PathBuf>,

    #[serde(default)]
    pub ingest: IngestConfig,
}

impl Config {
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Check that every path an ingest run needs is present, and that
    /// archives are not written where the next sweep would pick them up.
    pub fn validate(&self) -> Result<()> {
        let log_root = std::path::absolute(self.log_root()?)?;
        let archive_root = std::path::absolute(self.archive_root()?)?;
        self.database()?;

        if archive_root.starts_with(&log_root) {
            return Err(Error::Config(format!(
                "`archive_root` ({}) must not be inside `log_root` ({})",
                archive_root.display(),
                log_root.display()
            )));
        }

        Ok(())
    }

    pub fn log_root(&self) -> Result<&Path> {
        required(&self.log_root, "log_root")
    }

    pub fn archive_root(&self) -> Result<&Path> {
        required(&self.archive_root, "archive_root")
    }

    pub fn database(&self) -> Result<&Path> {
        required(&self.database, "database")
    }
}

fn required<'a>(value: &'a Option<PathBuf>, key: &str) -> Result<&'a Path> {
    match value {
        Some(path) if !path.as_os_str().is_empty() => Ok(path),
        _ => Err(Error::Config(format!("`{}` is not set", key))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn full_config() -> Config {
        Config {
            log_root: Some(PathBuf::from("/srv/logs")),
            archive_root: Some(PathBuf::from("/srv/archive")),
            database: Some(PathBuf::from("/var/lib/jlog/jlog.db")),
            ingest: IngestConfig::default(),
        }
    }

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(config.log_root.is_none());
        assert!(config.ingest.atomic_sessions);
    }

    #[test]
    fn test_config_save_and_load() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join("nested").join("config.toml");

        let mut config = full_config();
        config.ingest.atomic_sessions = false;
        config.save_to(&config_path)?;
        assert!(config_path.exists());

        let loaded = Config::load_from(&config_path)?;
        assert_eq!(loaded, config);

        Ok(())
    }

    #[test]
    fn test_load_nonexistent_returns_default() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join("nonexistent.toml");

        let config = Config::load_from(&config_path)?;
        assert_eq!(config, Config::default());

        Ok(())
    }

    #[test]
    fn test_missing_ingest_table_defaults_to_atomic() -> Result<()> {
        let config: Config = toml::from_str(
            r#"
            log_root = "/srv/logs"
            archive_root = "/srv/archive"
            "#,
        )?;

        assert!(config.ingest.atomic_sessions);
        assert_eq!(config.log_root()?, Path::new("/srv/logs"));
        Ok(())
    }

    #[test]
    fn test_invalid_toml_is_config_error() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join("config.toml");
        std::fs::write(&config_path, "log_root = [")?;

        let err = Config::load_from(&config_path).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        Ok(())
    }

    #[test]
    fn test_validate_requires_paths() {
        assert!(full_config().validate().is_ok());

        let mut config = full_config();
        config.archive_root = None;
        let err = config.validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Configuration error: `archive_root` is not set"
        );

        let mut config = full_config();
        config.log_root = Some(PathBuf::new());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_archive_inside_log_root() {
        let mut config = full_config();
        config.archive_root = Some(PathBuf::from("/srv/logs/archive"));
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("must not be inside `log_root`"));

        config.archive_root = Some(PathBuf::from("/srv/logs"));
        assert!(config.validate().is_err());

        // sibling with a shared name prefix is fine
        config.archive_root = Some(PathBuf::from("/srv/logs-archive"));
        assert!(config.validate().is_ok());
    }
}
