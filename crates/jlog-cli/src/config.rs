use anyhow::{Result, anyhow};
use jlog_runtime::Config;
use std::path::{Path, PathBuf};

pub const ENV_CONFIG: &str = "JLOG_CONFIG";
pub const ENV_LOG_ROOT: &str = "JLOG_LOG_ROOT";
pub const ENV_ARCHIVE_ROOT: &str = "JLOG_ARCHIVE_ROOT";
pub const ENV_DATABASE: &str = "JLOG_DATABASE";

/// Resolve the config file path based on priority:
/// 1. Explicit `--config` (with tilde expansion)
/// 2. JLOG_CONFIG environment variable (with tilde expansion)
/// 3. `<data dir>/jlog/config.toml`
pub fn resolve_config_path(
    explicit: Option<&Path>,
    env: impl Fn(&str) -> Option<String>,
) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(expand_tilde(&path.to_string_lossy()));
    }

    if let Some(env_path) = env(ENV_CONFIG) {
        return Ok(expand_tilde(&env_path));
    }

    Ok(data_dir()?.join("config.toml"))
}

/// Load the config file, then apply environment overrides and defaults.
pub fn load(explicit: Option<&Path>, env: impl Fn(&str) -> Option<String>) -> Result<Config> {
    let path = resolve_config_path(explicit, &env)?;
    let mut config = Config::load_from(&path)?;
    apply_overrides(&mut config, &env)?;
    Ok(config)
}

pub fn apply_overrides(config: &mut Config, env: impl Fn(&str) -> Option<String>) -> Result<()> {
    if let Some(value) = env(ENV_LOG_ROOT) {
        config.log_root = Some(PathBuf::from(value));
    }
    if let Some(value) = env(ENV_ARCHIVE_ROOT) {
        config.archive_root = Some(PathBuf::from(value));
    }
    if let Some(value) = env(ENV_DATABASE) {
        config.database = Some(PathBuf::from(value));
    }

    if config.database.is_none() {
        config.database = Some(data_dir()?.join("jlog.db"));
    }

    for path in [
        &mut config.log_root,
        &mut config.archive_root,
        &mut config.database,
    ]
    .into_iter()
    .flatten()
    {
        *path = expand_tilde(&path.to_string_lossy());
    }

    Ok(())
}

/// Look up process environment variables, treating empty values as unset.
pub fn process_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

fn data_dir() -> Result<PathBuf> {
    if let Some(data_dir) = dirs::data_dir() {
        return Ok(data_dir.join("jlog"));
    }

    if let Some(home) = dirs::home_dir() {
        return Ok(home.join(".jlog"));
    }

    Err(anyhow!(
        "Could not determine data directory: no HOME directory or XDG data directory found"
    ))
}

/// Expand tilde (~) in paths to the user's home directory
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(stripped);
    }
    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_explicit_path_wins_over_env() -> Result<()> {
        let env = env_from(&[(ENV_CONFIG, "/etc/jlog/env.toml")]);
        let path = resolve_config_path(Some(Path::new("/tmp/cli.toml")), env)?;

        assert_eq!(path, PathBuf::from("/tmp/cli.toml"));
        Ok(())
    }

    #[test]
    fn test_env_path_used_without_flag() -> Result<()> {
        let env = env_from(&[(ENV_CONFIG, "/etc/jlog/env.toml")]);
        let path = resolve_config_path(None, env)?;

        assert_eq!(path, PathBuf::from("/etc/jlog/env.toml"));
        Ok(())
    }

    #[test]
    fn test_env_overrides_file_values() -> Result<()> {
        let temp = TempDir::new()?;
        let config_path = temp.path().join("config.toml");
        std::fs::write(
            &config_path,
            "log_root = \"/from/file\"\narchive_root = \"/archive/file\"\ndatabase = \"/db/file.db\"\n",
        )?;

        let env = env_from(&[(ENV_LOG_ROOT, "/from/env")]);
        let config = load(Some(config_path.as_path()), env)?;

        assert_eq!(config.log_root()?, Path::new("/from/env"));
        assert_eq!(config.archive_root()?, Path::new("/archive/file"));
        assert_eq!(config.database()?, Path::new("/db/file.db"));
        Ok(())
    }

    #[test]
    fn test_missing_file_uses_env_only() -> Result<()> {
        let temp = TempDir::new()?;
        let env = env_from(&[
            (ENV_LOG_ROOT, "/logs"),
            (ENV_ARCHIVE_ROOT, "/archive"),
            (ENV_DATABASE, "/data/jlog.db"),
        ]);

        let config = load(Some(temp.path().join("absent.toml").as_path()), env)?;
        config.validate()?;
        assert!(config.ingest.atomic_sessions);
        Ok(())
    }

    #[test]
    fn test_database_defaults_when_unset() -> Result<()> {
        let mut config = Config::default();
        apply_overrides(&mut config, env_from(&[]))?;

        assert!(config.database()?.ends_with("jlog.db"));
        assert!(config.log_root.is_none());
        Ok(())
    }

    #[test]
    fn test_expand_tilde_leaves_plain_paths() {
        assert_eq!(expand_tilde("/srv/logs"), PathBuf::from("/srv/logs"));
        assert_eq!(expand_tilde("relative/~"), PathBuf::from("relative/~"));
    }
}
