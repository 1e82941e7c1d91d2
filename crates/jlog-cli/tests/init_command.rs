use anyhow::Result;
use assert_cmd::cargo::cargo_bin_cmd;
use jlog_testing::TestWorld;
use predicates::prelude::*;

#[test]
fn test_init_refuses_to_overwrite() -> Result<()> {
    let world = TestWorld::new();
    let before = std::fs::read_to_string(world.config_path())?;

    let result = world.run(&["init", "--log-root", "/srv/logs"])?;
    assert!(!result.success());
    assert!(result.stderr().contains("already exists"));
    assert_eq!(std::fs::read_to_string(world.config_path())?, before);

    Ok(())
}

#[test]
fn test_init_force_overwrites() -> Result<()> {
    let world = TestWorld::new();

    let result = world.run(&["init", "--log-root", "/srv/logs", "--force"])?;
    assert!(result.success(), "stderr: {}", result.stderr());

    let content = std::fs::read_to_string(world.config_path())?;
    assert!(content.contains("log_root = \"/srv/logs\""));
    assert!(!content.contains("archive_root"));

    Ok(())
}

#[test]
fn test_init_writes_config_and_creates_database() -> Result<()> {
    let temp = tempfile::TempDir::new()?;
    let config_path = temp.path().join("etc").join("config.toml");
    let database = temp.path().join("var").join("jlog.db");

    let mut cmd = cargo_bin_cmd!("jlog");
    cmd.env_remove("JLOG_CONFIG")
        .arg("--config")
        .arg(&config_path)
        .arg("init")
        .arg("--log-root")
        .arg(temp.path().join("logs"))
        .arg("--archive-root")
        .arg(temp.path().join("archive"))
        .arg("--database")
        .arg(&database)
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote"));

    assert!(config_path.exists());
    assert!(database.exists());

    let content = std::fs::read_to_string(&config_path)?;
    assert!(content.contains("[ingest]"));
    assert!(content.contains("atomic_sessions = true"));

    Ok(())
}

#[test]
fn test_config_from_env_path() -> Result<()> {
    let world = TestWorld::new();
    let moved = world.temp_dir().join("moved.toml");
    std::fs::rename(world.config_path(), &moved)?;

    let mut cmd = cargo_bin_cmd!("jlog");
    cmd.current_dir(world.temp_dir())
        .env("JLOG_CONFIG", &moved)
        .env_remove("JLOG_LOG_ROOT")
        .env_remove("JLOG_ARCHIVE_ROOT")
        .env_remove("JLOG_DATABASE")
        .arg("program")
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No programs registered."));

    assert!(world.database().exists());
    Ok(())
}
