//! TestWorld pattern for declarative integration test setup.
//!
//! Provides a fluent interface for:
//! - Creating isolated log, archive and database locations
//! - Writing log files into program folders
//! - Executing CLI commands against a generated config file

use anyhow::Result;
use assert_cmd::Command;
use serde::Serialize;
use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Environment variables the CLI reads; cleared so the host cannot leak in.
const CLI_ENV_VARS: &[&str] = &[
    "JLOG_CONFIG",
    "JLOG_LOG_ROOT",
    "JLOG_ARCHIVE_ROOT",
    "JLOG_DATABASE",
    "RUST_LOG",
];

#[derive(Serialize)]
struct ConfigFile<'a> {
    log_root: &'a Path,
    archive_root: &'a Path,
    database: &'a Path,
    ingest: IngestSection,
}

#[derive(Serialize)]
struct IngestSection {
    atomic_sessions: bool,
}

/// Declarative test environment builder.
///
/// # Example
/// ```no_run
/// use jlog_testing::{HeaderLine, TestWorld, session_lines};
///
/// let world = TestWorld::new().with_program("Sync-Users");
/// world
///     .write_log("Sync-Users", "run.log", &session_lines(&HeaderLine::new("Sync-Users"), &["A"]))
///     .unwrap();
///
/// let result = world.run(&["ingest"]).unwrap();
/// assert!(result.success());
/// ```
pub struct TestWorld {
    temp_dir: TempDir,
    log_root: PathBuf,
    archive_root: PathBuf,
    database: PathBuf,
    config_path: PathBuf,
    atomic_sessions: bool,
    env_vars: HashMap<String, String>,
}

impl Default for TestWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl TestWorld {
    /// Create a new isolated test environment with a config file pointing into it.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let base_path = temp_dir.path().to_path_buf();
        let log_root = base_path.join("logs");

        std::fs::create_dir_all(&log_root).expect("Failed to create log root");

        let world = Self {
            archive_root: base_path.join("archive"),
            database: base_path.join("data").join("jlog.db"),
            config_path: base_path.join("config.toml"),
            log_root,
            temp_dir,
            atomic_sessions: true,
            env_vars: HashMap::new(),
        };
        world.write_config().expect("Failed to write config");
        world
    }

    pub fn log_root(&self) -> &Path {
        &self.log_root
    }

    pub fn archive_root(&self) -> &Path {
        &self.archive_root
    }

    pub fn database(&self) -> &Path {
        &self.database
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn temp_dir(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Folder for a program under the log root (not created).
    pub fn program_dir(&self, program: &str) -> PathBuf {
        self.log_root.join(program)
    }

    /// Where the archiver places `<file_name>` from `program`'s folder.
    pub fn archive_path(&self, program: &str, file_name: &str) -> PathBuf {
        self.archive_root
            .join(program)
            .join(file_name)
            .with_extension("zip")
    }

    /// Create a program folder under the log root.
    pub fn with_program(self, program: &str) -> Self {
        std::fs::create_dir_all(self.program_dir(program)).expect("Failed to create program dir");
        self
    }

    /// Switch between atomic and best-effort session writes.
    pub fn with_atomic_sessions(mut self, atomic: bool) -> Self {
        self.atomic_sessions = atomic;
        self.write_config().expect("Failed to write config");
        self
    }

    /// Set an environment variable for CLI execution.
    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env_vars.insert(key.into(), value.into());
        self
    }

    /// Write `lines` (newline-terminated) into `program`'s folder.
    pub fn write_log<S: AsRef<str>>(
        &self,
        program: &str,
        file_name: &str,
        lines: &[S],
    ) -> Result<PathBuf> {
        let mut content = String::new();
        for line in lines {
            content.push_str(line.as_ref());
            content.push('\n');
        }
        self.write_raw(program, file_name, content.as_bytes())
    }

    /// Write arbitrary bytes into `program`'s folder.
    pub fn write_raw(&self, program: &str, file_name: &str, bytes: &[u8]) -> Result<PathBuf> {
        let dir = self.program_dir(program);
        std::fs::create_dir_all(&dir)?;

        let path = dir.join(file_name);
        let mut file = std::fs::File::create(&path)?;
        file.write_all(bytes)?;
        Ok(path)
    }

    fn write_config(&self) -> Result<()> {
        let config = ConfigFile {
            log_root: &self.log_root,
            archive_root: &self.archive_root,
            database: &self.database,
            ingest: IngestSection {
                atomic_sessions: self.atomic_sessions,
            },
        };
        std::fs::write(&self.config_path, toml::to_string(&config)?)?;
        Ok(())
    }

    /// Configure a CLI command with this test environment's settings.
    pub fn configure_command<'a>(&self, cmd: &'a mut Command) -> &'a mut Command {
        cmd.arg("--config").arg(&self.config_path);
        cmd.current_dir(self.temp_dir.path());

        for key in CLI_ENV_VARS {
            cmd.env_remove(key);
        }
        for (key, value) in &self.env_vars {
            cmd.env(key, value);
        }

        cmd
    }

    /// Execute the `jlog` binary with the given arguments.
    ///
    /// # Note
    /// This method uses `Command::cargo_bin()` which requires the binary to be
    /// built (cargo test does this for workspace binaries).
    #[allow(deprecated)]
    pub fn run(&self, args: &[&str]) -> Result<CliResult> {
        let mut cmd = Command::cargo_bin("jlog")
            .map_err(|e| anyhow::anyhow!("Failed to find jlog binary: {}", e))?;

        self.configure_command(&mut cmd);
        cmd.args(args);

        let output = cmd.output()?;

        Ok(CliResult {
            status: output.status,
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }
}

/// Result of a CLI command execution.
#[derive(Debug)]
pub struct CliResult {
    pub status: std::process::ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

impl CliResult {
    /// Check if the command succeeded.
    pub fn success(&self) -> bool {
        self.status.success()
    }

    /// Parse stdout as JSON.
    pub fn json(&self) -> Result<serde_json::Value> {
        Ok(serde_json::from_str(&self.stdout)?)
    }

    pub fn stdout(&self) -> &str {
        &self.stdout
    }

    pub fn stderr(&self) -> &str {
        &self.stderr
    }
}
