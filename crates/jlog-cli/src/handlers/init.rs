use crate::config::expand_tilde;
use crate::types::OutputFormat;
use anyhow::{Result, bail};
use jlog_index::Database;
use jlog_runtime::Config;
use std::path::{Path, PathBuf};

pub struct InitOptions {
    pub log_root: Option<PathBuf>,
    pub archive_root: Option<PathBuf>,
    pub database: Option<PathBuf>,
    pub force: bool,
}

/// Write a config file at `config_path` and create the database it names.
pub fn handle(config_path: &Path, options: InitOptions, format: OutputFormat) -> Result<()> {
    if config_path.exists() && !options.force {
        bail!(
            "{} already exists (use --force to overwrite)",
            config_path.display()
        );
    }

    let expand = |path: Option<PathBuf>| path.map(|p| expand_tilde(&p.to_string_lossy()));
    let config = Config {
        log_root: expand(options.log_root),
        archive_root: expand(options.archive_root),
        database: expand(options.database),
        ..Config::default()
    };

    config.save_to(config_path)?;

    if let Some(database) = &config.database {
        Database::open(database)?;
    }

    match format {
        OutputFormat::Plain => {
            println!("Wrote {}", config_path.display());
            if config.validate().is_err() {
                println!(
                    "Some settings are still unset; provide them in the file or through JLOG_* variables."
                );
            }
        }
        OutputFormat::Json => {
            let output = serde_json::json!({
                "config_path": config_path.display().to_string(),
                "config": config,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    Ok(())
}
