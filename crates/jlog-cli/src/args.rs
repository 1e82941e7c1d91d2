use crate::types::{LogLevel, OutputFormat};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "jlog")]
#[command(about = "Ingest JSON logger files into SQLite sessions and archive them", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Config file (default: $JLOG_CONFIG, then <data dir>/jlog/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[arg(long, default_value = "plain", global = true)]
    pub format: OutputFormat,

    /// Diagnostic log level on stderr (default: $RUST_LOG, then warn)
    #[arg(long, global = true)]
    pub log_level: Option<LogLevel>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Register new program folders, then ingest, archive and remove every log file
    Ingest,

    /// Parse one log file without touching storage or the file
    Check { file: PathBuf },

    /// Write a config file
    Init {
        #[arg(long)]
        log_root: Option<PathBuf>,

        #[arg(long)]
        archive_root: Option<PathBuf>,

        #[arg(long)]
        database: Option<PathBuf>,

        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },

    Program {
        #[command(subcommand)]
        command: ProgramCommand,
    },

    Session {
        #[command(subcommand)]
        command: SessionCommand,
    },
}

#[derive(Subcommand)]
pub enum ProgramCommand {
    List,
}

#[derive(Subcommand)]
pub enum SessionCommand {
    List {
        /// Only sessions of this program id
        #[arg(long)]
        program: Option<i64>,
    },

    /// Print a session's stored lines in file order
    Show { id: i64 },
}
