// jlog: sweep JSON logger output into SQLite and archive the sources.
//
// Layout:
// - args/types: clap surface
// - config: config-file discovery plus JLOG_* overrides (the only place
//   that reads the process environment)
// - handlers: one module per command; each prints through `console`
// - logging: tracing subscriber on stderr, separate from command output

mod args;
mod commands;
pub mod config;
pub mod console;
mod handlers;
mod logging;
pub mod types;

pub use args::{Cli, Commands, ProgramCommand, SessionCommand};
pub use commands::run;
