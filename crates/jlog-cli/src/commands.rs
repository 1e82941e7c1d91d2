use super::args::{Cli, Commands, ProgramCommand, SessionCommand};
use super::handlers;
use crate::config::{self, process_env};
use crate::logging;
use anyhow::Result;
use jlog_index::Database;
use jlog_runtime::Config;

pub fn run(cli: Cli) -> Result<()> {
    logging::init(cli.log_level);

    let format = cli.format;
    let explicit = cli.config.as_deref();

    match cli.command {
        Commands::Init {
            log_root,
            archive_root,
            database,
            force,
        } => {
            let config_path = config::resolve_config_path(explicit, process_env)?;
            handlers::init::handle(
                &config_path,
                handlers::init::InitOptions {
                    log_root,
                    archive_root,
                    database,
                    force,
                },
                format,
            )
        }

        Commands::Check { file } => handlers::check::handle(&file, format),

        Commands::Ingest => {
            let config = config::load(explicit, process_env)?;
            let db = open_database(&config)?;
            handlers::ingest::handle(&db, &config, format)
        }

        Commands::Program { command } => {
            let config = config::load(explicit, process_env)?;
            let db = open_database(&config)?;

            match command {
                ProgramCommand::List => handlers::program::handle_list(&db, format),
            }
        }

        Commands::Session { command } => {
            let config = config::load(explicit, process_env)?;
            let db = open_database(&config)?;

            match command {
                SessionCommand::List { program } => {
                    handlers::session::handle_list(&db, program, format)
                }
                SessionCommand::Show { id } => handlers::session::handle_show(&db, id, format),
            }
        }
    }
}

fn open_database(config: &Config) -> Result<Database> {
    let path = config.database()?;
    tracing::debug!("opening database {}", path.display());
    Ok(Database::open(path)?)
}
