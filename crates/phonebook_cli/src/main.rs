//! Command-line driver for the phonebook core.
//!
//! # Responsibility
//! - Forward one user intent per invocation to a phonebook session.
//! - Keep output line-oriented and deterministic for scripting.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use phonebook_core::{
    default_log_level, init_logging, resolve_db_path, AddContactError, ContactId,
    ContactListBody, PhonebookSession, SqliteKeyValueStorage, StorageContactRepository, UiIntent,
    DUPLICATE_NAME_MESSAGE,
};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "phonebook", version, about = "Add, list, filter and delete contacts")]
struct Cli {
    /// Storage database file.
    #[arg(long, global = true, env = "PHONEBOOK_DB_PATH")]
    db: Option<PathBuf>,

    /// Absolute directory for rolling log files; logging is off when unset.
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    /// trace|debug|info|warn|error; only meaningful with --log-dir.
    #[arg(long, global = true, requires = "log_dir")]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print core linkage info.
    Ping,
    /// Add a contact.
    Add { name: String, number: String },
    /// Delete a contact by id.
    Delete { id: String },
    /// List contacts, optionally filtered by name.
    List {
        #[arg(long, default_value = "")]
        filter: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(log_dir) = cli.log_dir.as_deref() {
        let level = cli
            .log_level
            .clone()
            .unwrap_or_else(|| default_log_level().to_string());
        init_logging(&level, &log_dir.to_string_lossy()).map_err(anyhow::Error::msg)?;
    }

    if let Command::Ping = cli.command {
        println!("phonebook_core ping={}", phonebook_core::ping());
        println!("phonebook_core version={}", phonebook_core::core_version());
        return Ok(());
    }

    let db_path = resolve_db_path(cli.db.as_deref());
    let storage = SqliteKeyValueStorage::open(&db_path)
        .with_context(|| format!("failed to open storage at `{}`", db_path.display()))?;
    let mut session = PhonebookSession::open(StorageContactRepository::new(storage));

    match cli.command {
        Command::Ping => {}
        Command::Add { name, number } => match session.submit_add_contact(name, number) {
            Ok(contact) => println!("added {}", contact.id()),
            Err(AddContactError::DuplicateName(name)) => {
                println!("warning: {name}: {DUPLICATE_NAME_MESSAGE}");
            }
            Err(err) => return Err(err).context("failed to add contact"),
        },
        Command::Delete { id } => {
            if session.delete_contact(&ContactId::from(id.as_str())) {
                println!("deleted {id}");
            } else {
                println!("no contact with id {id}");
            }
        }
        Command::List { filter } => {
            session.handle(UiIntent::TypeFilter { text: filter });
            match session.view().body {
                ContactListBody::Contacts(contacts) => {
                    for contact in contacts {
                        println!("{}\t{}\t{}", contact.id(), contact.name(), contact.number());
                    }
                }
                ContactListBody::Empty(message) => println!("{message}"),
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{Cli, Command};
    use clap::Parser;

    #[test]
    fn log_level_without_log_dir_is_rejected() {
        let err = Cli::try_parse_from(["phonebook", "--log-level", "debug", "ping"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn log_level_with_log_dir_parses() {
        let cli = Cli::try_parse_from([
            "phonebook",
            "--log-dir",
            "/tmp/phonebook-logs",
            "--log-level",
            "debug",
            "list",
            "--filter",
            "an",
        ])
        .unwrap();
        assert_eq!(cli.log_level.as_deref(), Some("debug"));
        assert!(matches!(cli.command, Command::List { filter } if filter == "an"));
    }
}
