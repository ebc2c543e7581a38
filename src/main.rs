mod cli;

use anyhow::{Context, Result};
use clap::Parser;

use client_manager::config;
use client_manager::db::{self, Database};
use client_manager::demo;
use client_manager::DbError;
use client_manager::logging::init_logging;
use client_manager::models::{ClientChange, ClientLookup};

use crate::cli::{Cli, Command};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let mut config = config::init()?;
    if let Some(url) = cli.database_url {
        config = config.with_database_url(url);
    }
    init_logging(&config);

    // Initialize database connection
    let mut db = db::init(&config)
        .await
        .context("Failed to open the client database")?;

    let command = cli.command.unwrap_or(Command::Demo);
    let result = run_command(&mut db, command).await;

    // Release the connection whether or not the command succeeded
    let closed = db.close().await;

    if let Err(err) = result {
        eprintln!("Error: {}", describe_failure(&err));
        std::process::exit(1);
    }
    closed?;

    Ok(())
}

/// Duplicates are an expected outcome and were rolled back; anything else
/// gets the full error chain.
fn describe_failure(err: &anyhow::Error) -> String {
    match err.downcast_ref::<DbError>() {
        Some(db_err) if db_err.is_duplicate() => format!("{db_err}, nothing was written"),
        _ => format!("{err:#}"),
    }
}

fn delete_phone_message(client_id: i64, phone: i64, deleted: u64) -> String {
    if deleted == 0 {
        format!("The client with id {client_id} has no phone number {phone}")
    } else {
        format!("The phone number {phone} of the client with id {client_id} was deleted")
    }
}

async fn run_command(db: &mut Database, command: Command) -> Result<()> {
    match command {
        // Tables are created while connecting
        Command::Init => println!("Table created"),
        Command::AddClient {
            first_name,
            last_name,
            email,
        } => {
            let id = db.add_new_client(&first_name, &last_name, &email).await?;
            println!("New client with id {id} added");
        }
        Command::AddPhone { client_id, phone } => {
            db.add_number_phone(phone, client_id).await?;
            println!("New number phone client's with id {client_id} added");
        }
        Command::Change { client_id, field } => {
            let change = ClientChange::from(field);
            let rows = db.change_client(client_id, &change).await?;
            if rows == 0 {
                println!("Nothing changed for the client with id {client_id}");
            } else {
                println!("{} changed", change.field_name());
            }
        }
        Command::DeletePhone { client_id, phone } => {
            let deleted = db.delete_phone(client_id, phone).await?;
            println!("{}", delete_phone_message(client_id, phone, deleted));
        }
        Command::DeleteClient {
            client_id,
            first_name,
        } => {
            db.delete_client(client_id, &first_name).await?;
            println!("The client with id {client_id} and name {first_name} was deleted");
        }
        Command::Show { client_id } => {
            let client = db
                .get_client(client_id)
                .await?
                .with_context(|| format!("No client with id {client_id}"))?;
            println!(
                "{}: {} {} <{}>",
                client.client_id, client.first_name, client.last_name, client.email
            );
            for phone in db.client_phones(client_id).await? {
                println!("  {}", phone.number_phone);
            }
        }
        Command::Demo => {
            let outcome = demo::run(db).await?;
            println!(
                "Demo finished: client {} removed, client {} remains",
                outcome.removed_client, outcome.remaining_client
            );
        }
        Command::Find {
            first_name,
            last_name,
            email,
            phone,
        } => {
            let lookup = ClientLookup::from_fields(first_name, last_name, email, phone);
            let client_id = db.find_client(&lookup).await?;
            println!("{client_id}");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicates_are_reported_as_rolled_back() {
        let err = anyhow::Error::from(DbError::DuplicatePhone(sqlx::Error::RowNotFound));
        assert_eq!(
            describe_failure(&err),
            "This number phone already exists, nothing was written"
        );
    }

    #[test]
    fn other_failures_keep_their_context() {
        let err = anyhow::Error::from(DbError::NotFound).context("Failed to delete client");
        assert_eq!(
            describe_failure(&err),
            "Failed to delete client: No matching client found"
        );
    }

    #[test]
    fn deleting_a_missing_phone_says_so() {
        assert_eq!(
            delete_phone_message(1, 89002223322, 0),
            "The client with id 1 has no phone number 89002223322"
        );
        assert_eq!(
            delete_phone_message(1, 89002223322, 1),
            "The phone number 89002223322 of the client with id 1 was deleted"
        );
    }
}
