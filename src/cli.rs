use clap::{Parser, Subcommand};

use client_manager::models::ClientChange;

/// Manage clients and their phone numbers
#[derive(Debug, Parser)]
#[command(name = "client-manager", version)]
pub struct Cli {
    /// Overrides DATABASE_URL
    #[arg(long, global = true)]
    pub database_url: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create the client and phone tables if they are missing
    Init,
    /// Add a client and print its id
    AddClient {
        first_name: String,
        last_name: String,
        email: String,
    },
    /// Attach a phone number to a client
    AddPhone { client_id: i64, phone: i64 },
    /// Change one field of a client
    Change {
        client_id: i64,
        #[command(subcommand)]
        field: FieldChange,
    },
    /// Remove one phone number from a client
    DeletePhone { client_id: i64, phone: i64 },
    /// Remove a client together with its phone numbers
    DeleteClient { client_id: i64, first_name: String },
    /// Print the id of the first matching client
    Find {
        /// LIKE pattern, e.g. "Alex%"
        #[arg(long)]
        first_name: Option<String>,
        #[arg(long)]
        last_name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        phone: Option<i64>,
    },
    /// Print a client and its phone numbers
    Show { client_id: i64 },
    /// Run the scripted walkthrough (default)
    Demo,
}

#[derive(Debug, Subcommand)]
pub enum FieldChange {
    FirstName { value: String },
    LastName { value: String },
    Email { value: String },
    Phone { current: i64, replacement: i64 },
}

impl From<FieldChange> for ClientChange {
    fn from(field: FieldChange) -> Self {
        match field {
            FieldChange::FirstName { value } => Self::FirstName(value),
            FieldChange::LastName { value } => Self::LastName(value),
            FieldChange::Email { value } => Self::Email(value),
            FieldChange::Phone {
                current,
                replacement,
            } => Self::Phone {
                current,
                replacement,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use client_manager::models::ClientLookup;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("client-manager").chain(args.iter().copied())).unwrap()
    }

    fn lookup(cli: Cli) -> ClientLookup {
        let Some(Command::Find {
            first_name,
            last_name,
            email,
            phone,
        }) = cli.command
        else {
            panic!("expected find command");
        };
        ClientLookup::from_fields(first_name, last_name, email, phone)
    }

    #[test]
    fn no_subcommand_means_demo() {
        let cli = parse(&[]);
        assert!(cli.command.is_none());
        assert!(cli.database_url.is_none());
    }

    #[test]
    fn database_url_flag_is_global() {
        let cli = parse(&["init", "--database-url", "sqlite::memory:"]);
        assert_eq!(cli.database_url.as_deref(), Some("sqlite::memory:"));
        assert!(matches!(cli.command, Some(Command::Init)));
    }

    #[test]
    fn change_takes_exactly_one_field() {
        let cli = parse(&["change", "1", "email", "kuzmin@example.com"]);
        let Some(Command::Change { client_id, field }) = cli.command else {
            panic!("expected change command");
        };
        assert_eq!(client_id, 1);
        assert_eq!(
            ClientChange::from(field),
            ClientChange::Email("kuzmin@example.com".to_string())
        );
    }

    #[test]
    fn change_phone_needs_current_and_replacement() {
        let cli = parse(&["change", "2", "phone", "83520451213", "83520451214"]);
        let Some(Command::Change { field, .. }) = cli.command else {
            panic!("expected change command");
        };
        assert_eq!(
            ClientChange::from(field),
            ClientChange::Phone {
                current: 83520451213,
                replacement: 83520451214
            }
        );

        let missing = Cli::try_parse_from(["client-manager", "change", "2", "phone", "1"]);
        assert!(missing.is_err());
    }

    #[test]
    fn find_by_phone_or_details() {
        let cli = parse(&["find", "--phone", "83520451213"]);
        assert_eq!(lookup(cli), ClientLookup::ByPhone(83520451213));

        let cli = parse(&[
            "find",
            "--first-name",
            "Leo",
            "--last-name",
            "Lev%",
            "--email",
            "%@examle.com",
        ]);
        assert_eq!(lookup(cli), ClientLookup::details("Leo", "Lev%", "%@examle.com"));
    }

    #[test]
    fn phone_numbers_must_be_integers() {
        let result = Cli::try_parse_from(["client-manager", "add-phone", "1", "not-a-number"]);
        assert!(result.is_err());
    }
}
