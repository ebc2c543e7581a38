//! Scripted walkthrough of every record operation.

use tracing::info;

use crate::db::{Database, Result};
use crate::models::{ClientChange, ClientLookup};

pub const FIRST_CLIENT: (&str, &str, &str) = ("Alexey", "Kuzmin", "kuz@example.com");
pub const SECOND_CLIENT: (&str, &str, &str) = ("Leo", "Levin", "lenin@examle.com");
pub const FIRST_PHONE: i64 = 89002223322;
pub const SECOND_PHONE: i64 = 83520451213;
pub const NEW_EMAIL: &str = "kuzmin@example.com";

/// Ids produced by a demo run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DemoOutcome {
    /// Created, then deleted
    pub removed_client: i64,
    /// Still present, found again through its phone number
    pub remaining_client: i64,
}

/// Create the schema, then add, change, delete and finally look up clients.
pub async fn run(db: &mut Database) -> Result<DemoOutcome> {
    db.create_tables().await?;

    let (first_name, last_name, email) = FIRST_CLIENT;
    let alexey = db.add_new_client(first_name, last_name, email).await?;
    let (first_name, last_name, email) = SECOND_CLIENT;
    let leo = db.add_new_client(first_name, last_name, email).await?;

    db.add_number_phone(FIRST_PHONE, alexey).await?;
    db.add_number_phone(SECOND_PHONE, leo).await?;

    db.change_client(alexey, &ClientChange::Email(NEW_EMAIL.to_string()))
        .await?;
    db.delete_phone(alexey, FIRST_PHONE).await?;
    db.delete_client(alexey, FIRST_CLIENT.0).await?;

    let found = db.find_client(&ClientLookup::ByPhone(SECOND_PHONE)).await?;
    info!("Client with phone {SECOND_PHONE} has id {found}");

    Ok(DemoOutcome {
        removed_client: alexey,
        remaining_client: found,
    })
}
