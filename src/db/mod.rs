mod schema;

use sqlx::any::{AnyArguments, install_default_drivers};
use sqlx::query::Query;
use sqlx::{Any, AnyConnection, Connection, Transaction};
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::{DbError, is_unique_violation};
use crate::models::{Client, ClientChange, ClientLookup, Phone};

pub use schema::Dialect;

pub type Result<T> = std::result::Result<T, DbError>;

/// A single database session shared by every operation
pub struct Database {
    conn: AnyConnection,
    dialect: Dialect,
}

impl Database {
    /// Open one connection to the configured database
    pub async fn connect(config: &Config) -> Result<Self> {
        let dialect = Dialect::from_url(config.database_url())?;
        install_default_drivers();

        let mut conn = AnyConnection::connect(config.database_url()).await?;
        if dialect == Dialect::Sqlite {
            // Match PostgreSQL, where LIKE is case-sensitive
            sqlx::query("PRAGMA case_sensitive_like = ON")
                .execute(&mut conn)
                .await?;
        }
        debug!(?dialect, "Database connection opened");

        Ok(Self { conn, dialect })
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// Close the connection, flushing any pending protocol messages
    pub async fn close(self) -> Result<()> {
        self.conn.close().await?;
        debug!("Database connection closed");
        Ok(())
    }

    // Schema
    pub async fn create_tables(&mut self) -> Result<()> {
        let mut tx = self.conn.begin().await?;

        for statement in self.dialect.create_table_statements() {
            sqlx::query(statement).execute(&mut *tx).await?;
        }

        tx.commit().await?;
        info!("Tables created");

        Ok(())
    }

    // Client operations
    pub async fn add_new_client(
        &mut self,
        first_name: &str,
        last_name: &str,
        email: &str,
    ) -> Result<i64> {
        let mut tx = self.conn.begin().await?;

        let inserted = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO client (first_name, last_name, email)
            VALUES ($1, $2, $3)
            RETURNING client_id
            "#,
        )
        .bind(first_name)
        .bind(last_name)
        .bind(email)
        .fetch_one(&mut *tx)
        .await;

        let client_id = commit_or_rollback(tx, inserted, DbError::DuplicateClient).await?;
        info!("New client with id {client_id} added");

        Ok(client_id)
    }

    pub async fn get_client(&mut self, client_id: i64) -> Result<Option<Client>> {
        let client = sqlx::query_as::<_, Client>(
            r#"
            SELECT client_id, first_name, last_name, email
            FROM client
            WHERE client_id = $1
            "#,
        )
        .bind(client_id)
        .fetch_optional(&mut self.conn)
        .await?;

        Ok(client)
    }

    /// Change exactly one field of a client, returning the number of rows updated.
    pub async fn change_client(&mut self, client_id: i64, change: &ClientChange) -> Result<u64> {
        let query: Query<'_, Any, AnyArguments<'_>> = match change {
            ClientChange::FirstName(value) => {
                sqlx::query("UPDATE client SET first_name = $1 WHERE client_id = $2")
                    .bind(value.as_str())
                    .bind(client_id)
            }
            ClientChange::LastName(value) => {
                sqlx::query("UPDATE client SET last_name = $1 WHERE client_id = $2")
                    .bind(value.as_str())
                    .bind(client_id)
            }
            ClientChange::Email(value) => {
                sqlx::query("UPDATE client SET email = $1 WHERE client_id = $2")
                    .bind(value.as_str())
                    .bind(client_id)
            }
            ClientChange::Phone { current, replacement } => sqlx::query(
                "UPDATE phone SET number_phone = $1 WHERE client_id = $2 AND number_phone = $3",
            )
            .bind(*replacement)
            .bind(client_id)
            .bind(*current),
        };

        let duplicate: fn(sqlx::Error) -> DbError = match change {
            ClientChange::Phone { .. } => DbError::DuplicatePhone,
            _ => DbError::DuplicateClient,
        };

        let mut tx = self.conn.begin().await?;
        let updated = query
            .execute(&mut *tx)
            .await
            .map(|result| result.rows_affected());
        let rows = commit_or_rollback(tx, updated, duplicate).await?;

        if rows == 0 {
            warn!(client_id, field = change.field_name(), "Nothing to change");
        } else {
            info!(client_id, "{} changed", change.field_name());
        }

        Ok(rows)
    }

    /// Delete a client and all of its phones.
    ///
    /// The client row must match both id and first name; otherwise nothing is
    /// deleted and `DbError::NotFound` is returned. Returns the number of
    /// phone rows removed.
    pub async fn delete_client(&mut self, client_id: i64, first_name: &str) -> Result<u64> {
        let mut tx = self.conn.begin().await?;

        // Phones reference the client, so they go first
        let phones = sqlx::query("DELETE FROM phone WHERE client_id = $1")
            .bind(client_id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        let clients = sqlx::query("DELETE FROM client WHERE client_id = $1 AND first_name = $2")
            .bind(client_id)
            .bind(first_name)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        if clients == 0 {
            tx.rollback().await?;
            warn!(client_id, first_name, "No client with this id and name");
            return Err(DbError::NotFound);
        }

        tx.commit().await?;
        info!(client_id, phones, "The client with id {client_id} and name {first_name} was deleted");

        Ok(phones)
    }

    /// Return the id of the first client matching the lookup.
    pub async fn find_client(&mut self, lookup: &ClientLookup) -> Result<i64> {
        let found = match lookup {
            ClientLookup::ByDetails {
                first_name: Some(first_name),
                last_name: Some(last_name),
                email: Some(email),
            } => {
                sqlx::query_scalar::<_, i64>(
                    r#"
                    SELECT client_id
                    FROM client
                    WHERE first_name LIKE $1 AND last_name LIKE $2 AND email LIKE $3
                    ORDER BY client_id
                    "#,
                )
                .bind(first_name.as_str())
                .bind(last_name.as_str())
                .bind(email.as_str())
                .fetch_optional(&mut self.conn)
                .await?
            }
            // A missing pattern never matches
            ClientLookup::ByDetails { .. } => None,
            ClientLookup::ByPhone(number) => {
                sqlx::query_scalar::<_, i64>(
                    "SELECT client_id FROM phone WHERE number_phone = $1 ORDER BY id",
                )
                .bind(*number)
                .fetch_optional(&mut self.conn)
                .await?
            }
        };

        debug!(?lookup, ?found, "Client lookup");
        found.ok_or(DbError::NotFound)
    }

    // Phone operations
    pub async fn add_number_phone(&mut self, phone: i64, client_id: i64) -> Result<i64> {
        let mut tx = self.conn.begin().await?;

        let inserted = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO phone (number_phone, client_id)
            VALUES ($1, $2)
            RETURNING id
            "#,
        )
        .bind(phone)
        .bind(client_id)
        .fetch_one(&mut *tx)
        .await;

        let id = commit_or_rollback(tx, inserted, DbError::DuplicatePhone).await?;
        info!(phone, "New number phone client's with id {client_id} added");

        Ok(id)
    }

    pub async fn client_phones(&mut self, client_id: i64) -> Result<Vec<Phone>> {
        let phones = sqlx::query_as::<_, Phone>(
            r#"
            SELECT id, number_phone, client_id
            FROM phone
            WHERE client_id = $1
            ORDER BY id ASC
            "#,
        )
        .bind(client_id)
        .fetch_all(&mut self.conn)
        .await?;

        Ok(phones)
    }

    pub async fn delete_phone(&mut self, client_id: i64, phone: i64) -> Result<u64> {
        let mut tx = self.conn.begin().await?;

        let deleted = sqlx::query("DELETE FROM phone WHERE client_id = $1 AND number_phone = $2")
            .bind(client_id)
            .bind(phone)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        tx.commit().await?;

        if deleted == 0 {
            warn!(client_id, phone, "No such phone number for this client");
        } else {
            info!("The phone number {phone} of the client with id {client_id} was deleted");
        }

        Ok(deleted)
    }
}

/// Commit on success. A unique-constraint violation rolls back and is
/// reported through `duplicate`; other errors drop the transaction, which
/// also rolls it back.
async fn commit_or_rollback<T>(
    tx: Transaction<'_, Any>,
    result: std::result::Result<T, sqlx::Error>,
    duplicate: fn(sqlx::Error) -> DbError,
) -> Result<T> {
    match result {
        Ok(value) => {
            tx.commit().await?;
            Ok(value)
        }
        Err(err) if is_unique_violation(&err) => {
            tx.rollback().await?;
            let err = duplicate(err);
            warn!(error = %err, "Rolled back");
            Err(err)
        }
        Err(err) => Err(err.into()),
    }
}

/// Connect to the database and make sure the schema exists
pub async fn init(config: &Config) -> Result<Database> {
    let mut db = Database::connect(config).await?;
    db.create_tables().await?;

    Ok(db)
}
