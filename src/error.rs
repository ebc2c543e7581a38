use thiserror::Error;

/// Errors returned by database operations.
#[derive(Debug, Error)]
pub enum DbError {
    #[error("This client already exists")]
    DuplicateClient(#[source] sqlx::Error),

    #[error("This number phone already exists")]
    DuplicatePhone(#[source] sqlx::Error),

    #[error("No matching client found")]
    NotFound,

    #[error("Unsupported database URL `{0}`; expected postgres:// or sqlite:")]
    UnsupportedDatabase(String),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

impl DbError {
    pub fn is_duplicate(&self) -> bool {
        matches!(self, Self::DuplicateClient(_) | Self::DuplicatePhone(_))
    }
}

/// True when the database rejected a statement because of a unique constraint.
pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .is_some_and(|db_err| db_err.is_unique_violation())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_messages_describe_the_condition() {
        let err = DbError::DuplicatePhone(sqlx::Error::RowNotFound);
        assert_eq!(err.to_string(), "This number phone already exists");
        assert!(err.is_duplicate());
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn non_database_errors_are_not_unique_violations() {
        assert!(!is_unique_violation(&sqlx::Error::RowNotFound));
        assert!(!DbError::NotFound.is_duplicate());
    }
}
