/// Criteria for `Database::find_client`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientLookup {
    /// `LIKE` patterns for each column. All three must be present to match anything.
    ByDetails {
        first_name: Option<String>,
        last_name: Option<String>,
        email: Option<String>,
    },
    ByPhone(i64),
}

impl ClientLookup {
    /// A phone number takes precedence over name and email patterns.
    pub fn from_fields(
        first_name: Option<String>,
        last_name: Option<String>,
        email: Option<String>,
        phone: Option<i64>,
    ) -> Self {
        match phone {
            Some(number) => Self::ByPhone(number),
            None => Self::ByDetails {
                first_name,
                last_name,
                email,
            },
        }
    }

    pub fn details(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self::ByDetails {
            first_name: Some(first_name.into()),
            last_name: Some(last_name.into()),
            email: Some(email.into()),
        }
    }
}
