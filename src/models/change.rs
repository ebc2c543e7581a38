/// A single-field update applied by `Database::change_client`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientChange {
    FirstName(String),
    LastName(String),
    Email(String),
    /// Replace one of the client's numbers, keyed by the number it currently has.
    Phone { current: i64, replacement: i64 },
}

impl ClientChange {
    /// Build a change from optional fields, accepting exactly one of them.
    ///
    /// Returns `None` when no field or more than one field is supplied, so a
    /// caller can never have a second value silently ignored.
    pub fn from_fields(
        first_name: Option<String>,
        last_name: Option<String>,
        email: Option<String>,
        phone: Option<(i64, i64)>,
    ) -> Option<Self> {
        match (first_name, last_name, email, phone) {
            (Some(value), None, None, None) => Some(Self::FirstName(value)),
            (None, Some(value), None, None) => Some(Self::LastName(value)),
            (None, None, Some(value), None) => Some(Self::Email(value)),
            (None, None, None, Some((current, replacement))) => {
                Some(Self::Phone { current, replacement })
            }
            _ => None,
        }
    }

    /// Human-readable name of the changed field.
    pub fn field_name(&self) -> &'static str {
        match self {
            Self::FirstName(_) => "First name",
            Self::LastName(_) => "Last name",
            Self::Email(_) => "Email",
            Self::Phone { .. } => "Number phone",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_field_is_accepted() {
        assert_eq!(
            ClientChange::from_fields(None, None, Some("kuzmin@example.com".into()), None),
            Some(ClientChange::Email("kuzmin@example.com".into()))
        );
        assert_eq!(
            ClientChange::from_fields(None, None, None, Some((1, 2))),
            Some(ClientChange::Phone { current: 1, replacement: 2 })
        );
    }

    #[test]
    fn several_fields_are_rejected() {
        let change = ClientChange::from_fields(Some("X".into()), Some("Y".into()), None, None);
        assert_eq!(change, None);
    }

    #[test]
    fn no_field_is_rejected() {
        assert_eq!(ClientChange::from_fields(None, None, None, None), None);
    }

    #[test]
    fn field_names() {
        assert_eq!(ClientChange::LastName("Levin".into()).field_name(), "Last name");
        assert_eq!(
            ClientChange::Phone { current: 1, replacement: 2 }.field_name(),
            "Number phone"
        );
    }
}
