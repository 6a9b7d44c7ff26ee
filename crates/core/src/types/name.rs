//! Person name type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Error returned when parsing a [`PersonName`] fails.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PersonNameError {
    /// The input string is empty or whitespace-only.
    #[error("name cannot be empty")]
    Empty,
    /// The input contains characters other than letters and spaces.
    #[error("name may only contain letters and spaces")]
    InvalidCharacters,
}

/// A person's display name: ASCII letters and spaces, non-empty after trim.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct PersonName(String);

impl PersonName {
    /// Parse a `PersonName` from a string. The input is trimmed first.
    ///
    /// # Errors
    ///
    /// Returns [`PersonNameError`] when the input is empty or contains
    /// anything other than letters and spaces.
    pub fn parse(s: &str) -> Result<Self, PersonNameError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(PersonNameError::Empty);
        }
        if !s.chars().all(|c| c.is_ascii_alphabetic() || c == ' ') {
            return Err(PersonNameError::InvalidCharacters);
        }
        Ok(Self(s.to_owned()))
    }

    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PersonName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for PersonName {
    type Err = PersonNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

// SQLx support (with postgres feature)
#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for PersonName {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <String as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for PersonName {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s = <String as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        Ok(Self(s))
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for PersonName {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <String as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.0, buf)
    }
}
