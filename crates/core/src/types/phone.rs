//! Phone number type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Error returned when parsing a [`Phone`] fails.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PhoneError {
    /// The input string is empty or whitespace-only.
    #[error("phone number cannot be empty")]
    Empty,
    /// The input is not a valid mobile number.
    #[error("phone number is not a valid mobile number")]
    Invalid,
}

/// A validated Indian mobile number, stored in canonical 10-digit form.
///
/// Accepts an optional `+91` / `91` / `0` prefix and tolerates spaces and
/// dashes between digit groups. The subscriber number must be 10 digits and
/// start with 6-9.
///
/// ```
/// use bramble_core::Phone;
///
/// assert_eq!(Phone::parse("+91 98765 43210").unwrap().as_str(), "9876543210");
/// assert_eq!(Phone::parse("098765-43210").unwrap().as_str(), "9876543210");
/// assert!(Phone::parse("12345").is_err());
/// assert!(Phone::parse("5876543210").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Phone(String);

impl Phone {
    /// Parse a `Phone` from a string, normalizing to the bare 10 digits.
    ///
    /// # Errors
    ///
    /// Returns [`PhoneError`] when the input is empty or not a valid mobile
    /// number.
    pub fn parse(s: &str) -> Result<Self, PhoneError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(PhoneError::Empty);
        }

        let mut digits: String = trimmed
            .chars()
            .filter(|c| !matches!(c, ' ' | '-'))
            .collect();

        // Country prefix: +91 / 91 / leading 0
        if let Some(rest) = digits.strip_prefix("+91") {
            digits = rest.to_owned();
        } else if digits.len() == 12 && digits.starts_with("91") {
            digits = digits[2..].to_owned();
        } else if digits.len() == 11 && digits.starts_with('0') {
            digits = digits[1..].to_owned();
        }

        if digits.len() != 10 || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(PhoneError::Invalid);
        }

        if !matches!(digits.as_bytes()[0], b'6'..=b'9') {
            return Err(PhoneError::Invalid);
        }

        Ok(Self(digits))
    }

    /// Returns the canonical 10-digit number.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Phone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Phone {
    type Err = PhoneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

// SQLx support (with postgres feature)
#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for Phone {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <String as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for Phone {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s = <String as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        Ok(Self(s))
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for Phone {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <String as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.0, buf)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_ten_digits() {
        assert_eq!(Phone::parse("9876543210").unwrap().as_str(), "9876543210");
        assert_eq!(Phone::parse("6000000000").unwrap().as_str(), "6000000000");
    }

    #[test]
    fn test_prefixes_normalized() {
        for input in [
            "+919876543210",
            "919876543210",
            "09876543210",
            "+91 98765 43210",
            "98765-43210",
        ] {
            assert_eq!(Phone::parse(input).unwrap().as_str(), "9876543210", "{input}");
        }
    }

    #[test]
    fn test_invalid() {
        assert_eq!(Phone::parse(""), Err(PhoneError::Empty));
        assert_eq!(Phone::parse("  "), Err(PhoneError::Empty));
        assert_eq!(Phone::parse("12345"), Err(PhoneError::Invalid));
        // first digit must be 6-9
        assert_eq!(Phone::parse("5876543210"), Err(PhoneError::Invalid));
        assert_eq!(Phone::parse("98765432101"), Err(PhoneError::Invalid));
        assert_eq!(Phone::parse("98765abc10"), Err(PhoneError::Invalid));
    }
}
