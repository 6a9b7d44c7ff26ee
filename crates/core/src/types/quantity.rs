//! Cart line quantity.

use core::fmt;

use serde::Serialize;

/// Error returned when a quantity is not a positive integer.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("quantity must be a positive whole number")]
pub struct QuantityError;

/// A cart line quantity, always at least 1.
///
/// A line that would drop to zero is removed rather than stored, so a
/// stored quantity of zero cannot exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Quantity(i32);

impl Quantity {
    /// A quantity of one, the default for "add to cart".
    pub const ONE: Self = Self(1);

    /// Validate a raw integer as a quantity.
    ///
    /// # Errors
    ///
    /// Returns [`QuantityError`] when the value is zero or negative.
    pub const fn parse(value: i32) -> Result<Self, QuantityError> {
        if value < 1 {
            return Err(QuantityError);
        }
        Ok(Self(value))
    }

    /// The underlying count.
    #[must_use]
    pub const fn get(&self) -> i32 {
        self.0
    }

    /// Add another quantity, saturating at `i32::MAX`.
    #[must_use]
    pub const fn saturating_add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for Quantity {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <i32 as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <i32 as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for Quantity {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let v = <i32 as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        Ok(Self(v))
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for Quantity {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <i32 as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.0, buf)
    }
}
