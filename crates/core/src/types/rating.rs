//! Product rating.

use core::fmt;

use serde::Serialize;

/// Error returned when a rating is out of range.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("rating must be a number between 1 and 5")]
pub struct RatingError;

/// A product rating: a finite number in `1.0..=5.0`, both ends inclusive.
///
/// Like [`Price`](crate::Price) there is no `Deserialize` impl; payloads
/// carry a raw `f64` and go through [`Rating::parse`], which also rejects
/// `NaN` and infinities.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct Rating(f64);

impl Rating {
    /// Lowest accepted rating.
    pub const MIN: f64 = 1.0;
    /// Highest accepted rating.
    pub const MAX: f64 = 5.0;

    /// Validate a raw number as a rating.
    ///
    /// # Errors
    ///
    /// Returns [`RatingError`] when the value is not finite or falls outside
    /// `1.0..=5.0`.
    pub fn parse(value: f64) -> Result<Self, RatingError> {
        if !value.is_finite() || !(Self::MIN..=Self::MAX).contains(&value) {
            return Err(RatingError);
        }
        Ok(Self(value))
    }

    /// The underlying value.
    #[must_use]
    pub const fn value(&self) -> f64 {
        self.0
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for Rating {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <f64 as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <f64 as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for Rating {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let v = <f64 as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        Ok(Self(v))
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for Rating {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <f64 as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.0, buf)
    }
}
