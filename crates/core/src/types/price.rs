//! Product price.

use core::fmt;

use rust_decimal::Decimal;
use serde::Serialize;

/// Error returned when a price is out of range.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("price must be greater than zero")]
pub struct PriceError;

/// A product price: a [`Decimal`] strictly greater than zero.
///
/// Decimal arithmetic avoids the float-rounding surprises of representing
/// money as `f64`. There is deliberately no `Deserialize` impl - request
/// payloads carry a raw `Decimal` and go through [`Price::parse`], so an
/// out-of-range value can never sneak in through serde.
///
/// ```
/// use bramble_core::Price;
/// use rust_decimal::Decimal;
///
/// assert!(Price::parse(Decimal::from(10)).is_ok());
/// assert!(Price::parse(Decimal::ZERO).is_err());
/// assert!(Price::parse(Decimal::from(-5)).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// Validate a raw decimal as a price.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError`] when the value is zero or negative.
    pub fn parse(value: Decimal) -> Result<Self, PriceError> {
        if value <= Decimal::ZERO {
            return Err(PriceError);
        }
        Ok(Self(value))
    }

    /// The underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for Price {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <Decimal as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <Decimal as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for Price {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let d = <Decimal as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        Ok(Self(d))
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for Price {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <Decimal as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.0, buf)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_boundaries() {
        assert!(Price::parse(Decimal::ZERO).is_err());
        assert!(Price::parse(Decimal::from(-5)).is_err());
        assert!(Price::parse(Decimal::from(10)).is_ok());
        // smallest positive value still passes
        assert!(Price::parse(Decimal::new(1, 2)).is_ok()); // 0.01
    }

    #[test]
    fn test_wire_decimal_accepts_numbers() {
        // Payloads deserialize the raw Decimal before Price::parse runs.
        let raw: Decimal = serde_json::from_str("10").unwrap();
        assert_eq!(Price::parse(raw).unwrap().amount(), Decimal::from(10));

        let raw: Decimal = serde_json::from_str("\"19.99\"").unwrap();
        assert_eq!(raw, Decimal::new(1999, 2));
    }
}
