//! Product category.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Error returned when a string does not name a known category.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("category must be one of 'electronics', 'clothing', 'food', 'books' or 'furniture'")]
pub struct CategoryError;

/// The fixed set of product categories.
///
/// Client input is trimmed and lower-cased before matching, so
/// `"  Electronics "` and `"electronics"` are the same category. Stored and
/// serialized in lowercase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Electronics,
    Clothing,
    Food,
    Books,
    Furniture,
}

impl Category {
    /// The lowercase name of the category.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Electronics => "electronics",
            Self::Clothing => "clothing",
            Self::Food => "food",
            Self::Books => "books",
            Self::Furniture => "furniture",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = CategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "electronics" => Ok(Self::Electronics),
            "clothing" => Ok(Self::Clothing),
            "food" => Ok(Self::Food),
            "books" => Ok(Self::Books),
            "furniture" => Ok(Self::Furniture),
            _ => Err(CategoryError),
        }
    }
}

// Stored as TEXT; delegate to String at the sqlx layer.
#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for Category {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <String as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for Category {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s = <&str as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        Ok(s.parse::<Self>()?)
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for Category {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <&str as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.as_str(), buf)
    }
}
