//! Product domain types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use bramble_core::{Category, Price, ProductId, Rating};

/// A catalog product.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub product_image: String,
    pub product_name: String,
    pub category: Category,
    pub description: String,
    pub price: Price,
    pub ratings: Rating,
    pub is_free_delivery: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A validated product, ready to persist.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub product_image: String,
    pub product_name: String,
    pub category: Category,
    pub description: String,
    pub price: Price,
    pub ratings: Rating,
    pub is_free_delivery: bool,
}

/// A validated partial update. `None` fields retain their stored values.
#[derive(Debug, Clone, Default)]
pub struct ProductPatch {
    pub product_image: Option<String>,
    pub product_name: Option<String>,
    pub category: Option<Category>,
    pub description: Option<String>,
    pub price: Option<Price>,
    pub ratings: Option<Rating>,
    pub is_free_delivery: Option<bool>,
}

impl ProductPatch {
    /// True when no field is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.product_image.is_none()
            && self.product_name.is_none()
            && self.category.is_none()
            && self.description.is_none()
            && self.price.is_none()
            && self.ratings.is_none()
            && self.is_free_delivery.is_none()
    }
}

/// Raw product payload as received from the client. Shared by create and
/// update; create requires the fields, update treats presence as the
/// mutation signal.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductPayload {
    pub product_image: Option<String>,
    pub product_name: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub ratings: Option<f64>,
    pub is_free_delivery: Option<bool>,
}

impl ProductPayload {
    /// True when the client supplied no recognized field.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.product_image.is_none()
            && self.product_name.is_none()
            && self.category.is_none()
            && self.description.is_none()
            && self.price.is_none()
            && self.ratings.is_none()
            && self.is_free_delivery.is_none()
    }
}

/// A validated catalog filter for `find`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductFilter {
    /// Case-insensitive substring of the product name.
    pub name_contains: Option<String>,
    pub category: Option<Category>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub min_rating: Option<f64>,
    pub max_rating: Option<f64>,
    pub is_free_delivery: Option<bool>,
}

impl ProductFilter {
    /// True when no constraint is set (match everything).
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name_contains.is_none()
            && self.category.is_none()
            && self.min_price.is_none()
            && self.max_price.is_none()
            && self.min_rating.is_none()
            && self.max_rating.is_none()
            && self.is_free_delivery.is_none()
    }

    /// Whether a product matches every set constraint.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        if let Some(needle) = &self.name_contains
            && !product
                .product_name
                .to_lowercase()
                .contains(&needle.to_lowercase())
        {
            return false;
        }
        if let Some(category) = self.category
            && product.category != category
        {
            return false;
        }
        if let Some(min) = self.min_price
            && product.price.amount() < min
        {
            return false;
        }
        if let Some(max) = self.max_price
            && product.price.amount() > max
        {
            return false;
        }
        if let Some(min) = self.min_rating
            && product.ratings.value() < min
        {
            return false;
        }
        if let Some(max) = self.max_rating
            && product.ratings.value() > max
        {
            return false;
        }
        if let Some(free) = self.is_free_delivery
            && product.is_free_delivery != free
        {
            return false;
        }
        true
    }
}

/// Raw query-string parameters for `GET /getProductsByQuery`. Everything
/// arrives as text; the service parses and validates each bound.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductQueryParams {
    pub product_name: Option<String>,
    pub category: Option<String>,
    pub min_price: Option<String>,
    pub max_price: Option<String>,
    pub min_rating: Option<String>,
    pub max_rating: Option<String>,
    pub is_free_delivery: Option<String>,
}

impl ProductQueryParams {
    /// True when no query parameter was supplied.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.product_name.is_none()
            && self.category.is_none()
            && self.min_price.is_none()
            && self.max_price.is_none()
            && self.min_rating.is_none()
            && self.max_rating.is_none()
            && self.is_free_delivery.is_none()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use bramble_core::{Price, Rating};

    fn product(name: &str, category: Category, price: i64, rating: f64, free: bool) -> Product {
        Product {
            id: ProductId::new(1),
            product_image: "https://img.example.com/p.png".to_owned(),
            product_name: name.to_owned(),
            category,
            description: "d".to_owned(),
            price: Price::parse(Decimal::from(price)).unwrap(),
            ratings: Rating::parse(rating).unwrap(),
            is_free_delivery: free,
            created_at: DateTime::<Utc>::MIN_UTC,
            updated_at: DateTime::<Utc>::MIN_UTC,
        }
    }

    #[test]
    fn test_filter_name_is_case_insensitive_substring() {
        let p = product("Walnut Desk", Category::Furniture, 100, 4.0, false);
        let filter = ProductFilter {
            name_contains: Some("walnut".to_owned()),
            ..Default::default()
        };
        assert!(filter.matches(&p));

        let filter = ProductFilter {
            name_contains: Some("oak".to_owned()),
            ..Default::default()
        };
        assert!(!filter.matches(&p));
    }

    #[test]
    fn test_filter_bounds_are_inclusive() {
        let p = product("Lamp", Category::Furniture, 50, 3.0, true);
        let filter = ProductFilter {
            min_price: Some(Decimal::from(50)),
            max_price: Some(Decimal::from(50)),
            min_rating: Some(3.0),
            max_rating: Some(3.0),
            is_free_delivery: Some(true),
            ..Default::default()
        };
        assert!(filter.matches(&p));
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        let p = product("Anything", Category::Food, 5, 1.0, false);
        assert!(ProductFilter::default().matches(&p));
        assert!(ProductFilter::default().is_empty());
    }

    #[test]
    fn test_price_serializes_within_product() {
        let p = product("Lamp", Category::Furniture, 50, 3.0, true);
        let json = serde_json::to_value(&p).unwrap();
        assert_eq!(json["productName"], "Lamp");
        assert_eq!(json["category"], "furniture");
        assert_eq!(json["isFreeDelivery"], true);
    }
}
