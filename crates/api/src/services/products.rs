//! Product catalog controller.

use async_trait::async_trait;
use rust_decimal::Decimal;
use url::Url;

use bramble_core::{Category, Price, ProductId, Rating};

use crate::db::RepositoryError;
use crate::error::{ApiError, Result};
use crate::models::{
    NewProduct, Product, ProductFilter, ProductPatch, ProductPayload, ProductQueryParams,
};

/// The catalog collection, as seen by the controller.
#[async_trait]
pub trait ProductStore: Send + Sync {
    async fn find(
        &self,
        filter: &ProductFilter,
    ) -> std::result::Result<Vec<Product>, RepositoryError>;

    async fn find_one_by_name(
        &self,
        name: &str,
    ) -> std::result::Result<Option<Product>, RepositoryError>;

    async fn find_by_id(
        &self,
        id: ProductId,
    ) -> std::result::Result<Option<Product>, RepositoryError>;

    async fn create(&self, new: NewProduct) -> std::result::Result<Product, RepositoryError>;

    async fn find_by_id_and_update(
        &self,
        id: ProductId,
        patch: ProductPatch,
    ) -> std::result::Result<Option<Product>, RepositoryError>;

    async fn find_by_id_and_delete(
        &self,
        id: ProductId,
    ) -> std::result::Result<Option<Product>, RepositoryError>;
}

/// Catalog operations: create, list, query, read, partial update, delete.
pub struct ProductService<S> {
    store: S,
}

impl<S: ProductStore> ProductService<S> {
    /// Create a new product service over a store.
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    /// Add a product to the catalog.
    ///
    /// Every field except the free-delivery flag is required; validation
    /// short-circuits on the first failure. The duplicate-name lookup is a
    /// fast path - the store's unique index is the real guarantee.
    ///
    /// # Errors
    ///
    /// `Validation` for bad fields, `Conflict` for a duplicate name,
    /// `Repository` when the store fails.
    pub async fn create(&self, payload: ProductPayload) -> Result<Product> {
        if payload.is_empty() {
            return Err(ApiError::Validation("No data provided".to_owned()));
        }

        let product_image = parse_image(payload.product_image.as_deref())?;
        let product_name = parse_name(payload.product_name.as_deref())?;

        if self
            .store
            .find_one_by_name(&product_name)
            .await?
            .is_some()
        {
            return Err(ApiError::Conflict("Product already exists".to_owned()));
        }

        let category = parse_category(payload.category.as_deref())?;
        let description = parse_description(payload.description.as_deref())?;
        let price = parse_price(payload.price)?;
        let ratings = parse_ratings(payload.ratings)?;

        let product = self
            .store
            .create(NewProduct {
                product_image,
                product_name,
                category,
                description,
                price,
                ratings,
                is_free_delivery: payload.is_free_delivery.unwrap_or(false),
            })
            .await?;

        Ok(product)
    }

    /// List the whole catalog. An empty catalog is a successful, empty
    /// result - never an error.
    ///
    /// # Errors
    ///
    /// `Repository` when the store fails.
    pub async fn list(&self) -> Result<Vec<Product>> {
        Ok(self.store.find(&ProductFilter::default()).await?)
    }

    /// Fetch one product by its path id.
    ///
    /// # Errors
    ///
    /// `Validation` for a malformed id, `NotFound` when it does not resolve.
    pub async fn get(&self, raw_id: &str) -> Result<Product> {
        let id = parse_product_id(raw_id)?;
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApiError::NotFound("Product not found".to_owned()))
    }

    /// Filter the catalog by query parameters. At least one parameter is
    /// required; each supplied parameter is validated. No matches is a
    /// successful, empty result.
    ///
    /// # Errors
    ///
    /// `Validation` for missing/garbage parameters, `Repository` when the
    /// store fails.
    pub async fn query(&self, params: ProductQueryParams) -> Result<Vec<Product>> {
        if params.is_empty() {
            return Err(ApiError::Validation(
                "Please provide at least one query parameter".to_owned(),
            ));
        }

        let filter = build_filter(params)?;
        Ok(self.store.find(&filter).await?)
    }

    /// Partially update a product. Only fields present in the payload are
    /// validated and changed; the duplicate-name check runs only when the
    /// name actually differs from the stored one.
    ///
    /// # Errors
    ///
    /// `Validation`, `NotFound`, `Conflict`, or `Repository`.
    pub async fn update(&self, raw_id: &str, payload: ProductPayload) -> Result<Product> {
        let id = parse_product_id(raw_id)?;

        if payload.is_empty() {
            return Err(ApiError::Validation(
                "No data provided for update".to_owned(),
            ));
        }

        let existing = self
            .store
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApiError::NotFound("Product not found".to_owned()))?;

        let mut patch = ProductPatch::default();

        if let Some(raw) = payload.product_image.as_deref() {
            patch.product_image = Some(parse_image(Some(raw))?);
        }

        if let Some(raw) = payload.product_name.as_deref() {
            let name = parse_name(Some(raw))?;
            if name != existing.product_name {
                if self.store.find_one_by_name(&name).await?.is_some() {
                    return Err(ApiError::Conflict(
                        "Product name already exists".to_owned(),
                    ));
                }
                patch.product_name = Some(name);
            }
        }

        if let Some(raw) = payload.category.as_deref() {
            patch.category = Some(parse_category(Some(raw))?);
        }

        if let Some(raw) = payload.description.as_deref() {
            patch.description = Some(parse_description(Some(raw))?);
        }

        if let Some(raw) = payload.price {
            patch.price = Some(parse_price(Some(raw))?);
        }

        if let Some(raw) = payload.ratings {
            patch.ratings = Some(parse_ratings(Some(raw))?);
        }

        if let Some(flag) = payload.is_free_delivery {
            patch.is_free_delivery = Some(flag);
        }

        if patch.is_empty() {
            // Everything supplied already matches the stored record.
            return Ok(existing);
        }

        self.store
            .find_by_id_and_update(id, patch)
            .await?
            .ok_or_else(|| ApiError::NotFound("Product not found".to_owned()))
    }

    /// Delete a product. Existence is confirmed first so "not found" and
    /// "deleted" are distinguishable outcomes.
    ///
    /// # Errors
    ///
    /// `Validation` for a malformed id, `NotFound` when it does not resolve.
    pub async fn delete(&self, raw_id: &str) -> Result<Product> {
        let id = parse_product_id(raw_id)?;

        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApiError::NotFound("Product not found".to_owned()))?;

        self.store
            .find_by_id_and_delete(id)
            .await?
            .ok_or_else(|| ApiError::NotFound("Product not found".to_owned()))
    }
}

fn parse_product_id(raw: &str) -> Result<ProductId> {
    raw.parse()
        .map_err(|_| ApiError::Validation("Invalid product id".to_owned()))
}

fn parse_image(value: Option<&str>) -> Result<String> {
    let raw = value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ApiError::Validation("Valid product image URL is required".to_owned()))?;

    let url = Url::parse(raw)
        .map_err(|_| ApiError::Validation("Valid product image URL is required".to_owned()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ApiError::Validation(
            "Valid product image URL is required".to_owned(),
        ));
    }

    Ok(raw.to_owned())
}

fn parse_name(value: Option<&str>) -> Result<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
        .ok_or_else(|| ApiError::Validation("Product name is required".to_owned()))
}

fn parse_category(value: Option<&str>) -> Result<Category> {
    let raw = value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ApiError::Validation("Category is required".to_owned()))?;

    raw.parse()
        .map_err(|e: bramble_core::CategoryError| ApiError::Validation(e.to_string()))
}

fn parse_description(value: Option<&str>) -> Result<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
        .ok_or_else(|| ApiError::Validation("Description is required".to_owned()))
}

fn parse_price(value: Option<Decimal>) -> Result<Price> {
    let raw = value.ok_or_else(|| ApiError::Validation("Valid price is required".to_owned()))?;
    Price::parse(raw).map_err(|_| ApiError::Validation("Valid price is required".to_owned()))
}

fn parse_ratings(value: Option<f64>) -> Result<Rating> {
    let raw = value.ok_or_else(|| ApiError::Validation("Valid rating is required".to_owned()))?;
    Rating::parse(raw).map_err(|_| ApiError::Validation("Valid rating is required".to_owned()))
}

fn build_filter(params: ProductQueryParams) -> Result<ProductFilter> {
    let mut filter = ProductFilter::default();

    if let Some(raw) = params.product_name {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ApiError::Validation(
                "productName cannot be empty".to_owned(),
            ));
        }
        filter.name_contains = Some(trimmed.to_owned());
    }

    if let Some(raw) = params.category {
        filter.category = Some(
            raw.parse()
                .map_err(|e: bramble_core::CategoryError| ApiError::Validation(e.to_string()))?,
        );
    }

    filter.min_price = parse_decimal_param(params.min_price.as_deref(), "minPrice")?;
    filter.max_price = parse_decimal_param(params.max_price.as_deref(), "maxPrice")?;
    filter.min_rating = parse_number_param(params.min_rating.as_deref(), "minRating")?;
    filter.max_rating = parse_number_param(params.max_rating.as_deref(), "maxRating")?;

    if let Some(raw) = params.is_free_delivery {
        filter.is_free_delivery = Some(match raw.trim() {
            "true" => true,
            "false" => false,
            _ => {
                return Err(ApiError::Validation(
                    "Invalid value for isFreeDelivery. Use 'true' or 'false'".to_owned(),
                ));
            }
        });
    }

    Ok(filter)
}

fn parse_decimal_param(value: Option<&str>, name: &str) -> Result<Option<Decimal>> {
    match value {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ApiError::Validation(format!("{name} must be a number"))),
    }
}

fn parse_number_param(value: Option<&str>, name: &str) -> Result<Option<f64>> {
    match value {
        None => Ok(None),
        Some(raw) => match raw.trim().parse::<f64>() {
            Ok(v) if v.is_finite() => Ok(Some(v)),
            _ => Err(ApiError::Validation(format!("{name} must be a number"))),
        },
    }
}
