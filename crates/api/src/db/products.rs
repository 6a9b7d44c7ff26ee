//! Product repository for database operations.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};

use bramble_core::ProductId;

use super::{RepositoryError, map_unique_violation};
use crate::models::{NewProduct, Product, ProductFilter, ProductPatch};
use crate::services::products::ProductStore;

const PRODUCT_COLUMNS: &str = "id, product_image, product_name, category, description, price, \
                               ratings, is_free_delivery, created_at, updated_at";

/// Postgres-backed product store.
pub struct PgProducts<'a> {
    pool: &'a PgPool,
}

impl<'a> PgProducts<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }
}

/// Escape LIKE wildcards so a user-supplied needle matches literally.
fn escape_like(needle: &str) -> String {
    needle
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

#[async_trait]
impl ProductStore for PgProducts<'_> {
    async fn find(&self, filter: &ProductFilter) -> Result<Vec<Product>, RepositoryError> {
        let mut qb: QueryBuilder<'_, Postgres> =
            QueryBuilder::new(format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE TRUE"));

        if let Some(needle) = &filter.name_contains {
            qb.push(" AND product_name ILIKE ");
            qb.push_bind(format!("%{}%", escape_like(needle)));
        }
        if let Some(category) = filter.category {
            qb.push(" AND category = ");
            qb.push_bind(category);
        }
        if let Some(min) = filter.min_price {
            qb.push(" AND price >= ");
            qb.push_bind(min);
        }
        if let Some(max) = filter.max_price {
            qb.push(" AND price <= ");
            qb.push_bind(max);
        }
        if let Some(min) = filter.min_rating {
            qb.push(" AND ratings >= ");
            qb.push_bind(min);
        }
        if let Some(max) = filter.max_rating {
            qb.push(" AND ratings <= ");
            qb.push_bind(max);
        }
        if let Some(free) = filter.is_free_delivery {
            qb.push(" AND is_free_delivery = ");
            qb.push_bind(free);
        }

        qb.push(" ORDER BY id");

        let products = qb
            .build_query_as::<Product>()
            .fetch_all(self.pool)
            .await?;
        Ok(products)
    }

    async fn find_one_by_name(&self, name: &str) -> Result<Option<Product>, RepositoryError> {
        let product = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE product_name = $1"
        ))
        .bind(name)
        .fetch_optional(self.pool)
        .await?;
        Ok(product)
    }

    async fn find_by_id(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        let product = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;
        Ok(product)
    }

    async fn create(&self, new: NewProduct) -> Result<Product, RepositoryError> {
        sqlx::query_as::<_, Product>(&format!(
            "INSERT INTO products
                 (product_image, product_name, category, description, price, ratings, is_free_delivery)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {PRODUCT_COLUMNS}"
        ))
        .bind(&new.product_image)
        .bind(&new.product_name)
        .bind(new.category)
        .bind(&new.description)
        .bind(new.price)
        .bind(new.ratings)
        .bind(new.is_free_delivery)
        .fetch_one(self.pool)
        .await
        .map_err(|e| map_unique_violation(e, "Product name already exists"))
    }

    async fn find_by_id_and_update(
        &self,
        id: ProductId,
        patch: ProductPatch,
    ) -> Result<Option<Product>, RepositoryError> {
        sqlx::query_as::<_, Product>(&format!(
            "UPDATE products SET
                 product_image = COALESCE($2, product_image),
                 product_name = COALESCE($3, product_name),
                 category = COALESCE($4, category),
                 description = COALESCE($5, description),
                 price = COALESCE($6, price),
                 ratings = COALESCE($7, ratings),
                 is_free_delivery = COALESCE($8, is_free_delivery),
                 updated_at = NOW()
             WHERE id = $1
             RETURNING {PRODUCT_COLUMNS}"
        ))
        .bind(id)
        .bind(patch.product_image)
        .bind(patch.product_name)
        .bind(patch.category)
        .bind(patch.description)
        .bind(patch.price)
        .bind(patch.ratings)
        .bind(patch.is_free_delivery)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| map_unique_violation(e, "Product name already exists"))
    }

    async fn find_by_id_and_delete(
        &self,
        id: ProductId,
    ) -> Result<Option<Product>, RepositoryError> {
        let product = sqlx::query_as::<_, Product>(&format!(
            "DELETE FROM products WHERE id = $1 RETURNING {PRODUCT_COLUMNS}"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;
        Ok(product)
    }
}
