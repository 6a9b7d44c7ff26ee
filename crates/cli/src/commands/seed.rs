//! Catalog seeding command.

use sqlx::PgPool;

use super::{CommandError, database_url};

/// Sample catalog rows: (image, name, category, description, price, rating,
/// free delivery).
const SAMPLE_PRODUCTS: &[(&str, &str, &str, &str, &str, f64, bool)] = &[
    (
        "https://img.example.com/walnut-desk.jpg",
        "Walnut Desk",
        "furniture",
        "Solid walnut desk with cable tray",
        "329.99",
        4.5,
        false,
    ),
    (
        "https://img.example.com/noise-cancelling-headphones.jpg",
        "Noise Cancelling Headphones",
        "electronics",
        "Over-ear wireless headphones, 30h battery",
        "199.00",
        4.2,
        true,
    ),
    (
        "https://img.example.com/linen-shirt.jpg",
        "Linen Shirt",
        "clothing",
        "Relaxed-fit linen shirt",
        "49.90",
        3.8,
        true,
    ),
    (
        "https://img.example.com/espresso-beans.jpg",
        "Espresso Beans 1kg",
        "food",
        "Medium roast arabica blend",
        "18.50",
        4.7,
        false,
    ),
    (
        "https://img.example.com/rust-in-action.jpg",
        "Systems Programming Handbook",
        "books",
        "A practical tour of low-level programming",
        "39.99",
        4.9,
        true,
    ),
];

/// Insert the sample catalog, skipping products that already exist.
///
/// # Errors
///
/// Returns [`CommandError`] when the database is unreachable or an insert
/// fails.
pub async fn run() -> Result<(), CommandError> {
    let database_url = database_url()?;

    tracing::info!("Connecting to database...");
    let pool = PgPool::connect(&database_url).await?;

    let mut inserted = 0_u64;
    for &(image, name, category, description, price, rating, free_delivery) in SAMPLE_PRODUCTS {
        let result = sqlx::query(
            "INSERT INTO products
                 (product_image, product_name, category, description, price, ratings, is_free_delivery)
             VALUES ($1, $2, $3, $4, $5::numeric, $6, $7)
             ON CONFLICT (product_name) DO NOTHING",
        )
        .bind(image)
        .bind(name)
        .bind(category)
        .bind(description)
        .bind(price)
        .bind(rating)
        .bind(free_delivery)
        .execute(&pool)
        .await?;
        inserted += result.rows_affected();
    }

    tracing::info!("Seeded {inserted} products");
    Ok(())
}
