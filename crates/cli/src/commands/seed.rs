//! Seed the database with demo catalog and coupon data.
//!
//! Intended for local development: gives the storefront something to list
//! and a couple of coupons to exercise the checkout pipeline with. The
//! command is a no-op when products already exist.

use chrono::{Duration, Utc};
use rust_decimal::Decimal;
use secrecy::{ExposeSecret, SecretString};
use sqlx::PgPool;
use tracing::info;

/// Errors that can occur while seeding.
#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Demo products per category: (name, description, price in cents, stock).
const PRODUCTS: &[(&str, &[(&str, &str, i64, i32)])] = &[
    (
        "Kitchen",
        &[
            ("Ceramic mug", "A 350ml stoneware mug.", 1299, 40),
            ("Chef's knife", "20cm forged steel blade.", 6450, 12),
            ("Cutting board", "End-grain walnut board.", 3900, 18),
        ],
    ),
    (
        "Stationery",
        &[
            ("Field notebook", "A6 dot-grid, 64 pages.", 750, 120),
            ("Fountain pen", "Fine nib, converter included.", 2825, 25),
        ],
    ),
    (
        "Plants",
        &[("Monstera", "Potted, roughly 40cm tall.", 2199, 7)],
    ),
];

/// Seed demo data.
///
/// # Errors
///
/// Returns `SeedError` if the database URL is missing or a query fails.
pub async fn run() -> Result<(), SeedError> {
    dotenvy::dotenv().ok();

    let database_url = std::env::var("ORCHARD_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map(SecretString::from)
        .map_err(|_| SeedError::MissingEnvVar("ORCHARD_DATABASE_URL"))?;

    let pool = PgPool::connect(database_url.expose_secret()).await?;

    let (has_products,): (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM product)")
        .fetch_one(&pool)
        .await?;
    if has_products {
        info!("Products already present, nothing to seed");
        return Ok(());
    }

    for &(category, products) in PRODUCTS {
        let (category_id,): (i32,) = sqlx::query_as(
            "INSERT INTO category (name) VALUES ($1) \
             ON CONFLICT (name) DO UPDATE SET name = EXCLUDED.name \
             RETURNING id",
        )
        .bind(category)
        .fetch_one(&pool)
        .await?;

        for &(name, description, price_cents, stock) in products {
            sqlx::query(
                "INSERT INTO product (name, description, price, stock, category_id) \
                 VALUES ($1, $2, $3, $4, $5)",
            )
            .bind(name)
            .bind(description)
            .bind(Decimal::new(price_cents, 2))
            .bind(stock)
            .bind(category_id)
            .execute(&pool)
            .await?;
        }

        info!(category, count = products.len(), "seeded category");
    }

    seed_coupons(&pool).await?;

    info!("Seeding complete");
    Ok(())
}

async fn seed_coupons(pool: &PgPool) -> Result<(), SeedError> {
    let now = Utc::now();

    sqlx::query(
        "INSERT INTO coupon (code, discount_type, discount_value, valid_from, valid_to) \
         VALUES ($1, 'percent', $2, $3, $4) \
         ON CONFLICT (code) DO NOTHING",
    )
    .bind("WELCOME10")
    .bind(Decimal::new(1000, 2))
    .bind(now - Duration::days(1))
    .bind(now + Duration::days(180))
    .execute(pool)
    .await?;

    sqlx::query(
        "INSERT INTO coupon \
             (code, discount_type, discount_value, valid_from, valid_to, usage_limit) \
         VALUES ($1, 'fixed', $2, $3, $4, $5) \
         ON CONFLICT (code) DO NOTHING",
    )
    .bind("TAKE20")
    .bind(Decimal::new(2000, 2))
    .bind(now - Duration::days(1))
    .bind(now + Duration::days(30))
    .bind(100)
    .execute(pool)
    .await?;

    info!("seeded coupons");
    Ok(())
}
