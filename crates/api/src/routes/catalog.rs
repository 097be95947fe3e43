//! Catalog route handlers.

use axum::{
    Json,
    extract::{Path, State},
};
use rust_decimal::Decimal;
use serde::Serialize;

use orchard_core::{CategoryId, ProductId};

use crate::config::ApiConfig;
use crate::db::catalog::CatalogRepository;
use crate::error::{AppError, Result};
use crate::models::catalog::{Category, Product};
use crate::state::AppState;

// =============================================================================
// Response Types
// =============================================================================

/// One category with its product summaries.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryListing {
    pub id: CategoryId,
    pub name: String,
    pub products: Vec<ProductSummary>,
}

/// A product as shown in the storefront listing.
#[derive(Debug, Clone, Serialize)]
pub struct ProductSummary {
    pub id: ProductId,
    pub name: String,
    pub price: Decimal,
    pub image: Option<String>,
}

/// A product detail page.
#[derive(Debug, Serialize)]
pub struct ProductDetail {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub stock: i32,
    pub image: Option<String>,
}

// =============================================================================
// Handlers
// =============================================================================

/// All categories with their products, as bare JSON array.
///
/// GET /categories-and-products
///
/// The response is cached briefly; catalog writes happen outside this API.
pub async fn categories_and_products(
    State(state): State<AppState>,
) -> Result<Json<Vec<CategoryListing>>> {
    if let Some(cached) = state.catalog_cache().get(&()).await {
        return Ok(Json(cached));
    }

    let repo = CatalogRepository::new(state.pool());
    let categories = repo.categories().await.map_err(AppError::Database)?;
    let products = repo
        .categorized_products()
        .await
        .map_err(AppError::Database)?;

    let listing = build_listing(state.config(), categories, products);
    state.catalog_cache().insert((), listing.clone()).await;

    Ok(Json(listing))
}

/// Product detail by ID.
///
/// GET /product/{id}
pub async fn product(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ProductDetail>> {
    let repo = CatalogRepository::new(state.pool());

    let product = repo
        .get(ProductId::new(id))
        .await
        .map_err(AppError::Database)?
        .ok_or_else(|| AppError::NotFound("Product not found".to_owned()))?;

    let image = product
        .image
        .as_deref()
        .map(|path| state.config().media_url(path));

    Ok(Json(ProductDetail {
        id: product.id,
        name: product.name,
        description: product.description,
        price: product.price,
        stock: product.stock,
        image,
    }))
}

/// Group categorized products under their categories, in category order.
/// Categories without products still appear, with an empty list.
fn build_listing(
    config: &ApiConfig,
    categories: Vec<Category>,
    products: Vec<Product>,
) -> Vec<CategoryListing> {
    let mut listing: Vec<CategoryListing> = categories
        .into_iter()
        .map(|c| CategoryListing {
            id: c.id,
            name: c.name,
            products: Vec::new(),
        })
        .collect();

    for product in products {
        let Some(category_id) = product.category_id else {
            continue;
        };
        if let Some(entry) = listing.iter_mut().find(|c| c.id == category_id) {
            entry.products.push(ProductSummary {
                id: product.id,
                name: product.name,
                price: product.price,
                image: product.image.as_deref().map(|path| config.media_url(path)),
            });
        }
    }

    listing
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use secrecy::SecretString;
    use std::path::PathBuf;

    fn config() -> ApiConfig {
        ApiConfig {
            database_url: SecretString::from("postgres://localhost/test"),
            host: "127.0.0.1".parse().unwrap(),
            port: 8000,
            base_url: "http://localhost:8000".to_string(),
            media_dir: PathBuf::from("media"),
            token_ttl_hours: 24,
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 0.0,
        }
    }

    fn product_in(category_id: Option<CategoryId>, id: i32, image: Option<&str>) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Product {id}"),
            description: "A product".to_owned(),
            price: "10.00".parse().unwrap(),
            stock: 5,
            category_id,
            image: image.map(str::to_owned),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_products_grouped_under_their_categories() {
        let categories = vec![
            Category {
                id: CategoryId::new(1),
                name: "Mugs".to_owned(),
            },
            Category {
                id: CategoryId::new(2),
                name: "Plates".to_owned(),
            },
        ];
        let products = vec![
            product_in(Some(CategoryId::new(1)), 10, None),
            product_in(Some(CategoryId::new(2)), 11, None),
            product_in(Some(CategoryId::new(1)), 12, None),
        ];

        let listing = build_listing(&config(), categories, products);

        assert_eq!(listing.len(), 2);
        assert_eq!(listing[0].products.len(), 2);
        assert_eq!(listing[1].products.len(), 1);
    }

    #[test]
    fn test_empty_categories_are_listed() {
        let categories = vec![Category {
            id: CategoryId::new(1),
            name: "Empty".to_owned(),
        }];

        let listing = build_listing(&config(), categories, vec![]);

        assert_eq!(listing.len(), 1);
        assert!(listing[0].products.is_empty());
    }

    #[test]
    fn test_image_paths_become_absolute_urls() {
        let categories = vec![Category {
            id: CategoryId::new(1),
            name: "Mugs".to_owned(),
        }];
        let products = vec![product_in(
            Some(CategoryId::new(1)),
            10,
            Some("products/mug.png"),
        )];

        let listing = build_listing(&config(), categories, products);

        assert_eq!(
            listing[0].products[0].image.as_deref(),
            Some("http://localhost:8000/media/products/mug.png")
        );
    }
}
