//! Catalog Module
//!
//! Read side of the product table: listings, featured products, category
//! routes and single product lookups. Rows are validated into [`Product`]s
//! here; rows that fail validation are logged and skipped.

mod page;
mod query;

pub use page::{DEFAULT_PAGE_SIZE, Page};
pub use query::{ALL_CATEGORIES, CategoryPreset, ProductQuery, SortOrder};

use crate::backend::{Backend, ProductFilter};
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{Product, ProductId, ProductRow};
use std::sync::Arc;

/// Number of products on the home page strip
pub const FEATURED_LIMIT: usize = 4;

#[derive(Clone)]
pub struct CatalogService {
    backend: Arc<dyn Backend>,
    page_size: usize,
}

impl CatalogService {
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self {
            backend,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// All products matching `query`
    pub async fn browse(&self, query: &ProductQuery) -> AppResult<Vec<Product>> {
        let rows = self.backend.list_products(&query.backend_filter()).await?;
        let products = validate_rows(rows);
        Ok(query.apply(products))
    }

    /// One page of [`CatalogService::browse`]
    pub async fn browse_page(&self, query: &ProductQuery, page: usize) -> AppResult<Page<Product>> {
        let products = self.browse(query).await?;
        Ok(Page::paginate(products, page, self.page_size))
    }

    /// Featured products, newest first
    pub async fn featured(&self, limit: usize) -> AppResult<Vec<Product>> {
        let filter = ProductFilter {
            featured: Some(true),
            limit: Some(limit),
            ..Default::default()
        };
        let rows = self.backend.list_products(&filter).await?;
        Ok(validate_rows(rows))
    }

    pub async fn product(&self, id: ProductId) -> AppResult<Product> {
        let row = self.backend.get_product(id).await?.ok_or_else(|| {
            AppError::new(ErrorCode::ProductNotFound).with_detail("id", id)
        })?;
        Product::try_from(row)
    }

    /// Products behind a category route such as `best-selling`
    pub async fn category(&self, slug: &str, page: usize) -> AppResult<Page<Product>> {
        let preset = CategoryPreset::from_slug(slug).ok_or_else(|| {
            AppError::with_message(ErrorCode::NotFound, format!("Unknown category: {}", slug))
                .with_detail("category", slug)
        })?;
        self.browse_page(&preset.query(), page).await
    }

    /// Distinct category names, sorted, for the shop filter bar
    pub async fn categories(&self) -> AppResult<Vec<String>> {
        let products = self.browse(&ProductQuery::new()).await?;
        let mut names: Vec<String> = products
            .into_iter()
            .map(|p| p.category)
            .filter(|c| !c.is_empty())
            .collect();
        names.sort_by_key(|c| c.to_lowercase());
        names.dedup_by(|a, b| a.eq_ignore_ascii_case(b));
        Ok(names)
    }
}

fn validate_rows(rows: Vec<ProductRow>) -> Vec<Product> {
    rows.into_iter()
        .filter_map(|row| {
            let id = row.id;
            match Product::try_from(row) {
                Ok(product) => Some(product),
                Err(e) => {
                    tracing::warn!(product_id = ?id, error = %e, "Skipping invalid product row");
                    None
                }
            }
        })
        .collect()
}
