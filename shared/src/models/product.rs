//! Product Model

use crate::error::{AppError, ErrorCode};
use crate::money::check_price;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub type ProductId = i64;

/// Product entity (validated)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub image_url: String,
    pub category: String,
    pub stock: i32,
    pub featured: bool,
    pub is_best_seller: bool,
    /// "men" | "women" | "unisex", when the catalog tracks it
    pub gender: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

/// Product row as returned by the backend
///
/// Every column is optional: rows are checked by `TryFrom<ProductRow> for Product`
/// before anything downstream sees them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductRow {
    pub id: Option<ProductId>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub image_url: Option<String>,
    pub category: Option<String>,
    pub stock: Option<i64>,
    pub featured: Option<bool>,
    #[serde(default, alias = "Is_best_seller")]
    pub is_best_seller: Option<bool>,
    #[serde(default, alias = "Gender")]
    pub gender: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

impl TryFrom<ProductRow> for Product {
    type Error = AppError;

    fn try_from(row: ProductRow) -> Result<Self, Self::Error> {
        let id = row.id.ok_or_else(|| {
            AppError::with_message(ErrorCode::ProductInvalidRow, "product row has no id")
        })?;
        let name = row
            .name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .ok_or_else(|| {
                AppError::with_message(ErrorCode::ProductInvalidRow, "product row has no name")
                    .with_detail("id", id)
            })?;
        let price = row.price.ok_or_else(|| {
            AppError::with_message(ErrorCode::ProductInvalidRow, "product row has no price")
                .with_detail("id", id)
        })?;
        let price = check_price(price).map_err(|msg| {
            AppError::with_message(ErrorCode::ProductInvalidPrice, msg).with_detail("id", id)
        })?;
        let stock = i32::try_from(row.stock.unwrap_or_default())
            .ok()
            .filter(|s| *s >= 0)
            .ok_or_else(|| {
                AppError::with_message(ErrorCode::ProductInvalidRow, "stock out of range")
                    .with_detail("id", id)
            })?;

        Ok(Product {
            id,
            name,
            description: row.description.unwrap_or_default(),
            price,
            image_url: row.image_url.unwrap_or_default(),
            category: row.category.unwrap_or_default(),
            stock,
            featured: row.featured.unwrap_or(false),
            is_best_seller: row.is_best_seller.unwrap_or(false),
            gender: row.gender.map(|g| g.to_lowercase()),
            created_at: row.created_at,
        })
    }
}

/// Create product payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductCreate {
    pub name: String,
    pub description: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub image_url: String,
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub featured: Option<bool>,
}

/// Update product payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::float_option"
    )]
    pub price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub featured: Option<bool>,
}

impl ProductUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.price.is_none()
            && self.image_url.is_none()
            && self.category.is_none()
            && self.stock.is_none()
            && self.featured.is_none()
    }
}
