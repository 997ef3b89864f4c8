//! Admin catalog management
//!
//! An [`AdminService`] only exists for a session the backend lists in
//! `admin_users`; holding one is the permission check. Every mutation is
//! written to the audit log.

use crate::audit_log;
use crate::backend::{Backend, ProductFilter};
use crate::cart::validation::validate_unit_price;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, MAX_URL_LEN, validate_max_len, validate_required_text,
};
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{Product, ProductCreate, ProductId, ProductRow, ProductUpdate, Session};
use std::sync::Arc;

pub struct AdminService {
    backend: Arc<dyn Backend>,
    session: Session,
}

impl std::fmt::Debug for AdminService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminService")
            .field("user_id", &self.session.user_id)
            .finish_non_exhaustive()
    }
}

impl AdminService {
    /// Check admin rights for `session`
    pub async fn authorize(backend: Arc<dyn Backend>, session: Option<&Session>) -> AppResult<Self> {
        let session = session.ok_or_else(AppError::not_authenticated)?;
        if !backend.is_admin(session).await? {
            tracing::warn!(target: "audit", user_id = %session.user_id, "Admin access denied");
            return Err(AppError::admin_required());
        }
        Ok(Self {
            backend,
            session: session.clone(),
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Every product, newest first. Invalid rows are returned as-is so they can be fixed.
    pub async fn products(&self) -> AppResult<Vec<ProductRow>> {
        Ok(self.backend.list_products(&ProductFilter::default()).await?)
    }

    pub async fn create_product(&self, data: ProductCreate) -> AppResult<Product> {
        validate_create(&data)?;
        let row = self.backend.insert_product(&self.session, &data).await?;
        let product = Product::try_from(row)?;
        audit_log!(
            self.session.user_id,
            "create",
            format!("product:{}", product.id),
            &product.name
        );
        Ok(product)
    }

    pub async fn update_product(&self, id: ProductId, data: ProductUpdate) -> AppResult<Product> {
        if data.is_empty() {
            return Err(AppError::invalid_request("No fields to update"));
        }
        validate_update(&data)?;
        let row = self
            .backend
            .update_product(&self.session, id, &data)
            .await
            .map_err(|e| product_not_found(e.into(), id))?;
        let product = Product::try_from(row)?;
        audit_log!(self.session.user_id, "update", format!("product:{}", id));
        Ok(product)
    }

    pub async fn delete_product(&self, id: ProductId) -> AppResult<()> {
        self.backend.delete_product(&self.session, id).await?;
        audit_log!(self.session.user_id, "delete", format!("product:{}", id));
        Ok(())
    }

    /// Flip the featured flag; returns the updated product
    pub async fn toggle_featured(&self, id: ProductId) -> AppResult<Product> {
        let current = self
            .backend
            .get_product(id)
            .await?
            .ok_or_else(|| AppError::new(ErrorCode::ProductNotFound).with_detail("id", id))?;
        let update = ProductUpdate {
            featured: Some(!current.featured.unwrap_or(false)),
            ..Default::default()
        };
        self.update_product(id, update).await
    }
}

fn product_not_found(err: AppError, id: ProductId) -> AppError {
    if err.is(ErrorCode::NotFound) {
        AppError::new(ErrorCode::ProductNotFound).with_detail("id", id)
    } else {
        err
    }
}

fn validate_create(data: &ProductCreate) -> AppResult<()> {
    validate_required_text(&data.name, "name", MAX_NAME_LEN)?;
    validate_max_len(&data.description, "description", MAX_NOTE_LEN)?;
    validate_max_len(&data.image_url, "image_url", MAX_URL_LEN)?;
    validate_required_text(&data.category, "category", MAX_NAME_LEN)?;
    validate_unit_price(data.price).map_err(|e| AppError {
        code: ErrorCode::ProductInvalidPrice,
        ..e
    })?;
    if data.stock.is_some_and(|s| s < 0) {
        return Err(AppError::validation("stock must be non-negative").with_detail("field", "stock"));
    }
    Ok(())
}

fn validate_update(data: &ProductUpdate) -> AppResult<()> {
    if let Some(name) = &data.name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }
    if let Some(description) = &data.description {
        validate_max_len(description, "description", MAX_NOTE_LEN)?;
    }
    if let Some(image_url) = &data.image_url {
        validate_max_len(image_url, "image_url", MAX_URL_LEN)?;
    }
    if let Some(category) = &data.category {
        validate_required_text(category, "category", MAX_NAME_LEN)?;
    }
    if let Some(price) = data.price {
        validate_unit_price(price).map_err(|e| AppError {
            code: ErrorCode::ProductInvalidPrice,
            ..e
        })?;
    }
    if data.stock.is_some_and(|s| s < 0) {
        return Err(AppError::validation("stock must be non-negative").with_detail("field", "stock"));
    }
    Ok(())
}
