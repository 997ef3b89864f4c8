//! In-memory backend for service tests
//!
//! Mirrors the row-level rules of the hosted service: orders and wishlist
//! rows are only visible to their owner. Locks are never held across an
//! await point.

use super::{Backend, BackendError, BackendResult, ProductFilter};
use async_trait::async_trait;
use reqwest::StatusCode;
use shared::models::{
    NewOrder, NewOrderItem, NewWishlistItem, OrderItemRecord, OrderRecord, ProductCreate,
    ProductId, ProductRow, ProductUpdate, Session, WishlistItem,
};
use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard};
use uuid::Uuid;

/// Call that should fail on the next attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FailPoint {
    ListProducts,
    InsertOrder,
    InsertOrderItems,
    InsertWishlist,
}

#[derive(Default)]
struct State {
    products: Vec<ProductRow>,
    orders: Vec<OrderRecord>,
    order_items: Vec<OrderItemRecord>,
    wishlist: Vec<WishlistItem>,
    admins: HashSet<Uuid>,
    next_id: i64,
    fail: Option<FailPoint>,
}

impl State {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn trip(&mut self, point: FailPoint) -> BackendResult<()> {
        if self.fail == Some(point) {
            self.fail = None;
            return Err(BackendError::Status {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                message: format!("{:?} failed", point),
            });
        }
        Ok(())
    }
}

#[derive(Default)]
pub(crate) struct MemoryBackend {
    state: Mutex<State>,
}

impl MemoryBackend {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_products(rows: Vec<ProductRow>) -> Self {
        let backend = Self::new();
        {
            let mut state = backend.lock();
            state.next_id = rows.iter().filter_map(|r| r.id).max().unwrap_or(0);
            state.products = rows;
        }
        backend
    }

    pub(crate) fn add_admin(&self, user_id: Uuid) {
        self.lock().admins.insert(user_id);
    }

    pub(crate) fn fail_next(&self, point: FailPoint) {
        self.lock().fail = Some(point);
    }

    pub(crate) fn orders(&self) -> Vec<OrderRecord> {
        self.lock().orders.clone()
    }

    pub(crate) fn order_items(&self) -> Vec<OrderItemRecord> {
        self.lock().order_items.clone()
    }

    pub(crate) fn products(&self) -> Vec<ProductRow> {
        self.lock().products.clone()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        // ignore poisoning from a panicked test
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

fn product_matches(row: &ProductRow, filter: &ProductFilter) -> bool {
    filter.featured.is_none_or(|f| row.featured == Some(f))
        && filter
            .is_best_seller
            .is_none_or(|b| row.is_best_seller == Some(b))
        && filter
            .gender
            .as_ref()
            .is_none_or(|g| row.gender.as_ref() == Some(g))
}

#[async_trait]
impl Backend for MemoryBackend {
    async fn list_products(&self, filter: &ProductFilter) -> BackendResult<Vec<ProductRow>> {
        let mut state = self.lock();
        state.trip(FailPoint::ListProducts)?;
        let mut rows: Vec<ProductRow> = state
            .products
            .iter()
            .filter(|r| product_matches(r, filter))
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        if let Some(limit) = filter.limit {
            rows.truncate(limit);
        }
        Ok(rows)
    }

    async fn get_product(&self, id: ProductId) -> BackendResult<Option<ProductRow>> {
        Ok(self
            .lock()
            .products
            .iter()
            .find(|r| r.id == Some(id))
            .cloned())
    }

    async fn is_admin(&self, session: &Session) -> BackendResult<bool> {
        Ok(self.lock().admins.contains(&session.user_id))
    }

    async fn insert_product(
        &self,
        _session: &Session,
        data: &ProductCreate,
    ) -> BackendResult<ProductRow> {
        let mut state = self.lock();
        let row = ProductRow {
            id: Some(state.next_id()),
            name: Some(data.name.clone()),
            description: Some(data.description.clone()),
            price: Some(shared::money::to_f64(data.price)),
            image_url: Some(data.image_url.clone()),
            category: Some(data.category.clone()),
            stock: Some(i64::from(data.stock.unwrap_or(0))),
            featured: Some(data.featured.unwrap_or(false)),
            created_at: Some(chrono::Utc::now()),
            ..Default::default()
        };
        state.products.push(row.clone());
        Ok(row)
    }

    async fn update_product(
        &self,
        _session: &Session,
        id: ProductId,
        data: &ProductUpdate,
    ) -> BackendResult<ProductRow> {
        let mut state = self.lock();
        let row = state
            .products
            .iter_mut()
            .find(|r| r.id == Some(id))
            .ok_or_else(|| BackendError::NotFound(format!("product {}", id)))?;
        if let Some(name) = &data.name {
            row.name = Some(name.clone());
        }
        if let Some(description) = &data.description {
            row.description = Some(description.clone());
        }
        if let Some(price) = data.price {
            row.price = Some(shared::money::to_f64(price));
        }
        if let Some(image_url) = &data.image_url {
            row.image_url = Some(image_url.clone());
        }
        if let Some(category) = &data.category {
            row.category = Some(category.clone());
        }
        if let Some(stock) = data.stock {
            row.stock = Some(i64::from(stock));
        }
        if let Some(featured) = data.featured {
            row.featured = Some(featured);
        }
        Ok(row.clone())
    }

    async fn delete_product(&self, _session: &Session, id: ProductId) -> BackendResult<()> {
        self.lock().products.retain(|r| r.id != Some(id));
        Ok(())
    }

    async fn insert_order(
        &self,
        session: &Session,
        order: &NewOrder,
    ) -> BackendResult<OrderRecord> {
        let mut state = self.lock();
        state.trip(FailPoint::InsertOrder)?;
        let record = OrderRecord {
            id: state.next_id(),
            user_id: session.user_id,
            status: order.status,
            total: order.total,
            special_offer_applied: order.special_offer_applied.clone(),
            created_at: Some(chrono::Utc::now()),
        };
        state.orders.push(record.clone());
        Ok(record)
    }

    async fn insert_order_items(
        &self,
        _session: &Session,
        items: &[NewOrderItem],
    ) -> BackendResult<()> {
        let mut state = self.lock();
        state.trip(FailPoint::InsertOrderItems)?;
        for item in items {
            let id = state.next_id();
            state.order_items.push(OrderItemRecord {
                id,
                order_id: item.order_id,
                product_id: item.product_id,
                quantity: item.quantity,
                price: item.price,
            });
        }
        Ok(())
    }

    async fn list_orders(&self, session: &Session) -> BackendResult<Vec<OrderRecord>> {
        let mut orders: Vec<OrderRecord> = self
            .lock()
            .orders
            .iter()
            .filter(|o| o.user_id == session.user_id)
            .cloned()
            .collect();
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(orders)
    }

    async fn list_wishlist(&self, session: &Session) -> BackendResult<Vec<WishlistItem>> {
        let state = self.lock();
        Ok(state
            .wishlist
            .iter()
            .filter(|w| w.user_id == session.user_id)
            .map(|w| WishlistItem {
                product: state
                    .products
                    .iter()
                    .find(|p| p.id == Some(w.product_id))
                    .cloned(),
                ..w.clone()
            })
            .collect())
    }

    async fn insert_wishlist_item(
        &self,
        session: &Session,
        item: &NewWishlistItem,
    ) -> BackendResult<WishlistItem> {
        let mut state = self.lock();
        state.trip(FailPoint::InsertWishlist)?;
        if item.user_id != session.user_id {
            return Err(BackendError::Status {
                status: StatusCode::FORBIDDEN,
                message: "row-level security violation".into(),
            });
        }
        let row = WishlistItem {
            id: state.next_id(),
            user_id: item.user_id,
            product_id: item.product_id,
            product: None,
        };
        state.wishlist.push(row.clone());
        Ok(row)
    }

    async fn delete_wishlist_item(&self, session: &Session, item_id: i64) -> BackendResult<()> {
        self.lock()
            .wishlist
            .retain(|w| !(w.id == item_id && w.user_id == session.user_id));
        Ok(())
    }
}
