//! Order history of the signed-in user

use crate::backend::Backend;
use shared::error::{AppError, AppResult};
use shared::models::{OrderRecord, Session};
use std::sync::Arc;

#[derive(Clone)]
pub struct AccountService {
    backend: Arc<dyn Backend>,
}

impl AccountService {
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self { backend }
    }

    /// The user's orders, newest first
    pub async fn orders(&self, session: Option<&Session>) -> AppResult<Vec<OrderRecord>> {
        let session = session.ok_or_else(AppError::not_authenticated)?;
        let mut orders = self.backend.list_orders(session).await?;
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(orders)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::memory::MemoryBackend;
    use rust_decimal::Decimal;
    use shared::error::ErrorCode;
    use shared::models::{NewOrder, OrderStatus};
    use uuid::Uuid;

    fn order(user_id: Uuid, total: i64) -> NewOrder {
        NewOrder {
            user_id,
            status: OrderStatus::Processing,
            total: Decimal::from(total),
            special_offer_applied: None,
        }
    }

    #[tokio::test]
    async fn test_orders_require_session() {
        let account = AccountService::new(Arc::new(MemoryBackend::new()));
        let err = account.orders(None).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotAuthenticated);
    }

    #[tokio::test]
    async fn test_only_own_orders_newest_first() {
        let backend = Arc::new(MemoryBackend::new());
        let alice = Session::new(Uuid::new_v4(), "a");
        let bob = Session::new(Uuid::new_v4(), "b");
        backend.insert_order(&alice, &order(alice.user_id, 10)).await.unwrap();
        backend.insert_order(&bob, &order(bob.user_id, 20)).await.unwrap();
        backend.insert_order(&alice, &order(alice.user_id, 30)).await.unwrap();

        let account = AccountService::new(backend);
        let orders = account.orders(Some(&alice)).await.unwrap();
        assert_eq!(orders.len(), 2);
        assert!(orders.iter().all(|o| o.user_id == alice.user_id));
        let totals: Vec<Decimal> = orders.iter().map(|o| o.total).collect();
        assert_eq!(totals, vec![Decimal::from(30), Decimal::from(10)]);
        assert!(orders[0].id > orders[1].id);
    }
}
