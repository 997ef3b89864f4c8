//! Client state: config, backend, session, cart and wishlist

use crate::account::AccountService;
use crate::admin::AdminService;
use crate::backend::{Backend, RestBackend};
use crate::cart::CartStore;
use crate::catalog::CatalogService;
use crate::checkout::{CheckoutReceipt, CheckoutService, ShippingDetails};
use crate::core::Config;
use crate::wishlist::WishlistService;
use shared::error::{AppError, AppResult};
use shared::models::{OrderRecord, Session};
use std::sync::Arc;

/// Storefront state for one client
///
/// Owns the cart, the signed-in session and the wishlist cache, and hands
/// out services bound to the shared backend.
pub struct StorefrontState {
    pub config: Config,
    backend: Arc<dyn Backend>,
    session: Option<Session>,
    cart: CartStore,
    wishlist: WishlistService,
}

impl StorefrontState {
    pub fn new(config: Config, backend: Arc<dyn Backend>) -> Self {
        Self {
            config,
            wishlist: WishlistService::new(backend.clone()),
            backend,
            session: None,
            cart: CartStore::new(),
        }
    }

    /// Validate `config` and connect the REST backend
    pub fn initialize(config: Config) -> AppResult<Self> {
        config.validate()?;
        let backend = RestBackend::from_config(&config).map_err(AppError::from)?;
        tracing::info!(
            backend_url = %backend.base_url(),
            environment = %config.environment,
            "Storefront initialized"
        );
        Ok(Self::new(config, Arc::new(backend)))
    }

    pub fn backend(&self) -> Arc<dyn Backend> {
        self.backend.clone()
    }

    // ========== Session ==========

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Attach a session issued by the auth service and load its wishlist
    pub async fn sign_in(&mut self, session: Session) -> AppResult<()> {
        tracing::info!(user_id = %session.user_id, "Signed in");
        self.wishlist.set_session(Some(session.clone()));
        self.session = Some(session);
        self.wishlist.refresh().await
    }

    /// Drop the session; the cart and wishlist cache go with it
    pub fn sign_out(&mut self) {
        if let Some(session) = self.session.take() {
            tracing::info!(user_id = %session.user_id, "Signed out");
        }
        self.cart.clear();
        self.wishlist.set_session(None);
    }

    // ========== Cart ==========

    pub fn cart(&self) -> &CartStore {
        &self.cart
    }

    pub fn cart_mut(&mut self) -> &mut CartStore {
        &mut self.cart
    }

    // ========== Wishlist ==========

    pub fn wishlist(&self) -> &WishlistService {
        &self.wishlist
    }

    pub fn wishlist_mut(&mut self) -> &mut WishlistService {
        &mut self.wishlist
    }

    // ========== Services ==========

    pub fn catalog(&self) -> CatalogService {
        CatalogService::new(self.backend.clone()).with_page_size(self.config.page_size)
    }

    pub async fn checkout(&mut self, shipping: &ShippingDetails) -> AppResult<CheckoutReceipt> {
        CheckoutService::new(self.backend.clone())
            .submit(self.session.as_ref(), &mut self.cart, shipping)
            .await
    }

    pub async fn orders(&self) -> AppResult<Vec<OrderRecord>> {
        AccountService::new(self.backend.clone())
            .orders(self.session.as_ref())
            .await
    }

    pub async fn admin(&self) -> AppResult<AdminService> {
        AdminService::authorize(self.backend.clone(), self.session.as_ref()).await
    }
}
