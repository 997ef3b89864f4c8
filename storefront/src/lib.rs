//! Storefront client core
//!
//! Pricing, cart and order flow of an online perfume shop backed by a hosted
//! PostgREST service.
//!
//! # Module layout
//!
//! ```text
//! storefront/src/
//! ├── offers/     # offer engine: best of "15% Off" and "Buy 4, Get 1 Free"
//! ├── cart/       # cart store and input validation
//! ├── catalog/    # product listings, category routes, pagination
//! ├── wishlist.rs # per-user wishlist cache
//! ├── checkout.rs # cart -> order
//! ├── account.rs  # order history
//! ├── admin.rs    # catalog management for admins
//! ├── backend/    # backend trait + REST implementation
//! ├── core/       # config, state
//! └── utils/      # logging, validation
//! ```

pub mod account;
pub mod admin;
pub mod backend;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod core;
pub mod offers;
pub mod utils;
pub mod wishlist;

pub use backend::{Backend, BackendError, RestBackend};
pub use cart::CartStore;
pub use core::{Config, StorefrontState};
pub use offers::find_best_offer;
pub use utils::{AppError, AppResult, ErrorCategory, ErrorCode};

pub use utils::logger::{cleanup_old_logs, init_logger, init_logger_with_file, spawn_log_cleanup};
