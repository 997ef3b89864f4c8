//! Data models
//!
//! Rows exchanged with the hosted backend and the strict types built from them.
//! Money is `Decimal` everywhere; user ids are `Uuid`; product and order ids are `i64`.

pub mod cart;
pub mod offer;
pub mod order;
pub mod product;
pub mod session;
pub mod wishlist;

// Re-exports
pub use cart::*;
pub use offer::*;
pub use order::*;
pub use product::*;
pub use session::*;
pub use wishlist::*;
