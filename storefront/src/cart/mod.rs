//! Cart
//!
//! - [`CartStore`]: owned cart state with offer recomputation
//! - [`validation`]: price/quantity checks applied before anything enters the store

mod store;
pub mod validation;

pub use store::CartStore;
