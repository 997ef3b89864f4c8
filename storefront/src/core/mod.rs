//! Core module: configuration and per-client state
//!
//! - [`Config`]: environment-driven settings
//! - [`StorefrontState`]: cart, session and service wiring

pub mod config;
pub mod state;

pub use config::Config;
pub use state::StorefrontState;
