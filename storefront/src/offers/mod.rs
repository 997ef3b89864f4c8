//! Promotional offers
//!
//! The engine is recomputed from scratch on every cart mutation and again
//! at checkout; nothing here keeps state between calls.

mod engine;

pub use engine::*;
