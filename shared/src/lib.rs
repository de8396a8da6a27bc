//! Shared types and models for the Rice Mill Management Platform
//!
//! This crate contains the quantity/stock unit model and the record types
//! shared between the REST client, the browser (via WASM), and other
//! components of the system.

pub mod error;
pub mod models;
pub mod types;
pub mod validation;

pub use error::*;
pub use models::*;
pub use types::*;
pub use validation::*;
