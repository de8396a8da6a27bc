//! Rice Mill Management Platform - REST client
//!
//! Typed access to the remote mill backend for the administrative
//! application: profile, stock, counterparties, purchases, production,
//! sales and payments.

pub mod api;
pub mod config;
pub mod error;
pub mod session;

pub use api::MillApiClient;
pub use config::Config;
pub use error::{ClientError, ClientResult, UserMessage};
pub use session::Session;
