//! Domain models for the Rice Mill Management Platform

mod ledger;
mod party;
mod payment;
mod production;
mod purchase;
mod quantity;
mod sale;
mod stock;
mod user;

pub use ledger::*;
pub use party::*;
pub use payment::*;
pub use production::*;
pub use purchase::*;
pub use quantity::*;
pub use sale::*;
pub use stock::*;
pub use user::*;
