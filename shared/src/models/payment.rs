//! Payment and due-balance models

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// How a payment was made
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    #[default]
    Cash,
    BankTransfer,
    /// bKash, Nagad and similar wallets
    MobileBanking,
    Cheque,
}

/// Which side of the ledger a payment settles
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PaymentParty {
    /// Mill pays a farmer for purchased paddy
    Farmer,
    /// Customer pays the mill for a sale
    Customer,
}

impl PaymentParty {
    /// Path segment of the party's collection on the backend
    pub fn resource(&self) -> &'static str {
        match self {
            PaymentParty::Farmer => "farmers",
            PaymentParty::Customer => "customers",
        }
    }
}

/// Payment recorded from the payment dialog
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPayment {
    pub amount: Decimal,
    #[serde(default)]
    pub method: PaymentMethod,
    pub paid_on: NaiveDate,
    pub note: Option<String>,
}

/// A stored payment
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: Uuid,
    pub party: PaymentParty,
    pub party_id: Uuid,
    pub amount: Decimal,
    pub method: PaymentMethod,
    pub paid_on: NaiveDate,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Price of a weight at a per-kg rate, rounded to paisa
pub fn calculate_total_price(total_kg: Decimal, price_per_kg: Decimal) -> Decimal {
    total_kg.saturating_mul(price_per_kg).round_dp(2)
}

/// Outstanding balance after a payment; never negative
pub fn calculate_due(total: Decimal, paid: Decimal) -> Decimal {
    total.saturating_sub(paid).max(Decimal::ZERO)
}
