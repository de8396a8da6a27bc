//! Sales models

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{calculate_due, calculate_total_price, ProductCategory, Quantity};

/// Rice, bran or paddy sold to a customer
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSale {
    pub customer_id: Uuid,
    pub category: ProductCategory,
    pub type_name: String,
    pub quantity: Quantity,
    pub price_per_kg: Decimal,
    #[serde(default)]
    pub paid_amount: Decimal,
    pub sale_date: NaiveDate,
    pub note: Option<String>,
}

impl NewSale {
    pub fn total_kg(&self) -> Decimal {
        self.quantity.total_kg()
    }

    pub fn total_price(&self) -> Decimal {
        calculate_total_price(self.total_kg(), self.price_per_kg)
    }

    pub fn due_amount(&self) -> Decimal {
        calculate_due(self.total_price(), self.paid_amount)
    }
}

/// A stored sale
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub category: ProductCategory,
    pub type_name: String,
    pub total_kg: Decimal,
    pub total_price: Decimal,
    pub paid_amount: Decimal,
    pub due_amount: Decimal,
    pub sale_date: NaiveDate,
    pub created_at: DateTime<Utc>,
}
