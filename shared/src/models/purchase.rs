//! Paddy purchase models

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{calculate_due, calculate_total_price, kg_to_bosta, BostaLedger, BostaSize};

/// Paddy bought from a farmer, weighed sack by sack
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPaddyPurchase {
    pub farmer_id: Uuid,
    pub paddy_type: String,
    #[serde(default)]
    pub bosta_size: BostaSize,
    pub bostas: BostaLedger,
    pub price_per_kg: Decimal,
    #[serde(default)]
    pub paid_amount: Decimal,
    pub purchase_date: NaiveDate,
    pub note: Option<String>,
}

impl NewPaddyPurchase {
    pub fn total_kg(&self) -> Decimal {
        self.bostas.totals().total_kg
    }

    pub fn total_price(&self) -> Decimal {
        calculate_total_price(self.total_kg(), self.price_per_kg)
    }

    pub fn due_amount(&self) -> Decimal {
        calculate_due(self.total_price(), self.paid_amount)
    }

    /// Weighed total expressed in standard sacks of the purchase's size
    pub fn standard_bosta(&self) -> Decimal {
        kg_to_bosta(self.total_kg(), self.bosta_size)
    }
}

/// A stored paddy purchase
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaddyPurchase {
    pub id: Uuid,
    pub farmer_id: Uuid,
    pub paddy_type: String,
    pub total_kg: Decimal,
    pub total_bosta: u32,
    pub total_price: Decimal,
    pub paid_amount: Decimal,
    pub due_amount: Decimal,
    pub purchase_date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_purchase_totals_from_ledger() {
        let purchase = NewPaddyPurchase {
            farmer_id: Uuid::new_v4(),
            paddy_type: "BR-28".to_string(),
            bosta_size: BostaSize::Kg50,
            bostas: BostaLedger::from_weights([dec("49.5"), dec("50.5"), dec("50")]),
            price_per_kg: dec("30"),
            paid_amount: dec("2000"),
            purchase_date: NaiveDate::from_ymd_opt(2024, 11, 2).unwrap(),
            note: None,
        };

        assert_eq!(purchase.total_kg(), dec("150"));
        assert_eq!(purchase.total_price(), dec("4500"));
        assert_eq!(purchase.due_amount(), dec("2500"));
        assert_eq!(purchase.standard_bosta(), dec("3"));
    }
}
