//! Milling production models

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{
    aggregate_total_kg, build_stock_summary, ProductCategory, Quantity, StockEntry, StockSummary,
};

/// One product coming out of a milling run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductionOutput {
    pub category: ProductCategory,
    pub type_name: String,
    pub quantity: Quantity,
}

/// A milling run: paddy in, rice and bran out
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProductionBatch {
    pub paddy_type: String,
    pub paddy_used: Quantity,
    pub outputs: Vec<ProductionOutput>,
    pub production_date: NaiveDate,
    pub note: Option<String>,
}

impl NewProductionBatch {
    pub fn paddy_used_kg(&self) -> Decimal {
        self.paddy_used.total_kg()
    }

    /// Total output weight of one category
    pub fn output_kg(&self, category: ProductCategory) -> Decimal {
        let quantities: Vec<Quantity> = self
            .outputs
            .iter()
            .filter(|o| o.category == category)
            .map(|o| o.quantity)
            .collect();
        aggregate_total_kg(&quantities)
    }

    /// Rice output as a percentage of paddy consumed
    pub fn rice_yield_percent(&self) -> Decimal {
        calculate_milling_yield(self.paddy_used_kg(), self.output_kg(ProductCategory::Rice))
    }

    /// Produced stock grouped by category and type
    pub fn output_summary(&self) -> StockSummary {
        let entries = |category: ProductCategory| -> Vec<StockEntry> {
            self.outputs
                .iter()
                .filter(|o| o.category == category)
                .map(|o| StockEntry::from_quantity(o.type_name.clone(), &o.quantity))
                .collect()
        };
        build_stock_summary(
            &entries(ProductCategory::Paddy),
            &entries(ProductCategory::Rice),
            &entries(ProductCategory::Bran),
        )
    }
}

/// A stored production batch
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductionBatch {
    pub id: Uuid,
    pub paddy_type: String,
    pub paddy_used_kg: Decimal,
    pub rice_kg: Decimal,
    pub bran_kg: Decimal,
    pub production_date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

/// Output weight as a percentage of input weight
pub fn calculate_milling_yield(input_kg: Decimal, output_kg: Decimal) -> Decimal {
    if input_kg.is_zero() {
        return Decimal::ZERO;
    }
    output_kg
        .checked_div(input_kg)
        .and_then(|ratio| ratio.checked_mul(Decimal::from(100)))
        .unwrap_or(Decimal::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BostaSize;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn output(category: ProductCategory, name: &str, kg: &str, bosta: &str) -> ProductionOutput {
        ProductionOutput {
            category,
            type_name: name.to_string(),
            quantity: Quantity::new(dec(kg), dec(bosta), BostaSize::Kg50).unwrap(),
        }
    }

    #[test]
    fn test_production_yield_and_summary() {
        let batch = NewProductionBatch {
            paddy_type: "BR-28".to_string(),
            paddy_used: Quantity::sacks(dec("20"), BostaSize::Kg50).unwrap(),
            outputs: vec![
                output(ProductCategory::Rice, "Miniket", "10", "6"),
                output(ProductCategory::Rice, "Miniket", "0", "2"),
                output(ProductCategory::Bran, "Fine", "30", "1"),
            ],
            production_date: NaiveDate::from_ymd_opt(2024, 12, 1).unwrap(),
            note: None,
        };

        assert_eq!(batch.paddy_used_kg(), dec("1000"));
        assert_eq!(batch.output_kg(ProductCategory::Rice), dec("410"));
        assert_eq!(batch.output_kg(ProductCategory::Bran), dec("80"));
        assert_eq!(batch.rice_yield_percent(), dec("41"));

        let summary = batch.output_summary();
        assert!(summary.paddy.is_empty());
        assert_eq!(summary.rice["Miniket"].total_kg, dec("410"));
        assert_eq!(summary.rice["Miniket"].total_bosta, dec("8"));
    }

    #[test]
    fn test_yield_zero_input() {
        assert_eq!(calculate_milling_yield(Decimal::ZERO, dec("10")), Decimal::ZERO);
        assert_eq!(calculate_milling_yield(dec("0.0001"), Decimal::MAX), Decimal::MAX);
    }
}
