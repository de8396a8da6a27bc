//! Stock summary models
//!
//! The summary is a derived, read-only view rebuilt from whatever snapshot
//! the backend returns. Decoding of the untyped `/stock` payload happens here
//! and nowhere else.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::quantity::Quantity;
use crate::error::DecodeError;

/// Product categories tracked in stock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductCategory {
    Paddy,
    Rice,
    Bran,
}

impl ProductCategory {
    pub const ALL: [ProductCategory; 3] = [
        ProductCategory::Paddy,
        ProductCategory::Rice,
        ProductCategory::Bran,
    ];

    /// Key used for this category in backend payloads
    pub fn key(&self) -> &'static str {
        match self {
            ProductCategory::Paddy => "paddy",
            ProductCategory::Rice => "rice",
            ProductCategory::Bran => "bran",
        }
    }
}

impl std::fmt::Display for ProductCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProductCategory::Paddy => write!(f, "Paddy"),
            ProductCategory::Rice => write!(f, "Rice"),
            ProductCategory::Bran => write!(f, "Bran"),
        }
    }
}

/// Aggregate quantity of one named type
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockTotals {
    #[serde(default, serialize_with = "rust_decimal::serde::float::serialize")]
    pub total_kg: Decimal,
    #[serde(default, serialize_with = "rust_decimal::serde::float::serialize")]
    pub total_bosta: Decimal,
}

impl StockTotals {
    pub fn is_zero(&self) -> bool {
        self.total_kg.is_zero() && self.total_bosta.is_zero()
    }

    pub fn is_negative(&self) -> bool {
        self.total_kg < Decimal::ZERO || self.total_bosta < Decimal::ZERO
    }

    /// Sum of two totals, or `None` when either field overflows
    pub fn checked_add(&self, other: &Self) -> Option<Self> {
        Some(Self {
            total_kg: self.total_kg.checked_add(other.total_kg)?,
            total_bosta: self.total_bosta.checked_add(other.total_bosta)?,
        })
    }

    /// Sum of two totals, clamped to the representable range
    pub fn saturating_add(&self, other: &Self) -> Self {
        Self {
            total_kg: self.total_kg.saturating_add(other.total_kg),
            total_bosta: self.total_bosta.saturating_add(other.total_bosta),
        }
    }
}

/// One per-type stock record as delivered by a flat data set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockEntry {
    #[serde(alias = "type")]
    pub type_name: String,
    #[serde(default, serialize_with = "rust_decimal::serde::float::serialize")]
    pub total_kg: Decimal,
    #[serde(default, serialize_with = "rust_decimal::serde::float::serialize")]
    pub total_bosta: Decimal,
}

impl StockEntry {
    pub fn new(type_name: impl Into<String>, total_kg: Decimal, total_bosta: Decimal) -> Self {
        Self {
            type_name: type_name.into(),
            total_kg,
            total_bosta,
        }
    }

    /// Entry for a form quantity; the sack count is the entered bosta
    pub fn from_quantity(type_name: impl Into<String>, quantity: &Quantity) -> Self {
        Self::new(type_name, quantity.total_kg(), quantity.bosta)
    }

    fn totals(&self) -> StockTotals {
        StockTotals {
            total_kg: self.total_kg,
            total_bosta: self.total_bosta,
        }
    }
}

/// Stock per category and type-name
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StockSummary {
    #[serde(default)]
    pub paddy: BTreeMap<String, StockTotals>,
    #[serde(default)]
    pub rice: BTreeMap<String, StockTotals>,
    #[serde(default)]
    pub bran: BTreeMap<String, StockTotals>,
}

impl StockSummary {
    pub fn category(&self, category: ProductCategory) -> &BTreeMap<String, StockTotals> {
        match category {
            ProductCategory::Paddy => &self.paddy,
            ProductCategory::Rice => &self.rice,
            ProductCategory::Bran => &self.bran,
        }
    }

    /// Rows of a category with non-zero totals, in type-name order
    pub fn active_rows(&self, category: ProductCategory) -> Vec<(&str, &StockTotals)> {
        self.category(category)
            .iter()
            .filter(|(_, totals)| !totals.is_zero())
            .map(|(name, totals)| (name.as_str(), totals))
            .collect()
    }

    /// Sum of every type in a category
    pub fn category_total(&self, category: ProductCategory) -> StockTotals {
        self.category(category)
            .values()
            .fold(StockTotals::default(), |total, totals| total.saturating_add(totals))
    }

    pub fn is_empty(&self) -> bool {
        self.paddy.is_empty() && self.rice.is_empty() && self.bran.is_empty()
    }

    /// Build a summary from an untyped payload, never failing
    ///
    /// A payload that is not an object at all yields an empty summary.
    pub fn from_payload(payload: &Value) -> Self {
        decode_stock_response(payload)
            .map(|decoded| decoded.summary)
            .unwrap_or_default()
    }
}

/// Group per-type entries of each category, summing repeated type-names
///
/// Sums that exceed the decimal range are clamped rather than failing.
pub fn build_stock_summary(
    paddy: &[StockEntry],
    rice: &[StockEntry],
    bran: &[StockEntry],
) -> StockSummary {
    StockSummary {
        paddy: group_by_type(paddy),
        rice: group_by_type(rice),
        bran: group_by_type(bran),
    }
}

fn group_by_type(entries: &[StockEntry]) -> BTreeMap<String, StockTotals> {
    let mut grouped: BTreeMap<String, StockTotals> = BTreeMap::new();
    for entry in entries {
        let slot = grouped.entry(entry.type_name.clone()).or_default();
        *slot = slot.saturating_add(&entry.totals());
    }
    grouped
}

/// Strict grouping for backend payloads: negative or overflowing totals are malformed
fn try_group_by_type(entries: &[StockEntry]) -> Result<BTreeMap<String, StockTotals>, DecodeError> {
    let mut grouped: BTreeMap<String, StockTotals> = BTreeMap::new();
    for entry in entries {
        let totals = checked_totals(&entry.type_name, entry.totals())?;
        let slot = grouped.entry(entry.type_name.clone()).or_default();
        *slot = slot.checked_add(&totals).ok_or_else(|| {
            DecodeError::Malformed(format!("totals for `{}` overflow", entry.type_name))
        })?;
    }
    Ok(grouped)
}

fn checked_totals(name: &str, totals: StockTotals) -> Result<StockTotals, DecodeError> {
    if totals.is_negative() {
        return Err(DecodeError::Malformed(format!(
            "totals for `{}` are negative",
            name
        )));
    }
    Ok(totals)
}

/// Result of decoding a `/stock` payload
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedStock {
    pub summary: StockSummary,
    /// Categories that were present but malformed and were replaced by an empty map
    pub degraded: Vec<ProductCategory>,
}

/// Decode a `/stock` response body
///
/// Accepts the bare `{paddy, rice, bran}` object or the same object wrapped
/// in `{"data": ...}`. Each category may be a map of type-name to totals or
/// a flat array of per-type entries. A malformed category becomes an empty
/// map and is listed in [`DecodedStock::degraded`]; a missing one is simply
/// empty. Only a body that is not an object is an error.
pub fn decode_stock_response(payload: &Value) -> Result<DecodedStock, DecodeError> {
    let body = unwrap_envelope(payload);
    let object = body
        .as_object()
        .ok_or_else(|| DecodeError::NotAnObject(json_kind(body)))?;

    let mut degraded = Vec::new();
    let mut decode = |category: ProductCategory| match object.get(category.key()) {
        None | Some(Value::Null) => BTreeMap::new(),
        Some(value) => decode_category(value).unwrap_or_else(|_| {
            degraded.push(category);
            BTreeMap::new()
        }),
    };

    let summary = StockSummary {
        paddy: decode(ProductCategory::Paddy),
        rice: decode(ProductCategory::Rice),
        bran: decode(ProductCategory::Bran),
    };

    Ok(DecodedStock { summary, degraded })
}

fn unwrap_envelope(payload: &Value) -> &Value {
    match payload.get("data") {
        Some(inner) if inner.is_object() && !has_any_category(payload) => inner,
        _ => payload,
    }
}

fn has_any_category(payload: &Value) -> bool {
    ProductCategory::ALL
        .iter()
        .any(|c| payload.get(c.key()).is_some())
}

fn decode_category(value: &Value) -> Result<BTreeMap<String, StockTotals>, DecodeError> {
    match value {
        Value::Object(map) => map
            .iter()
            .map(|(name, totals)| {
                if !totals.is_object() {
                    return Err(DecodeError::Malformed(format!(
                        "totals for `{}` is {}",
                        name,
                        json_kind(totals)
                    )));
                }
                let totals = serde_json::from_value::<StockTotals>(totals.clone())
                    .map_err(|e| DecodeError::Malformed(e.to_string()))?;
                Ok((name.clone(), checked_totals(name, totals)?))
            })
            .collect(),
        Value::Array(_) => {
            let entries = serde_json::from_value::<Vec<StockEntry>>(value.clone())
                .map_err(|e| DecodeError::Malformed(e.to_string()))?;
            try_group_by_type(&entries)
        }
        other => Err(DecodeError::Malformed(format!(
            "category is {}",
            json_kind(other)
        ))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
