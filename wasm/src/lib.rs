//! WebAssembly module for the Rice Mill Management Platform
//!
//! Provides client-side computation for:
//! - Sack/weight conversions for purchase, production and sales forms
//! - The per-sack weight ledger behind the add/remove sack buttons
//! - Stock summary building from the `/stock` response
//! - Due and price calculations for payment dialogs
//!
//! Structured values cross the boundary as JSON strings.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use shared::models::*;
pub use shared::validation::*;

/// Convert a JS number, rejecting NaN, infinities and values outside the decimal range
fn to_decimal(value: f64) -> Result<Decimal, String> {
    Decimal::try_from(value).map_err(|_| format!("Unrepresentable number: {}", value))
}

fn to_f64(value: Decimal) -> f64 {
    value.to_f64().unwrap_or(0.0)
}

fn bosta_size(kg: u32) -> Result<BostaSize, String> {
    BostaSize::try_from(kg).map_err(|e| e.to_string())
}

fn js_error(message: String) -> JsValue {
    JsValue::from_str(&message)
}

// ============================================================================
// Unit conversion
// ============================================================================

fn total_kg_inner(kg: f64, bosta: f64, size_kg: u32) -> Result<f64, String> {
    let size = bosta_size(size_kg)?;
    Ok(to_f64(shared::calculate_total_kg(
        to_decimal(kg)?,
        to_decimal(bosta)?,
        size,
    )))
}

fn bosta_to_kg_inner(bosta: f64, size_kg: u32) -> Result<f64, String> {
    let size = bosta_size(size_kg)?;
    Ok(to_f64(shared::bosta_to_kg(to_decimal(bosta)?, size)))
}

fn kg_to_bosta_inner(kg: f64, size_kg: u32) -> Result<f64, String> {
    let size = bosta_size(size_kg)?;
    Ok(to_f64(shared::kg_to_bosta(to_decimal(kg)?, size)))
}

/// Total weight of loose kg plus sacks of `bosta_size` kg
#[wasm_bindgen(js_name = calculateTotalKg)]
pub fn calculate_total_kg(kg: f64, bosta: f64, bosta_size: u32) -> Result<f64, JsValue> {
    total_kg_inner(kg, bosta, bosta_size).map_err(js_error)
}

/// Weight of a sack count
#[wasm_bindgen(js_name = bostaToKg)]
pub fn bosta_to_kg(bosta: f64, size_kg: u32) -> Result<f64, JsValue> {
    bosta_to_kg_inner(bosta, size_kg).map_err(js_error)
}

/// Sack count of a weight
#[wasm_bindgen(js_name = kgToBosta)]
pub fn kg_to_bosta(kg: f64, size_kg: u32) -> Result<f64, JsValue> {
    kg_to_bosta_inner(kg, size_kg).map_err(js_error)
}

/// Whether a sack size is one the converter accepts
#[wasm_bindgen(js_name = isValidBostaSize)]
pub fn is_valid_bosta_size(size_kg: u32) -> bool {
    validate_bosta_size(size_kg).is_ok()
}

fn bosta_size_options_inner() -> String {
    let options: Vec<serde_json::Value> = shared::bosta_size_options()
        .into_iter()
        .map(|(value, label)| serde_json::json!({ "value": value, "label": label }))
        .collect();
    serde_json::Value::Array(options).to_string()
}

/// Sack-size selector options as `[{value, label}]`
#[wasm_bindgen(js_name = bostaSizeOptions)]
pub fn bosta_size_options() -> String {
    bosta_size_options_inner()
}

fn aggregate_inner(quantities_json: &str) -> Result<f64, String> {
    let quantities: Vec<Quantity> = serde_json::from_str(quantities_json)
        .map_err(|e| format!("Invalid quantities JSON: {}", e))?;
    Ok(to_f64(shared::aggregate_total_kg(&quantities)))
}

/// Total weight of `[{kg, bosta, bostaSize}]`
#[wasm_bindgen(js_name = aggregateTotalKg)]
pub fn aggregate_total_kg(quantities_json: &str) -> Result<f64, JsValue> {
    aggregate_inner(quantities_json).map_err(js_error)
}

/// Parse a weight field, treating invalid input as 0
#[wasm_bindgen(js_name = parseWeight)]
pub fn parse_weight(raw: &str) -> f64 {
    to_f64(parse_weight_input(raw))
}

// ============================================================================
// Bosta ledger
// ============================================================================

fn parse_ledger(ledger_json: &str) -> Result<BostaLedger, String> {
    if ledger_json.trim().is_empty() {
        return Ok(BostaLedger::new());
    }
    serde_json::from_str(ledger_json).map_err(|e| format!("Invalid ledger JSON: {}", e))
}

fn edit_ledger<F>(ledger_json: &str, edit: F) -> Result<String, String>
where
    F: FnOnce(&mut BostaLedger),
{
    let mut ledger = parse_ledger(ledger_json)?;
    edit(&mut ledger);
    serde_json::to_string(&ledger).map_err(|e| e.to_string())
}

/// Append an unweighed sack
#[wasm_bindgen(js_name = ledgerAddBosta)]
pub fn ledger_add_bosta(ledger_json: &str) -> Result<String, JsValue> {
    edit_ledger(ledger_json, |ledger| {
        ledger.add_bosta();
    })
    .map_err(js_error)
}

/// Remove a sack and renumber the rest
#[wasm_bindgen(js_name = ledgerRemoveBosta)]
pub fn ledger_remove_bosta(ledger_json: &str, index: usize) -> Result<String, JsValue> {
    edit_ledger(ledger_json, |ledger| {
        ledger.remove_bosta(index);
    })
    .map_err(js_error)
}

/// Set a sack's weight from the raw field text
#[wasm_bindgen(js_name = ledgerUpdateWeight)]
pub fn ledger_update_weight(ledger_json: &str, index: usize, raw: &str) -> Result<String, JsValue> {
    edit_ledger(ledger_json, |ledger| {
        ledger.update_weight(index, raw);
    })
    .map_err(js_error)
}

fn ledger_totals_inner(ledger_json: &str) -> Result<String, String> {
    let ledger = parse_ledger(ledger_json)?;
    serde_json::to_string(&ledger.totals()).map_err(|e| e.to_string())
}

/// `{totalKg, totalBosta}` of a ledger
#[wasm_bindgen(js_name = ledgerTotals)]
pub fn ledger_totals(ledger_json: &str) -> Result<String, JsValue> {
    ledger_totals_inner(ledger_json).map_err(js_error)
}

// ============================================================================
// Stock summary
// ============================================================================

fn stock_summary_inner(payload_json: &str) -> (String, Vec<ProductCategory>) {
    let decoded = serde_json::from_str::<serde_json::Value>(payload_json)
        .ok()
        .and_then(|payload| decode_stock_response(&payload).ok());

    let (summary, degraded) = match decoded {
        Some(decoded) => (decoded.summary, decoded.degraded),
        None => (StockSummary::default(), ProductCategory::ALL.to_vec()),
    };
    let json = serde_json::to_string(&summary).unwrap_or_else(|_| "{}".to_string());
    (json, degraded)
}

/// Build `{paddy, rice, bran}` from a raw `/stock` body
///
/// Never throws: malformed categories come back empty.
#[wasm_bindgen(js_name = buildStockSummary)]
pub fn build_stock_summary(payload_json: &str) -> String {
    let (json, degraded) = stock_summary_inner(payload_json);
    if !degraded.is_empty() {
        warn_degraded(&degraded);
    }
    json
}

#[cfg(target_arch = "wasm32")]
fn warn_degraded(degraded: &[ProductCategory]) {
    let names: Vec<&str> = degraded.iter().map(ProductCategory::key).collect();
    web_sys::console::warn_1(&JsValue::from_str(&format!(
        "stock payload malformed for: {}",
        names.join(", ")
    )));
}

#[cfg(not(target_arch = "wasm32"))]
fn warn_degraded(_degraded: &[ProductCategory]) {}

// ============================================================================
// Payments
// ============================================================================

fn due_inner(total: f64, paid: f64) -> Result<f64, String> {
    Ok(to_f64(shared::calculate_due(
        to_decimal(total)?,
        to_decimal(paid)?,
    )))
}

fn total_price_inner(total_kg: f64, price_per_kg: f64) -> Result<f64, String> {
    Ok(to_f64(shared::calculate_total_price(
        to_decimal(total_kg)?,
        to_decimal(price_per_kg)?,
    )))
}

/// Outstanding due after paying `paid` against `total`
#[wasm_bindgen(js_name = calculateDue)]
pub fn calculate_due(total: f64, paid: f64) -> Result<f64, JsValue> {
    due_inner(total, paid).map_err(js_error)
}

/// Bill total for a weight at a per-kg price
#[wasm_bindgen(js_name = calculateTotalPrice)]
pub fn calculate_total_price(total_kg: f64, price_per_kg: f64) -> Result<f64, JsValue> {
    total_price_inner(total_kg, price_per_kg).map_err(js_error)
}

/// Whether a payment amount is acceptable for the current due
///
/// Unrepresentable numbers are never acceptable.
#[wasm_bindgen(js_name = isValidPaymentAmount)]
pub fn is_valid_payment_amount(amount: f64, due: f64) -> bool {
    match (to_decimal(amount), to_decimal(due)) {
        (Ok(amount), Ok(due)) => validate_payment_amount(amount, due).is_ok(),
        _ => false,
    }
}
