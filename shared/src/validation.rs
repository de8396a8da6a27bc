//! Validation utilities for the Rice Mill Management Platform
//!
//! Form-boundary checks for quantities, sack sizes and payments, plus
//! Bangladesh-specific contact validations.

use std::borrow::Cow;
use std::str::FromStr;

use rust_decimal::Decimal;
use validator::ValidationError;

use crate::models::{
    BostaSize, NewPaddyPurchase, NewProductionBatch, NewSale, ProductCategory, Quantity,
};

// ============================================================================
// Quantity Validations
// ============================================================================

/// Largest weight accepted from a single form field
pub const MAX_WEIGHT_INPUT_KG: u32 = 1_000_000;

/// Validate a sack size selected on a form
pub fn validate_bosta_size(kg: u32) -> Result<(), &'static str> {
    BostaSize::try_from(kg)
        .map(|_| ())
        .map_err(|_| "Sack size must be 25kg or 50kg")
}

/// Validate a quantity entry: no negative parts and something to record
pub fn validate_quantity(quantity: &Quantity) -> Result<(), &'static str> {
    if quantity.kg < Decimal::ZERO || quantity.bosta < Decimal::ZERO {
        return Err("Quantity cannot be negative");
    }
    if quantity.total_kg().is_zero() {
        return Err("Quantity must be greater than zero");
    }
    Ok(())
}

/// Parse a weight typed into a form field
///
/// Empty, non-numeric, negative and implausibly large input (above
/// [`MAX_WEIGHT_INPUT_KG`]) all become 0. Digit grouping commas are ignored.
pub fn parse_weight_input(raw: &str) -> Decimal {
    let cleaned: String = raw.trim().chars().filter(|c| *c != ',').collect();
    Decimal::from_str(&cleaned)
        .ok()
        .filter(|w| *w > Decimal::ZERO && *w <= Decimal::from(MAX_WEIGHT_INPUT_KG))
        .unwrap_or(Decimal::ZERO)
}

/// Validate a product type name (paddy/rice/bran variety)
pub fn validate_type_name(name: &str) -> Result<(), &'static str> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err("Type name is required");
    }
    if trimmed.chars().count() > 60 {
        return Err("Type name must be at most 60 characters");
    }
    Ok(())
}

// ============================================================================
// Money Validations
// ============================================================================

/// Validate a per-kg price
pub fn validate_price(price: Decimal) -> Result<(), &'static str> {
    if price <= Decimal::ZERO {
        return Err("Price must be greater than zero");
    }
    Ok(())
}

/// Validate the amount paid up front against the bill total
pub fn validate_paid_amount(paid: Decimal, total: Decimal) -> Result<(), &'static str> {
    if paid < Decimal::ZERO {
        return Err("Paid amount cannot be negative");
    }
    if paid > total {
        return Err("Paid amount cannot exceed the total");
    }
    Ok(())
}

/// Validate a payment against the outstanding due
pub fn validate_payment_amount(amount: Decimal, due: Decimal) -> Result<(), &'static str> {
    if amount <= Decimal::ZERO {
        return Err("Payment amount must be greater than zero");
    }
    if amount > due {
        return Err("Payment amount cannot exceed the due amount");
    }
    Ok(())
}

// ============================================================================
// Form Validations
// ============================================================================

/// Validate a paddy purchase before submission
pub fn validate_purchase(purchase: &NewPaddyPurchase) -> Result<(), &'static str> {
    validate_type_name(&purchase.paddy_type)?;
    if purchase.bostas.is_empty() {
        return Err("Add at least one sack");
    }
    if purchase.bostas.unweighed().next().is_some() {
        return Err("Every sack must be weighed");
    }
    validate_price(purchase.price_per_kg)?;
    validate_paid_amount(purchase.paid_amount, purchase.total_price())
}

/// Validate a production batch before submission
pub fn validate_production(batch: &NewProductionBatch) -> Result<(), &'static str> {
    validate_type_name(&batch.paddy_type)?;
    validate_quantity(&batch.paddy_used)?;
    if batch.outputs.is_empty() {
        return Err("Record at least one output");
    }
    for output in &batch.outputs {
        if output.category == ProductCategory::Paddy {
            return Err("Production output must be rice or bran");
        }
        validate_type_name(&output.type_name)?;
        validate_quantity(&output.quantity)?;
    }
    Ok(())
}

/// Validate a sale before submission
pub fn validate_sale(sale: &NewSale) -> Result<(), &'static str> {
    validate_type_name(&sale.type_name)?;
    validate_quantity(&sale.quantity)?;
    validate_price(sale.price_per_kg)?;
    validate_paid_amount(sale.paid_amount, sale.total_price())
}

// ============================================================================
// General Validations
// ============================================================================

/// Validate email format (basic check)
pub fn validate_email(email: &str) -> Result<(), &'static str> {
    if email.contains('@') && email.contains('.') && email.len() >= 5 {
        Ok(())
    } else {
        Err("Invalid email format")
    }
}

/// Validate password strength
pub fn validate_password(password: &str) -> Result<(), &'static str> {
    if password.len() < 8 {
        return Err("Password must be at least 8 characters");
    }
    Ok(())
}

// ============================================================================
// Bangladesh-Specific Validations
// ============================================================================

/// Validate Bangladeshi mobile number
/// Accepts: 01712345678, 017-1234-5678, +8801712345678
pub fn validate_bd_phone(phone: &str) -> Result<(), &'static str> {
    let digits: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();

    let local = if digits.len() == 13 && digits.starts_with("880") {
        &digits[2..]
    } else {
        digits.as_str()
    };

    // 01 followed by an operator digit 3-9, then 8 digits
    let operator_ok = local
        .chars()
        .nth(2)
        .map(|c| ('3'..='9').contains(&c))
        .unwrap_or(false);
    if local.len() == 11 && local.starts_with("01") && operator_ok {
        return Ok(());
    }

    Err("Invalid Bangladeshi mobile number")
}

/// Validate Bangladeshi National ID: 10 (smart card), 13 or 17 digits
pub fn validate_bd_national_id(id: &str) -> Result<(), &'static str> {
    if !id.chars().all(|c| c.is_ascii_digit()) {
        return Err("National ID must contain digits only");
    }
    match id.len() {
        10 | 13 | 17 => Ok(()),
        _ => Err("National ID must be 10, 13 or 17 digits"),
    }
}

// ============================================================================
// Field adapters for `#[derive(Validate)]`
// ============================================================================

fn field_error(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Borrowed(message));
    error
}

pub fn validate_phone_field(phone: &str) -> Result<(), ValidationError> {
    validate_bd_phone(phone).map_err(|m| field_error("phone", m))
}

pub fn validate_national_id_field(id: &str) -> Result<(), ValidationError> {
    validate_bd_national_id(id).map_err(|m| field_error("national_id", m))
}

pub fn validate_amount_field(amount: &Decimal) -> Result<(), ValidationError> {
    if *amount < Decimal::ZERO {
        return Err(field_error("amount", "Amount cannot be negative"));
    }
    Ok(())
}
