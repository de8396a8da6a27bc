//! Counterparty and organisation models: farmers, customers, employees, mills

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// A farmer selling paddy to the mill
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Farmer {
    pub id: Uuid,
    pub name: String,
    pub phone: String,
    pub address: Option<String>,
    pub national_id: Option<String>,
    /// Amount the mill still owes this farmer
    #[serde(default)]
    pub due_amount: Decimal,
    pub created_at: DateTime<Utc>,
}

/// Payload for registering a farmer
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewFarmer {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(custom = "crate::validation::validate_phone_field")]
    pub phone: String,
    pub address: Option<String>,
    #[validate(custom = "crate::validation::validate_national_id_field")]
    pub national_id: Option<String>,
}

/// A customer buying rice or bran from the mill
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: Uuid,
    pub name: String,
    pub phone: String,
    pub address: Option<String>,
    pub business_name: Option<String>,
    /// Amount this customer still owes the mill
    #[serde(default)]
    pub due_amount: Decimal,
    pub created_at: DateTime<Utc>,
}

/// Payload for registering a customer
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewCustomer {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(custom = "crate::validation::validate_phone_field")]
    pub phone: String,
    pub address: Option<String>,
    #[validate(length(max = 150))]
    pub business_name: Option<String>,
}

/// A mill employee
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: Uuid,
    pub name: String,
    pub phone: String,
    pub designation: String,
    pub monthly_salary: Decimal,
    pub joined_on: NaiveDate,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

/// Payload for adding an employee
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewEmployee {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(custom = "crate::validation::validate_phone_field")]
    pub phone: String,
    #[validate(length(min = 1, max = 60))]
    pub designation: String,
    #[validate(custom = "crate::validation::validate_amount_field")]
    pub monthly_salary: Decimal,
    pub joined_on: NaiveDate,
}

/// A rice mill registered on the platform
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mill {
    pub id: Uuid,
    pub name: String,
    pub owner_name: String,
    pub phone: String,
    pub address: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// Payload for registering a mill
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewMill {
    #[validate(length(min = 1, max = 150))]
    pub name: String,
    #[validate(length(min = 1, max = 100))]
    pub owner_name: String,
    #[validate(custom = "crate::validation::validate_phone_field")]
    pub phone: String,
    pub address: Option<String>,
}

fn default_true() -> bool {
    true
}
