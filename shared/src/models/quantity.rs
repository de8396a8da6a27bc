//! Sack-size aware quantity model
//!
//! Every purchase, production, sale and stock screen converts between loose
//! kilograms and sack (bosta) counts through the functions in this module.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::UnitError;

/// Nominal weight of one standard sack
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum BostaSize {
    Kg25,
    #[default]
    Kg50,
}

impl BostaSize {
    /// All recognized sack sizes, smallest first
    pub const ALL: [BostaSize; 2] = [BostaSize::Kg25, BostaSize::Kg50];

    pub fn kg(&self) -> u32 {
        match self {
            BostaSize::Kg25 => 25,
            BostaSize::Kg50 => 50,
        }
    }

    pub fn as_decimal(&self) -> Decimal {
        Decimal::from(self.kg())
    }

    /// Label shown next to the sack-size selector
    pub fn label(&self) -> &'static str {
        match self {
            BostaSize::Kg25 => "25kg sack",
            BostaSize::Kg50 => "50kg sack",
        }
    }
}

impl TryFrom<u32> for BostaSize {
    type Error = UnitError;

    fn try_from(kg: u32) -> Result<Self, Self::Error> {
        match kg {
            25 => Ok(BostaSize::Kg25),
            50 => Ok(BostaSize::Kg50),
            other => Err(UnitError::InvalidBostaSize(other)),
        }
    }
}

impl From<BostaSize> for u32 {
    fn from(size: BostaSize) -> Self {
        size.kg()
    }
}

impl std::fmt::Display for BostaSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}kg", self.kg())
    }
}

/// Sack-size options as `(kg, label)` pairs for form selectors
pub fn bosta_size_options() -> Vec<(u32, &'static str)> {
    BostaSize::ALL.iter().map(|s| (s.kg(), s.label())).collect()
}

fn non_negative(value: Decimal) -> Decimal {
    value.max(Decimal::ZERO)
}

/// Total weight of loose kilograms plus a sack count
///
/// Negative inputs are clamped to zero; results beyond the decimal range
/// clamp to `Decimal::MAX`.
pub fn calculate_total_kg(kg: Decimal, bosta: Decimal, bosta_size: BostaSize) -> Decimal {
    non_negative(kg).saturating_add(bosta_to_kg(bosta, bosta_size))
}

/// Weight of a (possibly fractional) sack count
pub fn bosta_to_kg(bosta: Decimal, bosta_size: BostaSize) -> Decimal {
    non_negative(bosta).saturating_mul(bosta_size.as_decimal())
}

/// Sack count equivalent of a raw weight
pub fn kg_to_bosta(kg: Decimal, bosta_size: BostaSize) -> Decimal {
    non_negative(kg) / bosta_size.as_decimal()
}

/// A quantity entered on a form: loose kilograms plus sacks of a given size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quantity {
    #[serde(default, serialize_with = "rust_decimal::serde::float::serialize")]
    pub kg: Decimal,
    #[serde(default, serialize_with = "rust_decimal::serde::float::serialize")]
    pub bosta: Decimal,
    #[serde(default)]
    pub bosta_size: BostaSize,
}

impl Quantity {
    /// Create a quantity, rejecting negative components
    pub fn new(kg: Decimal, bosta: Decimal, bosta_size: BostaSize) -> Result<Self, UnitError> {
        if kg < Decimal::ZERO {
            return Err(UnitError::NegativeQuantity("kg"));
        }
        if bosta < Decimal::ZERO {
            return Err(UnitError::NegativeQuantity("bosta"));
        }
        Ok(Self {
            kg,
            bosta,
            bosta_size,
        })
    }

    /// A quantity made only of whole or fractional sacks
    pub fn sacks(bosta: Decimal, bosta_size: BostaSize) -> Result<Self, UnitError> {
        Self::new(Decimal::ZERO, bosta, bosta_size)
    }

    pub fn total_kg(&self) -> Decimal {
        calculate_total_kg(self.kg, self.bosta, self.bosta_size)
    }

    /// Whole quantity expressed in sacks of this quantity's size
    pub fn total_bosta_equivalent(&self) -> Decimal {
        kg_to_bosta(self.total_kg(), self.bosta_size)
    }

    pub fn is_zero(&self) -> bool {
        self.total_kg().is_zero()
    }
}

/// Sum the total weight of a set of quantities, each with its own sack size
///
/// Entries are neither deduplicated nor filtered. The sum clamps at the
/// decimal range.
pub fn aggregate_total_kg(entries: &[Quantity]) -> Decimal {
    entries
        .iter()
        .fold(Decimal::ZERO, |total, q| total.saturating_add(q.total_kg()))
}
