//! Per-sack weight ledger for paddy purchases and production batches

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::validation::parse_weight_input;

/// A single numbered sack with its measured weight
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaddyBosta {
    /// Position in the ledger, contiguous from 1
    pub bosta_no: u32,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub weight_kg: Decimal,
}

/// Totals derived from a ledger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerTotals {
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub total_kg: Decimal,
    pub total_bosta: usize,
}

/// Editable, ordered list of individually weighed sacks
///
/// Sack numbers are always `1..=len` in list order. The ledger is
/// serialized as a flat array so it can be submitted as-is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<PaddyBosta>", into = "Vec<PaddyBosta>")]
pub struct BostaLedger {
    entries: Vec<PaddyBosta>,
}

impl BostaLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a ledger from measured weights, numbering sacks in order
    pub fn from_weights<I>(weights: I) -> Self
    where
        I: IntoIterator<Item = Decimal>,
    {
        let entries = weights
            .into_iter()
            .map(|weight_kg| PaddyBosta {
                bosta_no: 0,
                weight_kg: weight_kg.max(Decimal::ZERO),
            })
            .collect();
        let mut ledger = Self { entries };
        ledger.renumber();
        ledger
    }

    pub fn entries(&self) -> &[PaddyBosta] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Append an empty sack and return its number
    pub fn add_bosta(&mut self) -> u32 {
        let bosta_no = self
            .entries
            .iter()
            .map(|b| b.bosta_no)
            .max()
            .map_or(1, |max| max + 1);
        self.entries.push(PaddyBosta {
            bosta_no,
            weight_kg: Decimal::ZERO,
        });
        bosta_no
    }

    /// Remove the sack at `index` and renumber the rest
    ///
    /// Returns `None` and leaves the ledger untouched when `index` is out of range.
    pub fn remove_bosta(&mut self, index: usize) -> Option<PaddyBosta> {
        if index >= self.entries.len() {
            return None;
        }
        let removed = self.entries.remove(index);
        self.renumber();
        Some(removed)
    }

    /// Set the weight of the sack at `index` from raw form input
    ///
    /// Empty, non-numeric or negative input is stored as 0.
    pub fn update_weight(&mut self, index: usize, raw: &str) -> bool {
        self.set_weight(index, parse_weight_input(raw))
    }

    /// Set the weight of the sack at `index`, clamping negatives to 0
    pub fn set_weight(&mut self, index: usize, weight_kg: Decimal) -> bool {
        match self.entries.get_mut(index) {
            Some(entry) => {
                entry.weight_kg = weight_kg.max(Decimal::ZERO);
                true
            }
            None => false,
        }
    }

    /// Weight and count of all sacks; the weight sum clamps at the decimal range
    pub fn totals(&self) -> LedgerTotals {
        LedgerTotals {
            total_kg: self
                .entries
                .iter()
                .fold(Decimal::ZERO, |total, b| total.saturating_add(b.weight_kg)),
            total_bosta: self.entries.len(),
        }
    }

    /// Sacks that have not been weighed yet
    pub fn unweighed(&self) -> impl Iterator<Item = &PaddyBosta> {
        self.entries.iter().filter(|b| b.weight_kg.is_zero())
    }

    pub fn into_entries(self) -> Vec<PaddyBosta> {
        self.entries
    }

    fn renumber(&mut self) {
        for (position, entry) in self.entries.iter_mut().enumerate() {
            entry.bosta_no = position as u32 + 1;
        }
    }
}

impl From<Vec<PaddyBosta>> for BostaLedger {
    fn from(entries: Vec<PaddyBosta>) -> Self {
        Self::from_weights(entries.into_iter().map(|b| b.weight_kg))
    }
}

impl From<BostaLedger> for Vec<PaddyBosta> {
    fn from(ledger: BostaLedger) -> Self {
        ledger.entries
    }
}
