use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::models::{Brand, Calibration, PrimaryColor, Rgb};

/// Everything needed to compute one recipe
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MixingRequest {
    pub target: Rgb,
    pub mass_grams: f64,
    pub selected: BTreeSet<PrimaryColor>,
    pub brand: Brand,
    pub calibration: Calibration,
}

/// Result of a gel mixing calculation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MixingRecipe {
    pub brand: Brand,
    pub mass_grams: f64,
    pub brand_multiplier: f64,
    /// Share of each selected gel, summing to 1.0
    pub ratios: BTreeMap<PrimaryColor, f64>,
    /// Gel amount in grams
    pub amounts: BTreeMap<PrimaryColor, f64>,
    pub drops: Option<BTreeMap<PrimaryColor, f64>>,
    pub grams_per_drop: f64,
    pub instructions: Vec<String>,
}

impl MixingRecipe {
    /// Colours largest amount first; equal amounts keep enumeration order.
    pub fn addition_order(&self) -> Vec<PrimaryColor> {
        let mut order: Vec<(PrimaryColor, f64)> =
            self.amounts.iter().map(|(&c, &a)| (c, a)).collect();
        // BTreeMap iteration is already in enumeration order and sort_by is stable
        order.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        order.into_iter().map(|(c, _)| c).collect()
    }

    pub fn total_grams(&self) -> f64 {
        self.amounts.values().sum()
    }
}

/// Errors that can occur during gel mixing
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum MixError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}
