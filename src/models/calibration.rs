use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::Brand;

/// Multiplier used when a brand has no calibrated entry
pub const DEFAULT_BRAND_MULTIPLIER: f64 = 1.0;

/// Standard: 1 drop = 0.04 grams
pub const DEFAULT_GRAMS_PER_DROP: f64 = 0.04;

/// Grams to drops conversion settings
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct DropConversion {
    pub enabled: bool,
    pub grams_per_drop: f64,
}

impl Default for DropConversion {
    fn default() -> Self {
        Self {
            enabled: false,
            grams_per_drop: DEFAULT_GRAMS_PER_DROP,
        }
    }
}

/// User-adjustable brand intensities and drop conversion.
///
/// Handed to the calculator as a snapshot; the calculator never writes it back.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Calibration {
    pub brand_multipliers: BTreeMap<Brand, f64>,
    pub drop_conversion: DropConversion,
}

/// Problems with stored or submitted calibration data
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum CalibrationError {
    #[error("Invalid multiplier for {brand}: {value}")]
    InvalidMultiplier { brand: &'static str, value: f64 },
    #[error("Invalid grams_per_drop value: {0}")]
    InvalidGramsPerDrop(f64),
}

impl Default for Calibration {
    fn default() -> Self {
        Self {
            brand_multipliers: Brand::all()
                .into_iter()
                .map(|brand| (brand, brand.factory_multiplier()))
                .collect(),
            drop_conversion: DropConversion::default(),
        }
    }
}

impl Calibration {
    /// Multiplier for `brand`, or [`DEFAULT_BRAND_MULTIPLIER`] if the brand was never calibrated.
    /// Stored values are returned as-is, including invalid ones.
    pub fn multiplier_for(&self, brand: Brand) -> f64 {
        self.brand_multipliers
            .get(&brand)
            .copied()
            .unwrap_or(DEFAULT_BRAND_MULTIPLIER)
    }

    pub fn with_multiplier(mut self, brand: Brand, multiplier: f64) -> Self {
        self.brand_multipliers.insert(brand, multiplier);
        self
    }

    pub fn with_drops(mut self, enabled: bool) -> Self {
        self.drop_conversion.enabled = enabled;
        self
    }

    pub fn validate(&self) -> Result<(), CalibrationError> {
        for (brand, &value) in &self.brand_multipliers {
            if !value.is_finite() || value <= 0.0 {
                return Err(CalibrationError::InvalidMultiplier {
                    brand: brand.as_str(),
                    value,
                });
            }
        }
        let gpd = self.drop_conversion.grams_per_drop;
        if !gpd.is_finite() || gpd <= 0.0 {
            return Err(CalibrationError::InvalidGramsPerDrop(gpd));
        }
        Ok(())
    }
}
