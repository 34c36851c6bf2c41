//! Gel mixing calculator
//!
//! Weights each selected primary gel by how close its reference colour is to the
//! target, then scales the weights into grams of gel for the fondant mass.

use std::collections::BTreeMap;

use crate::models::{MixError, MixingRecipe, MixingRequest, PrimaryColor};
use crate::services::instructions::mixing_instructions;

/// Added to every distance so an exact match never divides by zero
pub const SIMILARITY_EPSILON: f64 = 1.0;

/// Typical gel colour ratio is ~0.03% of fondant weight
pub const BASE_CONCENTRATION: f64 = 0.0003;

/// Similarity of a gel to the target: 1 / (distance + ε)
#[inline]
fn similarity(distance: f64) -> f64 {
    1.0 / (distance + SIMILARITY_EPSILON)
}

/// Normalised similarity ratios for the selected gels, summing to 1.0
pub fn mixing_ratios(request: &MixingRequest) -> Result<BTreeMap<PrimaryColor, f64>, MixError> {
    if request.selected.is_empty() {
        return Err(MixError::InvalidRequest(
            "Please select at least one primary color".into(),
        ));
    }

    let scores: Vec<(PrimaryColor, f64)> = request
        .selected
        .iter()
        .map(|&color| {
            let distance = request.target.distance(&color.reference());
            (color, similarity(distance))
        })
        .collect();

    let total: f64 = scores.iter().map(|(_, s)| s).sum();

    Ok(scores
        .into_iter()
        .map(|(color, score)| (color, score / total))
        .collect())
}

/// Compute how many grams of each selected gel to knead into the fondant
pub fn compute_recipe(request: &MixingRequest) -> Result<MixingRecipe, MixError> {
    if !request.mass_grams.is_finite() || request.mass_grams <= 0.0 {
        return Err(MixError::InvalidRequest(format!(
            "Fondant weight must be greater than 0, got {}",
            request.mass_grams
        )));
    }

    let brand_multiplier = request.calibration.multiplier_for(request.brand);
    if !brand_multiplier.is_finite() || brand_multiplier <= 0.0 {
        return Err(MixError::InvalidRequest(format!(
            "Invalid multiplier for {}: {}",
            request.brand.as_str(),
            brand_multiplier
        )));
    }

    let drop_conversion = request.calibration.drop_conversion;
    let grams_per_drop = drop_conversion.grams_per_drop;
    if drop_conversion.enabled && (!grams_per_drop.is_finite() || grams_per_drop <= 0.0) {
        return Err(MixError::InvalidRequest(format!(
            "Invalid grams_per_drop value: {}",
            grams_per_drop
        )));
    }

    let ratios = mixing_ratios(request)?;

    let scale = request.mass_grams * BASE_CONCENTRATION * brand_multiplier;
    let amounts: BTreeMap<PrimaryColor, f64> = ratios
        .iter()
        .map(|(&color, &ratio)| (color, ratio * scale))
        .collect();

    let drops = drop_conversion.enabled.then(|| {
        amounts
            .iter()
            .map(|(&color, &grams)| (color, grams / grams_per_drop))
            .collect()
    });

    let mut recipe = MixingRecipe {
        brand: request.brand,
        mass_grams: request.mass_grams,
        brand_multiplier,
        ratios,
        amounts,
        drops,
        grams_per_drop,
        instructions: Vec::new(),
    };
    recipe.instructions = mixing_instructions(&recipe);

    tracing::debug!(
        target_hex = %request.target.to_hex(),
        brand = request.brand.as_str(),
        colors = recipe.amounts.len(),
        total_grams = recipe.total_grams(),
        "computed gel recipe"
    );

    Ok(recipe)
}
