use std::collections::BTreeMap;

use leptos::prelude::*;
use leptos::server_fn::codec::Json;
use serde::{Deserialize, Serialize};

use crate::models::{Brand, Calibration, MixingRecipe, PrimaryColor, Rgb};

/// Gel brand info for the frontend
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct GelBrandInfo {
    pub id: Brand,
    pub name: String,
    pub description: String,
}

/// Primary gel info for the frontend
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct PrimaryColorInfo {
    pub id: PrimaryColor,
    pub name: String,
    pub hex: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct GelOptions {
    pub brands: Vec<GelBrandInfo>,
    pub colors: Vec<PrimaryColorInfo>,
}

/// Stored calibration and when it was last saved
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct CalibrationSettings {
    pub calibration: Calibration,
    pub updated_at: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct TargetColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub hex: String,
}

/// Mixing result as sent to the frontend
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct GelMixResponse {
    pub target_color: TargetColor,
    pub gel_amounts: BTreeMap<PrimaryColor, f64>,
    pub gel_amounts_mg: BTreeMap<PrimaryColor, f64>,
    pub gel_amounts_drops: Option<BTreeMap<PrimaryColor, f64>>,
    pub mixing_instructions: Vec<String>,
    pub brand_info: String,
}

fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

impl GelMixResponse {
    /// Display rounding: grams to 4 places, milligrams to 2, drops to 1
    pub fn from_recipe(target: Rgb, recipe: MixingRecipe) -> Self {
        let gel_amounts = recipe
            .amounts
            .iter()
            .map(|(&c, &g)| (c, round_to(g, 4)))
            .collect();
        let gel_amounts_mg = recipe
            .amounts
            .iter()
            .map(|(&c, &g)| (c, round_to(g * 1000.0, 2)))
            .collect();
        let gel_amounts_drops = recipe
            .drops
            .map(|drops| drops.into_iter().map(|(c, d)| (c, round_to(d, 1))).collect());

        Self {
            target_color: TargetColor {
                r: target.r,
                g: target.g,
                b: target.b,
                hex: target.to_hex(),
            },
            gel_amounts,
            gel_amounts_mg,
            gel_amounts_drops,
            mixing_instructions: recipe.instructions,
            brand_info: recipe.brand.description().to_string(),
        }
    }
}

pub fn gel_options() -> GelOptions {
    GelOptions {
        brands: Brand::all()
            .into_iter()
            .map(|b| GelBrandInfo {
                id: b,
                name: b.as_str().to_string(),
                description: b.description().to_string(),
            })
            .collect(),
        colors: PrimaryColor::all()
            .into_iter()
            .map(|c| PrimaryColorInfo {
                id: c,
                name: c.display_name().to_string(),
                hex: c.reference().to_hex(),
            })
            .collect(),
    }
}

/// Get available brands and primary gels
#[server]
pub async fn list_gel_options() -> Result<GelOptions, ServerFnError> {
    Ok(gel_options())
}

/// Get current calibration settings
#[server]
pub async fn get_calibration() -> Result<CalibrationSettings, ServerFnError> {
    use crate::db;
    use crate::state::AppState;
    use axum::Extension;
    use leptos_axum::extract;

    let Extension(state) = extract::<Extension<AppState>>()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let calibration = db::load_calibration(&state.db)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;
    let updated_at = db::calibration_updated_at(&state.db)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    Ok(CalibrationSettings {
        calibration,
        updated_at,
    })
}

/// Replace the calibration settings
#[server(input = Json)]
pub async fn update_calibration(calibration: Calibration) -> Result<(), ServerFnError> {
    use crate::db;
    use crate::state::AppState;
    use axum::Extension;
    use leptos_axum::extract;

    let Extension(state) = extract::<Extension<AppState>>()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    db::save_calibration(&state.db, &calibration)
        .await
        .map_err(|e| {
            tracing::warn!(error = %e, "rejected calibration update");
            ServerFnError::new(e.to_string())
        })
}

/// Calculate gel amounts for a `#rrggbb` target colour picked from the user's photo
#[server]
pub async fn mix_gel_colors(
    target: String,
    weight: String,
    brand: String,
    colors: Vec<String>,
    brand_multiplier: Option<String>,
    show_drops: Option<bool>,
) -> Result<GelMixResponse, ServerFnError> {
    use crate::db;
    use crate::services::gel_mixing::compute_recipe;
    use crate::services::validation::{parse_target, validate_mix_fields, RawMixFields};
    use crate::state::AppState;
    use axum::Extension;
    use leptos_axum::extract;

    let Extension(state) = extract::<Extension<AppState>>()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let target = parse_target(&target).map_err(|e| ServerFnError::new(e.to_string()))?;
    let raw = RawMixFields {
        weight,
        brand,
        colors,
        brand_multiplier,
        show_drops,
    };

    let calibration = db::load_calibration(&state.db).await.map_err(|e| {
        tracing::error!(error = %e, "failed to load calibration");
        ServerFnError::new(e.to_string())
    })?;
    let request = validate_mix_fields(target, &raw, calibration)
        .map_err(|e| ServerFnError::new(e.to_string()))?;
    let recipe = compute_recipe(&request).map_err(|e| ServerFnError::new(e.to_string()))?;

    tracing::info!(
        color = %target.to_hex(),
        brand = recipe.brand.as_str(),
        grams = recipe.total_grams(),
        "gel mix calculated"
    );

    Ok(GelMixResponse::from_recipe(target, recipe))
}
