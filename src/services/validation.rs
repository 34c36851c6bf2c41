//! Turns raw form fields into a [`MixingRequest`] before anything reaches the calculator.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::models::{Brand, Calibration, MixError, MixingRequest, PrimaryColor, Rgb};

pub const MIN_FONDANT_GRAMS: f64 = 1.0;
pub const MAX_FONDANT_GRAMS: f64 = 10_000.0;

/// Unparsed fields as submitted by the form
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RawMixFields {
    pub weight: String,
    pub brand: String,
    pub colors: Vec<String>,
    pub brand_multiplier: Option<String>,
    pub show_drops: Option<bool>,
}

fn invalid(message: impl Into<String>) -> MixError {
    MixError::InvalidRequest(message.into())
}

pub fn validate_range(field_name: &str, value: f64, min: f64, max: f64) -> Result<(), MixError> {
    if !value.is_finite() || value < min || value > max {
        return Err(invalid(format!(
            "{} must be between {} and {}, got {}",
            field_name, min, max, value
        )));
    }
    Ok(())
}

pub fn validate_non_empty<'a, T>(field_name: &str, values: &'a [T]) -> Result<&'a [T], MixError> {
    if values.is_empty() {
        return Err(invalid(format!("{} cannot be empty", field_name)));
    }
    Ok(values)
}

pub fn parse_weight(raw: &str) -> Result<f64, MixError> {
    let weight: f64 = raw
        .trim()
        .parse()
        .map_err(|_| invalid("Invalid fondant weight. Please enter a valid number."))?;
    validate_range("Fondant weight", weight, MIN_FONDANT_GRAMS, MAX_FONDANT_GRAMS)?;
    Ok(weight)
}

pub fn parse_colors(raw: &[String]) -> Result<BTreeSet<PrimaryColor>, MixError> {
    validate_non_empty("Primary color selection", raw)?
        .iter()
        .map(|name| {
            PrimaryColor::from_str(name)
                .ok_or_else(|| invalid(format!("Unknown primary color: {}", name)))
        })
        .collect()
}

/// Parse the `#rrggbb` target colour submitted by the colour picker
pub fn parse_target(raw: &str) -> Result<Rgb, MixError> {
    Rgb::from_hex(raw.trim())
        .ok_or_else(|| invalid(format!("Invalid target color: {}", raw)))
}

pub fn parse_brand(raw: &str) -> Result<Brand, MixError> {
    Brand::from_str(raw).ok_or_else(|| invalid("Invalid gel brand"))
}

/// Validate raw fields and build a request against a calibration snapshot.
///
/// A `brand_multiplier` that does not parse is ignored and the stored value is used.
pub fn validate_mix_fields(
    target: Rgb,
    raw: &RawMixFields,
    calibration: Calibration,
) -> Result<MixingRequest, MixError> {
    let mass_grams = parse_weight(&raw.weight)?;
    let brand = parse_brand(&raw.brand)?;
    let selected = parse_colors(&raw.colors)?;

    let mut calibration = calibration;
    if let Some(multiplier) = raw
        .brand_multiplier
        .as_deref()
        .and_then(|m| m.trim().parse::<f64>().ok())
    {
        calibration = calibration.with_multiplier(brand, multiplier);
    }
    if let Some(show) = raw.show_drops {
        calibration = calibration.with_drops(show);
    }

    Ok(MixingRequest {
        target,
        mass_grams,
        selected,
        brand,
        calibration,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(weight: &str, brand: &str, colors: &[&str]) -> RawMixFields {
        RawMixFields {
            weight: weight.to_string(),
            brand: brand.to_string(),
            colors: colors.iter().map(|c| c.to_string()).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("weight", 1.0, 1.0, 10.0).is_ok());
        assert!(validate_range("weight", 10.0, 1.0, 10.0).is_ok());
        assert!(validate_range("weight", 0.5, 1.0, 10.0).is_err());
        assert!(validate_range("weight", f64::INFINITY, 1.0, 10.0).is_err());
    }

    #[test]
    fn test_parse_weight() {
        assert_eq!(parse_weight(" 250 ").unwrap(), 250.0);
        assert!(parse_weight("0").is_err());
        assert!(parse_weight("10001").is_err());
        assert!(parse_weight("-5").is_err());
        assert!(parse_weight("heavy").is_err());
    }

    #[test]
    fn test_parse_target() {
        assert_eq!(parse_target(" #ff0000 ").unwrap(), Rgb::new(255, 0, 0));
        assert_eq!(
            parse_target("red"),
            Err(MixError::InvalidRequest("Invalid target color: red".into()))
        );
    }

    #[test]
    fn empty_selection_message() {
        assert_eq!(
            parse_colors(&[]),
            Err(MixError::InvalidRequest(
                "Primary color selection cannot be empty".into()
            ))
        );
    }

    #[test]
    fn duplicate_colors_collapse() {
        let colors = parse_colors(&["Red".into(), "red".into(), "blue".into()]).unwrap();
        assert_eq!(colors.len(), 2);
    }

    #[test]
    fn rejects_unknown_names() {
        let cal = Calibration::default();
        let target = Rgb::new(0, 0, 0);
        assert!(validate_mix_fields(target, &fields("100", "Wilton", &[]), cal.clone()).is_err());
        assert!(
            validate_mix_fields(target, &fields("100", "Wilton", &["teal"]), cal.clone()).is_err()
        );
        assert_eq!(
            validate_mix_fields(target, &fields("100", "Acme", &["red"]), cal),
            Err(MixError::InvalidRequest("Invalid gel brand".into()))
        );
    }

    #[test]
    fn multiplier_override_and_drop_toggle() {
        let mut raw = fields("100", "Generic", &["red", "white"]);
        raw.brand_multiplier = Some("1.5".into());
        raw.show_drops = Some(true);

        let req = validate_mix_fields(Rgb::new(9, 9, 9), &raw, Calibration::default()).unwrap();
        assert_eq!(req.brand, Brand::Generic);
        assert_eq!(req.calibration.multiplier_for(Brand::Generic), 1.5);
        assert!(req.calibration.drop_conversion.enabled);
    }

    #[test]
    fn unparseable_override_keeps_stored_multiplier() {
        let mut raw = fields("100", "AmeriColor", &["red"]);
        raw.brand_multiplier = Some("strong".into());
        let req = validate_mix_fields(Rgb::new(9, 9, 9), &raw, Calibration::default()).unwrap();
        assert_eq!(req.calibration.multiplier_for(Brand::AmeriColor), 1.15);
    }
}
