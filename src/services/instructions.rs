//! Step-by-step mixing instructions for bakers

use crate::models::MixingRecipe;

/// Amounts below this are written with an extra decimal place
const SMALL_AMOUNT_GRAMS: f64 = 0.01;

fn measurement_line(name: &str, grams: f64, drops: Option<f64>) -> String {
    let mut line = if grams >= SMALL_AMOUNT_GRAMS {
        format!("  • {}: {:.3}g ({:.1}mg)", name, grams, grams * 1000.0)
    } else {
        format!("  • {}: {:.4}g ({:.2}mg)", name, grams, grams * 1000.0)
    };
    if let Some(drops) = drops {
        line.push_str(&format!(" ≈ {:.1} drops", drops));
    }
    line
}

/// Build the instruction list for a recipe, largest gel amount first
pub fn mixing_instructions(recipe: &MixingRecipe) -> Vec<String> {
    // Whole masses print without a decimal point: "100g", "12.5g"
    let mut lines = vec![
        format!(
            "For {}g of white fondant using {} gel colors:",
            recipe.mass_grams,
            recipe.brand.as_str()
        ),
        String::new(),
        "Measurements needed:".to_string(),
    ];

    for color in recipe.addition_order() {
        let grams = recipe.amounts[&color];
        let drops = recipe.drops.as_ref().and_then(|d| d.get(&color).copied());
        lines.push(measurement_line(color.display_name(), grams, drops));
    }

    let show_drops = recipe.drops.is_some();
    if show_drops {
        lines.push(String::new());
        lines.push(format!(
            "Note: Using conversion rate of {}g per drop",
            recipe.grams_per_drop
        ));
    }

    lines.push(String::new());
    lines.push("Mixing steps:".to_string());
    lines.push("1. Start with your white fondant at room temperature".to_string());
    lines.push("2. Add gel colors one at a time, starting with the largest amount".to_string());
    lines.push("3. Knead thoroughly after each addition until color is uniform".to_string());
    if show_drops {
        lines.push("4. Use a dropper or toothpick for small amounts".to_string());
    } else {
        lines.push("4. Use a toothpick for very small amounts (under 0.01g)".to_string());
    }
    lines.push("5. Mix in small portions and check color frequently".to_string());
    lines.push("6. Remember: you can always add more color, but can't remove it!".to_string());
    lines.push(String::new());
    lines.push(
        "Pro tip: Colors may deepen slightly as fondant rests. Test on a small piece first."
            .to_string(),
    );

    lines
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::models::{Brand, PrimaryColor};

    fn recipe(amounts: &[(PrimaryColor, f64)], drops: bool) -> MixingRecipe {
        let amounts: BTreeMap<_, _> = amounts.iter().copied().collect();
        let total: f64 = amounts.values().sum();
        MixingRecipe {
            brand: Brand::Sugarflair,
            mass_grams: 250.0,
            brand_multiplier: 1.0,
            ratios: amounts.iter().map(|(&c, &a)| (c, a / total)).collect(),
            drops: drops.then(|| amounts.iter().map(|(&c, &a)| (c, a / 0.04)).collect()),
            amounts,
            grams_per_drop: 0.04,
            instructions: Vec::new(),
        }
    }

    #[test]
    fn largest_amount_listed_first() {
        let r = recipe(
            &[
                (PrimaryColor::Red, 0.002),
                (PrimaryColor::Blue, 0.05),
                (PrimaryColor::Brown, 0.02),
            ],
            false,
        );
        let lines = mixing_instructions(&r);
        assert_eq!(lines[0], "For 250g of white fondant using Sugarflair gel colors:");
        assert_eq!(lines[2], "Measurements needed:");
        assert_eq!(lines[3], "  • Blue: 0.050g (50.0mg)");
        assert_eq!(lines[4], "  • Brown: 0.020g (20.0mg)");
        assert_eq!(lines[5], "  • Red: 0.0020g (2.00mg)");
    }

    #[test]
    fn header_mass_has_no_trailing_zero() {
        let mut r = recipe(&[(PrimaryColor::Red, 0.03)], false);
        r.mass_grams = 100.0;
        assert_eq!(
            mixing_instructions(&r)[0],
            "For 100g of white fondant using Sugarflair gel colors:"
        );
        r.mass_grams = 12.5;
        assert_eq!(
            mixing_instructions(&r)[0],
            "For 12.5g of white fondant using Sugarflair gel colors:"
        );
    }

    #[test]
    fn ties_keep_enumeration_order() {
        let r = recipe(
            &[(PrimaryColor::Pink, 0.01), (PrimaryColor::Yellow, 0.01)],
            false,
        );
        assert_eq!(
            r.addition_order(),
            vec![PrimaryColor::Yellow, PrimaryColor::Pink]
        );
    }

    #[test]
    fn drop_counts_and_note_when_enabled() {
        let r = recipe(&[(PrimaryColor::Black, 0.04)], true);
        let lines = mixing_instructions(&r);
        assert_eq!(lines[3], "  • Black: 0.040g (40.0mg) ≈ 1.0 drops");
        assert!(lines.contains(&"Note: Using conversion rate of 0.04g per drop".to_string()));
        assert!(lines.contains(&"4. Use a dropper or toothpick for small amounts".to_string()));
    }

    #[test]
    fn toothpick_tip_without_drops() {
        let lines = mixing_instructions(&recipe(&[(PrimaryColor::Green, 0.03)], false));
        assert!(!lines.iter().any(|l| l.starts_with("Note:")));
        assert!(lines.contains(&"4. Use a toothpick for very small amounts (under 0.01g)".to_string()));
        assert!(lines.last().unwrap().starts_with("Pro tip:"));
    }
}
