mod calibration;
mod gel;
mod recipe;

pub use calibration::{
    Calibration, CalibrationError, DropConversion, DEFAULT_BRAND_MULTIPLIER,
    DEFAULT_GRAMS_PER_DROP,
};
pub use gel::{Brand, PrimaryColor, Rgb};
pub use recipe::{MixError, MixingRecipe, MixingRequest};
