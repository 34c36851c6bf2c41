pub mod models;
pub mod server_fns;
pub mod services;

#[cfg(feature = "ssr")]
pub mod config;
#[cfg(feature = "ssr")]
pub mod db;
#[cfg(feature = "ssr")]
pub mod logger;
#[cfg(feature = "ssr")]
pub mod state;

// Re-export for convenience
pub use models::{Brand, Calibration, MixError, MixingRecipe, MixingRequest, PrimaryColor, Rgb};
pub use services::gel_mixing::compute_recipe;
