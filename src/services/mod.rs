pub mod gel_mixing;
pub mod instructions;
pub mod validation;
