mod gel;

pub use gel::*;
