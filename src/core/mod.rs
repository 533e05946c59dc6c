pub mod approach;
pub mod error;
pub mod fields;
pub mod neo;
