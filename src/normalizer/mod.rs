pub mod fields;
pub mod raw;
