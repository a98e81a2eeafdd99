pub mod owners;
pub mod properties;
