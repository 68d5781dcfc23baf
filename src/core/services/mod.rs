pub mod collector;
pub mod date_normalizer;
