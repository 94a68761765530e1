pub mod skin_classifier;
pub mod skin_masker;
