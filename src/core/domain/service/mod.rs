pub mod format;
pub mod machine_normalizer;
