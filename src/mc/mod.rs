// src/mc/mod.rs
pub mod estimator;
pub mod kernel;
