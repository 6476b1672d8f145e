// src/engine/mod.rs
mod engine;
pub mod types;

pub use engine::{extract, select};
pub use types::{Extracted, FieldRule, FieldValue, Ruleset, Transform};
