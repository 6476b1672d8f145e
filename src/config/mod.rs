// src/config/mod.rs

pub mod axes;
pub mod consts;
pub mod options;
