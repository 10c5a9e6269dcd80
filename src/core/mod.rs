// FILE: src/core/mod.rs

pub mod constants;

pub use constants::*;
