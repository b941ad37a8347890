//! Reply generation: remote language model first, keyword rules second.

pub mod generator;
pub mod rules;
