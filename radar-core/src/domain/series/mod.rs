// radar-core/src/domain/series/mod.rs

pub mod entities;
pub mod frequency;

pub use entities::{Observation, Provenance, Series};
pub use frequency::Frequency;
