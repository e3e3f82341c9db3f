// radar-core/src/domain/mod.rs

pub mod error;
pub mod ports;
pub mod quality;
pub mod series;

pub use error::DomainError;
