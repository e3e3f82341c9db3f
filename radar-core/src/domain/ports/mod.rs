// radar-core/src/domain/ports/mod.rs

pub mod cleaner;

pub use cleaner::Cleaner;
