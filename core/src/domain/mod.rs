//! Domain layer: entities and value types for the verification and
//! notification subsystems.

pub mod entities;

pub use entities::*;
