//! # catena-types
//!
//! Shared error types, scalar alias, and physical constants
//! for the Catena rope solver.
//!
//! This crate has zero domain logic — it defines the vocabulary
//! that all other Catena crates share.

pub mod constants;
pub mod error;
pub mod scalar;

pub use error::{CatenaError, CatenaResult};
pub use scalar::Scalar;
