//! # catena-io
//!
//! Simulation input/output contract and rope definition validation.
//!
//! Defines the boundary types that external systems (CLI, benchmarks,
//! asset pipelines) use to communicate with the Catena solver core.

pub mod contract;
pub mod validator;
