//! Domain core for the AGCAS access service.
//!
//! Pure logic only: error taxonomy, id types, the feature catalog, the
//! feature gate evaluator, role validation, and the role assignment rules.
//! Nothing in this crate performs I/O.

pub mod access;
pub mod assignment;
pub mod error;
pub mod features;
pub mod roles;
pub mod types;
