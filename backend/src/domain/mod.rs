//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (email address, errors)
//! - `topsis` - Decision matrix types and the ranking engine

pub mod foundation;
pub mod topsis;
