//! Foundation module - Shared domain primitives.
//!
//! Contains value objects and error types that form the vocabulary of the
//! ranking service.

mod email;
mod errors;

pub use email::EmailAddress;
pub use errors::{DegenerateColumnError, TopsisError, ValidationError};
