//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `csv` - Decision table parsing and ranked table serialization
//! - `email` - Result delivery (SMTP, Mailjet, mock)
//! - `http` - axum router for the upload endpoint
//! - `storage` - Ephemeral result files on local disk

pub mod csv;
pub mod email;
pub mod http;
pub mod storage;
