//! Storage Adapters
//!
//! - **LocalResultStorage** - Writes result files under a local directory

mod local_result_storage;

pub use local_result_storage::LocalResultStorage;
