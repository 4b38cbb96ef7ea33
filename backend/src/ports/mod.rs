//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `EmailDispatcher` - Delivers a ranked result file to a recipient
//! - `ResultStorage` - Writes ephemeral, uniquely named result files

mod email_dispatcher;
mod result_storage;

pub use email_dispatcher::{
    DispatchError, DispatchErrorCode, EmailAttachment, EmailDispatcher, ResultEmail,
    DEFAULT_SUBJECT, RESULT_ATTACHMENT_NAME, RESULT_HTML_BODY, RESULT_TEXT_BODY,
};
pub use result_storage::{ResultStorage, StorageError, StoredResult};
