//! Email Adapters
//!
//! Implementations of the EmailDispatcher port.
//!
//! ## Available Adapters
//!
//! - **SmtpEmailDispatcher** - Implicit-TLS SMTP relay (lettre)
//! - **MailjetEmailDispatcher** - Mailjet Send API v3.1 (reqwest)
//! - **MockEmailDispatcher** - Records sends in memory (testing)

mod mailjet;
mod mock;
mod smtp;

pub use mailjet::{MailjetConfig, MailjetEmailDispatcher};
pub use mock::{MockEmailDispatcher, SentEmail};
pub use smtp::{SmtpConfig, SmtpEmailDispatcher};

use std::sync::Arc;

use crate::config::{EmailConfig, EmailTransport};
use crate::ports::{DispatchError, EmailDispatcher};

/// Build the dispatcher selected by `email.transport`.
pub fn dispatcher_from_config(
    config: &EmailConfig,
) -> Result<Arc<dyn EmailDispatcher>, DispatchError> {
    let dispatcher: Arc<dyn EmailDispatcher> = match config.transport {
        EmailTransport::Smtp => Arc::new(SmtpEmailDispatcher::new(
            SmtpConfig::from_email_config(config)?,
        )?),
        EmailTransport::Mailjet => Arc::new(MailjetEmailDispatcher::new(
            MailjetConfig::from_email_config(config)?,
        )?),
    };
    Ok(dispatcher)
}
