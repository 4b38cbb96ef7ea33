//! Email dispatcher port for delivering ranked result files.
//!
//! Defines the contract toward email delivery. Implementations (SMTP relay,
//! transactional-email HTTP API, test double) receive a fully composed
//! message and report success or failure. Nothing is retried.

use std::fmt;
use std::path::PathBuf;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::foundation::EmailAddress;

/// Subject line used when none is configured.
pub const DEFAULT_SUBJECT: &str = "TOPSIS Result";

/// Plain-text body of the result email.
pub const RESULT_TEXT_BODY: &str = "Attached is your TOPSIS result file.";

/// HTML body of the result email.
pub const RESULT_HTML_BODY: &str = "<h3>Your TOPSIS result is attached.</h3>";

/// File name the recipient sees for the attachment.
pub const RESULT_ATTACHMENT_NAME: &str = "result.csv";

/// Port for email delivery.
#[async_trait]
pub trait EmailDispatcher: Send + Sync {
    /// Deliver `email`, including its attachment.
    async fn send(&self, email: ResultEmail) -> Result<(), DispatchError>;

    /// Short transport name for logs.
    fn transport(&self) -> &'static str;
}

/// A file attached to an outgoing email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAttachment {
    /// Name shown to the recipient.
    pub filename: String,

    /// MIME type, e.g. `text/csv`.
    pub content_type: String,

    /// Location of the file contents on disk.
    pub path: PathBuf,
}

impl EmailAttachment {
    /// A ranked-result CSV attachment.
    pub fn csv(path: impl Into<PathBuf>) -> Self {
        Self {
            filename: RESULT_ATTACHMENT_NAME.to_string(),
            content_type: "text/csv".to_string(),
            path: path.into(),
        }
    }

    /// Reads the attachment bytes.
    pub async fn read(&self) -> Result<Vec<u8>, DispatchError> {
        tokio::fs::read(&self.path).await.map_err(|e| {
            DispatchError::attachment(format!(
                "Failed to read attachment {}: {}",
                self.path.display(),
                e
            ))
        })
    }
}

/// A composed result email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultEmail {
    pub recipient: EmailAddress,
    pub subject: String,
    pub text_body: String,
    pub html_body: String,
    pub attachment: EmailAttachment,
}

impl ResultEmail {
    /// Composes the standard result email for `recipient`.
    pub fn ranked_result(
        recipient: EmailAddress,
        subject: impl Into<String>,
        attachment: EmailAttachment,
    ) -> Self {
        Self {
            recipient,
            subject: subject.into(),
            text_body: RESULT_TEXT_BODY.to_string(),
            html_body: RESULT_HTML_BODY.to_string(),
            attachment,
        }
    }
}

/// Dispatch error categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DispatchErrorCode {
    /// Sender credentials are not configured.
    MissingCredentials,

    /// A sender or recipient address could not be used.
    InvalidAddress,

    /// The attachment could not be read or encoded.
    Attachment,

    /// Connection, TLS, or protocol failure talking to the provider.
    Transport,

    /// The provider answered but did not accept the message.
    Rejected,
}

impl fmt::Display for DispatchErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DispatchErrorCode::MissingCredentials => "MISSING_CREDENTIALS",
            DispatchErrorCode::InvalidAddress => "INVALID_ADDRESS",
            DispatchErrorCode::Attachment => "ATTACHMENT_ERROR",
            DispatchErrorCode::Transport => "TRANSPORT_ERROR",
            DispatchErrorCode::Rejected => "REJECTED",
        };
        write!(f, "{}", s)
    }
}

/// Email delivery failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("[{code}] {message}")]
pub struct DispatchError {
    pub code: DispatchErrorCode,
    pub message: String,
}

impl DispatchError {
    pub fn new(code: DispatchErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn missing_credentials(message: impl Into<String>) -> Self {
        Self::new(DispatchErrorCode::MissingCredentials, message)
    }

    pub fn invalid_address(message: impl Into<String>) -> Self {
        Self::new(DispatchErrorCode::InvalidAddress, message)
    }

    pub fn attachment(message: impl Into<String>) -> Self {
        Self::new(DispatchErrorCode::Attachment, message)
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(DispatchErrorCode::Transport, message)
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self::new(DispatchErrorCode::Rejected, message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dispatch_error_displays_code_and_message() {
        let err = DispatchError::rejected("Mailjet error: 401");
        assert_eq!(err.to_string(), "[REJECTED] Mailjet error: 401");
    }

    #[test]
    fn ranked_result_email_uses_standard_content() {
        let email = ResultEmail::ranked_result(
            EmailAddress::parse("user@example.com").unwrap(),
            DEFAULT_SUBJECT,
            EmailAttachment::csv("/tmp/result_x.csv"),
        );
        assert_eq!(email.subject, "TOPSIS Result");
        assert_eq!(email.text_body, RESULT_TEXT_BODY);
        assert_eq!(email.attachment.filename, "result.csv");
        assert_eq!(email.attachment.content_type, "text/csv");
    }

    #[tokio::test]
    async fn attachment_read_reports_missing_file() {
        let attachment = EmailAttachment::csv("/nonexistent/dir/result.csv");
        let err = attachment.read().await.unwrap_err();
        assert_eq!(err.code, DispatchErrorCode::Attachment);
    }
}
