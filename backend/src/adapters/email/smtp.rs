//! SMTP email dispatcher.
//!
//! Sends result emails through an implicit-TLS SMTP relay (Gmail's
//! `smtp.gmail.com:465` by default), logging in with the sender address and
//! an app password.

use async_trait::async_trait;
use lettre::address::Address;
use lettre::message::header::ContentType;
use lettre::message::{Attachment, Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use secrecy::{ExposeSecret, SecretString};

use crate::config::EmailConfig;
use crate::ports::{DispatchError, EmailDispatcher, ResultEmail};

/// SMTP relay configuration.
#[derive(Clone)]
pub struct SmtpConfig {
    host: String,
    port: u16,
    username: String,
    password: SecretString,
    sender_email: String,
    sender_name: String,
}

impl SmtpConfig {
    /// Create a new SMTP configuration.
    pub fn new(
        host: impl Into<String>,
        port: u16,
        username: impl Into<String>,
        password: SecretString,
        sender_email: impl Into<String>,
        sender_name: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            port,
            username: username.into(),
            password,
            sender_email: sender_email.into(),
            sender_name: sender_name.into(),
        }
    }

    /// Extract the SMTP settings from the email configuration.
    pub fn from_email_config(config: &EmailConfig) -> Result<Self, DispatchError> {
        let password = config
            .smtp_password
            .clone()
            .filter(|p| !p.expose_secret().is_empty())
            .ok_or_else(|| {
                DispatchError::missing_credentials("Email sender credentials not configured")
            })?;

        Ok(Self::new(
            config.smtp_host.clone(),
            config.smtp_port,
            config.smtp_login(),
            password,
            config.sender_email.clone(),
            config.sender_name.clone(),
        ))
    }
}

/// Email dispatcher backed by an SMTP relay.
pub struct SmtpEmailDispatcher {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpEmailDispatcher {
    /// Create a dispatcher. No connection is opened until the first send.
    pub fn new(config: SmtpConfig) -> Result<Self, DispatchError> {
        let sender: Address = config.sender_email.parse().map_err(|e| {
            DispatchError::invalid_address(format!(
                "Invalid sender address '{}': {}",
                config.sender_email, e
            ))
        })?;
        let from = Mailbox::new(Some(config.sender_name.clone()), sender);

        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)
            .map_err(|e| {
                DispatchError::transport(format!(
                    "Invalid SMTP relay '{}': {}",
                    config.host, e
                ))
            })?
            .port(config.port)
            .credentials(Credentials::new(
                config.username.clone(),
                config.password.expose_secret().clone(),
            ))
            .build();

        Ok(Self { transport, from })
    }

    /// Compose the MIME message: text + HTML alternatives and the CSV attachment.
    fn build_message(
        &self,
        email: &ResultEmail,
        content: Vec<u8>,
    ) -> Result<Message, DispatchError> {
        let recipient: Address = email.recipient.as_str().parse().map_err(|e| {
            DispatchError::invalid_address(format!(
                "Invalid recipient address '{}': {}",
                email.recipient, e
            ))
        })?;
        let to = Mailbox::new(Some(email.recipient.local_part().to_string()), recipient);

        let content_type = ContentType::parse(&email.attachment.content_type).map_err(|e| {
            DispatchError::attachment(format!(
                "Invalid attachment content type '{}': {}",
                email.attachment.content_type, e
            ))
        })?;
        let attachment =
            Attachment::new(email.attachment.filename.clone()).body(content, content_type);

        Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(email.subject.clone())
            .multipart(
                MultiPart::mixed()
                    .multipart(MultiPart::alternative_plain_html(
                        email.text_body.clone(),
                        email.html_body.clone(),
                    ))
                    .singlepart(attachment),
            )
            .map_err(|e| DispatchError::transport(format!("Failed to build message: {}", e)))
    }
}

#[async_trait]
impl EmailDispatcher for SmtpEmailDispatcher {
    async fn send(&self, email: ResultEmail) -> Result<(), DispatchError> {
        let content = email.attachment.read().await?;
        let message = self.build_message(&email, content)?;

        let response = self.transport.send(message).await.map_err(|e| {
            tracing::error!(error = %e, "SMTP delivery failed");
            DispatchError::transport(format!("SMTP error: {}", e))
        })?;

        tracing::info!(
            code = %response.code(),
            recipient_domain = email.recipient.domain(),
            "Result email accepted by SMTP relay"
        );
        Ok(())
    }

    fn transport(&self) -> &'static str {
        "smtp"
    }
}
