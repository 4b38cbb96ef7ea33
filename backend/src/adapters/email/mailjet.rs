//! Mailjet email dispatcher.
//!
//! Delivers result emails through the Mailjet Send API v3.1. The attachment
//! is embedded base64-encoded in the JSON payload; authentication is HTTP
//! basic auth with the public/private API key pair.

use std::time::Duration;

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::config::EmailConfig;
use crate::ports::{DispatchError, EmailDispatcher, ResultEmail};

/// Mailjet API configuration.
#[derive(Clone)]
pub struct MailjetConfig {
    api_key_public: SecretString,
    api_key_private: SecretString,
    base_url: String,
    sender_email: String,
    sender_name: String,
}

impl MailjetConfig {
    /// Create a new Mailjet configuration.
    pub fn new(
        api_key_public: SecretString,
        api_key_private: SecretString,
        sender_email: impl Into<String>,
        sender_name: impl Into<String>,
    ) -> Self {
        Self {
            api_key_public,
            api_key_private,
            base_url: "https://api.mailjet.com".to_string(),
            sender_email: sender_email.into(),
            sender_name: sender_name.into(),
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Extract the Mailjet settings from the email configuration.
    pub fn from_email_config(config: &EmailConfig) -> Result<Self, DispatchError> {
        let (public, private) = match (
            non_empty(&config.mailjet_api_key_public),
            non_empty(&config.mailjet_api_key_private),
        ) {
            (Some(public), Some(private)) => (public, private),
            _ => {
                return Err(DispatchError::missing_credentials(
                    "Mailjet API keys not configured",
                ))
            }
        };

        Ok(Self::new(
            public,
            private,
            config.sender_email.clone(),
            config.sender_name.clone(),
        )
        .with_base_url(config.mailjet_base_url.clone()))
    }

    fn send_url(&self) -> String {
        format!("{}/v3.1/send", self.base_url.trim_end_matches('/'))
    }
}

fn non_empty(secret: &Option<SecretString>) -> Option<SecretString> {
    secret
        .clone()
        .filter(|s| !s.expose_secret().is_empty())
}

/// Email dispatcher backed by the Mailjet HTTP API.
pub struct MailjetEmailDispatcher {
    config: MailjetConfig,
    client: Client,
}

impl MailjetEmailDispatcher {
    /// Create a dispatcher with a 30 second request timeout.
    pub fn new(config: MailjetConfig) -> Result<Self, DispatchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| {
                DispatchError::transport(format!("Failed to build HTTP client: {}", e))
            })?;
        Ok(Self { config, client })
    }

    fn build_request(&self, email: &ResultEmail, content: &[u8]) -> SendRequest {
        SendRequest {
            messages: vec![MailjetMessage {
                from: MailjetContact {
                    email: self.config.sender_email.clone(),
                    name: self.config.sender_name.clone(),
                },
                to: vec![MailjetContact {
                    email: email.recipient.as_str().to_string(),
                    name: email.recipient.local_part().to_string(),
                }],
                subject: email.subject.clone(),
                text_part: email.text_body.clone(),
                html_part: email.html_body.clone(),
                attachments: vec![MailjetAttachment {
                    content_type: email.attachment.content_type.clone(),
                    filename: email.attachment.filename.clone(),
                    base64_content: BASE64.encode(content),
                }],
            }],
        }
    }
}

#[async_trait]
impl EmailDispatcher for MailjetEmailDispatcher {
    async fn send(&self, email: ResultEmail) -> Result<(), DispatchError> {
        let content = email.attachment.read().await?;
        let request = self.build_request(&email, &content);

        let response = self
            .client
            .post(self.config.send_url())
            .basic_auth(
                self.config.api_key_public.expose_secret(),
                Some(self.config.api_key_private.expose_secret()),
            )
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Mailjet request failed");
                DispatchError::transport(format!("Mailjet request failed: {}", e))
            })?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        check_response(status, &body).inspect_err(|e| {
            tracing::warn!(status = %status, error = %e, "Mailjet rejected result email");
        })?;

        tracing::info!(
            recipient_domain = email.recipient.domain(),
            "Result email accepted by Mailjet"
        );
        Ok(())
    }

    fn transport(&self) -> &'static str {
        "mailjet"
    }
}

/// Interpret a Send API response.
///
/// Delivery counts as accepted only for HTTP 200/201 with the first
/// message reporting `"Status": "success"`.
fn check_response(status: StatusCode, body: &str) -> Result<(), DispatchError> {
    if status != StatusCode::OK && status != StatusCode::CREATED {
        return Err(DispatchError::rejected(format!(
            "Mailjet error: {} - {}",
            status.as_u16(),
            body
        )));
    }

    let parsed: SendResponse = serde_json::from_str(body).map_err(|e| {
        DispatchError::rejected(format!("Unreadable Mailjet response: {}", e))
    })?;

    match parsed.messages.first() {
        Some(message) if message.status == "success" => Ok(()),
        Some(message) => Err(DispatchError::rejected(format!(
            "Mailjet message status: {}",
            message.status
        ))),
        None => Err(DispatchError::rejected("Mailjet response had no messages")),
    }
}

// Send API v3.1 wire types

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct SendRequest {
    messages: Vec<MailjetMessage>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct MailjetMessage {
    from: MailjetContact,
    to: Vec<MailjetContact>,
    subject: String,
    text_part: String,
    #[serde(rename = "HTMLPart")]
    html_part: String,
    attachments: Vec<MailjetAttachment>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct MailjetContact {
    email: String,
    name: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct MailjetAttachment {
    content_type: String,
    filename: String,
    base64_content: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct SendResponse {
    #[serde(default)]
    messages: Vec<MessageStatus>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct MessageStatus {
    status: String,
}
