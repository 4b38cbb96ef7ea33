//! Email configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::error::ValidationError;

/// Email configuration (SMTP relay or Mailjet API)
#[derive(Debug, Clone, Deserialize)]
pub struct EmailConfig {
    /// Delivery transport
    #[serde(default)]
    pub transport: EmailTransport,

    /// Sender email address
    #[serde(default)]
    pub sender_email: String,

    /// Sender display name
    #[serde(default = "default_sender_name")]
    pub sender_name: String,

    /// Subject line of result emails
    #[serde(default = "default_subject")]
    pub subject: String,

    /// SMTP relay host (implicit TLS)
    #[serde(default = "default_smtp_host")]
    pub smtp_host: String,

    /// SMTP relay port
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,

    /// SMTP login name; defaults to the sender address
    pub smtp_username: Option<String>,

    /// SMTP password (app password for Gmail)
    pub smtp_password: Option<SecretString>,

    /// Mailjet public API key
    pub mailjet_api_key_public: Option<SecretString>,

    /// Mailjet private API key
    pub mailjet_api_key_private: Option<SecretString>,

    /// Mailjet API base URL
    #[serde(default = "default_mailjet_base_url")]
    pub mailjet_base_url: String,
}

/// Email transport type
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum EmailTransport {
    #[default]
    Smtp,
    Mailjet,
}

impl EmailConfig {
    /// Login name for the SMTP relay
    pub fn smtp_login(&self) -> &str {
        self.smtp_username
            .as_deref()
            .filter(|u| !u.is_empty())
            .unwrap_or(&self.sender_email)
    }

    /// Check if an SMTP password is configured
    pub fn has_smtp_password(&self) -> bool {
        is_present(&self.smtp_password)
    }

    /// Validate email configuration
    ///
    /// Only the credentials of the selected transport are required.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.sender_email.is_empty() {
            return Err(ValidationError::MissingRequired("SENDER_EMAIL"));
        }
        if !self.sender_email.contains('@') {
            return Err(ValidationError::InvalidFromEmail);
        }

        match self.transport {
            EmailTransport::Smtp => {
                if self.smtp_host.is_empty() {
                    return Err(ValidationError::MissingRequired("SMTP_HOST"));
                }
                if self.smtp_port == 0 {
                    return Err(ValidationError::InvalidPort);
                }
                if !self.has_smtp_password() {
                    return Err(ValidationError::MissingRequired("SMTP_PASSWORD"));
                }
            }
            EmailTransport::Mailjet => {
                if !is_present(&self.mailjet_api_key_public) {
                    return Err(ValidationError::MissingRequired("MAILJET_API_KEY_PUBLIC"));
                }
                if !is_present(&self.mailjet_api_key_private) {
                    return Err(ValidationError::MissingRequired("MAILJET_API_KEY_PRIVATE"));
                }
                if !self.mailjet_base_url.starts_with("http://")
                    && !self.mailjet_base_url.starts_with("https://")
                {
                    return Err(ValidationError::InvalidMailjetUrl);
                }
            }
        }
        Ok(())
    }
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            transport: EmailTransport::default(),
            sender_email: String::new(),
            sender_name: default_sender_name(),
            subject: default_subject(),
            smtp_host: default_smtp_host(),
            smtp_port: default_smtp_port(),
            smtp_username: None,
            smtp_password: None,
            mailjet_api_key_public: None,
            mailjet_api_key_private: None,
            mailjet_base_url: default_mailjet_base_url(),
        }
    }
}

fn is_present(secret: &Option<SecretString>) -> bool {
    secret
        .as_ref()
        .is_some_and(|s| !s.expose_secret().is_empty())
}

fn default_sender_name() -> String {
    "TOPSIS Service".to_string()
}

fn default_subject() -> String {
    "TOPSIS Result".to_string()
}

fn default_smtp_host() -> String {
    "smtp.gmail.com".to_string()
}

fn default_smtp_port() -> u16 {
    465
}

fn default_mailjet_base_url() -> String {
    "https://api.mailjet.com".to_string()
}
