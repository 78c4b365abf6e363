//! SMTP lead notifier.
//!
//! Sends the rendered [`LeadEmail`] through an authenticated STARTTLS relay
//! (Gmail on port 587 by default) using `lettre`'s tokio transport.

use lettre::message::Mailbox;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use secrecy::{ExposeSecret, SecretString};

use leadchat_core::notify::notifier::LeadNotifier;
use leadchat_types::config::{
    ENV_EMAIL_ADDRESS, ENV_EMAIL_PASSWORD, ENV_RECIPIENT_EMAIL, SmtpSettings,
};
use leadchat_types::error::{ConfigError, NotifyError};
use leadchat_types::lead::LeadInfo;

use super::email::LeadEmail;

/// Fully resolved SMTP settings.
///
/// Does not derive Debug: holds the relay password.
pub struct SmtpNotifierConfig {
    pub host: String,
    pub port: u16,
    /// Login name, also used as the sender address.
    pub username: String,
    pub password: SecretString,
    pub recipient: String,
    /// Product name quoted in the email footer.
    pub product_name: String,
}

impl SmtpNotifierConfig {
    /// Resolve from file/env settings, reporting every missing credential at once.
    pub fn from_settings(settings: &SmtpSettings, product_name: &str) -> Result<Self, ConfigError> {
        fn present(value: &Option<String>) -> Option<String> {
            value.as_deref().map(str::trim).filter(|v| !v.is_empty()).map(str::to_string)
        }

        let username = present(&settings.username);
        let password = present(&settings.password);
        let recipient = present(&settings.recipient);

        match (username, password, recipient) {
            (Some(username), Some(password), Some(recipient)) => Ok(Self {
                host: settings.host.clone(),
                port: settings.port,
                username,
                password: SecretString::from(password),
                recipient,
                product_name: product_name.to_string(),
            }),
            (username, password, recipient) => {
                let mut missing = Vec::new();
                if username.is_none() {
                    missing.push(ENV_EMAIL_ADDRESS.to_string());
                }
                if password.is_none() {
                    missing.push(ENV_EMAIL_PASSWORD.to_string());
                }
                if recipient.is_none() {
                    missing.push(ENV_RECIPIENT_EMAIL.to_string());
                }
                Err(ConfigError::MissingSettings(missing))
            }
        }
    }
}

/// [`LeadNotifier`] that emails each lead to the sales inbox.
pub struct SmtpLeadNotifier {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    to: Mailbox,
    product_name: String,
}

impl SmtpLeadNotifier {
    /// Build the notifier. No connection is made until the first send.
    pub fn new(config: SmtpNotifierConfig) -> Result<Self, NotifyError> {
        let from = parse_mailbox(&config.username)?;
        let to = parse_mailbox(&config.recipient)?;

        let credentials = Credentials::new(
            config.username.clone(),
            config.password.expose_secret().to_string(),
        );
        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
            .map_err(|e| NotifyError::Transport(e.to_string()))?
            .port(config.port)
            .credentials(credentials)
            .build();

        Ok(Self {
            transport,
            from,
            to,
            product_name: config.product_name,
        })
    }

    /// Build the MIME message for `lead`, timestamped with local time.
    pub fn build_message(&self, lead: &LeadInfo) -> Result<Message, NotifyError> {
        let mail = LeadEmail::compose(lead, &self.product_name, &chrono::Local::now());
        Message::builder()
            .from(self.from.clone())
            .to(self.to.clone())
            .subject(mail.subject)
            .header(ContentType::TEXT_PLAIN)
            .body(mail.body)
            .map_err(|e| NotifyError::Build(e.to_string()))
    }

    /// Open a connection to the relay and authenticate, without sending mail.
    pub async fn check_connection(&self) -> Result<(), NotifyError> {
        match self.transport.test_connection().await {
            Ok(true) => Ok(()),
            Ok(false) => Err(NotifyError::Transport(
                "relay did not accept the connection".to_string(),
            )),
            Err(e) => Err(NotifyError::Transport(e.to_string())),
        }
    }
}

impl LeadNotifier for SmtpLeadNotifier {
    async fn notify(&self, lead: &LeadInfo) -> Result<(), NotifyError> {
        let message = self.build_message(lead)?;
        match self.transport.send(message).await {
            Ok(response) => {
                tracing::info!(
                    lead_name = %lead.name,
                    company = %lead.company,
                    code = %response.code(),
                    "lead notification sent"
                );
                Ok(())
            }
            Err(e) => {
                tracing::warn!(lead_name = %lead.name, error = %e, "lead notification failed");
                Err(NotifyError::Transport(e.to_string()))
            }
        }
    }
}

fn parse_mailbox(address: &str) -> Result<Mailbox, NotifyError> {
    address
        .parse::<Mailbox>()
        .map_err(|e| NotifyError::InvalidAddress {
            address: address.to_string(),
            reason: e.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> SmtpSettings {
        SmtpSettings {
            username: Some("bot@acme.test".to_string()),
            password: Some("app-password".to_string()),
            recipient: Some("sales@acme.test".to_string()),
            ..SmtpSettings::default()
        }
    }

    fn lead() -> LeadInfo {
        LeadInfo {
            name: "Priya".to_string(),
            company: "Acme".to_string(),
            phone: "555-0100".to_string(),
            email: "priya@acme.test".to_string(),
        }
    }

    #[test]
    fn test_config_from_complete_settings() {
        let config = SmtpNotifierConfig::from_settings(&settings(), "Sales Assistant").unwrap();
        assert_eq!(config.host, "smtp.gmail.com");
        assert_eq!(config.port, 587);
        assert_eq!(config.username, "bot@acme.test");
        assert_eq!(config.password.expose_secret(), "app-password");
        assert_eq!(config.recipient, "sales@acme.test");
    }

    #[test]
    fn test_config_reports_all_missing_credentials() {
        let mut incomplete = settings();
        incomplete.password = None;
        incomplete.recipient = Some("   ".to_string());

        match SmtpNotifierConfig::from_settings(&incomplete, "Sales Assistant") {
            Err(ConfigError::MissingSettings(missing)) => {
                assert_eq!(missing, vec![ENV_EMAIL_PASSWORD, ENV_RECIPIENT_EMAIL]);
            }
            Err(other) => panic!("Expected MissingSettings, got: {other}"),
            Ok(_) => panic!("Expected error but got Ok"),
        }
    }

    #[test]
    fn test_invalid_recipient_rejected() {
        let mut config = SmtpNotifierConfig::from_settings(&settings(), "Sales Assistant").unwrap();
        config.recipient = "not-an-address".to_string();

        match SmtpLeadNotifier::new(config) {
            Err(NotifyError::InvalidAddress { address, .. }) => {
                assert_eq!(address, "not-an-address");
            }
            Err(other) => panic!("Expected InvalidAddress, got: {other}"),
            Ok(_) => panic!("Expected error but got Ok"),
        }
    }

    #[tokio::test]
    async fn test_build_message_headers_and_body() {
        let config = SmtpNotifierConfig::from_settings(&settings(), "Sales Assistant").unwrap();
        let notifier = SmtpLeadNotifier::new(config).unwrap();

        let message = notifier.build_message(&lead()).unwrap();
        let raw = String::from_utf8(message.formatted()).unwrap();

        assert!(raw.contains("From: bot@acme.test"));
        assert!(raw.contains("To: sales@acme.test"));
        assert!(raw.contains("Subject: New Lead from Chatbot: Priya - Acme"));
        assert!(raw.contains("Phone: 555-0100"));
        assert!(raw.contains("automated notification from your Sales Assistant."));
    }
}
