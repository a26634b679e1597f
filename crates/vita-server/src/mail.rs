//! Contact-form email relay: one authenticated, STARTTLS-upgraded SMTP
//! submission per contact message, no retry. The HTTP layer collapses the
//! typed result into a sent/not-sent boolean for the visitor.

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use thiserror::Error;
use vita_config::MailConfig;

/// A message submitted through the contact form
#[derive(Debug, Clone, serde::Deserialize)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub message: String,
}

#[derive(Error, Debug)]
pub enum MailError {
    #[error("invalid address: {0}")]
    Address(#[from] lettre::address::AddressError),

    #[error("failed to build message: {0}")]
    Build(#[from] lettre::error::Error),

    #[error("smtp error: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),
}

/// The relay seam, stubbable in tests
#[async_trait]
pub trait ContactRelay: Send + Sync {
    async fn relay(&self, message: &ContactMessage) -> Result<(), MailError>;
}

/// lettre-backed relay against the configured mail host
pub struct SmtpRelay {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    to: Mailbox,
}

impl SmtpRelay {
    pub fn new(config: &MailConfig, password: &str) -> Result<Self, MailError> {
        let credentials = Credentials::new(config.username.clone(), password.to_string());
        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)?
            .port(config.port)
            .credentials(credentials)
            .build();

        Ok(Self {
            transport,
            from: config.from.parse()?,
            to: config.to.parse()?,
        })
    }
}

#[async_trait]
impl ContactRelay for SmtpRelay {
    async fn relay(&self, message: &ContactMessage) -> Result<(), MailError> {
        let reply_to: Mailbox = message.email.parse()?;
        let email = Message::builder()
            .from(self.from.clone())
            .reply_to(reply_to)
            .to(self.to.clone())
            .subject(format!("Portfolio contact from {}", message.name))
            .header(ContentType::TEXT_PLAIN)
            .body(format!(
                "Name: {}\nEmail: {}\n\n{}",
                message.name, message.email, message.message
            ))?;

        self.transport.send(email).await?;
        Ok(())
    }
}
