//! Outbound email: the verification-mail boundary.
//!
//! The services depend on the [`Mailer`] trait only. [`SmtpMailer`] is the
//! production implementation over lettre's async SMTP transport;
//! [`LogMailer`] stands in when SMTP is unconfigured (development) and
//! writes the verification link to the log instead.
//!
//! Delivery is fire-and-report: failures surface to the caller and are
//! never retried here.

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use quill_core::token::Token;

/// Default SMTP port (STARTTLS).
const DEFAULT_SMTP_PORT: u16 = 587;

/// Error type for email delivery failures.
#[derive(Debug, thiserror::Error)]
pub enum MailError {
    /// SMTP transport-level failure (authentication, connection, etc.).
    #[error("SMTP transport error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),

    /// The recipient or sender address could not be parsed.
    #[error("email address parse error: {0}")]
    Address(#[from] lettre::address::AddressError),

    /// The MIME message could not be assembled.
    #[error("email build error: {0}")]
    Build(String),
}

/// Configuration for the SMTP transport.
#[derive(Debug, Clone)]
pub struct MailConfig {
    /// SMTP server hostname.
    pub smtp_host: String,
    /// SMTP server port (defaults to 587).
    pub smtp_port: u16,
    /// RFC 5322 "From" address.
    pub from_address: String,
    /// Optional SMTP username.
    pub smtp_user: Option<String>,
    /// Optional SMTP password.
    pub smtp_password: Option<String>,
}

impl MailConfig {
    /// Load SMTP configuration from environment variables.
    ///
    /// Returns `None` if `SMTP_HOST` is not set, signalling that email
    /// delivery is not configured.
    ///
    /// | Variable        | Required | Default               |
    /// |-----------------|----------|-----------------------|
    /// | `SMTP_HOST`     | yes      | -                     |
    /// | `SMTP_PORT`     | no       | `587`                 |
    /// | `SMTP_FROM`     | no       | `noreply@example.edu` |
    /// | `SMTP_USER`     | no       | -                     |
    /// | `SMTP_PASSWORD` | no       | -                     |
    pub fn from_env() -> Option<Self> {
        let smtp_host = std::env::var("SMTP_HOST").ok()?;
        Some(Self {
            smtp_host,
            smtp_port: std::env::var("SMTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_SMTP_PORT),
            from_address: std::env::var("SMTP_FROM")
                .unwrap_or_else(|_| "noreply@example.edu".to_string()),
            smtp_user: std::env::var("SMTP_USER").ok(),
            smtp_password: std::env::var("SMTP_PASSWORD").ok(),
        })
    }
}

/// Sends the account-verification email for a freshly signed-up user.
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Deliver a verification email to `addr`, greeting `name`, carrying a
    /// link that embeds `token`.
    async fn send_verification_email(
        &self,
        addr: &str,
        name: &str,
        token: &Token,
    ) -> Result<(), MailError>;
}

/// Render the verification link a recipient must follow.
pub fn verification_link(scheme: &str, base_domain: &str, token: &Token) -> String {
    format!("{scheme}://{base_domain}/signup/verify/{token}")
}

/// Production mailer over an async SMTP transport.
pub struct SmtpMailer {
    config: MailConfig,
    link_base: (String, String), // (scheme, base_domain)
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpMailer {
    pub fn new(config: MailConfig, scheme: &str, base_domain: &str) -> Result<Self, MailError> {
        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::relay(&config.smtp_host)?
            .port(config.smtp_port);

        if let (Some(user), Some(password)) = (&config.smtp_user, &config.smtp_password) {
            builder = builder.credentials(Credentials::new(user.clone(), password.clone()));
        }

        Ok(Self {
            transport: builder.build(),
            link_base: (scheme.to_string(), base_domain.to_string()),
            config,
        })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send_verification_email(
        &self,
        addr: &str,
        name: &str,
        token: &Token,
    ) -> Result<(), MailError> {
        let (scheme, base_domain) = &self.link_base;
        let link = verification_link(scheme, base_domain, token);

        let body = format!(
            "Hi {name},\n\n\
             Verify your account by visiting the link below within 48 hours:\n\n\
             {link}\n\n\
             If you did not sign up, you can ignore this email.\n"
        );

        let from: Mailbox = self.config.from_address.parse()?;
        let to: Mailbox = addr.parse()?;

        let email = Message::builder()
            .from(from)
            .to(to)
            .subject("Quill - Email Verification")
            .header(ContentType::TEXT_PLAIN)
            .body(body)
            .map_err(|e| MailError::Build(e.to_string()))?;

        self.transport.send(email).await?;
        tracing::info!(to = addr, "verification email sent");
        Ok(())
    }
}

/// Development stand-in: logs the link instead of sending it.
pub struct LogMailer {
    pub scheme: String,
    pub base_domain: String,
}

#[async_trait]
impl Mailer for LogMailer {
    async fn send_verification_email(
        &self,
        addr: &str,
        _name: &str,
        token: &Token,
    ) -> Result<(), MailError> {
        let link = verification_link(&self.scheme, &self.base_domain, token);
        tracing::info!(to = addr, %link, "SMTP not configured; verification link logged");
        Ok(())
    }
}
