use crate::mailer::MailConfig;

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development. In production,
/// override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Public domain used in verification links and subdomain derivation
    /// (default: `localhost:3000`).
    pub base_domain: String,
    /// Domain appended to net ids to form email addresses
    /// (default: `example.edu`).
    pub email_domain: String,
    /// Development mode: verification links use `http` instead of `https`
    /// (default: `false`).
    pub development: bool,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Graceful shutdown deadline in seconds (default: `30`).
    pub shutdown_timeout_secs: u64,
    /// SMTP settings; `None` when `SMTP_HOST` is unset, in which case
    /// verification links are logged instead of emailed.
    pub mail: Option<MailConfig>,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                 | Default          |
    /// |-------------------------|------------------|
    /// | `HOST`                  | `0.0.0.0`        |
    /// | `PORT`                  | `3000`           |
    /// | `BASE_DOMAIN`           | `localhost:3000` |
    /// | `EMAIL_DOMAIN`          | `example.edu`    |
    /// | `DEVELOPMENT`           | `false`          |
    /// | `REQUEST_TIMEOUT_SECS`  | `30`             |
    /// | `SHUTDOWN_TIMEOUT_SECS` | `30`             |
    ///
    /// SMTP settings are documented on [`MailConfig::from_env`].
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let base_domain =
            std::env::var("BASE_DOMAIN").unwrap_or_else(|_| "localhost:3000".into());

        let email_domain = std::env::var("EMAIL_DOMAIN").unwrap_or_else(|_| "example.edu".into());

        let development = std::env::var("DEVELOPMENT")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let shutdown_timeout_secs: u64 = std::env::var("SHUTDOWN_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("SHUTDOWN_TIMEOUT_SECS must be a valid u64");

        Self {
            host,
            port,
            base_domain,
            email_domain,
            development,
            request_timeout_secs,
            shutdown_timeout_secs,
            mail: MailConfig::from_env(),
        }
    }

    /// URL scheme for externally visible links.
    pub fn scheme(&self) -> &'static str {
        if self.development {
            "http"
        } else {
            "https"
        }
    }
}
