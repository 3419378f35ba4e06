use anyhow::Context;
use portfolio_config::EmailConfig;
use portfolio_email_impl::{EmailServiceImpl, SmtpCredentials};
use tracing::warn;

/// Connect to the SMTP server
pub async fn connect(config: &EmailConfig) -> anyhow::Result<EmailServiceImpl> {
    let credentials = match (&config.username, &config.password) {
        (Some(username), Some(password)) => Some(SmtpCredentials {
            username: username.clone(),
            password: password.clone(),
        }),
        (None, None) => None,
        _ => {
            warn!("Ignoring incomplete smtp credentials, both username and password are required");
            None
        }
    };

    EmailServiceImpl::new(&config.smtp_url, config.from.clone(), credentials)
        .await
        .context("Failed to connect to SMTP server")
}
