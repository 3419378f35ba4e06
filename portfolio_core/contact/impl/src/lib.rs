use std::{net::IpAddr, sync::Arc};

use portfolio_core_contact_contracts::{ContactFeatureService, ContactSendMessageError};
use portfolio_di::Build;
use portfolio_email_contracts::{ContentType, Email, EmailService};
use portfolio_models::{
    contact::ContactSubmission,
    email_address::{EmailAddress, EmailAddressWithName},
};
use portfolio_shared_contracts::rate_limit::RateLimitService;
use tracing::{error, info};

#[derive(Debug, Clone, Build)]
pub struct ContactFeatureServiceImpl<RateLimit, Email> {
    rate_limit: RateLimit,
    email: Email,
    config: ContactFeatureConfig,
}

#[derive(Debug, Clone)]
pub struct ContactFeatureConfig {
    /// Operator inbox receiving the submissions.
    pub email: Arc<EmailAddressWithName>,
}

impl<RateLimit, EmailS> ContactFeatureService for ContactFeatureServiceImpl<RateLimit, EmailS>
where
    RateLimit: RateLimitService,
    EmailS: EmailService,
{
    async fn send_message(
        &self,
        client: IpAddr,
        submission: ContactSubmission,
    ) -> Result<(), ContactSendMessageError> {
        if !self.rate_limit.check(client) {
            return Err(ContactSendMessageError::RateLimited);
        }

        let reply_to = submission
            .email
            .parse::<EmailAddress>()
            .ok()
            .map(Into::into);

        let email = Email {
            recipient: (*self.config.email).clone(),
            subject: format!("[Portfolio Contact] {}", *submission.name),
            body: format!(
                "Message from {} ({}):\n\n{}",
                *submission.name, *submission.email, *submission.message
            ),
            content_type: ContentType::Text,
            reply_to,
        };

        match self.email.send(email).await {
            Ok(true) => {
                info!(%client, "forwarded contact message");
                Ok(())
            }
            Ok(false) => {
                error!(%client, "smtp server rejected contact message");
                Err(ContactSendMessageError::Send)
            }
            Err(err) => {
                error!(%client, "Failed to send contact message: {err:#}");
                Err(ContactSendMessageError::Send)
            }
        }
    }
}
