use std::{future::Future, net::IpAddr};

use portfolio_models::contact::ContactSubmission;
use thiserror::Error;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait ContactFeatureService: Send + Sync + 'static {
    /// Forward a contact form submission to the operator inbox.
    ///
    /// `client` is the address of the caller and is only used for rate
    /// limiting.
    fn send_message(
        &self,
        client: IpAddr,
        submission: ContactSubmission,
    ) -> impl Future<Output = Result<(), ContactSendMessageError>> + Send;
}

#[derive(Debug, Error)]
pub enum ContactSendMessageError {
    #[error("Too many contact requests from this client.")]
    RateLimited,
    #[error("Failed to send message.")]
    Send,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[cfg(feature = "mock")]
impl MockContactFeatureService {
    pub fn with_send_message(
        mut self,
        client: IpAddr,
        submission: ContactSubmission,
        result: Result<(), ContactSendMessageError>,
    ) -> Self {
        self.expect_send_message()
            .once()
            .with(
                mockall::predicate::eq(client),
                mockall::predicate::eq(submission),
            )
            .return_once(move |_, _| Box::pin(std::future::ready(result)));
        self
    }
}
