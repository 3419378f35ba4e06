use std::future::Future;

use portfolio_models::contact::ContactSubmission;

/// Client for the mail relay's contact endpoint.
#[cfg_attr(feature = "mock", mockall::automock)]
pub trait RelayApiService: Send + Sync + 'static {
    /// Post the submission to the relay.
    ///
    /// Any response the relay sends back, including error statuses, is `Ok`.
    /// `Err` means no response was received.
    fn send_contact(
        &self,
        submission: ContactSubmission,
    ) -> impl Future<Output = anyhow::Result<RelayResponse>> + Send;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayResponse {
    pub status: u16,
    /// Value of the `success` flag in the body; `false` if the body could not
    /// be parsed.
    pub success: bool,
    pub message: Option<String>,
    pub error: Option<String>,
}

impl RelayResponse {
    /// Whether the relay confirmed the delivery: a 2xx status with a success
    /// flag in the body.
    pub fn is_delivered(&self) -> bool {
        (200..300).contains(&self.status) && self.success
    }
}

#[cfg(feature = "mock")]
impl MockRelayApiService {
    pub fn with_send_contact(
        mut self,
        submission: ContactSubmission,
        result: Option<RelayResponse>,
    ) -> Self {
        self.expect_send_contact()
            .once()
            .with(mockall::predicate::eq(submission))
            .return_once(move |_| {
                Box::pin(std::future::ready(
                    result.ok_or_else(|| anyhow::anyhow!("connection refused")),
                ))
            });
        self
    }
}
