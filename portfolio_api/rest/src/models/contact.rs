use portfolio_models::contact::{ContactSubmission, ContactSubmissionError};
use serde::{Deserialize, Serialize};

/// Body of `POST /api/contact`. Fields are optional here so that a missing
/// field is reported like an empty one.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiContactSubmission {
    /// Name of the visitor
    pub name: Option<String>,
    /// Email address (or any other way to reach the visitor)
    pub email: Option<String>,
    /// Content of the message
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ApiContactResponse {
    pub success: bool,
    pub message: &'static str,
}

impl TryFrom<ApiContactSubmission> for ContactSubmission {
    type Error = ContactSubmissionError;

    fn try_from(value: ApiContactSubmission) -> Result<Self, Self::Error> {
        ContactSubmission::new(
            value.name.unwrap_or_default(),
            value.email.unwrap_or_default(),
            value.message.unwrap_or_default(),
        )
    }
}
