use nutype::nutype;
use thiserror::Error;

/// A name/email/message triple sent through the contact form.
///
/// Every field is trimmed and must be non-empty. The email is not checked for
/// structure; visitors sometimes leave a phone number or a handle instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactSubmission {
    pub name: ContactName,
    pub email: ContactEmail,
    pub message: ContactMessage,
}

#[nutype(
    sanitize(trim),
    validate(not_empty, len_char_max = 256),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Serialize, Deserialize)
)]
pub struct ContactName(String);

#[nutype(
    sanitize(trim),
    validate(not_empty, len_char_max = 256),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Serialize, Deserialize)
)]
pub struct ContactEmail(String);

#[nutype(
    sanitize(trim),
    validate(not_empty, len_char_max = 4096),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Serialize, Deserialize)
)]
pub struct ContactMessage(String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ContactSubmissionError {
    /// At least one field is empty or consists only of whitespace.
    #[error("Not all fields have been filled out.")]
    Incomplete,
    /// All fields are present, but at least one exceeds its length limit.
    #[error("At least one field is too long.")]
    TooLong,
}

impl ContactSubmission {
    /// Trims and validates the three fields.
    ///
    /// A missing field takes precedence over an over-long one, so the caller
    /// always learns about empty fields first.
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        message: impl Into<String>,
    ) -> Result<Self, ContactSubmissionError> {
        let name = ContactName::try_new(name);
        let email = ContactEmail::try_new(email);
        let message = ContactMessage::try_new(message);

        let incomplete = matches!(name, Err(ContactNameError::NotEmptyViolated))
            || matches!(email, Err(ContactEmailError::NotEmptyViolated))
            || matches!(message, Err(ContactMessageError::NotEmptyViolated));
        if incomplete {
            return Err(ContactSubmissionError::Incomplete);
        }

        match (name, email, message) {
            (Ok(name), Ok(email), Ok(message)) => Ok(Self {
                name,
                email,
                message,
            }),
            _ => Err(ContactSubmissionError::TooLong),
        }
    }
}
