//! The visitor side of the contact form.
//!
//! [`ContactForm`] holds the three input fields and walks through the two
//! states `Idle` and `Submitting`. Submitting validates the fields locally,
//! posts them to the relay at most once and reports the outcome as
//! [`Feedback`]. The current [`FormState`] is published to subscribers, so
//! a view can disable its inputs while a submission is in flight.

use std::sync::Arc;

use portfolio_di::Build;
use portfolio_extern_contracts::relay::RelayApiService;
use portfolio_models::contact::{ContactSubmission, ContactSubmissionError};
use tokio::sync::watch;
use tracing::{error, info};

pub const INCOMPLETE_ALERT: &str = "Please fill out all fields.";
pub const TOO_LONG_ALERT: &str = "Your message is too long.";
pub const FAILED_ALERT: &str = "Failed to send message.";
pub const TRANSPORT_ALERT: &str = "Something went wrong. Try again later.";
pub const SUCCESS_MESSAGE: &str = "Thank you! Your message has been sent successfully.";

#[derive(Debug, Clone, Build)]
pub struct ContactForm<Relay> {
    relay: Relay,
    #[state]
    fields: ContactFormFields,
    #[state]
    state: StateChannel,
    #[state]
    success_message: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactFormFields {
    pub name: String,
    pub email: String,
    pub message: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FormState {
    #[default]
    Idle,
    Submitting,
}

impl FormState {
    /// Inputs and the submit button are disabled while submitting.
    pub fn is_disabled(self) -> bool {
        self == Self::Submitting
    }

    pub fn submit_label(self) -> &'static str {
        match self {
            Self::Idle => "Send Message",
            Self::Submitting => "Sending...",
        }
    }
}

#[derive(Debug, Clone)]
struct StateChannel(Arc<watch::Sender<FormState>>);

impl Default for StateChannel {
    fn default() -> Self {
        Self(Arc::new(watch::channel(FormState::Idle).0))
    }
}

impl StateChannel {
    fn get(&self) -> FormState {
        *self.0.borrow()
    }

    fn set(&self, state: FormState) {
        self.0.send_replace(state);
    }
}

/// What the visitor gets to see after pressing submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Feedback {
    /// Inline confirmation, the form has been cleared.
    Success(String),
    /// Blocking alert, the form keeps its input.
    Alert(String),
}

impl<Relay> ContactForm<Relay> {
    pub fn new(relay: Relay) -> Self {
        Self {
            relay,
            fields: Default::default(),
            state: Default::default(),
            success_message: None,
        }
    }

    pub fn fields(&self) -> &ContactFormFields {
        &self.fields
    }

    pub fn fields_mut(&mut self) -> &mut ContactFormFields {
        &mut self.fields
    }

    pub fn state(&self) -> FormState {
        self.state.get()
    }

    /// Receives every state change, including the ones made during
    /// [`ContactForm::submit`].
    pub fn subscribe(&self) -> watch::Receiver<FormState> {
        self.state.0.subscribe()
    }

    pub fn is_disabled(&self) -> bool {
        self.state().is_disabled()
    }

    pub fn submit_label(&self) -> &'static str {
        self.state().submit_label()
    }

    pub fn success_message(&self) -> Option<&str> {
        self.success_message.as_deref()
    }
}

impl<Relay: RelayApiService> ContactForm<Relay> {
    pub async fn submit(&mut self) -> Feedback {
        let ContactFormFields {
            name,
            email,
            message,
        } = &self.fields;

        let submission =
            match ContactSubmission::new(name.as_str(), email.as_str(), message.as_str()) {
                Ok(submission) => submission,
                Err(ContactSubmissionError::Incomplete) => {
                    return Feedback::Alert(INCOMPLETE_ALERT.into())
                }
                Err(ContactSubmissionError::TooLong) => {
                    return Feedback::Alert(TOO_LONG_ALERT.into())
                }
            };

        self.state.set(FormState::Submitting);
        self.success_message = None;

        let result = self.relay.send_contact(submission).await;

        self.state.set(FormState::Idle);

        match result {
            Ok(response) if response.is_delivered() => {
                info!("contact message sent");
                self.fields = Default::default();
                self.success_message = Some(SUCCESS_MESSAGE.into());
                Feedback::Success(SUCCESS_MESSAGE.into())
            }
            Ok(response) => {
                let alert = response
                    .error
                    .filter(|error| !error.is_empty())
                    .unwrap_or_else(|| FAILED_ALERT.into());
                Feedback::Alert(alert)
            }
            Err(err) => {
                error!("Email send error: {err:#}");
                Feedback::Alert(TRANSPORT_ALERT.into())
            }
        }
    }
}
