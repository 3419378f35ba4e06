use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing, Extension, Json, Router,
};
use portfolio_core_contact_contracts::{ContactFeatureService, ContactSendMessageError};
use portfolio_models::contact::{ContactSubmission, ContactSubmissionError};
use tracing::debug;

use crate::{
    errors::{error, internal_server_error},
    middlewares::client_ip::ClientIp,
    models::contact::{ApiContactResponse, ApiContactSubmission},
};

pub const PATH: &str = "/api/contact";

pub const SENT_MESSAGE: &str = "Email sent successfully!";
pub const INVALID_BODY_ERROR: &str = "Invalid request body";
pub const INCOMPLETE_ERROR: &str = "Please fill all fields";
pub const TOO_LONG_ERROR: &str = "Message too long";
pub const RATE_LIMITED_ERROR: &str = "Too many requests";
pub const SEND_FAILED_ERROR: &str = "Failed to send email";

pub fn router(service: Arc<impl ContactFeatureService>) -> Router<()> {
    Router::new()
        .route(PATH, routing::post(send_message))
        .with_state(service)
}

async fn send_message(
    service: State<Arc<impl ContactFeatureService>>,
    Extension(ClientIp(client_ip)): Extension<ClientIp>,
    body: Result<Json<ApiContactSubmission>, JsonRejection>,
) -> Response {
    let submission = match body {
        Ok(Json(submission)) => submission,
        Err(rejection) => {
            debug!("rejected contact request body: {rejection}");
            return error(StatusCode::BAD_REQUEST, INVALID_BODY_ERROR);
        }
    };

    let submission = match ContactSubmission::try_from(submission) {
        Ok(submission) => submission,
        Err(ContactSubmissionError::Incomplete) => {
            return error(StatusCode::BAD_REQUEST, INCOMPLETE_ERROR)
        }
        Err(ContactSubmissionError::TooLong) => {
            return error(StatusCode::BAD_REQUEST, TOO_LONG_ERROR)
        }
    };

    match service.send_message(client_ip, submission).await {
        Ok(()) => Json(ApiContactResponse {
            success: true,
            message: SENT_MESSAGE,
        })
        .into_response(),
        Err(ContactSendMessageError::RateLimited) => {
            error(StatusCode::TOO_MANY_REQUESTS, RATE_LIMITED_ERROR)
        }
        Err(ContactSendMessageError::Send) => {
            error(StatusCode::INTERNAL_SERVER_ERROR, SEND_FAILED_ERROR)
        }
        Err(ContactSendMessageError::Other(err)) => internal_server_error(err),
    }
}
