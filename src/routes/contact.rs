use actix_web::{
    error::JsonPayloadError, http::StatusCode, web, HttpRequest, HttpResponse, ResponseError,
};

use crate::{
    domain::ContactFormBody,
    relay::{ContactError, ContactRelay},
};

/// The JSON envelope every `/api/contact` response is wrapped in.
#[derive(Debug, serde::Serialize, serde::Deserialize, PartialEq, Eq)]
pub struct ResponseEnvelope {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ResponseEnvelope {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.into(),
            error: None,
        }
    }

    pub fn with_error(message: &str, error: String) -> Self {
        Self {
            message: message.into(),
            error: Some(error),
        }
    }
}

impl ResponseError for ContactError {
    fn status_code(&self) -> StatusCode {
        match self {
            ContactError::Validation(_) => StatusCode::BAD_REQUEST,
            ContactError::Delivery(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        // Delivery failures are logged in full and never described to the caller.
        let envelope = match self {
            ContactError::Validation(detail) => {
                ResponseEnvelope::with_error("Invalid contact submission", detail.clone())
            }
            ContactError::Delivery(_) => ResponseEnvelope::new("Failed to send email"),
        };
        HttpResponse::build(self.status_code()).json(envelope)
    }
}

#[tracing::instrument(name = "Handling a contact submission", skip(body, relay))]
pub async fn contact(
    body: web::Json<ContactFormBody>,
    relay: web::Data<ContactRelay>,
) -> Result<HttpResponse, ContactError> {
    relay.relay(body.into_inner()).await?;

    Ok(HttpResponse::Ok().json(ResponseEnvelope::new("Email sent successfully")))
}

pub async fn method_not_allowed() -> HttpResponse {
    HttpResponse::MethodNotAllowed().json(ResponseEnvelope::new("Method not allowed"))
}

/// Malformed JSON, a wrong content type or a missing field all get the 400 envelope.
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    tracing::warn!(error.message = %err, "Rejected unreadable contact submission");
    ContactError::Validation(err.to_string()).into()
}
