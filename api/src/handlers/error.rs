//! Mapping from domain outcomes to HTTP responses
//!
//! `/generate` answers with a JSON envelope, `/verify` with plain text. The
//! wording of each response is fixed so existing front ends keep working.

use actix_web::{http::header::ContentType, HttpRequest, HttpResponse};

use mo_core::errors::DomainError;
use mo_shared::errors::{error_codes, ErrorResponse};

use crate::dto::GenerateResponse;

pub const EMAIL_REQUIRED: &str = "Email address is required";
pub const SEND_FAILED: &str = "Failed to send OTP";
pub const SAVE_FAILED: &str = "Failed to save OTP to database";
pub const OTP_SENT: &str = "OTP sent successfully";

pub const EMAIL_AND_OTP_REQUIRED: &str = "Email and OTP are required";
pub const INVALID_EMAIL_OR_OTP: &str = "Invalid email or OTP";
pub const INTERNAL_SERVER_ERROR: &str = "Internal Server Error";
pub const OTP_VERIFIED: &str = "OTP verified successfully";

/// Response for a failed `POST /generate`
pub fn generate_error_response(error: &DomainError) -> HttpResponse {
    match error {
        DomainError::ValidationErr(_) => {
            HttpResponse::BadRequest().json(GenerateResponse::failed(EMAIL_REQUIRED))
        }
        DomainError::Delivery { message } => {
            log::error!("OTP delivery failed: {}", message);
            HttpResponse::InternalServerError().json(GenerateResponse::failed(SEND_FAILED))
        }
        DomainError::Storage { message } => {
            log::error!("OTP persistence failed: {}", message);
            HttpResponse::InternalServerError().json(GenerateResponse::failed(SAVE_FAILED))
        }
    }
}

/// Response for a failed `POST /verify`
pub fn verify_error_response(error: &DomainError) -> HttpResponse {
    match error {
        DomainError::ValidationErr(_) => plain_text(HttpResponse::BadRequest(), EMAIL_AND_OTP_REQUIRED),
        other => {
            log::error!("OTP verification error: {}", other);
            plain_text(HttpResponse::InternalServerError(), INTERNAL_SERVER_ERROR)
        }
    }
}

/// A `text/plain` response with a fixed body
pub fn plain_text(mut builder: actix_web::HttpResponseBuilder, body: &'static str) -> HttpResponse {
    builder.content_type(ContentType::plaintext()).body(body)
}

/// Default 404 handler
pub async fn not_found(req: HttpRequest) -> HttpResponse {
    HttpResponse::NotFound().json(
        ErrorResponse::new(error_codes::NOT_FOUND, "The requested resource was not found")
            .add_detail("path", req.path()),
    )
}
