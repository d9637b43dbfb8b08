use actix_web::{web, HttpResponse};

use mo_core::services::otp::{MailServiceTrait, OtpStoreTrait};
use mo_shared::utils::email::mask_email;

use crate::app::AppState;
use crate::dto::{payload, GenerateRequest, GenerateResponse, JsonOrForm};
use crate::handlers::error::{generate_error_response, OTP_SENT};

/// Handler for POST /generate
///
/// Accepts `{"email": "..."}` as JSON or as an urlencoded form. A missing or
/// unreadable body is treated the same as a missing email.
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// { "message": "OTP sent successfully", "success": true }
/// ```
///
/// ## Errors
/// - 400 `Email address is required`
/// - 500 `Failed to send OTP`
/// - 500 `Failed to save OTP to database`
pub async fn generate<M, S>(
    state: web::Data<AppState<M, S>>,
    body: Option<JsonOrForm<GenerateRequest>>,
) -> HttpResponse
where
    M: MailServiceTrait + ?Sized + 'static,
    S: OtpStoreTrait + ?Sized + 'static,
{
    let email = payload(body).and_then(|request| request.email).unwrap_or_default();

    match state.otp_service.issue(&email).await {
        Ok(result) => {
            log::info!(
                "OTP sent to {} (valid until {})",
                mask_email(&result.email),
                result.expires_at.to_rfc3339()
            );
            HttpResponse::Ok().json(GenerateResponse::ok(OTP_SENT))
        }
        Err(error) => generate_error_response(&error),
    }
}
