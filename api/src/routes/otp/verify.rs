use actix_web::{web, HttpResponse};

use mo_core::services::otp::{MailServiceTrait, OtpStoreTrait, VerifyOutcome};

use crate::app::AppState;
use crate::dto::{payload, JsonOrForm, VerifyRequest};
use crate::handlers::error::{plain_text, verify_error_response, INVALID_EMAIL_OR_OTP, OTP_VERIFIED};

/// Handler for POST /verify
///
/// Accepts `{"email": "...", "otp": "..."}` as JSON or as an urlencoded form
/// and answers in plain text:
/// - 200 `OTP verified successfully`
/// - 400 `Email and OTP are required`
/// - 400 `Invalid email or OTP`
/// - 500 `Internal Server Error`
pub async fn verify<M, S>(
    state: web::Data<AppState<M, S>>,
    body: Option<JsonOrForm<VerifyRequest>>,
) -> HttpResponse
where
    M: MailServiceTrait + ?Sized + 'static,
    S: OtpStoreTrait + ?Sized + 'static,
{
    let request = payload(body).unwrap_or_default();
    let email = request.email.unwrap_or_default();
    let otp = request.otp.unwrap_or_default();

    match state.otp_service.verify(&email, &otp).await {
        Ok(VerifyOutcome::Verified) => plain_text(HttpResponse::Ok(), OTP_VERIFIED),
        Ok(VerifyOutcome::Rejected) => plain_text(HttpResponse::BadRequest(), INVALID_EMAIL_OR_OTP),
        Err(error) => verify_error_response(&error),
    }
}
