//! Application state and route table
//!
//! The route table is exposed as a `configure` function so the binary and
//! the tests build exactly the same application.

use std::sync::Arc;

use actix_web::web;

use mo_core::services::otp::{MailServiceTrait, OtpService, OtpStoreTrait};

use crate::handlers::error::not_found;
use crate::routes::{health::health_check, otp, pages};

/// Application state that holds shared services
pub struct AppState<M, S>
where
    M: MailServiceTrait + ?Sized,
    S: OtpStoreTrait + ?Sized,
{
    pub otp_service: Arc<OtpService<M, S>>,
    pub pages: pages::StaticPages,
}

impl<M, S> AppState<M, S>
where
    M: MailServiceTrait + ?Sized,
    S: OtpStoreTrait + ?Sized,
{
    pub fn new(otp_service: Arc<OtpService<M, S>>, pages: pages::StaticPages) -> Self {
        Self { otp_service, pages }
    }
}

/// Register every route on an application
///
/// ```text
/// GET  /health    liveness document
/// GET  /generate  request form
/// POST /generate  issue a code
/// GET  /verify    verification form
/// POST /verify    check a code
/// ```
pub fn configure_app<M, S>(cfg: &mut web::ServiceConfig)
where
    M: MailServiceTrait + ?Sized + 'static,
    S: OtpStoreTrait + ?Sized + 'static,
{
    cfg.route("/health", web::get().to(health_check::<M, S>))
        .service(
            web::resource("/generate")
                .route(web::get().to(pages::generate_page::<M, S>))
                .route(web::post().to(otp::generate::<M, S>)),
        )
        .service(
            web::resource("/verify")
                .route(web::get().to(pages::verify_page::<M, S>))
                .route(web::post().to(otp::verify::<M, S>)),
        )
        .default_service(web::route().to(not_found));
}
