use std::collections::HashMap;

use actix_web::{web, HttpResponse};

use mo_core::services::otp::{MailServiceTrait, OtpStoreTrait};
use mo_shared::types::{HealthResponse, HealthStatus, ServiceHealth};

use crate::app::AppState;

/// Health check endpoint handler
///
/// Probes the OTP store and answers 503 when it is unreachable.
pub async fn health_check<M, S>(state: web::Data<AppState<M, S>>) -> HttpResponse
where
    M: MailServiceTrait + ?Sized + 'static,
    S: OtpStoreTrait + ?Sized + 'static,
{
    let store = state.otp_service.store();
    let backend = store.backend_name();

    let store_health = match store.health_check().await {
        Ok(()) => ServiceHealth::healthy(format!("backend: {}", backend)),
        Err(e) => {
            log::warn!("OTP store health check failed ({}): {}", backend, e);
            ServiceHealth::unhealthy(format!("backend: {}", backend))
        }
    };

    let mut services = HashMap::new();
    services.insert("otp_store".to_string(), store_health);

    let response = HealthResponse::from_services(env!("CARGO_PKG_VERSION"), services);
    match response.status {
        HealthStatus::Unhealthy => HttpResponse::ServiceUnavailable().json(response),
        _ => HttpResponse::Ok().json(response),
    }
}
