use std::io;
use std::sync::Arc;

use actix_web::{middleware::Logger, web, App, HttpServer};
use log::info;

use mo_api::{configure_app, middleware::cors::create_cors, routes::pages::StaticPages, AppState};
use mo_core::services::otp::{
    ExpirySweeper, ExpirySweeperConfig, MailServiceTrait, OtpService, OtpServiceConfig,
    OtpStoreTrait,
};
use mo_infra::{create_mail_service, create_otp_store};
use mo_shared::config::AppConfig;

fn startup_error(context: &str, error: impl std::fmt::Display) -> io::Error {
    io::Error::new(io::ErrorKind::Other, format!("{}: {}", context, error))
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    info!("Starting MailOTP API Server");

    let config = AppConfig::from_env();
    info!("Environment: {:?}", config.environment);

    config
        .mail
        .validate()
        .map_err(|e| startup_error("Invalid mail configuration", e))?;

    let mail_service = create_mail_service(&config.mail)
        .map_err(|e| startup_error("Failed to create mail service", e))?;

    let service_config = OtpServiceConfig::from(&config.otp);
    let store = create_otp_store(&config.store, service_config.ttl())
        .await
        .map_err(|e| startup_error("Failed to initialize OTP store", e))?;
    info!("OTP store backend: {}", store.backend_name());

    let sweeper = Arc::new(ExpirySweeper::new(
        store.clone(),
        ExpirySweeperConfig::every(config.otp.sweep_interval_seconds),
    ));
    // Detached; runs for the life of the process
    let _sweeper = sweeper.start_background_task();

    let otp_service = Arc::new(OtpService::new(mail_service, store, service_config));
    let pages = StaticPages::from_static_dir(config.server.static_dir.as_deref());
    let state = web::Data::new(AppState::new(otp_service, pages));

    let bind_address = config.server.bind_address();
    info!("Server will bind to: {}", bind_address);

    let cors_config = config.cors.clone();
    let environment = config.environment;

    let mut server = HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(Logger::default())
            .wrap(create_cors(&cors_config, environment))
            .configure(configure_app::<dyn MailServiceTrait, dyn OtpStoreTrait>)
    });

    // 0 keeps actix's default of one worker per core
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server.bind(&bind_address)?.run().await
}
