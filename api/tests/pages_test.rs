mod common;

use actix_web::{http::StatusCode, test, web, App};
use serde_json::Value;

use common::TestContext;
use mo_api::configure_app;
use mo_api::routes::pages::StaticPages;
use mo_api::AppState;
use mo_infra::{InMemoryOtpStore, MockMailService};

macro_rules! init_app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($state))
                .configure(configure_app::<MockMailService, InMemoryOtpStore>),
        )
        .await
    };
}

#[actix_web::test]
async fn test_generate_page_is_html_form() {
    let context = TestContext::new();
    let app = init_app!(context.state());

    let req = test::TestRequest::get().uri("/generate").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers().get("content-type").unwrap(),
        "text/html; charset=utf-8"
    );

    let body = test::read_body(resp).await;
    let html = std::str::from_utf8(&body).unwrap();
    assert!(html.contains("action=\"/generate\""));
    assert!(html.contains("name=\"email\""));
}

#[actix_web::test]
async fn test_verify_page_is_html_form() {
    let context = TestContext::new();
    let app = init_app!(context.state());

    let req = test::TestRequest::get().uri("/verify").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = test::read_body(resp).await;
    let html = std::str::from_utf8(&body).unwrap();
    assert!(html.contains("action=\"/verify\""));
    assert!(html.contains("name=\"otp\""));
}

#[actix_web::test]
async fn test_pages_fall_back_when_override_missing() {
    let context = TestContext::new();
    let state = context.state();
    let state = AppState::new(
        state.otp_service.clone(),
        StaticPages::with_override_dir("/nonexistent/static/dir"),
    );
    let app = init_app!(state);

    let req = test::TestRequest::get().uri("/generate").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_pages_read_override_dir() {
    let dir = std::env::temp_dir().join(format!("mo_api_pages_{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("verify.html"), "<p>custom verify</p>").unwrap();

    let context = TestContext::new();
    let state = AppState::new(
        context.state().otp_service.clone(),
        StaticPages::with_override_dir(&dir),
    );
    let app = init_app!(state);

    let req = test::TestRequest::get().uri("/verify").to_request();
    let resp = test::call_service(&app, req).await;
    let body = test::read_body(resp).await;
    assert_eq!(&body[..], b"<p>custom verify</p>");

    // generate.html is not overridden
    let req = test::TestRequest::get().uri("/generate").to_request();
    let resp = test::call_service(&app, req).await;
    let body = test::read_body(resp).await;
    assert!(std::str::from_utf8(&body).unwrap().contains("<form"));

    let _ = std::fs::remove_dir_all(&dir);
}

#[actix_web::test]
async fn test_health_reports_store_backend() {
    let context = TestContext::new();
    let app = init_app!(context.state());

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["services"]["otp_store"]["message"], "backend: memory");
}

#[actix_web::test]
async fn test_health_unavailable_when_store_is_down() {
    let state = common::broken_store_state(std::sync::Arc::new(MockMailService::new()));
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .configure(configure_app::<MockMailService, common::BrokenStore>),
    )
    .await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "unhealthy");
    assert_eq!(body["services"]["otp_store"]["message"], "backend: broken");
}

#[actix_web::test]
async fn test_unknown_route_is_not_found() {
    let context = TestContext::new();
    let app = init_app!(context.state());

    let req = test::TestRequest::get().uri("/api/v1/nothing").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "not_found");
    assert_eq!(body["details"]["path"], "/api/v1/nothing");
}

#[actix_web::test]
async fn test_wrong_method_is_rejected() {
    let context = TestContext::new();
    let app = init_app!(context.state());

    let req = test::TestRequest::delete().uri("/generate").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
}
