use actix_web::test;
use avalon_backend::{build_state, AppError};
use serde_json::Value;

use crate::support::build_test_state;

#[actix_web::test]
async fn health_reports_database_and_migrations() -> Result<(), AppError> {
    let app = test_app!(build_test_state().await?);

    let resp = test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;
    assert_eq!(resp.status(), 200);
    assert!(resp.headers().contains_key("x-request-id"));

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["db"], "ok");
    assert!(body["migrations"].as_u64().is_some_and(|n| n >= 1));
    assert!(body.get("db_error").is_none());
    Ok(())
}

#[actix_web::test]
async fn health_stays_up_without_a_database() -> Result<(), AppError> {
    let app = test_app!(build_state().build().await?);

    let resp = test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;
    assert_eq!(resp.status(), 200);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["db"], "error");
    assert!(body["db_error"].is_string());
    assert!(body.get("migrations").is_none());
    Ok(())
}
