// Every refusal is an RFC 7807 body whose trace id matches the header.

use actix_web::http::StatusCode;
use actix_web::test;
use avalon_backend::AppError;
use backend_test_support::assert_problem_details;
use serde_json::json;

use crate::support::build_test_state;
use crate::support::game_setup::seed_classic;

#[actix_web::test]
async fn missing_identity_is_unauthorized() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let game_id = seed_classic(&state).await?;
    let app = test_app!(state);

    let req = test::TestRequest::get()
        .uri(&format!("/api/games/{game_id}/state"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details(resp, "UNAUTHORIZED", StatusCode::UNAUTHORIZED, None).await;

    let req = test::TestRequest::get()
        .uri(&format!("/api/games/{game_id}/state"))
        .insert_header(("x-user-id", "   "))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details(resp, "UNAUTHORIZED", StatusCode::UNAUTHORIZED, None).await;
    Ok(())
}

#[actix_web::test]
async fn outsiders_are_forbidden() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let game_id = seed_classic(&state).await?;
    let app = test_app!(state);

    let req = test::TestRequest::get()
        .uri(&format!("/api/games/{game_id}/reveal"))
        .insert_header(("x-user-id", "mallory"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details(
        resp,
        "NOT_A_PARTICIPANT",
        StatusCode::FORBIDDEN,
        Some("You are not a player in this game"),
    )
    .await;
    Ok(())
}

#[actix_web::test]
async fn unknown_and_malformed_game_ids() -> Result<(), AppError> {
    let app = test_app!(build_test_state().await?);

    let req = test::TestRequest::get()
        .uri("/api/games/does-not-exist/state")
        .insert_header(("x-user-id", "p0"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details(
        resp,
        "GAME_NOT_FOUND",
        StatusCode::NOT_FOUND,
        Some("does-not-exist"),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/api/games/bad.id/state")
        .insert_header(("x-user-id", "p0"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details(resp, "INVALID_GAME_ID", StatusCode::BAD_REQUEST, None).await;
    Ok(())
}

#[actix_web::test]
async fn malformed_bodies_are_bad_requests() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let game_id = seed_classic(&state).await?;
    let app = test_app!(state);

    let req = test::TestRequest::post()
        .uri(&format!("/api/games/{game_id}/propose"))
        .insert_header(("x-user-id", "p0"))
        .insert_header(("content-type", "application/json"))
        .set_payload("{\"mission\": 1,")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details(
        resp,
        "BAD_REQUEST",
        StatusCode::BAD_REQUEST,
        Some("Invalid JSON"),
    )
    .await;

    let req = test::TestRequest::post()
        .uri(&format!("/api/games/{game_id}/vote"))
        .insert_header(("x-user-id", "p0"))
        .set_json(json!({"mission": "one", "proposal": 1, "vote": "approve"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details(
        resp,
        "BAD_REQUEST",
        StatusCode::BAD_REQUEST,
        Some("wrong types"),
    )
    .await;
    Ok(())
}

#[actix_web::test]
async fn rule_violations_are_400s() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let game_id = seed_classic(&state).await?;
    let app = test_app!(state);

    let req = test::TestRequest::post()
        .uri(&format!("/api/games/{game_id}/propose"))
        .insert_header(("x-user-id", "p1"))
        .set_json(json!({"mission": 1, "proposal": 1, "players": [0, 1]}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details(
        resp,
        "NOT_LEADER",
        StatusCode::BAD_REQUEST,
        Some("You are not the leader"),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/setup")
        .set_json(json!({"players": 3}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details(
        resp,
        "INVALID_PLAYER_COUNT",
        StatusCode::BAD_REQUEST,
        Some("Invalid number of players"),
    )
    .await;
    Ok(())
}

#[actix_web::test]
async fn incoming_request_id_becomes_the_trace_id() -> Result<(), AppError> {
    let app = test_app!(build_test_state().await?);
    let request_id = "0b6f3e8e-5d1c-4a55-9a3e-2f1f4c1d7a10";

    let req = test::TestRequest::get()
        .uri("/api/games/does-not-exist/state")
        .insert_header(("x-user-id", "p0"))
        .insert_header(("x-request-id", request_id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(
        resp.headers().get("x-request-id").and_then(|v| v.to_str().ok()),
        Some(request_id)
    );
    let problem =
        assert_problem_details(resp, "GAME_NOT_FOUND", StatusCode::NOT_FOUND, None).await;
    assert_eq!(problem.trace_id, request_id);
    Ok(())
}
