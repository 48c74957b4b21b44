// Happy paths over HTTP: setup catalog, game start, joining and a round of
// play answered with the caller's state document.

use actix_web::test;
use avalon_backend::services::game_reads;
use avalon_backend::AppError;
use backend_test_support::unique_str;
use serde_json::{json, Value};

use crate::support::build_test_state;
use crate::support::game_setup::{seed_classic, HUMANS};

#[actix_web::test]
async fn setup_lists_the_table() -> Result<(), AppError> {
    let app = test_app!(build_test_state().await?);

    let req = test::TestRequest::post()
        .uri("/api/setup")
        .set_json(json!({"players": 7}))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["spies"], 3);
    assert_eq!(body["setup"].as_array().map(Vec::len), Some(5));
    let good: Vec<&str> = body["good_cards"]
        .as_array()
        .expect("good_cards")
        .iter()
        .filter_map(Value::as_str)
        .collect();
    assert!(good.contains(&"Merlin"));
    assert!(good.contains(&"Percival"));
    let evil = body["evil_cards"].as_array().expect("evil_cards");
    assert!(evil.iter().any(|c| c == "Assassin"));
    Ok(())
}

#[actix_web::test]
async fn start_seats_the_caller_and_is_idempotent() -> Result<(), AppError> {
    let app = test_app!(build_test_state().await?);
    let uri = format!("/api/hangouts/{}/games", unique_str("hangout"));
    let cards = json!(["Merlin", "Good", "Good", "Assassin", "Evil"]);

    let req = test::TestRequest::post()
        .uri(&uri)
        .insert_header(("x-user-id", "alice"))
        .set_json(json!({"players": ["bob"], "cards": cards}))
        .to_request();
    let first: Value = test::call_and_read_body_json(&app, req).await;
    let players = first["players"].as_array().expect("players");
    assert_eq!(players.len(), 5);
    assert!(players.iter().any(|p| p == "alice"));
    assert!(players.iter().any(|p| p == "bob"));
    let game_id = first["game_id"].as_str().expect("game_id").to_string();

    let req = test::TestRequest::post()
        .uri(&uri)
        .insert_header(("x-user-id", "bob"))
        .set_json(json!({"cards": cards}))
        .to_request();
    let again: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(again["game_id"], game_id.as_str());

    let req = test::TestRequest::post()
        .uri(&format!("/api/games/{game_id}/join"))
        .insert_header(("x-user-id", "alice"))
        .set_json(json!({"participant_id": "hangout-participant-1"}))
        .to_request();
    let joined: Value = test::call_and_read_body_json(&app, req).await;
    let seat = players
        .iter()
        .position(|p| p == "alice")
        .expect("alice is seated");
    assert_eq!(joined["seat"], seat);

    // Poking lets the bots take every move that does not need a human.
    let req = test::TestRequest::post()
        .uri(&format!("/api/games/{game_id}/poke"))
        .insert_header(("x-user-id", "alice"))
        .to_request();
    let doc: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(doc["game_id"], game_id.as_str());
    assert_eq!(doc["seat"], seat);
    assert!(doc["state"].is_string());
    Ok(())
}

#[actix_web::test]
async fn start_records_the_creators_participant_id() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let app = test_app!(state.clone());
    let cards = json!(["Merlin", "Good", "Good", "Assassin", "Evil"]);

    let req = test::TestRequest::post()
        .uri(&format!("/api/hangouts/{}/games", unique_str("hangout")))
        .insert_header(("x-user-id", "alice"))
        .set_json(json!({"cards": cards, "participant_id": "hangout-participant-7"}))
        .to_request();
    let started: Value = test::call_and_read_body_json(&app, req).await;
    let game_id = started["game_id"].as_str().expect("game_id");
    let seat = started["players"]
        .as_array()
        .expect("players")
        .iter()
        .position(|p| p == "alice")
        .expect("alice is seated");

    let record = game_reads::player_id(&state, game_id, seat).await?;
    assert_eq!(
        record.map(|p| p.participant_id),
        Some("hangout-participant-7".to_string())
    );
    Ok(())
}

#[actix_web::test]
async fn a_round_of_play_over_http() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let game_id = seed_classic(&state).await?;
    let app = test_app!(state);

    let req = test::TestRequest::get()
        .uri(&format!("/api/games/{game_id}/state"))
        .insert_header(("x-user-id", "p0"))
        .to_request();
    let doc: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(doc["state"], "picking");
    assert_eq!(doc["mission"], 1);
    assert_eq!(doc["proposal"], 1);
    assert_eq!(doc["leader"], 0);
    assert_eq!(doc["mission_size"], 2);

    let req = test::TestRequest::post()
        .uri(&format!("/api/games/{game_id}/propose"))
        .insert_header(("x-user-id", "p0"))
        .set_json(json!({"mission": 1, "proposal": 1, "players": [0, 1]}))
        .to_request();
    let doc: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(doc["state"], "voting");
    assert_eq!(doc["team"], json!([0, 1]));

    for user in HUMANS {
        let req = test::TestRequest::post()
            .uri(&format!("/api/games/{game_id}/vote"))
            .insert_header(("x-user-id", user))
            .set_json(json!({"mission": 1, "proposal": 1, "vote": "approve"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 200, "vote by {user}");
    }

    let req = test::TestRequest::get()
        .uri(&format!("/api/games/{game_id}/state"))
        .insert_header(("x-user-id", "p1"))
        .to_request();
    let doc: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(doc["state"], "mission");
    assert_eq!(doc["acted"], json!([false, false]));
    assert_eq!(doc["permitted"], json!({"success": true, "failure": false}));
    assert_eq!(doc["votes"].as_array().map(Vec::len), Some(1));

    for user in ["p0", "p1"] {
        let req = test::TestRequest::post()
            .uri(&format!("/api/games/{game_id}/mission"))
            .insert_header(("x-user-id", user))
            .set_json(json!({"mission": 1, "proposal": 1, "action": "success"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 200, "action by {user}");
    }

    let req = test::TestRequest::get()
        .uri(&format!("/api/games/{game_id}/state"))
        .insert_header(("x-user-id", "p4"))
        .to_request();
    let doc: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(doc["state"], "picking");
    assert_eq!(doc["mission"], 2);
    assert_eq!(doc["leader"], 1);
    assert_eq!(doc["good_score"], 1);
    assert_eq!(doc["mission_results"][0]["fails"], 0);

    let req = test::TestRequest::get()
        .uri(&format!("/api/games/{game_id}/reveal"))
        .insert_header(("x-user-id", "p4"))
        .to_request();
    let reveal: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(reveal[0]["label"], "Your card: Evil");
    assert_eq!(reveal[1]["players"], json!([3, 4]));
    Ok(())
}
