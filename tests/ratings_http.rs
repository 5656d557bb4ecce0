mod common;

use axum::http::{Method, StatusCode};
use serde_json::json;

use common::app::spawn_test_app;
use common::http::{assert_status_ok_json, request, response_json};

#[tokio::test]
async fn it_registers_a_player_at_1600() {
    let app = spawn_test_app().await;

    let resp = request(&app.app, Method::POST, "/new/ada", None).await;
    let (status, _, body) = response_json(resp).await;
    assert_status_ok_json(status, &body);
    assert_eq!(body["data"]["ada"], 1600);

    let (_, _, table) = response_json(request(&app.app, Method::GET, "/elo", None).await).await;
    assert_eq!(table["data"]["ada"], 1600);
}

#[tokio::test]
async fn it_reads_unknown_players_as_1600_without_creating_them() {
    let app = spawn_test_app().await;

    let resp = request(&app.app, Method::GET, "/elo/neverseen", None).await;
    let (status, _, body) = response_json(resp).await;
    assert_status_ok_json(status, &body);
    assert_eq!(body["data"]["neverseen"], 1600);

    let (_, _, table) = response_json(request(&app.app, Method::GET, "/elo", None).await).await;
    assert_eq!(table["data"], json!({}));
}

#[tokio::test]
async fn it_resets_a_player_on_re_registration() {
    let app = spawn_test_app().await;

    request(&app.app, Method::POST, "/new/A", None).await;
    request(
        &app.app,
        Method::POST,
        "/match",
        Some(json!({"winner": "A", "loser": "B"})),
    )
    .await;

    let (_, _, before) =
        response_json(request(&app.app, Method::GET, "/elo/A", None).await).await;
    assert_eq!(before["data"]["A"], 1616);

    // Registration is not idempotent: match history is discarded.
    request(&app.app, Method::POST, "/new/A", None).await;
    let (_, _, after) = response_json(request(&app.app, Method::GET, "/elo/A", None).await).await;
    assert_eq!(after["data"]["A"], 1600);
}

#[tokio::test]
async fn it_self_heals_a_corrupt_rating_entry() {
    let app = spawn_test_app().await;

    request(&app.app, Method::POST, "/new/ok", None).await;
    app.state
        .store()
        .ratings
        .insert(b"y", b"not-a-number")
        .unwrap();

    // Corrupt entry is omitted from the table and purged as a side effect.
    let (_, _, table) = response_json(request(&app.app, Method::GET, "/elo", None).await).await;
    assert_eq!(table["data"]["ok"], 1600);
    assert!(table["data"].get("y").is_none());
    assert_eq!(app.state.store().ratings.get(b"y").unwrap(), None);

    // A subsequent read sees a fresh player.
    let (_, _, body) = response_json(request(&app.app, Method::GET, "/elo/y", None).await).await;
    assert_eq!(body["data"]["y"], 1600);
}

#[tokio::test]
async fn it_returns_a_json_404_for_unknown_routes() {
    let app = spawn_test_app().await;

    let resp = request(&app.app, Method::GET, "/nope", None).await;
    let (status, headers, body) = response_json(resp).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(headers.contains_key("x-request-id"));
    assert_eq!(body["code"], "NOT_FOUND");
    assert!(body["traceId"].is_string());
}
