mod common;

use axum::{Router, routing::get};
use axum_test::TestServer;
use chrono::{Duration, Utc};
use shortlinks::api::handlers::stats_handler;

fn server(state: shortlinks::AppState) -> TestServer {
    let app = Router::new()
        .route("/stats/{token}", get(stats_handler))
        .with_state(state);
    TestServer::new(app).unwrap()
}

#[tokio::test]
async fn test_stats_success_with_windows() {
    let (app, _rx) = common::create_test_state();
    let link = common::create_test_link(&app.store, "http://a.com", "statsAAA", "ownerA").await;
    let now = Utc::now();
    common::create_test_visit(&app.store, link.id, now - Duration::hours(1)).await;
    common::create_test_visit(&app.store, link.id, now - Duration::days(3)).await;
    common::create_test_visit(&app.store, link.id, now - Duration::days(90)).await;
    let server = server(app.state.clone());

    let response = server
        .get("/stats/statsAAA")
        .add_query_param("day", "true")
        .add_query_param("month", "true")
        .add_header("Cookie", common::owner_cookie("ownerA").as_str())
        .await;

    response.assert_status_ok();
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["short"], "statsAAA");
    assert_eq!(json["long_url"], "http://a.com");
    assert_eq!(json["total_visits"], 3);
    assert_eq!(json["per_day"], 1);
    assert_eq!(json["per_month"], 2);
}

#[tokio::test]
async fn test_stats_without_windows_omits_them() {
    let (app, _rx) = common::create_test_state();
    common::create_test_link(&app.store, "http://a.com", "statsAAA", "ownerA").await;
    let server = server(app.state.clone());

    let response = server
        .get("/stats/statsAAA")
        .add_header("Cookie", common::owner_cookie("ownerA").as_str())
        .await;

    response.assert_status_ok();
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["total_visits"], 0);
    assert!(json.get("per_day").is_none());
    assert!(json.get("per_month").is_none());
}

#[tokio::test]
async fn test_stats_foreign_owner_looks_like_missing_link() {
    let (app, _rx) = common::create_test_state();
    common::create_test_link(&app.store, "http://a.com", "statsAAA", "ownerA").await;
    let server = server(app.state.clone());

    let foreign = server
        .get("/stats/statsAAA")
        .add_header("Cookie", common::owner_cookie("ownerB").as_str())
        .await;
    let missing = server
        .get("/stats/nothere1")
        .add_header("Cookie", common::owner_cookie("ownerB").as_str())
        .await;

    foreign.assert_status_not_found();
    missing.assert_status_not_found();
    assert_eq!(
        foreign.json::<serde_json::Value>(),
        missing.json::<serde_json::Value>()
    );
}

#[tokio::test]
async fn test_stats_without_cookie() {
    let (app, _rx) = common::create_test_state();
    common::create_test_link(&app.store, "http://a.com", "statsAAA", "ownerA").await;
    let server = server(app.state.clone());

    let response = server.get("/stats/statsAAA").await;

    response.assert_status_not_found();
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "not_found");
}
