mod common;

use axum::{Router, routing::get};
use axum_test::TestServer;
use chrono::Utc;
use shortlinks::api::handlers::my_links_handler;

fn server(state: shortlinks::AppState) -> TestServer {
    let app = Router::new()
        .route("/mylinks", get(my_links_handler))
        .with_state(state);
    TestServer::new(app).unwrap()
}

#[tokio::test]
async fn test_my_links_without_cookie() {
    let (app, _rx) = common::create_test_state();
    let server = server(app.state.clone());

    let response = server.get("/mylinks").await;

    response.assert_status_ok();
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["mylinks"].as_array().unwrap().len(), 0);
    assert_eq!(json["message"], "You haven't shortened any links");
}

#[tokio::test]
async fn test_my_links_lists_owner_links_in_creation_order() {
    let (app, _rx) = common::create_test_state();
    let first = common::create_test_link(&app.store, "http://a.com", "tokenAAA", "ownerA").await;
    common::create_test_link(&app.store, "http://b.com", "tokenBBB", "ownerB").await;
    common::create_test_link(&app.store, "http://c.com", "tokenCCC", "ownerA").await;
    common::create_test_visit(&app.store, first.id, Utc::now()).await;
    common::create_test_visit(&app.store, first.id, Utc::now()).await;
    let server = server(app.state.clone());

    let response = server
        .get("/mylinks")
        .add_header("Cookie", common::owner_cookie("ownerA").as_str())
        .await;

    response.assert_status_ok();
    let json = response.json::<serde_json::Value>();
    let links = json["mylinks"].as_array().unwrap();

    assert_eq!(links.len(), 2);
    assert_eq!(links[0]["short"], "tokenAAA");
    assert_eq!(links[0]["long_url"], "http://a.com");
    assert_eq!(links[0]["total_visits"], 2);
    assert_eq!(links[1]["short"], "tokenCCC");
    assert_eq!(links[1]["total_visits"], 0);
    assert!(json.get("message").is_none());
}

#[tokio::test]
async fn test_my_links_unknown_owner_is_empty() {
    let (app, _rx) = common::create_test_state();
    common::create_test_link(&app.store, "http://a.com", "tokenAAA", "ownerA").await;
    let server = server(app.state.clone());

    let response = server
        .get("/mylinks")
        .add_header("Cookie", common::owner_cookie("stranger").as_str())
        .await;

    response.assert_status_ok();
    let json = response.json::<serde_json::Value>();
    assert!(json["mylinks"].as_array().unwrap().is_empty());
}
