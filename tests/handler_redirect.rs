mod common;

use chrono::{Duration, Utc};
use common::{TestApp, bearer};

#[tokio::test]
async fn test_redirect_success() {
    let app = TestApp::new().await;
    app.insert_link("abc123", None, false, None).await;

    let response = app.server.get("/s/abc123").await;

    assert_eq!(response.status_code(), 307);
    assert_eq!(response.header("location"), "https://example.com/abc123");
}

#[tokio::test]
async fn test_redirect_counts_exactly_one_click() {
    let app = TestApp::new().await;
    app.insert_link("abc123", None, false, None).await;

    app.server.get("/s/abc123").await;
    app.server.get("/s/abc123").await;

    assert_eq!(app.find("abc123").await.unwrap().click_count, 2);
}

#[tokio::test]
async fn test_redirect_not_found() {
    let app = TestApp::new().await;

    let response = app.server.get("/s/zzz999").await;

    assert_eq!(response.status_code(), 404);
}

#[tokio::test]
async fn test_redirect_malformed_key_not_found() {
    let app = TestApp::new().await;

    let response = app.server.get("/s/not-a-key").await;

    assert_eq!(response.status_code(), 404);
}

#[tokio::test]
async fn test_redirect_expired_link_not_found_and_not_counted() {
    let app = TestApp::new().await;
    app.insert_link("old123", None, false, Some(Utc::now() - Duration::hours(1)))
        .await;

    let response = app.server.get("/s/old123").await;

    assert_eq!(response.status_code(), 404);
    assert_eq!(app.find("old123").await.unwrap().click_count, 0);
}

#[tokio::test]
async fn test_redirect_private_link_hidden_from_anonymous() {
    let app = TestApp::new().await;
    app.insert_link("priv01", Some(&app.user), true, None).await;

    let response = app.server.get("/s/priv01").await;

    assert_eq!(response.status_code(), 404);
    assert_eq!(app.find("priv01").await.unwrap().click_count, 0);
}

#[tokio::test]
async fn test_redirect_private_link_hidden_from_other_creator() {
    let app = TestApp::new().await;
    app.insert_link("priv01", Some(&app.user), true, None).await;

    let response = app
        .server
        .get("/s/priv01")
        .add_header("Cookie", format!("auth_token={}", common::OTHER_TOKEN))
        .await;

    assert_eq!(response.status_code(), 404);
}

#[tokio::test]
async fn test_redirect_private_link_for_owner() {
    let app = TestApp::new().await;
    app.insert_link("priv01", Some(&app.user), true, None).await;

    let response = app
        .server
        .get("/s/priv01")
        .add_header("Authorization", bearer(common::USER_TOKEN))
        .await;

    assert_eq!(response.status_code(), 307);
    assert_eq!(app.find("priv01").await.unwrap().click_count, 1);
}

#[tokio::test]
async fn test_redirect_with_stale_cookie_is_anonymous() {
    let app = TestApp::new().await;
    app.insert_link("abc123", None, false, None).await;

    let response = app
        .server
        .get("/s/abc123")
        .add_header("Cookie", "auth_token=revoked-or-unknown")
        .await;

    assert_eq!(response.status_code(), 307);
}

#[tokio::test]
async fn test_concurrent_resolves_are_all_counted() {
    let app = TestApp::new().await;
    app.insert_link("hot123", None, false, None).await;

    let handles: Vec<_> = (0..50)
        .map(|_| {
            let service = app.state.link_service.clone();
            tokio::spawn(async move { service.resolve("hot123", None).await })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.await.unwrap().unwrap(), "https://example.com/hot123");
    }

    assert_eq!(app.find("hot123").await.unwrap().click_count, 50);
}
