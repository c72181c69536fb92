//! End-to-end API flow tests
//!
//! These run against a real PostgreSQL database and are skipped unless
//! `TEST_DATABASE_URL` is set. Each test migrates and truncates, so they
//! are serialized with `#[serial]`.

mod common;

use axum::http::StatusCode;
use axum_test::multipart::{MultipartForm, Part};
use serde_json::json;
use serial_test::serial;

use common::TestApp;

/// Register a user and return their access token.
async fn register(app: &TestApp, username: &str, email: &str, password: &str) -> String {
    let response = app
        .server
        .post("/register")
        .json(&json!({
            "username": username,
            "email": email,
            "password": password
        }))
        .await;
    response.assert_status(StatusCode::OK);
    let body = response.json::<serde_json::Value>();
    assert_eq!(body["token_type"], "bearer");
    body["access_token"].as_str().unwrap().to_string()
}

/// Create a link and return its id.
async fn create_link(app: &TestApp, token: &str, title: &str, url: &str) -> i64 {
    let response = app
        .server
        .post("/links")
        .authorization_bearer(token)
        .json(&json!({ "title": title, "url": url }))
        .await;
    response.assert_status(StatusCode::OK);
    response.json::<serde_json::Value>()["id"].as_i64().unwrap()
}

macro_rules! require_db {
    () => {
        match common::database_app().await {
            Some(app) => app,
            None => {
                eprintln!("skipping: TEST_DATABASE_URL not set");
                return;
            }
        }
    };
}

#[tokio::test]
#[serial]
async fn test_register_login_link_lifecycle() {
    let app = require_db!();

    // Register alice; the response token is immediately usable.
    let register_token = register(&app, "alice", "alice@x.com", "Passw0rd!").await;

    // Login yields a (possibly different) valid token.
    let response = app
        .server
        .post("/login")
        .json(&json!({ "username": "alice", "password": "Passw0rd!" }))
        .await;
    response.assert_status(StatusCode::OK);
    let login_token = response.json::<serde_json::Value>()["access_token"]
        .as_str()
        .unwrap()
        .to_string();

    for token in [&register_token, &login_token] {
        let response = app.server.get("/me").authorization_bearer(token).await;
        response.assert_status(StatusCode::OK);
    }

    // Create a link and read it back.
    let link_id = create_link(&app, &login_token, "Blog", "https://a.example").await;

    let response = app
        .server
        .get(&format!("/links/{}", link_id))
        .authorization_bearer(&login_token)
        .await;
    response.assert_status(StatusCode::OK);
    assert_eq!(response.json::<serde_json::Value>()["title"], "Blog");

    // Another user sees alice's link as nonexistent.
    let bob_token = register(&app, "bob", "bob@x.com", "Passw0rd!").await;
    let response = app
        .server
        .get(&format!("/links/{}", link_id))
        .authorization_bearer(&bob_token)
        .await;
    response.assert_status(StatusCode::NOT_FOUND);

    // Delete with alice's token, then it is gone for everyone.
    let response = app
        .server
        .delete(&format!("/links/{}", link_id))
        .authorization_bearer(&login_token)
        .await;
    response.assert_status(StatusCode::OK);
    assert_eq!(response.json::<serde_json::Value>()["detail"], "Deleted");

    let response = app
        .server
        .get(&format!("/links/{}", link_id))
        .authorization_bearer(&login_token)
        .await;
    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
#[serial]
async fn test_duplicate_registration_conflicts() {
    let app = require_db!();
    register(&app, "alice", "alice@x.com", "Passw0rd!").await;

    // Same username again.
    let response = app
        .server
        .post("/register")
        .json(&json!({
            "username": "alice",
            "email": "other@x.com",
            "password": "Passw0rd!"
        }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<serde_json::Value>()["error"], "CONFLICT");

    // Distinct username, same email.
    let response = app
        .server
        .post("/register")
        .json(&json!({
            "username": "alice2",
            "email": "alice@x.com",
            "password": "Passw0rd!"
        }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[serial]
async fn test_login_rejects_bad_credentials() {
    let app = require_db!();
    register(&app, "alice", "alice@x.com", "Passw0rd!").await;

    let response = app
        .server
        .post("/login")
        .json(&json!({ "username": "alice", "password": "WrongPass1!" }))
        .await;
    response.assert_status(StatusCode::UNAUTHORIZED);

    let response = app
        .server
        .post("/login")
        .json(&json!({ "username": "nobody", "password": "Passw0rd!" }))
        .await;
    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[serial]
async fn test_token_for_vanished_user_is_unauthenticated() {
    let app = require_db!();
    // A well-signed token whose subject never registered resolves to 401,
    // indistinguishable from a bad token.
    let token = app.tokens.issue("ghost").unwrap();
    let response = app.server.get("/me").authorization_bearer(&token).await;
    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[serial]
async fn test_cross_user_update_and_delete_are_404() {
    let app = require_db!();
    let alice = register(&app, "alice", "alice@x.com", "Passw0rd!").await;
    let bob = register(&app, "bob", "bob@x.com", "Passw0rd!").await;
    let link_id = create_link(&app, &alice, "Blog", "https://a.example").await;

    let response = app
        .server
        .put(&format!("/links/{}", link_id))
        .authorization_bearer(&bob)
        .json(&json!({ "title": "Hijacked" }))
        .await;
    response.assert_status(StatusCode::NOT_FOUND);

    let response = app
        .server
        .delete(&format!("/links/{}", link_id))
        .authorization_bearer(&bob)
        .await;
    response.assert_status(StatusCode::NOT_FOUND);

    // Alice's link is untouched.
    let response = app
        .server
        .get(&format!("/links/{}", link_id))
        .authorization_bearer(&alice)
        .await;
    response.assert_status(StatusCode::OK);
    assert_eq!(response.json::<serde_json::Value>()["title"], "Blog");
}

#[tokio::test]
#[serial]
async fn test_link_partial_update() {
    let app = require_db!();
    let alice = register(&app, "alice", "alice@x.com", "Passw0rd!").await;
    let link_id = create_link(&app, &alice, "Blog", "https://a.example").await;

    // Update only the title; the url must survive.
    let response = app
        .server
        .put(&format!("/links/{}", link_id))
        .authorization_bearer(&alice)
        .json(&json!({ "title": "New Blog" }))
        .await;
    response.assert_status(StatusCode::OK);
    let body = response.json::<serde_json::Value>();
    assert_eq!(body["title"], "New Blog");
    assert_eq!(body["url"], "https://a.example");

    // And the other way around.
    let response = app
        .server
        .put(&format!("/links/{}", link_id))
        .authorization_bearer(&alice)
        .json(&json!({ "url": "https://b.example" }))
        .await;
    response.assert_status(StatusCode::OK);
    let body = response.json::<serde_json::Value>();
    assert_eq!(body["title"], "New Blog");
    assert_eq!(body["url"], "https://b.example");
}

#[tokio::test]
#[serial]
async fn test_my_links_and_public_listing() {
    let app = require_db!();
    let alice = register(&app, "alice", "alice@x.com", "Passw0rd!").await;
    for i in 1..=3 {
        create_link(&app, &alice, &format!("Link {}", i), "https://a.example").await;
    }

    // Owner listing returns everything in insertion order.
    let response = app.server.get("/links").authorization_bearer(&alice).await;
    response.assert_status(StatusCode::OK);
    let body = response.json::<serde_json::Value>();
    let titles: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|l| l["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Link 1", "Link 2", "Link 3"]);

    // Public listing honors limit/offset over the same order.
    let response = app
        .server
        .get("/users/alice/links")
        .add_query_param("limit", 2)
        .add_query_param("offset", 1)
        .await;
    response.assert_status(StatusCode::OK);
    let body = response.json::<serde_json::Value>();
    let titles: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|l| l["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Link 2", "Link 3"]);

    // Unknown usernames produce an empty list, not a 404.
    let response = app.server.get("/users/ghost/links").await;
    response.assert_status(StatusCode::OK);
    assert!(response.json::<serde_json::Value>().as_array().unwrap().is_empty());
}

#[tokio::test]
#[serial]
async fn test_public_profile() {
    let app = require_db!();
    let alice = register(&app, "alice", "alice@x.com", "Passw0rd!").await;
    create_link(&app, &alice, "Blog", "https://a.example").await;

    let response = app.server.get("/users/alice").await;
    response.assert_status(StatusCode::OK);
    let body = response.json::<serde_json::Value>();
    assert_eq!(body["username"], "alice");
    assert_eq!(body["links"].as_array().unwrap().len(), 1);
    // The public view carries no email.
    assert!(body.get("email").is_none());

    let response = app.server.get("/users/ghost").await;
    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
#[serial]
async fn test_profile_partial_update_via_multipart() {
    let app = require_db!();
    let alice = register(&app, "alice", "alice@x.com", "Passw0rd!").await;

    // Upload an avatar with no bio part.
    let avatar = Part::bytes(common::png_bytes())
        .file_name("avatar.png")
        .mime_type("image/png");
    let response = app
        .server
        .patch("/me")
        .authorization_bearer(&alice)
        .multipart(MultipartForm::new().add_part("avatar", avatar))
        .await;
    response.assert_status(StatusCode::OK);
    let body = response.json::<serde_json::Value>();
    let avatar_url = body["avatar_url"].as_str().unwrap().to_string();
    assert!(avatar_url.starts_with("/media/avatars/alice_"));
    assert!(avatar_url.ends_with(".png"));
    assert_eq!(body["bio"], "");

    // Now set only the bio; the avatar must survive.
    let response = app
        .server
        .patch("/me")
        .authorization_bearer(&alice)
        .multipart(MultipartForm::new().add_text("bio", "hello, links"))
        .await;
    response.assert_status(StatusCode::OK);
    let body = response.json::<serde_json::Value>();
    assert_eq!(body["bio"], "hello, links");
    assert_eq!(body["avatar_url"], avatar_url);

    // An empty bio part clears the bio (distinct from an absent part).
    let response = app
        .server
        .patch("/me")
        .authorization_bearer(&alice)
        .multipart(MultipartForm::new().add_text("bio", ""))
        .await;
    response.assert_status(StatusCode::OK);
    let body = response.json::<serde_json::Value>();
    assert_eq!(body["bio"], "");
    assert_eq!(body["avatar_url"], avatar_url);
}

#[tokio::test]
#[serial]
async fn test_avatar_rejects_renamed_junk() {
    let app = require_db!();
    let alice = register(&app, "alice", "alice@x.com", "Passw0rd!").await;

    // A ".png" name and an image content type do not make these bytes an
    // image; the sniffer decides.
    let junk = Part::bytes(b"this is not an image at all".to_vec())
        .file_name("totally-real.png")
        .mime_type("image/png");
    let response = app
        .server
        .patch("/me")
        .authorization_bearer(&alice)
        .multipart(MultipartForm::new().add_part("avatar", junk))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    // The profile is unchanged.
    let response = app.server.get("/me").authorization_bearer(&alice).await;
    assert_eq!(response.json::<serde_json::Value>()["avatar_url"], "");
}

#[tokio::test]
#[serial]
async fn test_me_includes_links() {
    let app = require_db!();
    let alice = register(&app, "alice", "alice@x.com", "Passw0rd!").await;
    create_link(&app, &alice, "Blog", "https://a.example").await;

    let response = app.server.get("/me").authorization_bearer(&alice).await;
    response.assert_status(StatusCode::OK);
    let body = response.json::<serde_json::Value>();
    assert_eq!(body["email"], "alice@x.com");
    assert_eq!(body["links"].as_array().unwrap().len(), 1);
}
