mod common;

use axum::http::{Method, StatusCode};
use serde_json::json;
use shelf_authz::OwnershipPolicy;
use shelf_kernel::settings::Settings;

use common::{app, app_with, TestApp};

fn enforced() -> TestApp {
    let mut settings = Settings::default();
    settings.auth.ownership = OwnershipPolicy::Enforced;
    app_with(settings)
}

async fn create_as(app: &TestApp, user: &str) -> String {
    let response = app
        .send(
            Method::POST,
            "/authors",
            &[("x-user-id", user)],
            Some(json!({"author": {"name": "Ada"}})),
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["author"]["owner"], user);
    response.body["author"]["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn enforced_create_requires_caller() {
    let response = enforced()
        .post("/authors", json!({"author": {"name": "Ada"}}))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["error"]["code"], "ownership_error");
}

#[tokio::test]
async fn enforced_update_by_other_caller_is_rejected() {
    let app = enforced();
    let id = create_as(&app, "alice").await;

    let response = app
        .send(
            Method::PATCH,
            &format!("/authors/{id}"),
            &[("x-user-id", "bob")],
            Some(json!({"author": {"name": "Mallory"}})),
        )
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    let shown = app.get(&format!("/authors/{id}")).await;
    assert_eq!(shown.body["author"]["name"], "Ada");
}

#[tokio::test]
async fn enforced_owner_may_update_and_delete() {
    let app = enforced();
    let id = create_as(&app, "alice").await;
    let alice = [("x-user-id", "alice")];

    let patched = app
        .send(
            Method::PATCH,
            &format!("/authors/{id}"),
            &alice,
            Some(json!({"author": {"bio": "Countess"}})),
        )
        .await;
    assert_eq!(patched.status, StatusCode::NO_CONTENT);

    let anonymous_delete = app.delete(&format!("/authors/{id}")).await;
    assert_eq!(anonymous_delete.status, StatusCode::UNAUTHORIZED);

    let deleted = app
        .send(Method::DELETE, &format!("/authors/{id}"), &alice, None)
        .await;
    assert_eq!(deleted.status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn enforced_missing_record_is_still_not_found() {
    let app = enforced();
    let id = create_as(&app, "alice").await;
    app.send(Method::DELETE, &format!("/authors/{id}"), &[("x-user-id", "alice")], None)
        .await;

    let response = app
        .send(Method::DELETE, &format!("/authors/{id}"), &[("x-user-id", "bob")], None)
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn disabled_policy_records_known_caller_without_checking() {
    let app = app();
    let id = create_as(&app, "alice").await;

    let response = app
        .send(
            Method::PATCH,
            &format!("/authors/{id}"),
            &[("x-user-id", "bob")],
            Some(json!({"author": {"bio": "edited"}})),
        )
        .await;
    assert_eq!(response.status, StatusCode::NO_CONTENT);
}
