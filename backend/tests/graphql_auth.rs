//! Registration, login, token refresh and bearer handling over HTTP.

#[path = "support/harness.rs"]
mod harness;

use actix_web::test;
use chrono::TimeDelta;
use harness::{
    Harness, PASSWORD, app, create_article, error_code, error_message, execute, register,
};
use rstest::rstest;
use scribe::domain::{TRACE_ID_HEADER, UserId};
use serde_json::json;

const LOGIN: &str = r#"
    mutation Login($email: String!, $password: String!) {
        login(email: $email, password: $password) { token user { email name } }
    }
"#;

const REFRESH: &str = r#"
    mutation Refresh($token: String!) {
        refreshToken(token: $token) { token refreshToken user { id } }
    }
"#;

const LOGOUT: &str = r#"
    mutation Logout($token: String!) { logout(refreshToken: $token) }
"#;

const CREATE: &str = r#"
    mutation { createArticle(title: "Hello", content: "World") { id } }
"#;

#[actix_rt::test]
async fn register_normalises_email_and_lists_the_user() {
    let harness = Harness::new();
    let app = test::init_service(app(harness.state())).await;

    register(&app, "  Ada@Example.COM ", "Ada Lovelace").await;
    let body = execute(&app, "{ users { id email name } }", json!({}), None).await;

    assert_eq!(body["data"]["users"][0]["email"], json!("ada@example.com"));
    assert_eq!(body["data"]["users"][0]["name"], json!("Ada Lovelace"));
}

#[actix_rt::test]
async fn duplicate_registration_is_a_conflict() {
    let harness = Harness::new();
    let app = test::init_service(app(harness.state())).await;
    register(&app, "ada@example.com", "Ada").await;

    let body = execute(
        &app,
        r#"mutation { register(email: "ADA@example.com", password: "long-enough", name: "Other") { token } }"#,
        json!({}),
        None,
    )
    .await;

    assert_eq!(error_code(&body), Some("CONFLICT"));
    assert_eq!(body["errors"][0]["extensions"]["http"]["status"], json!(409));
}

#[actix_rt::test]
async fn invalid_registration_reports_every_issue() {
    let harness = Harness::new();
    let app = test::init_service(app(harness.state())).await;

    let body = execute(
        &app,
        r#"mutation { register(email: "nope", password: "short", name: " ") { token } }"#,
        json!({}),
        None,
    )
    .await;

    assert_eq!(error_code(&body), Some("BAD_USER_INPUT"));
    assert_eq!(
        error_message(&body),
        Some(
            "Email must be a valid email address, Password must be at least 8 characters, Name is required"
        )
    );
}

#[rstest]
#[case("ada@example.com", "wrong-password")]
#[case("nobody@example.com", PASSWORD)]
#[actix_rt::test]
async fn bad_credentials_are_unauthenticated(#[case] email: &str, #[case] password: &str) {
    let harness = Harness::new();
    let app = test::init_service(app(harness.state())).await;
    register(&app, "ada@example.com", "Ada").await;

    let body = execute(
        &app,
        LOGIN,
        json!({ "email": email, "password": password }),
        None,
    )
    .await;

    assert_eq!(error_code(&body), Some("UNAUTHENTICATED"));
}

#[actix_rt::test]
async fn login_returns_a_working_access_token() {
    let harness = Harness::new();
    let app = test::init_service(app(harness.state())).await;
    register(&app, "ada@example.com", "Ada").await;

    let body = execute(
        &app,
        LOGIN,
        json!({ "email": "ada@example.com", "password": PASSWORD }),
        None,
    )
    .await;
    let token = body["data"]["login"]["token"].as_str().expect("token");

    create_article(&app, token, "Logged in").await;
}

#[actix_rt::test]
async fn anonymous_writes_require_authentication() {
    let harness = Harness::new();
    let app = test::init_service(app(harness.state())).await;

    let body = execute(&app, CREATE, json!({}), None).await;

    assert_eq!(error_code(&body), Some("UNAUTHENTICATED"));
    assert_eq!(error_message(&body), Some("Authentication required"));
}

#[actix_rt::test]
async fn refresh_token_cannot_be_used_as_access_token() {
    let harness = Harness::new();
    let app = test::init_service(app(harness.state())).await;
    let session = register(&app, "ada@example.com", "Ada").await;

    let body = execute(&app, CREATE, json!({}), Some(&session.refresh_token)).await;

    assert_eq!(error_code(&body), Some("UNAUTHENTICATED"));
    assert_eq!(error_message(&body), Some("Invalid token type"));
}

#[actix_rt::test]
async fn expired_access_tokens_are_reported() {
    let harness = Harness::new();
    let app = test::init_service(app(harness.state())).await;
    let session = register(&app, "ada@example.com", "Ada").await;

    harness.clock.advance(TimeDelta::minutes(16));
    let body = execute(&app, CREATE, json!({}), Some(&session.token)).await;

    assert_eq!(error_code(&body), Some("UNAUTHENTICATED"));
    assert_eq!(error_message(&body), Some("Access token expired"));
}

#[actix_rt::test]
async fn refresh_rotates_the_stored_token() {
    let harness = Harness::new();
    let app = test::init_service(app(harness.state())).await;
    let session = register(&app, "ada@example.com", "Ada").await;
    let user_id = UserId::new(session.user_id).expect("user id");

    let first = execute(
        &app,
        REFRESH,
        json!({ "token": session.refresh_token }),
        None,
    )
    .await;
    let rotated = first["data"]["refreshToken"]["refreshToken"]
        .as_str()
        .expect("rotated token")
        .to_owned();
    let replay = execute(
        &app,
        REFRESH,
        json!({ "token": session.refresh_token }),
        None,
    )
    .await;

    assert_ne!(rotated, session.refresh_token);
    assert_eq!(harness.store.refresh_token_count(user_id), 1);
    assert_eq!(error_code(&replay), Some("UNAUTHENTICATED"));
    let new_access = first["data"]["refreshToken"]["token"]
        .as_str()
        .expect("access token");
    create_article(&app, new_access, "After refresh").await;
}

#[actix_rt::test]
async fn access_token_cannot_refresh() {
    let harness = Harness::new();
    let app = test::init_service(app(harness.state())).await;
    let session = register(&app, "ada@example.com", "Ada").await;

    let body = execute(&app, REFRESH, json!({ "token": session.token }), None).await;

    assert_eq!(error_code(&body), Some("UNAUTHENTICATED"));
    assert_eq!(error_message(&body), Some("Invalid token type"));
}

#[actix_rt::test]
async fn logout_removes_the_refresh_token_once() {
    let harness = Harness::new();
    let app = test::init_service(app(harness.state())).await;
    let session = register(&app, "ada@example.com", "Ada").await;

    let first = execute(&app, LOGOUT, json!({ "token": session.refresh_token }), None).await;
    let second = execute(&app, LOGOUT, json!({ "token": session.refresh_token }), None).await;
    let refresh = execute(&app, REFRESH, json!({ "token": session.refresh_token }), None).await;

    assert_eq!(first["data"]["logout"], json!(true));
    assert_eq!(second["data"]["logout"], json!(false));
    assert_eq!(error_code(&refresh), Some("UNAUTHENTICATED"));
}

#[actix_rt::test]
async fn error_trace_id_matches_the_response_header() {
    let harness = Harness::new();
    let app = test::init_service(app(harness.state())).await;

    let res = test::call_service(&app, harness::graphql_request(CREATE, json!({}), None)).await;
    let header = res
        .headers()
        .get(TRACE_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .expect("trace id header")
        .to_owned();
    let body: serde_json::Value = test::read_body_json(res).await;

    assert_eq!(body["errors"][0]["extensions"]["traceId"], json!(header));
}

#[actix_rt::test]
async fn storage_outage_is_service_unavailable() {
    let harness = Harness::new();
    let app = test::init_service(app(harness.state())).await;
    harness.store.set_unavailable(true);

    let body = execute(&app, "{ users { id } }", json!({}), None).await;

    assert_eq!(error_code(&body), Some("SERVICE_UNAVAILABLE"));
    assert_eq!(body["errors"][0]["extensions"]["http"]["status"], json!(503));
}
