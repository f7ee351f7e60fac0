use serde_json::json;

use crate::helpers::{assert_json_body, spawn_app};

#[tokio::test]
async fn me_returns_200_for_valid_query_email() {
    let app = spawn_app().await;

    let response = app.post_me(Some("email=user%40example.com"), None).await;

    assert_eq!(200, response.status().as_u16());
    assert_json_body(response, json!({"status": "ok"})).await;
}

#[tokio::test]
async fn me_returns_200_for_valid_body_email() {
    let app = spawn_app().await;

    let response = app
        .post_me(None, Some(r#"{"email":"user@example.com"}"#))
        .await;

    assert_eq!(200, response.status().as_u16());
    assert_json_body(response, json!({"status": "ok"})).await;
}

#[tokio::test]
async fn me_returns_400_for_invalid_email() {
    let app = spawn_app().await;

    let test_cases = vec![
        (Some("email=not-an-email"), None, "query without an at sign"),
        (Some("email=user%40localhost"), None, "query without a dot in the domain"),
        (None, Some(r#"{"email":"user@example."}"#), "body with an empty suffix"),
        (None, Some(r#"{"email":"user name@example.com"}"#), "body with a space"),
        (None, Some(r#"{"email":42}"#), "body with a numeric email"),
        (None, Some(r#"{"email":true}"#), "body with a boolean email"),
    ];

    for (query, body, description) in test_cases {
        let response = app.post_me(query, body).await;

        assert_eq!(
            400,
            response.status().as_u16(),
            "The API did not return a 400 Bad Request for a {}.",
            description
        );
        assert_json_body(
            response,
            json!({"status": "error", "message": "Formato de email inválido"}),
        )
        .await;
    }
}

#[tokio::test]
async fn me_returns_400_when_email_is_missing() {
    let app = spawn_app().await;

    let test_cases = vec![
        (None, None, "no query and no body"),
        (None, Some("this is not json"), "a body that is not JSON"),
        (None, Some(r#"{"email":"#), "a truncated JSON body"),
        (None, Some(r#"{"name":"Ursula"}"#), "a JSON body without email"),
        (Some("email="), None, "an empty query email"),
        (Some("email="), Some(r#"{"email":""}"#), "empty emails everywhere"),
    ];

    for (query, body, description) in test_cases {
        let response = app.post_me(query, body).await;

        assert_eq!(
            400,
            response.status().as_u16(),
            "The API did not return a 400 Bad Request for {}.",
            description
        );
        assert_json_body(
            response,
            json!({"status": "error", "message": "Debe proporcionar un email"}),
        )
        .await;
    }
}

#[tokio::test]
async fn query_email_takes_precedence_over_body_email() {
    let app = spawn_app().await;

    let response = app
        .post_me(
            Some("email=not-an-email"),
            Some(r#"{"email":"user@example.com"}"#),
        )
        .await;

    assert_eq!(400, response.status().as_u16());
    assert_json_body(
        response,
        json!({"status": "error", "message": "Formato de email inválido"}),
    )
    .await;
}

#[tokio::test]
async fn empty_query_email_falls_back_to_body() {
    let app = spawn_app().await;

    let response = app
        .post_me(Some("email="), Some(r#"{"email":"user@example.com"}"#))
        .await;

    assert_eq!(200, response.status().as_u16());
    assert_json_body(response, json!({"status": "ok"})).await;
}

#[tokio::test]
async fn body_is_read_without_a_json_content_type() {
    let app = spawn_app().await;

    let response = app
        .api_client
        .post(format!("{}/me", &app.address))
        .header("Content-Type", "text/plain")
        .body(r#"{"email":"user@example.com"}"#)
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(200, response.status().as_u16());
}

#[tokio::test]
async fn me_rejects_methods_other_than_post() {
    let app = spawn_app().await;

    let response = app
        .api_client
        .get(format!("{}/me?email=user%40example.com", &app.address))
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(405, response.status().as_u16());
    assert_eq!(
        Some("POST"),
        response.headers().get("Allow").and_then(|v| v.to_str().ok())
    );
}

fn oversized_body(email: Option<&str>) -> String {
    let padding = "x".repeat(300 * 1024);
    match email {
        Some(email) => format!(r#"{{"email":"{email}","pad":"{padding}"}}"#),
        None => format!(r#"{{"pad":"{padding}"}}"#),
    }
}

#[tokio::test]
async fn valid_query_email_wins_over_an_oversized_body() {
    let app = spawn_app().await;
    let body = oversized_body(None);

    let response = app
        .post_me(Some("email=user%40example.com"), Some(&body))
        .await;

    assert_eq!(200, response.status().as_u16());
    assert_json_body(response, json!({"status": "ok"})).await;
}

#[tokio::test]
async fn oversized_body_is_treated_as_missing_email() {
    let app = spawn_app().await;
    let body = oversized_body(Some("user@example.com"));

    let response = app.post_me(None, Some(&body)).await;

    assert_eq!(400, response.status().as_u16());
    assert_json_body(
        response,
        json!({"status": "error", "message": "Debe proporcionar un email"}),
    )
    .await;
}
