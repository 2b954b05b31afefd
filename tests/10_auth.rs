mod common;

use anyhow::Result;
use chrono::{Duration, Utc};
use reqwest::StatusCode;
use serde_json::{json, Value};

use tvtracker_api::auth::Authenticator;
use tvtracker_api::config::AppConfig;

#[tokio::test]
async fn login_success() -> Result<()> {
    let server = common::TestServer::start().await?;

    let res = server
        .client
        .post(server.url("/auth/login"))
        .json(&json!({ "username": "ray", "password": "password123" }))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await?;
    assert!(body["access_token"].as_str().is_some_and(|t| !t.is_empty()));
    assert_eq!(body["token_type"], "bearer");
    assert_eq!(body["user"], "ray");
    Ok(())
}

#[tokio::test]
async fn login_failures_are_unauthorized() -> Result<()> {
    let server = common::TestServer::start().await?;

    for (username, password) in [("ray", "wrongpassword"), ("nonexistent", "password123")] {
        let res = server
            .client
            .post(server.url("/auth/login"))
            .json(&json!({ "username": username, "password": password }))
            .send()
            .await?;

        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        let body: Value = res.json().await?;
        assert_eq!(body["detail"], "Incorrect username or password");
    }
    Ok(())
}

#[tokio::test]
async fn login_with_incomplete_body_is_unprocessable() -> Result<()> {
    let server = common::TestServer::start().await?;

    let res = server
        .client
        .post(server.url("/auth/login"))
        .json(&json!({ "username": "ray" }))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = res.json().await?;
    assert!(body["detail"].is_string());
    Ok(())
}

#[tokio::test]
async fn root_endpoint_lists_users() -> Result<()> {
    let server = common::TestServer::start().await?;

    let body: Value = server.client.get(server.url("/")).send().await?.json().await?;
    assert_eq!(body["message"], "TV Show Tracker API");
    let users: Vec<&str> = body["users"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(Value::as_str)
        .collect();
    assert!(users.contains(&"ray"));
    assert!(users.contains(&"dana"));
    Ok(())
}

#[tokio::test]
async fn health_endpoint_responds() -> Result<()> {
    let server = common::TestServer::start().await?;

    let res = server.client.get(server.url("/health")).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await?;
    assert_eq!(body["database"], "ok");
    Ok(())
}

#[tokio::test]
async fn missing_invalid_and_expired_tokens_are_rejected() -> Result<()> {
    let server = common::TestServer::start().await?;

    let res = server.client.get(server.url("/shows")).send().await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(res.headers()["www-authenticate"], "Bearer");

    let res = server
        .client
        .get(server.url("/shows"))
        .bearer_auth("garbage.token.value")
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body: Value = res.json().await?;
    assert_eq!(body["detail"], "Could not validate credentials");

    // Same secret as the server, issued long enough ago to have expired
    let auth = Authenticator::new(&AppConfig::development().security);
    let expired = auth.issue_token_at("ray", Utc::now() - Duration::hours(2))?;
    let res = server
        .client
        .get(server.url("/shows"))
        .bearer_auth(expired)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body: Value = res.json().await?;
    assert_eq!(body["detail"], "Token has expired");
    Ok(())
}

#[tokio::test]
async fn token_from_other_secret_is_rejected() -> Result<()> {
    let server = common::TestServer::start().await?;

    let mut security = AppConfig::development().security;
    security.jwt_secret = "not-the-server-secret".to_string();
    let token = Authenticator::new(&security).login("ray", "password123")?;

    let res = server.client.get(server.url("/shows")).bearer_auth(token).send().await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn configured_users_replace_defaults() -> Result<()> {
    let mut config = AppConfig::development();
    config.security.users = tvtracker_api::config::parse_users("alice:wonderland")?;
    let server = common::TestServer::start_with(config).await?;

    assert!(server.login("alice", "wonderland").await.is_ok());
    assert!(server.login("ray", "password123").await.is_err());
    Ok(())
}
