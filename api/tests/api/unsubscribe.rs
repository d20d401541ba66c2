use crate::helpers::{assert_is_redirect_to, spawn_app};
use claims::{assert_none, assert_some};
use newsletter::domain::SubscriberRepository;

#[tokio::test]
async fn unsubscribing_with_the_session_token_removes_the_subscriber() {
    // Arrange
    let app = spawn_app().await;
    app.post_subscriptions("name=ada&email=ada%40test.com".into())
        .await;
    let csrf_token = app.csrf_token().await;

    // Act
    let response = app
        .post_unsubscribe(&[("email", "ada@test.com"), ("csrf_token", csrf_token.as_str())])
        .await;

    // Assert
    assert_is_redirect_to(&response, "/newsletter/subscribe");
    assert_none!(app.repository.get_by_email("ada@test.com").await);

    let html = app.get_subscribe_page_html().await;
    assert!(html.contains("Successfully unsubscribed from the newsletter"));
}

#[tokio::test]
async fn unsubscribing_without_a_token_is_rejected() {
    let app = spawn_app().await;
    app.post_subscriptions("name=ada&email=ada%40test.com".into())
        .await;
    // Start a session so there is a token to compare against.
    app.csrf_token().await;

    let response = app.post_unsubscribe(&[("email", "ada@test.com")]).await;

    assert_eq!(response.status().as_u16(), 400);
    assert_some!(app.repository.get_by_email("ada@test.com").await);
}

#[tokio::test]
async fn unsubscribing_with_a_wrong_token_is_rejected() {
    let app = spawn_app().await;
    app.post_subscriptions("name=ada&email=ada%40test.com".into())
        .await;
    app.csrf_token().await;

    let response = app
        .post_unsubscribe(&[("email", "ada@test.com"), ("csrf_token", "not-the-token")])
        .await;

    assert_eq!(response.status().as_u16(), 400);
    assert_some!(app.repository.get_by_email("ada@test.com").await);
}

#[tokio::test]
async fn a_token_from_another_session_is_rejected() {
    let app = spawn_app().await;
    app.post_subscriptions("name=ada&email=ada%40test.com".into())
        .await;
    let csrf_token = app.csrf_token().await;

    // No cookies, so no session on the server side.
    let response = reqwest::Client::new()
        .post(&format!("{}/newsletter/unsubscribe", &app.address))
        .form(&[("email", "ada@test.com"), ("csrf_token", csrf_token.as_str())])
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(response.status().as_u16(), 400);
    assert_some!(app.repository.get_by_email("ada@test.com").await);
}

#[tokio::test]
async fn unsubscribing_an_unknown_email_leaves_the_list_unchanged() {
    let app = spawn_app().await;
    app.post_subscriptions("name=ada&email=ada%40test.com".into())
        .await;
    let csrf_token = app.csrf_token().await;

    let response = app
        .post_unsubscribe(&[
            ("email", "grace@test.com"),
            ("csrf_token", csrf_token.as_str()),
        ])
        .await;

    assert_is_redirect_to(&response, "/newsletter/subscribe");
    assert_eq!(app.repository.get_all().await.len(), 1);

    let html = app.get_subscribe_page_html().await;
    assert!(!html.contains("Successfully unsubscribed"));
}
