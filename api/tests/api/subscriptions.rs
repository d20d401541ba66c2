use crate::helpers::{assert_is_redirect_to, spawn_app};
use claims::{assert_none, assert_some};
use newsletter::domain::SubscriberRepository;

#[tokio::test]
async fn subscribe_redirects_back_to_the_form_for_valid_form_data() {
    // Arrange
    let app = spawn_app().await;
    let body = "name=james&email=james%40test.com";

    // Act
    let response = app.post_subscriptions(body.into()).await;

    // Assert
    assert_is_redirect_to(&response, "/newsletter/subscribe");
}

#[tokio::test]
async fn subscribe_persists_the_new_subscriber() {
    // Arrange
    let app = spawn_app().await;
    let body = "name=james&email=james%40test.com";

    // Act
    app.post_subscriptions(body.into()).await;

    // Assert
    let saved = assert_some!(app.repository.get_by_email("james@test.com").await);
    assert_eq!(saved.name, "james");
    assert_some!(saved.id);
}

#[tokio::test]
async fn the_thank_you_message_is_shown_once() {
    let app = spawn_app().await;

    app.post_subscriptions("name=james&email=james%40test.com".into())
        .await;

    let html = app.get_subscribe_page_html().await;
    assert!(html.contains(
        "Thank you for subscribing, james! You will receive our newsletter at james@test.com"
    ));

    let html = app.get_subscribe_page_html().await;
    assert!(!html.contains("Thank you for subscribing"));
}

#[tokio::test]
async fn the_thank_you_message_is_html_escaped() {
    let app = spawn_app().await;

    let response = app
        .post_subscriptions("name=%3Cb%3Ejames%3C%2Fb%3E&email=james%40test.com".into())
        .await;
    assert_is_redirect_to(&response, "/newsletter/subscribe");

    let html = app.get_subscribe_page_html().await;
    assert!(html.contains("&lt;b&gt;james&lt;/b&gt;"));
    assert!(!html.contains("<b>james</b>"));
}

#[tokio::test]
async fn subscribe_should_return_a_400_when_fields_are_present_but_invalid() {
    let test_app = spawn_app().await;

    let test_cases = vec![
        ("name=&email=ursula_le_guin%40gmail.com", "Empty name"),
        ("name=Ursula&email=", "Empty email"),
        ("name=Ursula&email=definitely-not-an-email", "invalid email"),
        ("name=Ursula&email=ursula%40localhost", "email without top level domain"),
        (
            "name=Ursula%20Kroeber%20Le%20Guin&email=ursula_le_guin%40gmail.com",
            "name longer than 20 characters",
        ),
    ];

    for (invalid_body, error_message) in test_cases {
        let response = test_app.post_subscriptions(invalid_body.into()).await;

        assert_eq!(
            400,
            response.status().as_u16(),
            "The API did not return a 400 when the payload was {}",
            error_message
        );
    }

    assert!(test_app.repository.get_all().await.is_empty());
}

#[tokio::test]
async fn subscribe_should_return_400_when_data_is_missing() {
    let test_app = spawn_app().await;

    let test_cases = vec![
        ("name=james", "missing the email"),
        ("email=james%40test.com", "missing the name"),
        ("", "Missing both name and email"),
    ];

    for (invalid_body, error_message) in test_cases {
        let response = test_app.post_subscriptions(invalid_body.into()).await;

        assert_eq!(
            400,
            response.status().as_u16(),
            "The API did not fail with 400 Bad Request when the payload was {}.",
            error_message
        );
    }
}

#[tokio::test]
async fn a_rejected_form_is_shown_again_with_the_reason_and_the_submitted_values() {
    let app = spawn_app().await;

    let response = app
        .post_subscriptions("name=Ursula&email=ursula%40localhost".into())
        .await;

    assert_eq!(response.status().as_u16(), 400);
    let html = response.text().await.unwrap();
    assert!(html.contains("Missing top level domain"));
    assert!(html.contains(r#"value="Ursula""#));
    assert!(html.contains(r#"value="ursula@localhost""#));
}

#[tokio::test]
async fn subscribing_twice_with_the_same_email_is_rejected() {
    let app = spawn_app().await;

    let first = app
        .post_subscriptions("name=james&email=james%40test.com".into())
        .await;
    let second = app
        .post_subscriptions("name=jim&email=james%40test.com".into())
        .await;

    assert_is_redirect_to(&first, "/newsletter/subscribe");
    assert_eq!(second.status().as_u16(), 400);
    assert!(second
        .text()
        .await
        .unwrap()
        .contains("Email is already subscribed"));

    let subscribers = app.repository.get_all().await;
    assert_eq!(subscribers.len(), 1);
    assert_eq!(subscribers[0].name, "james");
}

#[tokio::test]
async fn the_subscribe_form_is_served() {
    let app = spawn_app().await;

    let response = app.get_subscribe_page().await;

    assert_eq!(response.status().as_u16(), 200);
    let html = response.text().await.unwrap();
    assert!(html.contains(r#"<form action="/newsletter/subscribe" method="post">"#));
    assert_none!(html.find(r#"class="error""#));
}

#[tokio::test]
async fn the_subscribe_form_shows_the_banner_from_the_app_host() {
    let app = spawn_app().await;

    let html = app.get_subscribe_page_html().await;

    assert!(html.contains(&format!(
        r#"<img src="http://127.0.0.1:{}/images/newsletter-banner.png""#,
        app.port
    )));
}
