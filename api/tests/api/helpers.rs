use newsletter::adapters::InMemorySubscriberRepository;
use newsletter::configuration::get_configuration;
use newsletter::startup::Application;
use once_cell::sync::Lazy;
use secrecy::Secret;
use std::sync::Arc;
use telemetry::{get_subscriber, init_subscriber, init_tracer, TelemetrySettings, TracerProvider};

// The provider has to outlive every test, otherwise the tracer hands out dead spans.
static TRACING: Lazy<TracerProvider> = Lazy::new(|| {
    let default_filter = "info".to_string();
    let subscriber_name = "test".to_string();
    let telemetry = TelemetrySettings {
        otlp_endpoint: String::new(),
        honeycomb_api_key: Secret::new(String::new()),
        dataset_name: "test-newsletter".to_string(),
    };

    let trace_provider = init_tracer(&telemetry).expect("Failed to build the tracer provider");

    if std::env::var("TEST_LOG").is_ok() {
        let subscriber = get_subscriber(
            subscriber_name,
            default_filter,
            std::io::stdout,
            &telemetry,
            &trace_provider,
        );
        init_subscriber(subscriber);
    } else {
        let subscriber = get_subscriber(
            subscriber_name,
            default_filter,
            std::io::sink,
            &telemetry,
            &trace_provider,
        );
        init_subscriber(subscriber);
    }

    trace_provider
});

pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub repository: Arc<InMemorySubscriberRepository>,
    /// Keeps the session and flash cookies between requests, never follows redirects.
    pub api_client: reqwest::Client,
}

impl TestApp {
    pub async fn post_subscriptions(&self, body: String) -> reqwest::Response {
        self.api_client
            .post(&format!("{}/newsletter/subscribe", &self.address))
            .header("Content-Type", "application/x-www-form-urlencoded")
            .body(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn get_subscribe_page(&self) -> reqwest::Response {
        self.api_client
            .get(&format!("{}/newsletter/subscribe", &self.address))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn get_subscribe_page_html(&self) -> String {
        self.get_subscribe_page().await.text().await.unwrap()
    }

    pub async fn get_subscribers_page(&self) -> reqwest::Response {
        self.api_client
            .get(&format!("{}/newsletter/subscribers", &self.address))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn get_subscribers_page_html(&self) -> String {
        self.get_subscribers_page().await.text().await.unwrap()
    }

    pub async fn post_unsubscribe<Body>(&self, body: &Body) -> reqwest::Response
    where
        Body: serde::Serialize,
    {
        self.api_client
            .post(&format!("{}/newsletter/unsubscribe", &self.address))
            .form(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Loads the subscribers page and pulls the anti-forgery token out of its forms.
    pub async fn csrf_token(&self) -> String {
        let html = self.get_subscribers_page_html().await;
        extract_csrf_token(&html)
    }
}

pub fn extract_csrf_token(html: &str) -> String {
    let marker = r#"name="csrf_token" value=""#;
    let start = html.find(marker).expect("No csrf token in the page") + marker.len();
    let end = html[start..].find('"').unwrap() + start;

    html[start..end].to_string()
}

pub fn assert_is_redirect_to(response: &reqwest::Response, location: &str) {
    assert_eq!(response.status().as_u16(), 303);
    assert_eq!(response.headers().get("Location").unwrap(), location);
}

pub async fn spawn_app() -> TestApp {
    Lazy::force(&TRACING);

    let configuration = {
        let mut c = get_configuration()
            .await
            .expect("Failed to read configuration.");
        // Use a random OS port
        c.application.application_port = 0;
        c.feature_flags.use_dynamo_db = false;
        c
    };

    let repository = Arc::new(InMemorySubscriberRepository::new());

    let application = Application::build_with_repository(configuration, repository.clone())
        .expect("Failed to build application.");
    let application_port = application.port();
    let _ = tokio::spawn(application.run_until_stopped());

    let api_client = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .cookie_store(true)
        .build()
        .unwrap();

    TestApp {
        address: format!("http://127.0.0.1:{}", application_port),
        port: application_port,
        repository,
        api_client,
    }
}
