use crate::adapters::{
    ContainerImageService, DynamoDbSubscriberRepository, InMemorySubscriberRepository,
    LocalImageService,
};
use crate::configuration::{DatabaseSettings, ImageStorageSettings, Settings};
use crate::domain::{ImageService, SubscriberRepository};
use crate::routes::{health_check, home, subscribe, subscribe_form, subscribers, unsubscribe};
use crate::services::NewsletterService;
use actix_session::storage::CookieSessionStore;
use actix_session::SessionMiddleware;
use actix_web::cookie::Key;
use actix_web::dev::{Server, Service};
use actix_web::http::header::{HeaderName, HeaderValue};
use actix_web::web::Data;
use actix_web::{web, App, HttpMessage, HttpServer};
use actix_web_flash_messages::storage::CookieMessageStore;
use actix_web_flash_messages::FlashMessagesFramework;
use aws_config::meta::region::RegionProviderChain;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_dynamodb::config::Credentials;
use secrecy::{ExposeSecret, Secret};
use std::net::TcpListener;
use std::sync::Arc;
use telemetry::CustomLevelRootSpanBuilder;
use tracing_actix_web::{RequestId, TracingLogger};

pub struct Application {
    port: u16,
    server: Server,
}

impl Application {
    /// Picks the subscriber store from the feature flags and builds the server.
    pub async fn build(configuration: Settings) -> Result<Self, anyhow::Error> {
        let repository = get_subscriber_repository(&configuration).await;

        Self::build_with_repository(configuration, repository)
    }

    pub fn build_with_repository(
        configuration: Settings,
        repository: Arc<dyn SubscriberRepository>,
    ) -> Result<Self, anyhow::Error> {
        let listener = TcpListener::bind(format!(
            "{}:{}",
            configuration.application.host_name, configuration.application.application_port
        ))?;

        let port = listener.local_addr()?.port();
        let image_service = get_image_service(&configuration.image_storage);
        let server = run(
            listener,
            repository,
            image_service,
            configuration.application.hmac_secret,
        )?;

        Ok(Self { server, port })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> Result<(), std::io::Error> {
        self.server.await
    }
}

pub async fn get_subscriber_repository(configuration: &Settings) -> Arc<dyn SubscriberRepository> {
    if configuration.feature_flags.use_dynamo_db {
        tracing::info!(
            table_name = %configuration.database.table_name,
            use_local = configuration.database.use_local,
            "Using DynamoDB repository"
        );

        let client = get_dynamo_db_client(&configuration.database).await;
        Arc::new(DynamoDbSubscriberRepository::new(
            client,
            configuration.database.table_name.clone(),
        ))
    } else {
        tracing::info!("Using in-memory repository");

        Arc::new(InMemorySubscriberRepository::new())
    }
}

pub fn get_image_service(settings: &ImageStorageSettings) -> Arc<dyn ImageService> {
    if settings.container_url.is_empty() {
        tracing::info!("Serving images from the application host");

        Arc::new(LocalImageService)
    } else {
        tracing::info!(
            container_url = %settings.container_url,
            "Serving images from a blob container"
        );

        Arc::new(ContainerImageService::new(settings.container_url.clone()))
    }
}

pub async fn get_dynamo_db_client(settings: &DatabaseSettings) -> aws_sdk_dynamodb::Client {
    let region = RegionProviderChain::default_provider().or_else(Region::new("us-east-1"));
    let sdk_config = aws_config::defaults(BehaviorVersion::latest())
        .region(region)
        .load()
        .await;

    let conf_builder = aws_sdk_dynamodb::config::Builder::from(&sdk_config);
    let conf = match settings.use_local {
        true => conf_builder
            .endpoint_url(&settings.local_endpoint)
            .credentials_provider(Credentials::new("local", "local", None, None, "local"))
            .build(),
        false => conf_builder.build(),
    };

    aws_sdk_dynamodb::Client::from_conf(conf)
}

fn run(
    listener: TcpListener,
    repository: Arc<dyn SubscriberRepository>,
    image_service: Arc<dyn ImageService>,
    hmac_secret: Secret<String>,
) -> Result<Server, anyhow::Error> {
    anyhow::ensure!(
        hmac_secret.expose_secret().len() >= 64,
        "application.hmac_secret must be at least 64 bytes long"
    );

    let secret_key = Key::from(hmac_secret.expose_secret().as_bytes());
    let message_store = CookieMessageStore::builder(secret_key.clone()).build();
    let message_framework = FlashMessagesFramework::builder(message_store).build();

    let newsletter_service = Data::new(NewsletterService::new(repository));
    let image_service: Data<dyn ImageService> = Data::from(image_service);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(message_framework.clone())
            .wrap(SessionMiddleware::new(
                CookieSessionStore::default(),
                secret_key.clone(),
            ))
            .wrap_fn(|req, srv| {
                let request_id = req.extensions().get::<RequestId>().copied();
                let res = srv.call(req);
                async move {
                    let mut res = res.await?;
                    if let Some(request_id) = request_id {
                        if let Ok(value) = HeaderValue::from_str(&request_id.to_string()) {
                            res.headers_mut()
                                .insert(HeaderName::from_static("x-request-id"), value);
                        }
                    }
                    Ok(res)
                }
            })
            .wrap(TracingLogger::<CustomLevelRootSpanBuilder>::new())
            .route("/", web::get().to(home))
            .route("/health_check", web::get().to(health_check))
            .service(
                web::scope("/newsletter")
                    .route("/subscribe", web::get().to(subscribe_form))
                    .route("/subscribe", web::post().to(subscribe))
                    .route("/subscribers", web::get().to(subscribers))
                    .route("/unsubscribe", web::post().to(unsubscribe)),
            )
            .app_data(newsletter_service.clone())
            .app_data(image_service.clone())
    })
    .listen(listener)?
    .run();

    Ok(server)
}
