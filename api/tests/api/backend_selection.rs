use claims::{assert_none, assert_some};
use newsletter::configuration::get_configuration;
use newsletter::domain::{Subscriber, SubscriberRepository};
use newsletter::startup::get_subscriber_repository;

const USE_DYNAMO_DB: &str = "APP_FEATURE_FLAGS__USE_DYNAMO_DB";

// One test for both values: the override is process-wide, and spawn_app
// pins the flag off for every other test.
#[tokio::test]
async fn the_feature_flag_picks_the_subscriber_backend() {
    // Arrange
    std::env::remove_var(USE_DYNAMO_DB);
    let in_memory = get_configuration()
        .await
        .expect("Failed to read configuration.");

    std::env::set_var(USE_DYNAMO_DB, "true");
    let dynamo_db = get_configuration().await;
    std::env::remove_var(USE_DYNAMO_DB);
    let mut dynamo_db = dynamo_db.expect("Failed to read configuration.");

    // Nothing listens on this port, so only an in-memory store can accept writes.
    dynamo_db.database.use_local = true;
    dynamo_db.database.local_endpoint = "http://127.0.0.1:1".to_string();

    // Act
    let in_memory_repository = get_subscriber_repository(&in_memory).await;
    let dynamo_db_repository = get_subscriber_repository(&dynamo_db).await;

    // Assert
    assert!(!in_memory.feature_flags.use_dynamo_db);
    assert!(dynamo_db.feature_flags.use_dynamo_db);

    let ada = Subscriber::new("Ada", "ada@test.com");
    assert!(in_memory_repository.add(&ada).await);
    assert_some!(in_memory_repository.get_by_email("ada@test.com").await);

    assert!(!dynamo_db_repository.add(&ada).await);
    assert_none!(dynamo_db_repository.get_by_email("ada@test.com").await);
}
