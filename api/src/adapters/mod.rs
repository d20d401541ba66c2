pub mod container_image_service;
pub mod dynamodb_subscriber_repository;
pub mod in_memory_subscriber_repository;
pub mod local_image_service;

pub use crate::adapters::container_image_service::ContainerImageService;
pub use crate::adapters::dynamodb_subscriber_repository::DynamoDbSubscriberRepository;
pub use crate::adapters::in_memory_subscriber_repository::InMemorySubscriberRepository;
pub use crate::adapters::local_image_service::LocalImageService;
