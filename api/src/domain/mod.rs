mod image_service;
mod new_subscriber;
mod operation_result;
mod subscriber;
pub mod subscriber_email;
pub mod subscriber_name;
pub mod subscriber_repository;

pub use crate::domain::image_service::ImageService;
pub use crate::domain::new_subscriber::NewSubscriber;
pub use crate::domain::operation_result::OperationResult;
pub use crate::domain::subscriber::Subscriber;
pub use crate::domain::subscriber_repository::SubscriberRepository;
