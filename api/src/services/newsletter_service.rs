//! Newsletter use cases.
//!
//! The repository folds "already there", "not there" and backend failures
//! into the same `false`/`None`; this service looks records up first so each
//! failure gets its own message.

use crate::domain::{OperationResult, Subscriber, SubscriberRepository};
use std::sync::Arc;

pub const INVALID_SUBSCRIBER: &str = "Invalid subscriber information";
pub const ALREADY_SUBSCRIBED: &str = "Email is already subscribed";
pub const ADD_FAILED: &str = "Failed to add subscriber";
pub const INVALID_EMAIL: &str = "Invalid email";
pub const NOT_FOUND: &str = "Email not found in the list";
pub const REMOVE_FAILED: &str = "Failed to remove subscriber";
pub const UNSUBSCRIBED: &str = "Successfully unsubscribed from the newsletter";

#[derive(Clone)]
pub struct NewsletterService {
    repository: Arc<dyn SubscriberRepository>,
}

impl NewsletterService {
    pub fn new(repository: Arc<dyn SubscriberRepository>) -> Self {
        Self { repository }
    }

    #[tracing::instrument(
        name = "Signing up for the newsletter",
        skip(self, subscriber),
        fields(subscriber_email = %subscriber.email)
    )]
    pub async fn sign_up(&self, subscriber: Subscriber) -> OperationResult {
        if subscriber.email.trim().is_empty() {
            return OperationResult::failure(INVALID_SUBSCRIBER);
        }

        if self
            .repository
            .get_by_email(&subscriber.email)
            .await
            .is_some()
        {
            return OperationResult::failure(ALREADY_SUBSCRIBED);
        }

        if !self.repository.add(&subscriber).await {
            return OperationResult::failure(ADD_FAILED);
        }

        OperationResult::success(format!("Welcome to the newsletter {}!", subscriber.name))
    }

    #[tracing::instrument(name = "Opting out of the newsletter", skip(self))]
    pub async fn opt_out(&self, email: &str) -> OperationResult {
        if email.is_empty() {
            return OperationResult::failure(INVALID_EMAIL);
        }

        if self.repository.get_by_email(email).await.is_none() {
            return OperationResult::failure(NOT_FOUND);
        }

        if !self.repository.delete(email).await {
            return OperationResult::failure(REMOVE_FAILED);
        }

        OperationResult::success(UNSUBSCRIBED)
    }

    pub async fn list_active(&self) -> Vec<Subscriber> {
        self.repository.get_all().await
    }
}
