use crate::domain::{Subscriber, SubscriberRepository};
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Process-local stand-in for a real store. Nothing survives a restart.
///
/// Subscribers are keyed by email; the existence check and the insert in
/// `add` run under the same write lock, so two concurrent sign-ups for one
/// email cannot both succeed.
#[derive(Debug, Default)]
pub struct InMemorySubscriberRepository {
    subscribers: RwLock<HashMap<String, Subscriber>>,
}

impl InMemorySubscriberRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SubscriberRepository for InMemorySubscriberRepository {
    async fn get_all(&self) -> Vec<Subscriber> {
        self.subscribers.read().await.values().cloned().collect()
    }

    async fn get_by_email(&self, email: &str) -> Option<Subscriber> {
        if email.is_empty() {
            return None;
        }

        self.subscribers.read().await.get(email).cloned()
    }

    #[tracing::instrument(
        name = "Adding subscriber to memory",
        skip(self, subscriber),
        fields(subscriber_email = %subscriber.email)
    )]
    async fn add(&self, subscriber: &Subscriber) -> bool {
        if subscriber.email.is_empty() {
            return false;
        }

        let mut subscribers = self.subscribers.write().await;
        if subscribers.contains_key(&subscriber.email) {
            return false;
        }

        let stored = Subscriber {
            id: Some(Uuid::new_v4().to_string()),
            ..subscriber.clone()
        };
        subscribers.insert(stored.email.clone(), stored);

        true
    }

    #[tracing::instrument(
        name = "Updating subscriber in memory",
        skip(self, subscriber),
        fields(subscriber_email = %subscriber.email)
    )]
    async fn update(&self, subscriber: &Subscriber) -> bool {
        if subscriber.email.is_empty() {
            return false;
        }

        let mut subscribers = self.subscribers.write().await;
        match subscribers.get_mut(&subscriber.email) {
            Some(existing) => {
                if existing.same_details_as(subscriber) {
                    return false;
                }
                // The stored id is kept, like a document store keeps its key.
                existing.name = subscriber.name.clone();
                true
            }
            None => {
                let stored = Subscriber {
                    id: Some(
                        subscriber
                            .id
                            .clone()
                            .unwrap_or_else(|| Uuid::new_v4().to_string()),
                    ),
                    ..subscriber.clone()
                };
                subscribers.insert(stored.email.clone(), stored);
                false
            }
        }
    }

    #[tracing::instrument(name = "Removing subscriber from memory", skip(self))]
    async fn delete(&self, email: &str) -> bool {
        if email.is_empty() {
            return false;
        }

        self.subscribers.write().await.remove(email).is_some()
    }

    async fn exists(&self, subscriber: &Subscriber) -> bool {
        if subscriber.email.is_empty() {
            return false;
        }

        self.subscribers
            .read()
            .await
            .contains_key(&subscriber.email)
    }
}
