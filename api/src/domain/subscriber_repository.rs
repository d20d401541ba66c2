use crate::domain::subscriber::Subscriber;
use async_trait::async_trait;

/// Storage contract for subscribers, keyed by email.
///
/// Implementations never surface errors: invalid input, "already there",
/// "not there" and backend failures all come back as `false`, `None` or an
/// empty list. Callers that need to tell these apart check existence first.
#[async_trait]
pub trait SubscriberRepository: Send + Sync {
    /// Every stored subscriber, in no particular order.
    async fn get_all(&self) -> Vec<Subscriber>;

    /// `None` for an empty email or when nobody is subscribed with it.
    async fn get_by_email(&self, email: &str) -> Option<Subscriber>;

    /// Inserts the subscriber under a freshly assigned id.
    ///
    /// Returns `false` when the email is empty, already taken, or the write
    /// fails.
    async fn add(&self, subscriber: &Subscriber) -> bool;

    /// Replaces the subscriber stored under the same email, inserting it if
    /// missing.
    ///
    /// Only a change to an existing record counts as success: inserting a new
    /// one, or replacing a record with identical data, returns `false`.
    async fn update(&self, subscriber: &Subscriber) -> bool;

    /// Removes the subscriber with this email; `false` if nothing was removed.
    async fn delete(&self, email: &str) -> bool;

    async fn exists(&self, subscriber: &Subscriber) -> bool;
}
