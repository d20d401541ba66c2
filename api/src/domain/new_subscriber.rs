use crate::domain::subscriber::Subscriber;
use crate::domain::subscriber_email::SubscriberEmail;
use crate::domain::subscriber_name::SubscriberName;

pub struct NewSubscriber {
    pub email: SubscriberEmail,
    pub name: SubscriberName,
}

impl From<NewSubscriber> for Subscriber {
    fn from(value: NewSubscriber) -> Self {
        Subscriber::new(value.name.inner(), value.email.inner())
    }
}
