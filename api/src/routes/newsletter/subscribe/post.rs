use super::{subscribe_page, BANNER_IMAGE};
use crate::domain::subscriber_email::SubscriberEmail;
use crate::domain::subscriber_name::SubscriberName;
use crate::domain::{ImageService, NewSubscriber, Subscriber};
use crate::services::NewsletterService;
use crate::utils::{request_origin, see_other};
use actix_web::{http::header::ContentType, web, HttpRequest, HttpResponse};
use actix_web_flash_messages::FlashMessage;

#[derive(serde::Deserialize)]
pub struct FormData {
    pub email: String,
    pub name: String,
}

impl TryFrom<FormData> for NewSubscriber {
    type Error = String;

    fn try_from(value: FormData) -> Result<Self, Self::Error> {
        let name = SubscriberName::parse(value.name)?;
        let email = SubscriberEmail::parse(value.email)?;

        Ok(NewSubscriber { email, name })
    }
}

#[tracing::instrument(
    name = "Adding a new subscriber",
    skip(request, form, newsletter_service, image_service),
    fields(
        subscriber_email = %form.email,
        subscriber_name = %form.name)
)]
pub async fn subscribe(
    request: HttpRequest,
    form: web::Form<FormData>,
    newsletter_service: web::Data<NewsletterService>,
    image_service: web::Data<dyn ImageService>,
) -> HttpResponse {
    let banner_url = image_service.image_url(&request_origin(&request), BANNER_IMAGE);
    let form = form.into_inner();
    let (name, email) = (form.name.clone(), form.email.clone());

    let new_subscriber: NewSubscriber = match form.try_into() {
        Ok(subscriber) => subscriber,
        Err(reason) => {
            tracing::info!(%reason, "Rejected an invalid subscription form");
            return redisplay_form(&banner_url, &name, &email, &reason);
        }
    };

    let result = newsletter_service
        .sign_up(Subscriber::from(new_subscriber))
        .await;
    if !result.is_success() {
        tracing::info!(reason = %result.message(), "Subscription was refused");
        return redisplay_form(&banner_url, &name, &email, result.message());
    }

    tracing::info!("New subscription - Name: {} Email: {}", name, email);

    FlashMessage::info(format!(
        "Thank you for subscribing, {}! You will receive our newsletter at {}",
        name, email
    ))
    .send();
    see_other("/newsletter/subscribe")
}

fn redisplay_form(banner_url: &str, name: &str, email: &str, error: &str) -> HttpResponse {
    HttpResponse::BadRequest()
        .content_type(ContentType::html())
        .body(subscribe_page(banner_url, name, email, "", Some(error)))
}
