use crate::services::NewsletterService;
use crate::session_state::TypedSession;
use crate::utils::{error_chain_fmt, see_other};
use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse, ResponseError};
use actix_web_flash_messages::FlashMessage;
use anyhow::Context;

#[derive(thiserror::Error)]
pub enum UnsubscribeError {
    #[error("The anti-forgery token is missing or does not match the session")]
    InvalidToken,
    #[error(transparent)]
    UnexpectedError(#[from] anyhow::Error),
}

impl std::fmt::Debug for UnsubscribeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl ResponseError for UnsubscribeError {
    fn status_code(&self) -> StatusCode {
        match self {
            UnsubscribeError::InvalidToken => StatusCode::BAD_REQUEST,
            UnsubscribeError::UnexpectedError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(serde::Deserialize)]
pub struct UnsubscribeFormData {
    pub email: String,
    #[serde(default)]
    pub csrf_token: String,
}

#[tracing::instrument(
    name = "Unsubscribing",
    skip(form, session, newsletter_service),
    fields(subscriber_email = %form.email)
)]
pub async fn unsubscribe(
    form: web::Form<UnsubscribeFormData>,
    session: TypedSession,
    newsletter_service: web::Data<NewsletterService>,
) -> Result<HttpResponse, UnsubscribeError> {
    let expected_token = session
        .get_csrf_token()
        .context("Failed to read the anti-forgery token from the session")?;

    match expected_token {
        Some(token) if !form.csrf_token.is_empty() && token == form.csrf_token => {}
        _ => return Err(UnsubscribeError::InvalidToken),
    }

    let result = newsletter_service.opt_out(&form.email).await;
    if result.is_success() {
        FlashMessage::info(result.message()).send();
    } else {
        tracing::warn!(reason = %result.message(), "Opt-out was refused");
    }

    Ok(see_other("/newsletter/subscribe"))
}
