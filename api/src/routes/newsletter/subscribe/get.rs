use super::{subscribe_page, BANNER_IMAGE};
use crate::domain::ImageService;
use crate::utils::request_origin;
use actix_web::{http::header::ContentType, web, HttpRequest, HttpResponse};
use actix_web_flash_messages::IncomingFlashMessages;
use htmlescape::encode_minimal;

pub async fn subscribe_form(
    request: HttpRequest,
    flash_messages: IncomingFlashMessages,
    image_service: web::Data<dyn ImageService>,
) -> HttpResponse {
    let messages_html: String = flash_messages
        .iter()
        .map(|m| format!("<p><i>{}</i></p>\n", encode_minimal(m.content())))
        .collect();
    let banner_url = image_service.image_url(&request_origin(&request), BANNER_IMAGE);

    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(subscribe_page(&banner_url, "", "", &messages_html, None))
}
