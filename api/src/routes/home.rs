use crate::utils::see_other;
use actix_web::HttpResponse;

pub async fn home() -> HttpResponse {
    see_other("/newsletter/subscribe")
}
