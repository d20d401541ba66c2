use crate::services::NewsletterService;
use crate::session_state::TypedSession;
use crate::utils::e500;
use actix_web::{http::header::ContentType, web, HttpResponse};
use htmlescape::{encode_attribute, encode_minimal};

#[tracing::instrument(name = "Listing active subscribers", skip(session, newsletter_service))]
pub async fn subscribers(
    session: TypedSession,
    newsletter_service: web::Data<NewsletterService>,
) -> Result<HttpResponse, actix_web::Error> {
    let csrf_token = session.csrf_token().map_err(e500)?;

    let mut subscribers = newsletter_service.list_active().await;
    subscribers.sort_by(|a, b| a.email.cmp(&b.email));

    let rows: String = subscribers
        .iter()
        .map(|s| {
            format!(
                r#"<tr>
            <td>{name}</td>
            <td>{email}</td>
            <td>
                <form action="/newsletter/unsubscribe" method="post">
                    <input type="hidden" name="email" value="{email_attribute}">
                    <input type="hidden" name="csrf_token" value="{csrf_token}">
                    <button type="submit">Unsubscribe</button>
                </form>
            </td>
        </tr>
"#,
                name = encode_minimal(&s.name),
                email = encode_minimal(&s.email),
                email_attribute = encode_attribute(&s.email),
                csrf_token = encode_attribute(&csrf_token),
            )
        })
        .collect();

    Ok(HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta http-equiv="content-type" content="text/html; charset=utf-8">
    <title>Subscribers</title>
</head>
<body>
    <p>{count} active subscriber(s)</p>
    <table>
        <tr><th>Name</th><th>Email</th><th></th></tr>
        {rows}
    </table>
    <p><a href="/newsletter/subscribe">&lt;- Back</a></p>
</body>
</html>"#,
            count = subscribers.len(),
        )))
}
