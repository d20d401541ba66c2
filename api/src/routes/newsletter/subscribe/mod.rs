mod get;
mod post;

pub use get::subscribe_form;
pub use post::{subscribe, FormData};

use htmlescape::encode_minimal;

const BANNER_IMAGE: &str = "newsletter-banner.png";

/// The sign-up page, pre-filled with `name` and `email`.
///
/// `messages_html` must already be escaped; `error` is escaped here.
pub(crate) fn subscribe_page(
    banner_url: &str,
    name: &str,
    email: &str,
    messages_html: &str,
    error: Option<&str>,
) -> String {
    let error_html = error
        .map(|e| format!(r#"<p class="error">{}</p>"#, encode_minimal(e)))
        .unwrap_or_default();
    let name = encode_minimal(name);
    let email = encode_minimal(email);
    let banner_url = encode_minimal(banner_url);

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta http-equiv="content-type" content="text/html; charset=utf-8">
    <title>Subscribe to our newsletter</title>
</head>
<body>
    <img src="{banner_url}" alt="Newsletter">
    {messages_html}
    <form action="/newsletter/subscribe" method="post">
        {error_html}
        <label>Name
            <input type="text" placeholder="Enter your name" name="name" maxlength="20" value="{name}">
        </label>
        <label>Email
            <input type="email" placeholder="Enter your email" name="email" value="{email}">
        </label>
        <button type="submit">Subscribe</button>
    </form>
    <p><a href="/newsletter/subscribers">See who is subscribed</a></p>
</body>
</html>"#,
    )
}
