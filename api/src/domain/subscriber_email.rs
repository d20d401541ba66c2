use once_cell::sync::Lazy;
use regex::Regex;
use validator::validate_email;

/// Requires a top level domain of at least two letters, which the generic
/// email check lets through (`ursula@localhost`).
static EMAIL_SHAPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
        .expect("email pattern is a valid regex")
});

#[derive(Debug)]
pub struct SubscriberEmail(String);

impl SubscriberEmail {
    pub fn parse(s: String) -> Result<SubscriberEmail, String> {
        if s.trim().is_empty() {
            return Err("Email is required".to_string());
        }

        if !validate_email(&s) {
            return Err(format!("{} is not a valid email address", s));
        }

        if !EMAIL_SHAPE.is_match(&s) {
            return Err("Missing top level domain".to_string());
        }

        Ok(Self(s))
    }

    pub fn inner(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for SubscriberEmail {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SubscriberEmail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}
