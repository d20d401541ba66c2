use unicode_segmentation::UnicodeSegmentation;

const MAX_NAME_LENGTH: usize = 20;

#[derive(Debug)]
pub struct SubscriberName(String);

impl SubscriberName {
    pub fn parse(s: String) -> Result<SubscriberName, String> {
        if s.trim().is_empty() {
            return Err("Name is required".to_string());
        }

        if s.graphemes(true).count() > MAX_NAME_LENGTH {
            return Err(format!(
                "Name must be less than {} characters",
                MAX_NAME_LENGTH
            ));
        }

        Ok(Self(s))
    }

    pub fn inner(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for SubscriberName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
