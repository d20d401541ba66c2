/// A person registered to receive the newsletter.
///
/// The email is the natural key: no two stored subscribers share one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subscriber {
    /// Assigned by the repository on insert, `None` until then.
    pub id: Option<String>,
    pub name: String,
    pub email: String,
}

impl Subscriber {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            email: email.into(),
        }
    }

    /// Same name and email, whatever the ids.
    pub fn same_details_as(&self, other: &Subscriber) -> bool {
        self.name == other.name && self.email == other.email
    }
}
