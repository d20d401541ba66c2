/// Outcome of a newsletter operation: a success flag and a message meant for
/// the person on the other side of the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationResult {
    is_success: bool,
    message: String,
}

impl OperationResult {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            is_success: true,
            message: message.into(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            is_success: false,
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.is_success
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
