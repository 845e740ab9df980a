use crate::domain::FieldKey;

/// JSON body sent to the contact endpoint. Only built from a form that passed validation.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct SubmissionPayload {
    name: String,
    email: String,
    subject: String,
    message: String,
}

impl SubmissionPayload {
    pub(crate) fn new(name: String, email: String, subject: String, message: String) -> Self {
        Self {
            name,
            email,
            subject,
            message,
        }
    }

    pub fn value(&self, key: FieldKey) -> &str {
        match key {
            FieldKey::Name => &self.name,
            FieldKey::Email => &self.email,
            FieldKey::Subject => &self.subject,
            FieldKey::Message => &self.message,
        }
    }
}
