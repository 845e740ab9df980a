/// The four required inputs of the contact form, in validation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKey {
    Name,
    Email,
    Subject,
    Message,
}

impl FieldKey {
    pub const ALL: [FieldKey; 4] = [
        FieldKey::Name,
        FieldKey::Email,
        FieldKey::Subject,
        FieldKey::Message,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKey::Name => "name",
            FieldKey::Email => "email",
            FieldKey::Subject => "subject",
            FieldKey::Message => "message",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FieldKey::Name => "Name",
            FieldKey::Email => "Email",
            FieldKey::Subject => "Subject",
            FieldKey::Message => "Message",
        }
    }

    /// Id of the element that shows this field's inline error.
    pub fn error_element_id(&self) -> String {
        format!("{}-error", self.as_str())
    }

    pub fn required_message(&self) -> String {
        format!("{} is required.", self.label())
    }
}

impl std::fmt::Display for FieldKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
