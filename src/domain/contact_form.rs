use crate::domain::{FieldKey, SubmissionPayload};

/// Raw field values as typed by the user. Nothing is trimmed here.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Deserialize)]
pub struct ContactForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub message: String,
}

impl ContactForm {
    pub fn value(&self, key: FieldKey) -> &str {
        match key {
            FieldKey::Name => &self.name,
            FieldKey::Email => &self.email,
            FieldKey::Subject => &self.subject,
            FieldKey::Message => &self.message,
        }
    }

    pub fn set_value(&mut self, key: FieldKey, value: String) {
        match key {
            FieldKey::Name => self.name = value,
            FieldKey::Email => self.email = value,
            FieldKey::Subject => self.subject = value,
            FieldKey::Message => self.message = value,
        }
    }

    /// Presence check only: every field is visited, even after a failure.
    pub fn validate(&self) -> ValidationReport {
        let missing = FieldKey::ALL
            .into_iter()
            .filter(|key| self.value(*key).trim().is_empty())
            .collect();
        ValidationReport { missing }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    missing: Vec<FieldKey>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.missing.is_empty()
    }

    pub fn missing_fields(&self) -> &[FieldKey] {
        &self.missing
    }

    /// `(field, "<Label> is required.")` for every failed field, in form order.
    pub fn messages(&self) -> impl Iterator<Item = (FieldKey, String)> + '_ {
        self.missing.iter().map(|key| (*key, key.required_message()))
    }
}

impl std::fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let labels: Vec<&str> = self.missing.iter().map(FieldKey::label).collect();
        write!(f, "missing required fields: {}", labels.join(", "))
    }
}

impl TryFrom<ContactForm> for SubmissionPayload {
    type Error = ValidationReport;
    fn try_from(form: ContactForm) -> Result<Self, Self::Error> {
        let report = form.validate();
        if !report.is_valid() {
            return Err(report);
        }
        Ok(SubmissionPayload::new(
            form.name,
            form.email,
            form.subject,
            form.message,
        ))
    }
}
