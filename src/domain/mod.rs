mod contact_form;
mod field_key;
mod submission_payload;

pub use contact_form::{ContactForm, ValidationReport};
pub use field_key::FieldKey;
pub use submission_payload::SubmissionPayload;
