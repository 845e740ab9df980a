use std::sync::Arc;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::contact_client::{ContactClient, ContactReply, SubmissionError};
use crate::domain::{ContactForm, FieldKey, SubmissionPayload, ValidationReport};
use crate::page::{FormPage, SubmitEvent, CONTACT_FORM_ID, ERROR_MESSAGE_CLASS};

#[derive(Debug, thiserror::Error)]
pub enum BindError {
    #[error("Element `{0}` is missing from the page")]
    MissingElement(String),
}

#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("No tokio runtime to deliver the contact form on")]
    NoRuntime(#[source] tokio::runtime::TryCurrentError),
}

/// Result of the synchronous phase of a submission.
#[derive(Debug)]
pub enum Submission {
    /// The event was raised by another form.
    Ignored,
    /// At least one required field was empty. The inline messages are already on the page.
    Rejected(ValidationReport),
    Accepted(SubmissionPayload),
}

/// Result of the asynchronous phase of a submission.
#[derive(Debug)]
pub enum SubmissionOutcome {
    Delivered { reply: ContactReply },
    Failed(SubmissionError),
}

#[derive(Debug)]
struct BoundField {
    key: FieldKey,
    input_id: String,
    error_id: String,
}

#[derive(Debug)]
pub struct FormSubmissionHandler {
    form_id: String,
    fields: Vec<BoundField>,
    client: ContactClient,
    redirect_url: String,
}

impl FormSubmissionHandler {
    /// Resolves every element the handler needs once, up front.
    pub fn bind<P: FormPage + ?Sized>(
        page: &P,
        client: ContactClient,
        redirect_url: impl Into<String>,
    ) -> Result<Self, BindError> {
        let form_id = CONTACT_FORM_ID.to_owned();
        if !page.has_element(&form_id) {
            return Err(BindError::MissingElement(form_id));
        }
        let mut fields = Vec::with_capacity(FieldKey::ALL.len());
        for key in FieldKey::ALL {
            let input_id = key.as_str().to_owned();
            let error_id = key.error_element_id();
            for id in [&input_id, &error_id] {
                if !page.has_element(id) {
                    return Err(BindError::MissingElement(id.to_owned()));
                }
            }
            fields.push(BoundField {
                key,
                input_id,
                error_id,
            });
        }
        Ok(Self {
            form_id,
            fields,
            client,
            redirect_url: redirect_url.into(),
        })
    }

    /// Suppresses the default submission, clears stale messages and validates.
    /// Nothing is sent from here: an accepted payload is handed back for [`Self::deliver`].
    #[tracing::instrument(
        name = "Handling contact form submission",
        skip(self, event, page),
        fields(form_id = %event.form_id())
    )]
    pub fn handle_submit<P: FormPage + ?Sized>(
        &self,
        event: &mut SubmitEvent,
        page: &P,
    ) -> Submission {
        if event.form_id() != self.form_id {
            tracing::debug!("Ignoring submit event raised by another form");
            return Submission::Ignored;
        }
        event.prevent_default();

        page.clear_error_messages(ERROR_MESSAGE_CLASS);

        let mut form = ContactForm::default();
        for field in &self.fields {
            // An input removed after binding reads as empty.
            let value = page.input_value(&field.input_id).unwrap_or_default();
            form.set_value(field.key, value);
        }

        match SubmissionPayload::try_from(form) {
            Ok(payload) => Submission::Accepted(payload),
            Err(report) => {
                for (key, message) in report.messages() {
                    if let Some(field) = self.fields.iter().find(|field| field.key == key) {
                        page.set_error_text(&field.error_id, &message);
                    }
                }
                tracing::info!(%report, "Contact form rejected");
                Submission::Rejected(report)
            }
        }
    }

    /// Sends the payload, then alerts the reply and redirects.
    /// A failed request is logged and nothing is shown to the user.
    #[tracing::instrument(
        name = "Delivering contact form",
        skip(self, payload, page),
        fields(request_id = %Uuid::new_v4())
    )]
    pub async fn deliver<P: FormPage + ?Sized>(
        &self,
        payload: SubmissionPayload,
        page: &P,
    ) -> SubmissionOutcome {
        match self.client.send(&payload).await {
            Ok(reply) => {
                page.alert(&reply.body);
                page.navigate(&self.redirect_url);
                SubmissionOutcome::Delivered { reply }
            }
            Err(e) => {
                tracing::error!(error.cause_chain = ?e, "Failed to deliver contact form");
                SubmissionOutcome::Failed(e)
            }
        }
    }

    /// Event-listener entry point. Validation runs before this returns; delivery is
    /// spawned on the current tokio runtime and not awaited.
    ///
    /// Returns `Ok(None)` when nothing is sent. An accepted form with no runtime to
    /// spawn on yields [`DispatchError::NoRuntime`]; the page keeps its cleared messages.
    pub fn dispatch<P: FormPage + 'static>(
        self: &Arc<Self>,
        event: &mut SubmitEvent,
        page: Arc<P>,
    ) -> Result<Option<JoinHandle<SubmissionOutcome>>, DispatchError> {
        match self.handle_submit(event, &*page) {
            Submission::Accepted(payload) => {
                let runtime = Handle::try_current().map_err(|e| {
                    tracing::error!(error.cause_chain = ?e, "Failed to dispatch contact form");
                    DispatchError::NoRuntime(e)
                })?;
                let handler = Arc::clone(self);
                Ok(Some(runtime.spawn(async move {
                    handler.deliver(payload, &*page).await
                })))
            }
            Submission::Rejected(_) | Submission::Ignored => Ok(None),
        }
    }
}
