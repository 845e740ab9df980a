use std::sync::Arc;

use tokio::task::JoinHandle;

use crate::configuration::Settings;
use crate::contact_client::{ContactClient, SubmissionError};
use crate::handler::{BindError, DispatchError, FormSubmissionHandler, SubmissionOutcome};
use crate::page::{FormPage, SubmitEvent};

#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error(transparent)]
    Client(#[from] SubmissionError),
    #[error(transparent)]
    Bind(#[from] BindError),
}

/// A contact form handler bound to a page, built from configuration.
pub struct Application<P: FormPage> {
    handler: Arc<FormSubmissionHandler>,
    page: Arc<P>,
}

impl<P: FormPage + 'static> Application<P> {
    pub fn build(configuration: &Settings, page: P) -> Result<Self, StartupError> {
        let settings = &configuration.contact_form;
        let client = ContactClient::new(
            &settings.base_url,
            &settings.endpoint_path,
            settings.timeout(),
        )?;
        let handler = FormSubmissionHandler::bind(&page, client, settings.redirect_url.as_str())?;
        Ok(Self {
            handler: Arc::new(handler),
            page: Arc::new(page),
        })
    }

    pub fn page(&self) -> &Arc<P> {
        &self.page
    }

    pub fn submit(
        &self,
        event: &mut SubmitEvent,
    ) -> Result<Option<JoinHandle<SubmissionOutcome>>, DispatchError> {
        self.handler.dispatch(event, Arc::clone(&self.page))
    }
}
